// librtls/librtls/src/firmware/block.rs

//! Firmware image chunking and the 77-byte device-bound block.
//!
//! Layout: anchor id(6) + header(1) + count low(1) + number low(1)
//!         + data slot(64) + checksum(4, BE)
//!
//! Block count and block number (block index + 1) are 9-bit values. The
//! low bytes carry 7 usable bits; bits 7 and 8 of each value travel as a
//! 2-bit carry in the header byte next to the firmware tag nibble.

use crate::bitfield::{self, BitField};
use crate::constants::{
    DEVICE_ID_LEN, FIRMWARE_BLOCK_DATA_LEN, FIRMWARE_BLOCK_LEN, FIRMWARE_BLOCK_TAG,
    FIRMWARE_MAX_BLOCKS, FIRMWARE_MAX_IMAGE_LEN,
};
use crate::protocol::checksum::sum32;
use crate::protocol::parser;
use crate::types::DeviceId;
use crate::{Error, Result};

/// Header byte layout, LSB first: number carry(2) count carry(2) tag(4)
const HEADER_FIELDS: [BitField; 3] = bitfield::contiguous(8, [2, 2, 4]);

pub const NUMBER_CARRY: BitField = HEADER_FIELDS[0];
pub const COUNT_CARRY: BitField = HEADER_FIELDS[1];
pub const TAG: BitField = HEADER_FIELDS[2];

const LOW_BITS: u32 = 7;
const LOW_MASK: u16 = 0x7F;

const HEADER_OFFSET: usize = DEVICE_ID_LEN;
const COUNT_OFFSET: usize = HEADER_OFFSET + 1;
const NUMBER_OFFSET: usize = COUNT_OFFSET + 1;
const DATA_OFFSET: usize = NUMBER_OFFSET + 1;
const CHECKSUM_OFFSET: usize = DATA_OFFSET + FIRMWARE_BLOCK_DATA_LEN;

/// Number of 64-byte blocks needed for an image of `len` bytes.
pub fn block_count_for(len: usize) -> usize {
    len.div_ceil(FIRMWARE_BLOCK_DATA_LEN)
}

/// Encode block `block_index` (0-based) of `image` for `anchor_id`.
///
/// Preconditions, checked: `1 <= block_count <= 511`,
/// `block_index < block_count`, and the block starts inside the image.
pub fn encode_block(
    anchor_id: &DeviceId,
    block_count: usize,
    block_index: usize,
    image: &[u8],
) -> Result<[u8; FIRMWARE_BLOCK_LEN]> {
    let start = block_index.saturating_mul(FIRMWARE_BLOCK_DATA_LEN);
    if block_count == 0
        || block_count > FIRMWARE_MAX_BLOCKS
        || block_index >= block_count
        || start >= image.len()
    {
        return Err(Error::BlockOutOfRange {
            index: block_index,
            count: block_count,
        });
    }
    let end = (start + FIRMWARE_BLOCK_DATA_LEN).min(image.len());
    Ok(write_block(
        anchor_id,
        block_count as u16,
        (block_index + 1) as u16,
        &image[start..end],
    ))
}

fn pack_header(block_count: u16, block_number: u16) -> u8 {
    let w = TAG.set_truncated(0, FIRMWARE_BLOCK_TAG as u32);
    let w = COUNT_CARRY.set_truncated(w, (block_count >> LOW_BITS) as u32);
    NUMBER_CARRY.set_truncated(w, (block_number >> LOW_BITS) as u32) as u8
}

fn unpack(carry: u32, low: u8) -> u16 {
    ((carry as u16) << LOW_BITS) | (low as u16 & LOW_MASK)
}

fn write_block(
    anchor_id: &DeviceId,
    block_count: u16,
    block_number: u16,
    chunk: &[u8],
) -> [u8; FIRMWARE_BLOCK_LEN] {
    let mut out = [0u8; FIRMWARE_BLOCK_LEN];
    out[..HEADER_OFFSET].copy_from_slice(anchor_id.as_bytes());
    out[HEADER_OFFSET] = pack_header(block_count, block_number);
    out[COUNT_OFFSET] = (block_count & 0xFF) as u8;
    out[NUMBER_OFFSET] = (block_number & 0xFF) as u8;
    out[DATA_OFFSET..DATA_OFFSET + chunk.len()].copy_from_slice(chunk);
    out[CHECKSUM_OFFSET..].copy_from_slice(&sum32(chunk).to_be_bytes());
    out
}

/// A firmware block as seen by the receiving device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareBlock {
    pub anchor_id: DeviceId,
    pub block_count: u16,
    /// 1-based block number
    pub block_number: u16,
    /// Full data slot; bytes past the chunk length are zero
    pub data: [u8; FIRMWARE_BLOCK_DATA_LEN],
    pub checksum: u32,
}

impl FirmwareBlock {
    pub fn decode(raw: &[u8]) -> Result<Self> {
        parser::ensure_exact_len(raw, FIRMWARE_BLOCK_LEN)?;
        let header = raw[HEADER_OFFSET] as u32;
        let tag = TAG.get(header) as u8;
        if tag != FIRMWARE_BLOCK_TAG {
            return Err(Error::FrameFormat(format!(
                "firmware block tag {:#x}, expected {:#x}",
                tag, FIRMWARE_BLOCK_TAG
            )));
        }
        Ok(Self {
            anchor_id: parser::device_id_at(raw, 0)?,
            block_count: unpack(COUNT_CARRY.get(header), raw[COUNT_OFFSET]),
            block_number: unpack(NUMBER_CARRY.get(header), raw[NUMBER_OFFSET]),
            data: parser::array_at(raw, DATA_OFFSET)?,
            checksum: parser::be_u32_at(raw, CHECKSUM_OFFSET)?,
        })
    }

    /// 0-based index of this block within the image.
    pub fn block_index(&self) -> usize {
        (self.block_number as usize).saturating_sub(1)
    }

    /// Check the checksum against the first `chunk_len` data bytes.
    pub fn verify(&self, chunk_len: usize) -> bool {
        chunk_len <= FIRMWARE_BLOCK_DATA_LEN && sum32(&self.data[..chunk_len]) == self.checksum
    }
}

/// Firmware image split into 64-byte blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareImage {
    data: Vec<u8>,
}

impl FirmwareImage {
    /// Rejects empty images and images needing more than 511 blocks.
    pub fn new(data: Vec<u8>) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }
        if data.len() > FIRMWARE_MAX_IMAGE_LEN {
            return Err(Error::ImageTooLarge {
                len: data.len(),
                max: FIRMWARE_MAX_IMAGE_LEN,
            });
        }
        Ok(Self { data })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn block_count(&self) -> usize {
        block_count_for(self.data.len())
    }

    /// Data bytes of block `index`; the last block may be short.
    pub fn block_data(&self, index: usize) -> Option<&[u8]> {
        let start = index.checked_mul(FIRMWARE_BLOCK_DATA_LEN)?;
        if start >= self.data.len() {
            return None;
        }
        let end = (start + FIRMWARE_BLOCK_DATA_LEN).min(self.data.len());
        Some(&self.data[start..end])
    }

    pub fn encode_block(
        &self,
        anchor_id: &DeviceId,
        index: usize,
    ) -> Result<[u8; FIRMWARE_BLOCK_LEN]> {
        encode_block(anchor_id, self.block_count(), index, &self.data)
    }

    /// Encoded blocks in transfer order.
    pub fn blocks<'a>(
        &'a self,
        anchor_id: &'a DeviceId,
    ) -> impl Iterator<Item = [u8; FIRMWARE_BLOCK_LEN]> + 'a {
        let count = self.block_count() as u16;
        self.data
            .chunks(FIRMWARE_BLOCK_DATA_LEN)
            .enumerate()
            .map(move |(i, chunk)| write_block(anchor_id, count, (i + 1) as u16, chunk))
    }
}
