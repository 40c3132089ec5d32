// librtls/librtls/src/firmware/ack.rs

//! Device acknowledgement of a single firmware block.
//!
//! Layout: status(1) + module(1) + block number low byte(1). The module
//! byte holds a 6-bit module id and the two high bits (8 and 9) of the
//! acknowledged block number. Unlike the outbound block, the low byte here
//! carries all 8 bits.

use crate::bitfield::{self, BitField};
use crate::constants::FIRMWARE_ACK_LEN;
use crate::protocol::parser;
use crate::{Error, Result};

/// Module byte layout, LSB first: module id(6) number overflow(2)
const MODULE_FIELDS: [BitField; 2] = bitfield::contiguous(8, [6, 2]);

pub const MODULE_ID: BitField = MODULE_FIELDS[0];
pub const NUMBER_OVERFLOW: BitField = MODULE_FIELDS[1];

/// Status reported by the device for a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AckStatus {
    Ok,
    ChecksumError,
    SequenceError,
    FlashWriteError,
    Busy,
    Unknown(u8),
}

impl AckStatus {
    pub const fn as_u8(&self) -> u8 {
        match self {
            Self::Ok => 0x00,
            Self::ChecksumError => 0x01,
            Self::SequenceError => 0x02,
            Self::FlashWriteError => 0x03,
            Self::Busy => 0x04,
            Self::Unknown(v) => *v,
        }
    }

    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl From<u8> for AckStatus {
    fn from(v: u8) -> Self {
        match v {
            0x00 => Self::Ok,
            0x01 => Self::ChecksumError,
            0x02 => Self::SequenceError,
            0x03 => Self::FlashWriteError,
            0x04 => Self::Busy,
            other => Self::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirmwareBlockAck {
    status: AckStatus,
    module: u8,
    number_low: u8,
}

impl FirmwareBlockAck {
    /// Build an ack, as a device would send it. `module_id` may use up to 6
    /// bits. The wire can carry a 10-bit `block_number`, but block numbers
    /// never exceed 511 (`FIRMWARE_MAX_BLOCKS`).
    pub fn new(status: AckStatus, module_id: u8, block_number: u16) -> Result<Self> {
        let w = MODULE_ID.set(0, module_id as u32)?;
        let w = NUMBER_OVERFLOW.set(w, (block_number >> 8) as u32)?;
        Ok(Self {
            status,
            module: w as u8,
            number_low: (block_number & 0xFF) as u8,
        })
    }

    pub fn decode(raw: &[u8]) -> Result<Self> {
        parser::ensure_exact_len(raw, FIRMWARE_ACK_LEN)?;
        Ok(Self {
            status: AckStatus::from(raw[0]),
            module: raw[1],
            number_low: raw[2],
        })
    }

    pub fn encode(&self) -> [u8; FIRMWARE_ACK_LEN] {
        [self.status.as_u8(), self.module, self.number_low]
    }

    pub fn status(&self) -> AckStatus {
        self.status
    }

    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }

    pub fn module_id(&self) -> u8 {
        MODULE_ID.get(self.module as u32) as u8
    }

    /// High bits of the block number carried in the module byte.
    pub fn overflow_bits(&self) -> u8 {
        NUMBER_OVERFLOW.get(self.module as u32) as u8
    }

    pub fn block_number_low(&self) -> u8 {
        self.number_low
    }

    /// Acknowledged 1-based block number, overflow bits recombined.
    pub fn block_number(&self) -> u16 {
        ((self.overflow_bits() as u16) << 8) | self.number_low as u16
    }

    /// Fail unless this ack accepts `block_number`.
    pub fn check(&self, block_number: u16) -> Result<()> {
        if self.block_number() != block_number {
            return Err(Error::AckMismatch {
                expected: block_number,
                actual: self.block_number(),
            });
        }
        if !self.is_ok() {
            return Err(Error::BlockRejected {
                block: block_number,
                status: self.status.as_u8(),
            });
        }
        Ok(())
    }
}
