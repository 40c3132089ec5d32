// librtls/librtls/src/protocol/parser.rs

use crate::types::DeviceId;
use crate::{Error, Result};

/// Ensure the slice is exactly `len` bytes long. Fixed-layout payload
/// decoders use this rather than attempting partial decodes.
pub fn ensure_exact_len(data: &[u8], len: usize) -> Result<()> {
    if data.len() != len {
        return Err(Error::LengthMismatch {
            expected: len,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Ensure the slice has at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> Result<()> {
    if data.len() < min {
        return Err(Error::TruncatedInput {
            expected: min,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Return a subslice with bounds checking.
pub fn slice_at(data: &[u8], idx: usize, len: usize) -> Result<&[u8]> {
    let end = idx.checked_add(len).ok_or(Error::TruncatedInput {
        expected: usize::MAX,
        actual: data.len(),
    })?;
    ensure_len(data, end)?;
    Ok(&data[idx..end])
}

/// Copy `N` bytes at `idx` into an array.
pub fn array_at<const N: usize>(data: &[u8], idx: usize) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    out.copy_from_slice(slice_at(data, idx, N)?);
    Ok(out)
}

/// Read a single byte at `idx` with bounds checking.
pub fn byte_at(data: &[u8], idx: usize) -> Result<u8> {
    ensure_len(data, idx + 1)?;
    Ok(data[idx])
}

/// Read a big-endian u16 at given index, with bounds checking.
pub fn be_u16_at(data: &[u8], idx: usize) -> Result<u16> {
    Ok(u16::from_be_bytes(array_at(data, idx)?))
}

/// Read a big-endian i16 at given index, with bounds checking.
pub fn be_i16_at(data: &[u8], idx: usize) -> Result<i16> {
    Ok(i16::from_be_bytes(array_at(data, idx)?))
}

/// Read a big-endian u32 at given index, with bounds checking.
pub fn be_u32_at(data: &[u8], idx: usize) -> Result<u32> {
    Ok(u32::from_be_bytes(array_at(data, idx)?))
}

/// Parse a 6-byte device id at `start` with bounds checking.
pub fn device_id_at(data: &[u8], start: usize) -> Result<DeviceId> {
    Ok(DeviceId::from_bytes(array_at(data, start)?))
}
