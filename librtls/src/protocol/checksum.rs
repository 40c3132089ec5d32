// librtls/librtls/src/protocol/checksum.rs

/// Frame checksum: unsigned 8-bit sum (mod 256) of every byte
pub fn sum8(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Firmware block checksum: 32-bit additive sum of the data bytes
pub fn sum32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0u32, |acc, &b| acc.wrapping_add(b as u32))
}
