// librtls/librtls/src/protocol/messages/version.rs

use crate::constants::VERSION_PAYLOAD_LEN;
use crate::protocol::parser;
use crate::types::Version;
use crate::Result;

/// Version query response.
/// Layout: first version(4) + second version(4), one byte per part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VersionInfo {
    /// First version in the payload (hardware)
    pub hardware: Version,
    /// Second version in the payload (firmware)
    pub firmware: Version,
}

impl VersionInfo {
    pub fn decode(data: &[u8]) -> Result<Self> {
        parser::ensure_exact_len(data, VERSION_PAYLOAD_LEN)?;
        Ok(Self {
            hardware: Version::from_bytes(parser::array_at(data, 0)?),
            firmware: Version::from_bytes(parser::array_at(data, 4)?),
        })
    }

    pub fn encode(&self) -> [u8; VERSION_PAYLOAD_LEN] {
        let mut out = [0u8; VERSION_PAYLOAD_LEN];
        out[..4].copy_from_slice(&self.hardware.to_bytes());
        out[4..].copy_from_slice(&self.firmware.to_bytes());
        out
    }
}
