// librtls/librtls/src/protocol/messages/search.rs

use crate::constants::{DISTANCE_BASELINE, TAG_SEARCH_PAYLOAD_LEN};
use crate::protocol::parser;
use crate::types::DeviceId;
use crate::Result;

/// Tag search (ranging) result.
/// Layout: index(1) + tag id(6) + error code(1) + raw distance(2, BE) + rssi(1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagSearchResult {
    pub index: u8,
    pub tag_id: DeviceId,
    pub error_code: u8,
    /// Raw reading minus the fixed baseline, clamped at zero
    pub distance: u16,
    pub rssi: u8,
}

impl TagSearchResult {
    pub fn decode(data: &[u8]) -> Result<Self> {
        parser::ensure_exact_len(data, TAG_SEARCH_PAYLOAD_LEN)?;
        let raw_distance = parser::be_u16_at(data, 8)?;
        Ok(Self {
            index: parser::byte_at(data, 0)?,
            tag_id: parser::device_id_at(data, 1)?,
            error_code: parser::byte_at(data, 7)?,
            distance: raw_distance.saturating_sub(DISTANCE_BASELINE),
            rssi: parser::byte_at(data, 10)?,
        })
    }

    pub fn is_ok(&self) -> bool {
        self.error_code == 0
    }
}
