// librtls/librtls/src/protocol/messages/position.rs

use std::time::Duration;

use crate::constants::TAG_POSITION_PAYLOAD_LEN;
use crate::protocol::parser;
use crate::types::DeviceId;
use crate::Result;

/// Tag position report.
/// Layout: anchor id(6) + x(2) + y(2) + z(2) + timezone(1) + dst(1)
///         + seconds(4) + milliseconds(2), integers big-endian
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagPosition {
    pub anchor_id: DeviceId,
    pub x: i16,
    pub y: i16,
    pub z: i16,
    /// UTC offset in hours
    pub timezone: i8,
    pub dst: bool,
    pub seconds: u32,
    pub millis: u16,
}

impl TagPosition {
    pub fn decode(data: &[u8]) -> Result<Self> {
        parser::ensure_exact_len(data, TAG_POSITION_PAYLOAD_LEN)?;
        Ok(Self {
            anchor_id: parser::device_id_at(data, 0)?,
            x: parser::be_i16_at(data, 6)?,
            y: parser::be_i16_at(data, 8)?,
            z: parser::be_i16_at(data, 10)?,
            timezone: parser::byte_at(data, 12)? as i8,
            dst: parser::byte_at(data, 13)? != 0,
            seconds: parser::be_u32_at(data, 14)?,
            millis: parser::be_u16_at(data, 18)?,
        })
    }

    /// Report time as a duration since the device epoch.
    pub fn timestamp(&self) -> Duration {
        Duration::from_secs(self.seconds as u64) + Duration::from_millis(self.millis as u64)
    }
}
