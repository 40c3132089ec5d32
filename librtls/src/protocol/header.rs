// librtls/librtls/src/protocol/header.rs

use crate::bitfield::{self, BitField};
use crate::constants::FRAME_DEFAULT_DELIMITER;

/// Header byte layout, LSB first:
/// send(1) response(1) timestamp-seconds(1) timestamp-millis(1) delimiter(4)
const FIELDS: [BitField; 5] = bitfield::contiguous(8, [1, 1, 1, 1, 4]);

pub const IS_SEND: BitField = FIELDS[0];
pub const IS_RESPONSE: BitField = FIELDS[1];
pub const HAS_TIMESTAMP_SECONDS: BitField = FIELDS[2];
pub const HAS_TIMESTAMP_MILLIS: BitField = FIELDS[3];
pub const DELIMITER: BitField = FIELDS[4];

/// Bit-packed first byte of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeaderFlags(u8);

impl HeaderFlags {
    pub const fn from_byte(b: u8) -> Self {
        Self(b)
    }

    pub const fn as_byte(&self) -> u8 {
        self.0
    }

    pub const fn new(delimiter: u8, is_response: bool, is_send: bool) -> Self {
        let w = DELIMITER.set_truncated(0, delimiter as u32);
        let w = IS_RESPONSE.set_flag(w, is_response);
        Self(IS_SEND.set_flag(w, is_send) as u8)
    }

    pub const fn delimiter(&self) -> u8 {
        DELIMITER.get(self.0 as u32) as u8
    }

    pub const fn is_response(&self) -> bool {
        IS_RESPONSE.get_flag(self.0 as u32)
    }

    pub const fn is_send(&self) -> bool {
        IS_SEND.get_flag(self.0 as u32)
    }

    pub const fn has_timestamp_seconds(&self) -> bool {
        HAS_TIMESTAMP_SECONDS.get_flag(self.0 as u32)
    }

    pub const fn has_timestamp_millis(&self) -> bool {
        HAS_TIMESTAMP_MILLIS.get_flag(self.0 as u32)
    }

    /// Return a copy with both presence bits replaced.
    pub const fn with_timestamps(self, seconds: bool, millis: bool) -> Self {
        let w = HAS_TIMESTAMP_SECONDS.set_flag(self.0 as u32, seconds);
        Self(HAS_TIMESTAMP_MILLIS.set_flag(w, millis) as u8)
    }
}

impl Default for HeaderFlags {
    fn default() -> Self {
        Self::new(FRAME_DEFAULT_DELIMITER, false, true)
    }
}
