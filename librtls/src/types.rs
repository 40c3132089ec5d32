// librtls/librtls/src/types.rs

use crate::Error;
use crate::constants::DEVICE_ID_LEN;
use derive_more::{Display, From};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// DeviceId - Newtype Pattern (6 バイト)
///
/// Identifies anchors and tags alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, From)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceId([u8; DEVICE_ID_LEN]);

impl DeviceId {
    pub const fn from_bytes(bytes: [u8; DEVICE_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DEVICE_ID_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(":")?;
            }
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl TryFrom<&[u8]> for DeviceId {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; DEVICE_ID_LEN] =
            bytes.try_into().map_err(|_| Error::LengthMismatch {
                expected: DEVICE_ID_LEN,
                actual: bytes.len(),
            })?;
        Ok(Self(arr))
    }
}

impl FromStr for DeviceId {
    type Err = Error;

    /// Accepts `deadbeef0011`, `de:ad:be:ef:00:11` and similar.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = crate::utils::parse_hex(s)?;
        Self::try_from(&bytes[..])
    }
}

/// Message type discriminator carried in byte 7 of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageId {
    /// Hardware / firmware version query
    Version,
    /// Tag search (ranging) result
    TagSearch,
    /// Tag position report
    TagPosition,
    /// Device control-flag register
    Control,
    Unknown(u8),
}

impl MessageId {
    pub const fn as_u8(&self) -> u8 {
        match self {
            Self::Version => 0x01,
            Self::TagSearch => 0x02,
            Self::TagPosition => 0x03,
            Self::Control => 0x04,
            Self::Unknown(v) => *v,
        }
    }
}

impl From<u8> for MessageId {
    fn from(v: u8) -> Self {
        match v {
            0x01 => Self::Version,
            0x02 => Self::TagSearch,
            0x03 => Self::TagPosition,
            0x04 => Self::Control,
            other => Self::Unknown(other),
        }
    }
}

impl From<MessageId> for u8 {
    fn from(id: MessageId) -> Self {
        id.as_u8()
    }
}

/// Four-part version number (major.minor.maintenance.development)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Display)]
#[display(fmt = "{}.{}.{}.{}", major, minor, maintenance, development)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Version {
    pub major: u8,
    pub minor: u8,
    pub maintenance: u8,
    pub development: u8,
}

impl Version {
    pub const fn new(major: u8, minor: u8, maintenance: u8, development: u8) -> Self {
        Self {
            major,
            minor,
            maintenance,
            development,
        }
    }

    pub const fn from_bytes(b: [u8; 4]) -> Self {
        Self::new(b[0], b[1], b[2], b[3])
    }

    pub const fn to_bytes(&self) -> [u8; 4] {
        [self.major, self.minor, self.maintenance, self.development]
    }
}
