// librtls/librtls/src/protocol/messages/mod.rs

pub mod control;
pub mod position;
pub mod search;
pub mod version;

pub use control::ControlFlags;
pub use position::TagPosition;
pub use search::TagSearchResult;
pub use version::VersionInfo;

use log::debug;

use crate::protocol::frame::Frame;
use crate::types::MessageId;
use crate::{Error, Result};

/// Application-level view of a decoded frame. Per-message decoders live in
/// `protocol::messages::<name>.rs` and are dispatched here by message id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Request with no payload, e.g. a version query
    Query(MessageId),
    Version(VersionInfo),
    TagSearch(TagSearchResult),
    TagPosition(TagPosition),
    Control(ControlFlags),
    Unknown { message_id: u8, payload: Vec<u8> },
}

impl Message {
    /// Route a frame's payload to the decoder for its message id.
    pub fn decode(frame: &Frame) -> Result<Self> {
        let payload = frame.payload();
        if !frame.is_response() && payload.is_empty() {
            return Ok(Self::Query(frame.message_id()));
        }

        match frame.message_id() {
            MessageId::Version => Ok(Self::Version(VersionInfo::decode(payload)?)),
            MessageId::TagSearch => Ok(Self::TagSearch(TagSearchResult::decode(payload)?)),
            MessageId::TagPosition => Ok(Self::TagPosition(TagPosition::decode(payload)?)),
            MessageId::Control => Ok(Self::Control(ControlFlags::decode(payload)?)),
            other => {
                debug!(
                    "no decoder for message id {:#04x} from {}: [{}]",
                    other.as_u8(),
                    frame.device_id(),
                    crate::utils::bytes_to_hex_spaced(payload)
                );
                Ok(Self::Unknown {
                    message_id: other.as_u8(),
                    payload: payload.to_vec(),
                })
            }
        }
    }

    /// Decode raw bytes as a frame and dispatch it.
    pub fn decode_bytes(bytes: &[u8]) -> Result<Self> {
        Self::decode(&Frame::decode(bytes)?)
    }

    /// Message id this variant was decoded from.
    pub fn message_id(&self) -> MessageId {
        match self {
            Self::Query(id) => *id,
            Self::Version(_) => MessageId::Version,
            Self::TagSearch(_) => MessageId::TagSearch,
            Self::TagPosition(_) => MessageId::TagPosition,
            Self::Control(_) => MessageId::Control,
            Self::Unknown { message_id, .. } => MessageId::from(*message_id),
        }
    }

    pub fn expect_version(self) -> Result<VersionInfo> {
        match self {
            Self::Version(v) => Ok(v),
            other => Err(other.unexpected(MessageId::Version)),
        }
    }

    pub fn expect_tag_search(self) -> Result<TagSearchResult> {
        match self {
            Self::TagSearch(r) => Ok(r),
            other => Err(other.unexpected(MessageId::TagSearch)),
        }
    }

    pub fn expect_tag_position(self) -> Result<TagPosition> {
        match self {
            Self::TagPosition(p) => Ok(p),
            other => Err(other.unexpected(MessageId::TagPosition)),
        }
    }

    pub fn expect_control(self) -> Result<ControlFlags> {
        match self {
            Self::Control(c) => Ok(c),
            other => Err(other.unexpected(MessageId::Control)),
        }
    }

    fn unexpected(&self, expected: MessageId) -> Error {
        Error::UnexpectedMessage {
            expected: expected.as_u8(),
            actual: self.message_id().as_u8(),
        }
    }
}
