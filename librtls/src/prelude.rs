// librtls/librtls/src/prelude.rs

pub use crate::firmware::{
    AckStatus, FirmwareBlock, FirmwareBlockAck, FirmwareImage, FirmwareUpdater, UpgradeConfig,
};
pub use crate::protocol::{
    ChecksumPolicy, ControlFlags, Frame, FrameBuilder, HeaderFlags, Message, TagPosition,
    TagSearchResult, VersionInfo,
};
pub use crate::transport::Transport;
pub use crate::{DeviceId, Error, MessageId, Result, Version};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, ms, parse_hex};
