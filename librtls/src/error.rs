// librtls/librtls/src/error.rs

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("empty input")]
    EmptyInput,

    #[error("truncated input: expected at least {expected} bytes, got {actual}")]
    TruncatedInput { expected: usize, actual: usize },

    #[error("payload length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("invalid length: expected at most {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    ChecksumMismatch { expected: u8, actual: u8 },

    #[error("frame format error: {0}")]
    FrameFormat(String),

    #[error("value {value:#x} does not fit in a {width}-bit field")]
    FieldOverflow { width: u32, value: u32 },

    #[error("bit layout overflow: {requested} bits requested in a {word_bits}-bit word")]
    LayoutOverflow { word_bits: u32, requested: u32 },

    #[error("block index {index} out of range for {count} blocks")]
    BlockOutOfRange { index: usize, count: usize },

    #[error("firmware image too large: {len} bytes, max {max}")]
    ImageTooLarge { len: usize, max: usize },

    #[error("unexpected message: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedMessage { expected: u8, actual: u8 },

    #[error("ack for wrong block: expected {expected}, got {actual}")]
    AckMismatch { expected: u16, actual: u16 },

    #[error("block {block} rejected by device: status={status:#04x}")]
    BlockRejected { block: u16, status: u8 },

    #[error("operation timed out")]
    Timeout,

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
