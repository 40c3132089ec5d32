// librtls/librtls/src/protocol/mod.rs

pub mod checksum;
pub mod frame;
pub mod header;
pub mod messages;
pub mod parser;

pub use checksum::{sum8, sum32};
pub use frame::{ChecksumPolicy, Frame, FrameBuilder};
pub use header::HeaderFlags;
pub use messages::*;
