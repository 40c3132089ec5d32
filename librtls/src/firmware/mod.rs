// librtls/librtls/src/firmware/mod.rs

pub mod ack;
pub mod block;
pub mod config;
pub mod session;

pub use ack::{AckStatus, FirmwareBlockAck};
pub use block::{FirmwareBlock, FirmwareImage, block_count_for, encode_block};
pub use config::UpgradeConfig;
pub use session::{FirmwareUpdater, Progress, UpgradeReport};
