// librtls/librtls/src/constants.rs
//! Common protocol constants used across the crate

/// Fixed frame prefix: header(1) + device id(6) + message id(1) + length(1)
pub const FRAME_HEADER_LEN: usize = 9;

/// Trailing checksum byte
pub const FRAME_CHECKSUM_LEN: usize = 1;

/// Smallest well-formed frame: prefix + checksum, no timestamps, no payload
pub const FRAME_MIN_LEN: usize = FRAME_HEADER_LEN + FRAME_CHECKSUM_LEN;

/// Size of each optional timestamp field
pub const FRAME_TIMESTAMP_LEN: usize = 4;

/// The length byte counts payload + checksum, so payload tops out at 254
pub const FRAME_MAX_PAYLOAD_LEN: usize = u8::MAX as usize - FRAME_CHECKSUM_LEN;

/// Delimiter nibble written by default into the frame header (bits 7-4)
pub const FRAME_DEFAULT_DELIMITER: u8 = 0x0A;

/// Device / anchor / tag identifier length
pub const DEVICE_ID_LEN: usize = 6;

/// Firmware data carried per block
pub const FIRMWARE_BLOCK_DATA_LEN: usize = 64;

/// Firmware block wire size:
/// anchor id(6) + header(1) + count(1) + number(1) + data(64) + checksum(4)
pub const FIRMWARE_BLOCK_LEN: usize = DEVICE_ID_LEN + 3 + FIRMWARE_BLOCK_DATA_LEN + 4;

/// Block count / block number are 9-bit values on the wire
pub const FIRMWARE_MAX_BLOCKS: usize = 511;

/// Largest image that can be addressed (511 * 64 bytes)
pub const FIRMWARE_MAX_IMAGE_LEN: usize = FIRMWARE_MAX_BLOCKS * FIRMWARE_BLOCK_DATA_LEN;

/// Tag nibble identifying a firmware block header byte
pub const FIRMWARE_BLOCK_TAG: u8 = 0x0A;

/// Firmware block acknowledgement wire size
pub const FIRMWARE_ACK_LEN: usize = 3;

/// Raw tag-search distance readings include this fixed offset
pub const DISTANCE_BASELINE: u16 = 800;

/// Version pair payload size
pub const VERSION_PAYLOAD_LEN: usize = 8;

/// Tag search result payload size
pub const TAG_SEARCH_PAYLOAD_LEN: usize = 11;

/// Tag position report payload size
pub const TAG_POSITION_PAYLOAD_LEN: usize = 20;

/// Control flag register payload size
pub const CONTROL_PAYLOAD_LEN: usize = 1;
