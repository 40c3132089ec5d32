//! Small helpers used across the crate: hex formatting for ids and frame
//! dumps, and millisecond timeout conversion.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
