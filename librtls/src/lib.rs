// librtls/librtls/src/lib.rs

//! librtls
//!
//! Pure Rust frame and firmware-upgrade codecs for RTLS anchors and tags.
#![warn(missing_docs)]

pub mod bitfield;
pub mod constants;
pub mod error;
pub mod firmware;
pub mod prelude;
pub mod protocol;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
