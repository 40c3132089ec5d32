//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize simulated-device setup so tests across the
//! crate and the tests/ directory can reuse the same logic.
#![allow(dead_code)]

use crate::firmware::{AckStatus, FirmwareBlock, FirmwareBlockAck};
use crate::transport::mock::MockTransport;

/// Build a MockTransport pre-seeded with the given raw responses.
#[doc(hidden)]
pub fn mock_with_responses(responses: Vec<Vec<u8>>) -> MockTransport {
    let mut mock = MockTransport::new();
    for resp in responses {
        mock.push_response(resp);
    }
    mock
}

/// MockTransport that behaves like an anchor receiving firmware: every
/// well-formed block is answered with an ack carrying `status(block_number)`
/// and module id `module_id`. Malformed blocks get no reply.
#[doc(hidden)]
pub fn firmware_device<F>(module_id: u8, mut status: F) -> MockTransport
where
    F: FnMut(u16) -> AckStatus + 'static,
{
    MockTransport::with_responder(move |raw| {
        let block = FirmwareBlock::decode(raw).ok()?;
        let ack = FirmwareBlockAck::new(status(block.block_number), module_id, block.block_number)
            .ok()?;
        Some(ack.encode().to_vec())
    })
}

/// Encoded ack bytes, for pre-seeding a MockTransport.
#[doc(hidden)]
pub fn ack_bytes(status: AckStatus, block_number: u16) -> Vec<u8> {
    FirmwareBlockAck::new(status, 0, block_number)
        .map(|a| a.encode().to_vec())
        .unwrap_or_default()
}
