//! Decode hex-encoded frames from the command line.
//!
//! Usage: cargo run --example decode_frames -- a2a0b1c2d3e4f5010901020304050607088f

use librtls::protocol::{ChecksumPolicy, Frame, Message};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    for arg in std::env::args().skip(1) {
        let bytes = librtls::utils::parse_hex(&arg)?;
        let frame = match Frame::decode(&bytes) {
            Ok(f) => f,
            Err(librtls::Error::ChecksumMismatch { expected, actual }) => {
                eprintln!("checksum mismatch ({expected:#04x} != {actual:#04x}), decoding anyway");
                Frame::decode_with(&bytes, ChecksumPolicy::Trust)?
            }
            Err(e) => return Err(e.into()),
        };
        println!(
            "{} msg={:#04x} response={} ts={:?}/{:?}",
            frame.device_id(),
            frame.message_id().as_u8(),
            frame.is_response(),
            frame.timestamp_seconds(),
            frame.timestamp_millis()
        );
        println!("  {:?}", Message::decode(&frame)?);
    }
    Ok(())
}
