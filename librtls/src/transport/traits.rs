// librtls/librtls/src/transport/traits.rs

use crate::Result;

/// Transport trait abstracts the byte stream to an anchor away from the
/// codecs and the upgrade session.
pub trait Transport {
    /// Send raw bytes to the device
    fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive raw bytes from the device with a timeout in milliseconds
    fn receive(&mut self, timeout_ms: u64) -> Result<Vec<u8>>;

    /// Perform a transport-level reset (drop buffered input, reopen, ...)
    fn reset(&mut self) -> Result<()> {
        Ok(())
    }

    /// Encode and send a frame.
    fn send_frame(&mut self, frame: &crate::protocol::Frame) -> Result<()> {
        let bytes = frame.encode()?;
        self.send(&bytes)
    }

    /// Receive and decode exactly one frame.
    fn receive_frame(&mut self, timeout_ms: u64) -> Result<crate::protocol::Frame> {
        let raw = self.receive(timeout_ms)?;
        crate::protocol::Frame::decode(&raw)
    }
}
