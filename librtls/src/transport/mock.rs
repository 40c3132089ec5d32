// librtls/librtls/src/transport/mock.rs

use std::collections::VecDeque;
use std::fmt;

use crate::transport::traits::Transport;
use crate::{Error, Result};

type Responder = Box<dyn FnMut(&[u8]) -> Option<Vec<u8>>>;

/// Mock transport for unit tests. It records sent payloads and returns
/// queued responses. An optional responder closure can generate a reply for
/// each sent buffer, which lets tests play the part of a device.
#[derive(Default)]
pub struct MockTransport {
    pub sent: Vec<Vec<u8>>,
    pub responses: VecDeque<Vec<u8>>,
    /// Testing hook: number of receive calls that should fail with Timeout
    pub receive_failures: usize,
    /// Number of reset calls seen
    pub resets: usize,
    responder: Option<Responder>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to every sent buffer with whatever `f` returns.
    pub fn with_responder<F>(f: F) -> Self
    where
        F: FnMut(&[u8]) -> Option<Vec<u8>> + 'static,
    {
        Self {
            responder: Some(Box::new(f)),
            ..Self::default()
        }
    }

    /// Set how many subsequent receive calls should fail (for tests).
    pub fn set_receive_failures(&mut self, n: usize) {
        self.receive_failures = n;
    }

    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.responses.push_back(resp);
    }
}

impl fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockTransport")
            .field("sent", &self.sent.len())
            .field("responses", &self.responses.len())
            .field("receive_failures", &self.receive_failures)
            .field("resets", &self.resets)
            .field("responder", &self.responder.is_some())
            .finish()
    }
}

impl Transport for MockTransport {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        self.sent.push(data.to_vec());
        if let Some(responder) = self.responder.as_mut() {
            if let Some(reply) = responder(data) {
                self.responses.push_back(reply);
            }
        }
        Ok(())
    }

    fn receive(&mut self, _timeout_ms: u64) -> Result<Vec<u8>> {
        if self.receive_failures > 0 {
            self.receive_failures -= 1;
            // the reply (if any) is lost along with this receive
            self.responses.pop_front();
            return Err(Error::Timeout);
        }
        self.responses.pop_front().ok_or(Error::Timeout)
    }

    fn reset(&mut self) -> Result<()> {
        // Reset should clear recorded sent messages but preserve queued
        // responses so unit tests can pre-seed expected replies.
        self.sent.clear();
        self.resets += 1;
        Ok(())
    }
}
