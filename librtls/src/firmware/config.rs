// librtls/librtls/src/firmware/config.rs
//! Firmware upgrade session configuration

use std::time::Duration;

/// Retransmissions allowed per block before the session gives up
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Time to wait for each block acknowledgement (ms)
pub const DEFAULT_ACK_TIMEOUT_MS: u64 = crate::utils::DEFAULT_READ_TIMEOUT_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeConfig {
    pub max_retries: u32,
    pub ack_timeout_ms: u64,
    /// Reset the transport before the first block
    pub reset_transport: bool,
}

impl UpgradeConfig {
    pub fn new() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            ack_timeout_ms: DEFAULT_ACK_TIMEOUT_MS,
            reset_transport: false,
        }
    }

    pub fn with_max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    pub fn with_ack_timeout_ms(mut self, ms: u64) -> Self {
        self.ack_timeout_ms = ms;
        self
    }

    pub fn with_ack_timeout(self, timeout: Duration) -> Self {
        self.with_ack_timeout_ms(crate::utils::to_ms(timeout))
    }

    pub fn ack_timeout(&self) -> Duration {
        crate::utils::ms(self.ack_timeout_ms)
    }

    pub fn with_reset_transport(mut self, reset: bool) -> Self {
        self.reset_transport = reset;
        self
    }
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self::new()
    }
}
