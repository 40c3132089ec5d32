// librtls/librtls/src/firmware/session.rs

//! Block-by-block firmware transfer with retransmission.
//!
//! Each block is sent and must be acknowledged before the next one goes
//! out. Late acks for blocks already accepted are dropped and the read is
//! repeated. A rejected block, an ack for a block not yet sent, a malformed
//! ack or a missing ack count as a failed attempt; the block is resent until
//! the retry budget is spent and the last failure is returned.

use log::{debug, info, warn};

use crate::firmware::ack::FirmwareBlockAck;
use crate::firmware::block::FirmwareImage;
use crate::firmware::config::UpgradeConfig;
use crate::transport::Transport;
use crate::types::DeviceId;
use crate::{Error, Result};

/// Reported after each accepted block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based number of the block just accepted
    pub block_number: u16,
    pub block_count: u16,
    /// Retransmissions needed for this block
    pub retries: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpgradeReport {
    pub blocks: usize,
    /// Total block transmissions, including retransmissions
    pub transmissions: usize,
    pub retransmissions: usize,
    pub bytes: usize,
}

/// Drives a firmware image to one anchor over a `Transport`.
#[derive(Debug, Clone)]
pub struct FirmwareUpdater {
    anchor_id: DeviceId,
    config: UpgradeConfig,
}

impl FirmwareUpdater {
    pub fn new(anchor_id: DeviceId, config: UpgradeConfig) -> Self {
        Self { anchor_id, config }
    }

    pub fn anchor_id(&self) -> &DeviceId {
        &self.anchor_id
    }

    pub fn config(&self) -> &UpgradeConfig {
        &self.config
    }

    pub fn run(&self, transport: &mut dyn Transport, image: &FirmwareImage) -> Result<UpgradeReport> {
        self.run_with_progress(transport, image, |_| {})
    }

    pub fn run_with_progress<F>(
        &self,
        transport: &mut dyn Transport,
        image: &FirmwareImage,
        mut on_block: F,
    ) -> Result<UpgradeReport>
    where
        F: FnMut(Progress),
    {
        let block_count = image.block_count();
        info!(
            "starting firmware upgrade of {}: {} bytes in {} blocks",
            self.anchor_id,
            image.len(),
            block_count
        );

        if self.config.reset_transport {
            transport.reset()?;
        }

        let mut report = UpgradeReport {
            bytes: image.len(),
            ..Default::default()
        };

        for index in 0..block_count {
            let block = image.encode_block(&self.anchor_id, index)?;
            let number = (index + 1) as u16;
            let mut retries = 0u32;

            loop {
                debug!(
                    "sending block {}/{} to {} (attempt {})",
                    number,
                    block_count,
                    self.anchor_id,
                    retries + 1
                );
                transport.send(&block)?;
                report.transmissions += 1;

                let failure = match self.await_ack(transport, number) {
                    Ok(()) => break,
                    Err(e) if is_retryable(&e) => e,
                    Err(e) => return Err(e),
                };

                if retries >= self.config.max_retries {
                    warn!(
                        "giving up on block {} of {} after {} attempts: {}",
                        number,
                        self.anchor_id,
                        retries + 1,
                        failure
                    );
                    return Err(failure);
                }
                retries += 1;
                report.retransmissions += 1;
                warn!(
                    "block {} failed ({}), retransmitting ({}/{})",
                    number, failure, retries, self.config.max_retries
                );
            }

            report.blocks += 1;
            on_block(Progress {
                block_number: number,
                block_count: block_count as u16,
                retries,
            });
        }

        info!(
            "firmware upgrade of {} complete: {} blocks, {} retransmissions",
            self.anchor_id, report.blocks, report.retransmissions
        );
        Ok(report)
    }

    fn await_ack(&self, transport: &mut dyn Transport, number: u16) -> Result<()> {
        loop {
            let raw = transport.receive(self.config.ack_timeout_ms)?;
            let ack = FirmwareBlockAck::decode(&raw)?;
            if ack.block_number() < number {
                debug!(
                    "dropping stale ack for block {} while waiting for {}",
                    ack.block_number(),
                    number
                );
                continue;
            }
            debug!(
                "ack for block {}: status={:?} module={}",
                ack.block_number(),
                ack.status(),
                ack.module_id()
            );
            return ack.check(number);
        }
    }
}

fn is_retryable(e: &Error) -> bool {
    matches!(
        e,
        Error::Timeout
            | Error::BlockRejected { .. }
            | Error::AckMismatch { .. }
            | Error::LengthMismatch { .. }
    )
}
