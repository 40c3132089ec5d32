//! Push a firmware image to a simulated anchor and print progress.
//!
//! Usage: cargo run --example firmware_upgrade_mock -- [image-bytes]

use librtls::firmware::{AckStatus, FirmwareImage, FirmwareUpdater, UpgradeConfig};
use librtls::test_support::firmware_device;
use librtls::types::DeviceId;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let len: usize = std::env::args()
        .nth(1)
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or(20 * 1024);
    let image = FirmwareImage::new((0..len).map(|i| (i % 251) as u8).collect())?;
    let anchor: DeviceId = "a0:00:00:00:00:01".parse()?;

    // every 50th block is rejected once
    let mut rejected = std::collections::HashSet::new();
    let mut device = firmware_device(1, move |number| {
        if number % 50 == 0 && rejected.insert(number) {
            AckStatus::ChecksumError
        } else {
            AckStatus::Ok
        }
    });

    let updater = FirmwareUpdater::new(anchor, UpgradeConfig::default().with_max_retries(2));
    let report = updater.run_with_progress(&mut device, &image, |p| {
        if p.retries > 0 || p.block_number == p.block_count {
            println!(
                "block {}/{} accepted after {} retries",
                p.block_number, p.block_count, p.retries
            );
        }
    })?;

    println!(
        "sent {} bytes to {} in {} blocks ({} transmissions, {} retransmissions)",
        report.bytes, anchor, report.blocks, report.transmissions, report.retransmissions
    );
    Ok(())
}
