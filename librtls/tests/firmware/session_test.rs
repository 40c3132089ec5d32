#[path = "../common/mod.rs"]
mod common;

use std::cell::Cell;
use std::rc::Rc;

use librtls::firmware::{AckStatus, FirmwareImage, FirmwareUpdater, UpgradeConfig};
use librtls::test_support::{ack_bytes, firmware_device, mock_with_responses};
use librtls::Error;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn full_upgrade_over_simulated_device() -> anyhow::Result<()> {
    init_logger();
    let image = FirmwareImage::new(common::fixtures::firmware_image(300 * 64 + 17))?;
    let mut device = firmware_device(3, |_| AckStatus::Ok);

    let report = FirmwareUpdater::new(common::fixtures::anchor_id(), UpgradeConfig::default())
        .run(&mut device, &image)?;

    assert_eq!(report.blocks, 301);
    assert_eq!(report.retransmissions, 0);
    assert_eq!(device.sent.len(), 301);
    // block 300 goes out with its full low byte; bit 8 rides in the header
    assert_eq!(device.sent[299][8], (300u16 & 0xFF) as u8);
    Ok(())
}

#[test]
fn flaky_device_recovers_within_budget() -> anyhow::Result<()> {
    init_logger();
    let image = FirmwareImage::new(common::fixtures::firmware_image(10 * 64))?;
    let failures = Rc::new(Cell::new(0u32));
    let seen = failures.clone();
    // every third transmission is answered with a checksum error
    let mut device = firmware_device(1, move |_| {
        seen.set(seen.get() + 1);
        if seen.get() % 3 == 0 {
            AckStatus::ChecksumError
        } else {
            AckStatus::Ok
        }
    });

    let report = FirmwareUpdater::new(common::fixtures::anchor_id(), UpgradeConfig::default())
        .run(&mut device, &image)?;
    assert_eq!(report.blocks, 10);
    assert_eq!(report.transmissions as u32, failures.get());
    assert!(report.retransmissions > 0);
    Ok(())
}

#[test]
fn busy_device_exhausts_retries() {
    init_logger();
    let image = FirmwareImage::new(common::fixtures::firmware_image(64)).unwrap();
    let mut device = mock_with_responses(vec![
        ack_bytes(AckStatus::Busy, 1),
        ack_bytes(AckStatus::Busy, 1),
    ]);
    let config = UpgradeConfig::default().with_max_retries(1);
    match FirmwareUpdater::new(common::fixtures::anchor_id(), config).run(&mut device, &image) {
        Err(Error::BlockRejected { block: 1, status }) => assert_eq!(status, AckStatus::Busy.as_u8()),
        other => panic!("expected BlockRejected, got {:?}", other),
    }
    assert_eq!(device.sent.len(), 2);
}

#[test]
fn silent_device_times_out() {
    let image = FirmwareImage::new(common::fixtures::firmware_image(64)).unwrap();
    let mut device = mock_with_responses(Vec::new());
    let config = UpgradeConfig::default().with_max_retries(0);
    assert!(matches!(
        FirmwareUpdater::new(common::fixtures::anchor_id(), config).run(&mut device, &image),
        Err(Error::Timeout)
    ));
}
