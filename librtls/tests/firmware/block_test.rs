#[path = "../common/mod.rs"]
mod common;

use librtls::firmware::{FirmwareBlock, FirmwareImage, block_count_for, encode_block};
use librtls::protocol::sum32;
use librtls::Error;

#[test]
fn overflow_bits_for_large_images() {
    let anchor = common::fixtures::anchor_id();
    let image = common::fixtures::firmware_image(200 * 64);
    assert_eq!(block_count_for(image.len()), 200);

    let block = encode_block(&anchor, 200, 150, &image).unwrap();
    // tag 0xA, count carry 01, number carry 01
    assert_eq!(block[6], 0xA5);
    assert_eq!(block[7], 200);
    assert_eq!(block[8], 151);

    let decoded = FirmwareBlock::decode(&block).unwrap();
    assert_eq!(decoded.block_count, 200);
    assert_eq!(decoded.block_number, 151);
    assert_eq!(decoded.block_index(), 150);
    assert_eq!(&decoded.data[..], &image[150 * 64..151 * 64]);
}

#[test]
fn short_last_block_is_zero_padded() {
    let anchor = common::fixtures::anchor_id();
    let image = FirmwareImage::new(common::fixtures::firmware_image(130)).unwrap();
    assert_eq!(image.block_count(), 3);

    let blocks: Vec<_> = image.blocks(&anchor).collect();
    assert_eq!(blocks.len(), 3);
    let last = FirmwareBlock::decode(&blocks[2]).unwrap();
    assert_eq!(&last.data[..2], &image.as_bytes()[128..]);
    assert!(last.data[2..].iter().all(|&b| b == 0));
    assert_eq!(last.checksum, sum32(&image.as_bytes()[128..]));
    assert!(last.verify(2));
    assert_eq!(blocks[2], image.encode_block(&anchor, 2).unwrap());
}

#[test]
fn out_of_range_requests() {
    let anchor = common::fixtures::anchor_id();
    let image = common::fixtures::firmware_image(64);
    assert!(matches!(
        encode_block(&anchor, 1, 1, &image),
        Err(Error::BlockOutOfRange { index: 1, count: 1 })
    ));
    assert!(matches!(
        encode_block(&anchor, 512, 0, &image),
        Err(Error::BlockOutOfRange { .. })
    ));
    assert!(matches!(
        FirmwareImage::new(common::fixtures::firmware_image(511 * 64 + 1)),
        Err(Error::ImageTooLarge { .. })
    ));
}
