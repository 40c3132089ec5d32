#[path = "../common/mod.rs"]
mod common;

use librtls::protocol::{ChecksumPolicy, Frame, sum8};
use librtls::types::MessageId;
use librtls::Error;

#[test]
fn version_frame_matches_wire_bytes() {
    let frame = common::fixtures::version_response_frame();
    let expected = hex::decode("a2a0b1c2d3e4f50109").unwrap();
    assert_eq!(&frame[..9], &expected[..]);
    assert_eq!(&frame[9..17], &[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(frame[17], sum8(&frame[..17]));

    let decoded = Frame::decode(&frame).expect("frame decode");
    assert_eq!(decoded.device_id(), &common::fixtures::anchor_id());
    assert_eq!(decoded.message_id(), MessageId::Version);
    assert!(decoded.is_response());
    assert!(!decoded.is_send());
}

#[test]
fn timestamps_precede_payload() {
    let frame = common::fixtures::tag_position_frame();
    assert_eq!(frame.len(), 9 + 4 + 4 + 20 + 1);
    assert_eq!(frame[0] & 0x0C, 0x0C);
    assert_eq!(frame[8], 21);
    let decoded = Frame::decode(&frame).unwrap();
    assert_eq!(decoded.timestamp_seconds(), Some(0x6553_f100));
    assert_eq!(decoded.timestamp_millis(), Some(500));
    assert_eq!(decoded.payload(), &common::fixtures::tag_position_payload()[..]);
}

#[test]
fn boundary_errors() {
    assert!(matches!(Frame::decode(&[]), Err(Error::EmptyInput)));

    let frame = common::fixtures::version_response_frame();
    match Frame::decode(&frame[..frame.len() - 1]) {
        Err(Error::TruncatedInput { expected, actual }) => {
            assert_eq!(expected, frame.len());
            assert_eq!(actual, frame.len() - 1);
        }
        other => panic!("expected TruncatedInput, got {:?}", other),
    }
}

#[test]
fn corrupted_checksum_policy() {
    let mut frame = common::fixtures::version_response_frame();
    frame[10] ^= 0xFF;
    assert!(matches!(
        Frame::decode(&frame),
        Err(Error::ChecksumMismatch { .. })
    ));
    let trusted = Frame::decode_with(&frame, ChecksumPolicy::Trust).unwrap();
    assert_eq!(trusted.payload()[1], 2 ^ 0xFF);
}
