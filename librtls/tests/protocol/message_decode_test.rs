#[path = "../common/mod.rs"]
mod common;

use librtls::protocol::{Frame, Message, TagSearchResult, VersionInfo};
use librtls::types::MessageId;
use librtls::Error;

#[test]
fn version_response_decodes_to_version_variant() {
    let frame = common::fixtures::version_response_frame();
    match Message::decode_bytes(&frame).unwrap() {
        Message::Version(VersionInfo { hardware, firmware }) => {
            assert_eq!(hardware.to_string(), "1.2.3.4");
            assert_eq!(firmware.to_string(), "5.6.7.8");
        }
        other => panic!("expected version response, got {:?}", other),
    }
}

#[test]
fn tag_search_distance_clamped() {
    let payload = common::fixtures::tag_search_payload(0x0320, 0x50);
    let r = TagSearchResult::decode(&payload).unwrap();
    assert_eq!(r.distance, 0);
    assert_eq!(r.rssi, 0x50);
    assert_eq!(r.tag_id.as_bytes(), &common::fixtures::tag_id_bytes());

    let r = TagSearchResult::decode(&common::fixtures::tag_search_payload(1234, 0x40)).unwrap();
    assert_eq!(r.distance, 434);
}

#[test]
fn tag_position_through_dispatcher() {
    let frame = common::fixtures::tag_position_frame();
    let p = Message::decode_bytes(&frame)
        .unwrap()
        .expect_tag_position()
        .unwrap();
    assert_eq!(p.anchor_id, common::fixtures::anchor_id());
    assert_eq!((p.x, p.y, p.z), (100, -250, 0));
    assert_eq!(p.timezone, 8);
    assert!(!p.dst);
    assert_eq!(p.seconds, 0x6553_f100);
    assert_eq!(p.millis, 500);
}

#[test]
fn fixed_layout_mismatch_is_error() {
    let frame = Frame::response(
        common::fixtures::anchor_id(),
        MessageId::TagPosition,
        &[0u8; 19],
    )
    .unwrap();
    assert!(matches!(
        Message::decode(&frame),
        Err(Error::LengthMismatch {
            expected: 20,
            actual: 19
        })
    ));
}
