// fixtures.rs — provides commonly used test payloads/frames

use librtls::protocol::Frame;
use librtls::types::{DeviceId, MessageId};

pub fn anchor_id() -> DeviceId {
    "a0:b1:c2:d3:e4:f5".parse().unwrap()
}

pub fn tag_id_bytes() -> [u8; 6] {
    [0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f]
}

/// Version response captured as hex: hardware 1.2.3.4, firmware 5.6.7.8
pub fn version_response_frame() -> Vec<u8> {
    let frame = Frame::response(anchor_id(), MessageId::Version, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    frame.encode().unwrap()
}

pub fn tag_search_payload(distance: u16, rssi: u8) -> Vec<u8> {
    let mut payload = vec![0x01u8]; // search index
    payload.extend_from_slice(&tag_id_bytes());
    payload.push(0x00); // error code
    payload.extend_from_slice(&distance.to_be_bytes());
    payload.push(rssi);
    payload
}

pub fn tag_position_payload() -> Vec<u8> {
    hex::decode("a0b1c2d3e4f5 0064 ff06 0000 08 00 6553f100 01f4".replace(' ', "")).unwrap()
}

/// Position report stamped with both timestamps.
pub fn tag_position_frame() -> Vec<u8> {
    Frame::builder(anchor_id(), MessageId::TagPosition)
        .response(true)
        .send(false)
        .timestamp_seconds(0x6553_f100)
        .timestamp_millis(500)
        .payload(&tag_position_payload())
        .build()
        .unwrap()
        .encode()
        .unwrap()
}

pub fn firmware_image(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}
