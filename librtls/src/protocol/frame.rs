// librtls/librtls/src/protocol/frame.rs

use crate::constants::{
    FRAME_CHECKSUM_LEN, FRAME_DEFAULT_DELIMITER, FRAME_HEADER_LEN, FRAME_MAX_PAYLOAD_LEN,
    FRAME_MIN_LEN, FRAME_TIMESTAMP_LEN,
};
use crate::protocol::checksum::sum8;
use crate::protocol::header::HeaderFlags;
use crate::protocol::parser;
use crate::types::{DeviceId, MessageId};
use crate::{Error, Result};

/// Whether `Frame::decode_with` checks the trailing checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChecksumPolicy {
    /// Recompute the sum and reject mismatches
    #[default]
    Verify,
    /// Accept whatever checksum byte is present
    Trust,
}

/// Anchor/tag message frame. Provides encode/decode of the wire frame
/// Format: [Header(1)] [DeviceId(6)] [MessageId(1)] [Len(1)]
///         [TimestampSec(0|4)] [TimestampMs(0|4)] [Payload(Len-1)] [Checksum(1)]
/// Len counts the payload plus the checksum byte.
/// Checksum: sum of every preceding byte, mod 256.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    header: HeaderFlags,
    device_id: DeviceId,
    message_id: MessageId,
    timestamp_seconds: Option<u32>,
    timestamp_millis: Option<u32>,
    payload: Vec<u8>,
}

impl Frame {
    pub fn builder(device_id: DeviceId, message_id: MessageId) -> FrameBuilder {
        FrameBuilder::new(device_id, message_id)
    }

    /// Host-to-device request with the default delimiter and no timestamps.
    pub fn request(device_id: DeviceId, message_id: MessageId, payload: &[u8]) -> Result<Self> {
        Self::builder(device_id, message_id)
            .payload(payload)
            .build()
    }

    /// Device-to-host response with the default delimiter and no timestamps.
    pub fn response(device_id: DeviceId, message_id: MessageId, payload: &[u8]) -> Result<Self> {
        Self::builder(device_id, message_id)
            .response(true)
            .send(false)
            .payload(payload)
            .build()
    }

    pub fn header(&self) -> HeaderFlags {
        self.header
    }

    pub fn delimiter(&self) -> u8 {
        self.header.delimiter()
    }

    pub fn is_response(&self) -> bool {
        self.header.is_response()
    }

    pub fn is_send(&self) -> bool {
        self.header.is_send()
    }

    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    pub fn message_id(&self) -> MessageId {
        self.message_id
    }

    pub fn timestamp_seconds(&self) -> Option<u32> {
        self.timestamp_seconds
    }

    pub fn timestamp_millis(&self) -> Option<u32> {
        self.timestamp_millis
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// Value of the on-wire length byte (payload + checksum).
    pub fn declared_length(&self) -> usize {
        self.payload.len() + FRAME_CHECKSUM_LEN
    }

    /// Total encoded size in bytes.
    pub fn encoded_len(&self) -> usize {
        FRAME_HEADER_LEN
            + timestamps_len(
                self.timestamp_seconds.is_some(),
                self.timestamp_millis.is_some(),
            )
            + self.declared_length()
    }

    /// Encode into a full wire frame. The presence bits and the length
    /// byte are always derived from the frame contents.
    pub fn encode(&self) -> Result<Vec<u8>> {
        check_payload_len(self.payload.len())?;

        let header = self.header.with_timestamps(
            self.timestamp_seconds.is_some(),
            self.timestamp_millis.is_some(),
        );

        let mut out = Vec::with_capacity(self.encoded_len());
        out.push(header.as_byte());
        out.extend_from_slice(self.device_id.as_bytes());
        out.push(self.message_id.as_u8());
        out.push(self.declared_length() as u8);
        if let Some(secs) = self.timestamp_seconds {
            out.extend_from_slice(&secs.to_be_bytes());
        }
        if let Some(millis) = self.timestamp_millis {
            out.extend_from_slice(&millis.to_be_bytes());
        }
        out.extend_from_slice(&self.payload);
        out.push(sum8(&out));
        Ok(out)
    }

    /// Decode exactly one frame, verifying the checksum.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Self::decode_with(bytes, ChecksumPolicy::Verify)
    }

    /// Decode exactly one frame with an explicit checksum policy. Bytes
    /// after the checksum are rejected.
    pub fn decode_with(bytes: &[u8], policy: ChecksumPolicy) -> Result<Self> {
        let (frame, used) = Self::decode_prefix(bytes, policy)?;
        if used != bytes.len() {
            return Err(Error::FrameFormat(format!(
                "{} trailing bytes after checksum",
                bytes.len() - used
            )));
        }
        Ok(frame)
    }

    /// Decode the frame at the start of `bytes` and return it together with
    /// the number of bytes it occupied. Suited to buffers holding several
    /// back-to-back frames.
    pub fn decode_prefix(bytes: &[u8], policy: ChecksumPolicy) -> Result<(Self, usize)> {
        if bytes.is_empty() {
            return Err(Error::EmptyInput);
        }
        parser::ensure_len(bytes, FRAME_MIN_LEN)?;

        let header = HeaderFlags::from_byte(bytes[0]);
        let device_id = parser::device_id_at(bytes, 1)?;
        let message_id = MessageId::from(bytes[7]);
        let length = bytes[8] as usize;
        if length < FRAME_CHECKSUM_LEN {
            return Err(Error::FrameFormat("declared length is zero".into()));
        }

        let required = FRAME_HEADER_LEN
            + timestamps_len(header.has_timestamp_seconds(), header.has_timestamp_millis())
            + length;
        parser::ensure_len(bytes, required)?;

        let mut pos = FRAME_HEADER_LEN;
        let timestamp_seconds = if header.has_timestamp_seconds() {
            let v = parser::be_u32_at(bytes, pos)?;
            pos += FRAME_TIMESTAMP_LEN;
            Some(v)
        } else {
            None
        };
        let timestamp_millis = if header.has_timestamp_millis() {
            let v = parser::be_u32_at(bytes, pos)?;
            pos += FRAME_TIMESTAMP_LEN;
            Some(v)
        } else {
            None
        };

        let payload_len = length - FRAME_CHECKSUM_LEN;
        let payload = parser::slice_at(bytes, pos, payload_len)?.to_vec();
        pos += payload_len;

        let actual = parser::byte_at(bytes, pos)?;
        if policy == ChecksumPolicy::Verify {
            let expected = sum8(&bytes[..pos]);
            if actual != expected {
                return Err(Error::ChecksumMismatch { expected, actual });
            }
        }

        Ok((
            Self {
                header,
                device_id,
                message_id,
                timestamp_seconds,
                timestamp_millis,
                payload,
            },
            pos + FRAME_CHECKSUM_LEN,
        ))
    }
}

fn timestamps_len(seconds: bool, millis: bool) -> usize {
    (seconds as usize + millis as usize) * FRAME_TIMESTAMP_LEN
}

fn check_payload_len(len: usize) -> Result<()> {
    if len > FRAME_MAX_PAYLOAD_LEN {
        return Err(Error::InvalidLength {
            expected: FRAME_MAX_PAYLOAD_LEN,
            actual: len,
        });
    }
    Ok(())
}

/// Builder for outbound frames.
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    device_id: DeviceId,
    message_id: MessageId,
    delimiter: u8,
    is_response: bool,
    is_send: bool,
    timestamp_seconds: Option<u32>,
    timestamp_millis: Option<u32>,
    payload: Vec<u8>,
}

impl FrameBuilder {
    pub fn new(device_id: DeviceId, message_id: MessageId) -> Self {
        Self {
            device_id,
            message_id,
            delimiter: FRAME_DEFAULT_DELIMITER,
            is_response: false,
            is_send: true,
            timestamp_seconds: None,
            timestamp_millis: None,
            payload: Vec::new(),
        }
    }

    /// Only the low nibble is kept.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter & 0x0F;
        self
    }

    pub fn response(mut self, is_response: bool) -> Self {
        self.is_response = is_response;
        self
    }

    pub fn send(mut self, is_send: bool) -> Self {
        self.is_send = is_send;
        self
    }

    pub fn timestamp_seconds(mut self, secs: u32) -> Self {
        self.timestamp_seconds = Some(secs);
        self
    }

    pub fn timestamp_millis(mut self, millis: u32) -> Self {
        self.timestamp_millis = Some(millis);
        self
    }

    pub fn payload(mut self, payload: &[u8]) -> Self {
        self.payload = payload.to_vec();
        self
    }

    pub fn build(self) -> Result<Frame> {
        check_payload_len(self.payload.len())?;
        let header = HeaderFlags::new(self.delimiter, self.is_response, self.is_send)
            .with_timestamps(
                self.timestamp_seconds.is_some(),
                self.timestamp_millis.is_some(),
            );
        Ok(Frame {
            header,
            device_id: self.device_id,
            message_id: self.message_id,
            timestamp_seconds: self.timestamp_seconds,
            timestamp_millis: self.timestamp_millis,
            payload: self.payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn id() -> DeviceId {
        DeviceId::from_bytes([0x10, 0x20, 0x30, 0x40, 0x50, 0x60])
    }

    #[test]
    fn encode_layout() {
        let frame = Frame::request(id(), MessageId::Version, &[0xAA, 0xBB]).unwrap();
        let bytes = frame.encode().unwrap();
        assert_eq!(bytes.len(), 9 + 2 + 1);
        assert_eq!(bytes[0], 0xA1);
        assert_eq!(&bytes[1..7], id().as_bytes());
        assert_eq!(bytes[7], 0x01);
        assert_eq!(bytes[8], 3);
        assert_eq!(&bytes[9..11], &[0xAA, 0xBB]);
        assert_eq!(bytes[11], sum8(&bytes[..11]));
    }

    #[test]
    fn encode_decode_roundtrip_with_timestamps() {
        let frame = Frame::builder(id(), MessageId::TagPosition)
            .response(true)
            .timestamp_seconds(0x0102_0304)
            .timestamp_millis(999)
            .payload(&[1, 2, 3])
            .build()
            .unwrap();
        let bytes = frame.encode().unwrap();
        assert_eq!(bytes.len(), frame.encoded_len());
        assert_eq!(&bytes[9..13], &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(&bytes[13..17], &999u32.to_be_bytes());
        assert_eq!(Frame::decode(&bytes).unwrap(), frame);
    }

    #[test]
    fn millis_only_is_reachable() {
        let frame = Frame::builder(id(), MessageId::Control)
            .timestamp_millis(0xDEAD_BEEF)
            .payload(&[0x07])
            .build()
            .unwrap();
        let bytes = frame.encode().unwrap();
        assert_eq!(bytes[0] & 0x0C, 0x08);
        let decoded = Frame::decode(&bytes).unwrap();
        assert_eq!(decoded.timestamp_seconds(), None);
        assert_eq!(decoded.timestamp_millis(), Some(0xDEAD_BEEF));
        assert_eq!(decoded.payload(), &[0x07]);
    }

    #[test]
    fn encode_derives_presence_bits_from_fields() {
        // header claims timestamps but the frame carries none
        let mut frame = Frame::request(id(), MessageId::Version, &[]).unwrap();
        frame.header = frame.header.with_timestamps(true, true);
        let bytes = frame.encode().unwrap();
        assert_eq!(bytes[0] & 0x0C, 0);
        assert_eq!(bytes.len(), 10);
    }

    #[test]
    fn empty_input() {
        match Frame::decode(&[]) {
            Err(Error::EmptyInput) => {}
            other => panic!("expected EmptyInput, got: {:?}", other),
        }
    }

    #[test]
    fn truncated_prefix() {
        match Frame::decode(&[0xA1, 1, 2, 3]) {
            Err(Error::TruncatedInput {
                expected: 10,
                actual: 4,
            }) => {}
            other => panic!("expected TruncatedInput, got: {:?}", other),
        }
    }

    #[test]
    fn truncated_payload() {
        let bytes = Frame::request(id(), MessageId::Version, &[1, 2, 3, 4])
            .unwrap()
            .encode()
            .unwrap();
        match Frame::decode(&bytes[..bytes.len() - 2]) {
            Err(Error::TruncatedInput {
                expected: 14,
                actual: 12,
            }) => {}
            other => panic!("expected TruncatedInput, got: {:?}", other),
        }
    }

    #[test]
    fn truncated_by_timestamp_flags() {
        // flags announce both timestamps but only the checksum follows
        let mut bytes = vec![0xAD];
        bytes.extend_from_slice(id().as_bytes());
        bytes.push(0x01);
        bytes.push(1);
        bytes.push(0x00);
        match Frame::decode(&bytes) {
            Err(Error::TruncatedInput {
                expected: 18,
                actual: 10,
            }) => {}
            other => panic!("expected TruncatedInput, got: {:?}", other),
        }
    }

    #[test]
    fn header_without_checksum_is_truncated() {
        let mut bytes = vec![0xA1];
        bytes.extend_from_slice(id().as_bytes());
        bytes.extend_from_slice(&[0x01, 0x01]);
        match Frame::decode(&bytes) {
            Err(Error::TruncatedInput {
                expected: 10,
                actual: 9,
            }) => {}
            other => panic!("expected TruncatedInput, got: {:?}", other),
        }
    }

    #[test]
    fn zero_length_is_format_error() {
        let mut bytes = vec![0xA1];
        bytes.extend_from_slice(id().as_bytes());
        bytes.push(0x01);
        bytes.push(0);
        bytes.push(0);
        assert!(matches!(Frame::decode(&bytes), Err(Error::FrameFormat(_))));
    }

    #[test]
    fn checksum_mismatch_and_trust_policy() {
        let frame = Frame::request(id(), MessageId::Version, &[0x01, 0x02]).unwrap();
        let mut bytes = frame.encode().unwrap();
        let last = bytes.len() - 1;
        bytes[last] = bytes[last].wrapping_add(1);

        match Frame::decode(&bytes) {
            Err(Error::ChecksumMismatch { expected, actual }) => {
                assert_eq!(actual, expected.wrapping_add(1));
            }
            other => panic!("expected checksum mismatch, got: {:?}", other),
        }

        let trusted = Frame::decode_with(&bytes, ChecksumPolicy::Trust).unwrap();
        assert_eq!(trusted, frame);
    }

    #[test]
    fn trailing_bytes_rejected_but_prefix_decodes() {
        let a = Frame::request(id(), MessageId::Version, &[]).unwrap();
        let b = Frame::response(id(), MessageId::Control, &[0x05]).unwrap();
        let mut stream = a.encode().unwrap();
        stream.extend_from_slice(&b.encode().unwrap());

        assert!(matches!(Frame::decode(&stream), Err(Error::FrameFormat(_))));

        let (first, used) = Frame::decode_prefix(&stream, ChecksumPolicy::Verify).unwrap();
        assert_eq!(first, a);
        let (second, used2) = Frame::decode_prefix(&stream[used..], ChecksumPolicy::Verify).unwrap();
        assert_eq!(second, b);
        assert_eq!(used + used2, stream.len());
    }

    #[test]
    fn payload_too_large() {
        let big = vec![0u8; FRAME_MAX_PAYLOAD_LEN + 1];
        match Frame::request(id(), MessageId::Version, &big) {
            Err(Error::InvalidLength {
                expected: 254,
                actual: 255,
            }) => {}
            other => panic!("expected InvalidLength, got: {:?}", other),
        }
        let max = vec![0u8; FRAME_MAX_PAYLOAD_LEN];
        let bytes = Frame::request(id(), MessageId::Version, &max)
            .unwrap()
            .encode()
            .unwrap();
        assert_eq!(bytes[8], 0xFF);
    }

    proptest! {
        #[test]
        fn frame_roundtrip_prop(
            payload in prop::collection::vec(any::<u8>(), 0..=250),
            secs in prop::option::of(any::<u32>()),
            millis in prop::option::of(any::<u32>()),
            msg in any::<u8>(),
            response in any::<bool>(),
            send in any::<bool>(),
            delimiter in 0u8..16,
        ) {
            let mut b = Frame::builder(id(), MessageId::from(msg))
                .delimiter(delimiter)
                .response(response)
                .send(send)
                .payload(&payload);
            if let Some(s) = secs {
                b = b.timestamp_seconds(s);
            }
            if let Some(m) = millis {
                b = b.timestamp_millis(m);
            }
            let frame = b.build().unwrap();
            let bytes = frame.encode().unwrap();

            // checksum is the mod-256 sum of everything before it
            let (last, rest) = bytes.split_last().unwrap();
            prop_assert_eq!(*last, sum8(rest));

            let expected_len = 9 + 4 * secs.is_some() as usize + 4 * millis.is_some() as usize
                + payload.len() + 1;
            prop_assert_eq!(bytes.len(), expected_len);

            let decoded = Frame::decode(&bytes).unwrap();
            prop_assert_eq!(decoded, frame);
        }

        #[test]
        fn decode_random_bytes_no_panic(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
            use std::panic::{catch_unwind, AssertUnwindSafe};
            let res = catch_unwind(AssertUnwindSafe(|| Frame::decode(&bytes)));
            prop_assert!(res.is_ok());
        }
    }
}
