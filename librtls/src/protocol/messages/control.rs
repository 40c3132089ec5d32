// librtls/librtls/src/protocol/messages/control.rs

use crate::bitfield::{self, BitField};
use crate::constants::CONTROL_PAYLOAD_LEN;
use crate::protocol::frame::Frame;
use crate::protocol::parser;
use crate::types::{DeviceId, MessageId};
use crate::Result;

/// Register layout, LSB first:
/// buzzer(1) led(1) relay(1) auto-report(1) report-interval(4)
const FIELDS: [BitField; 5] = bitfield::contiguous(8, [1, 1, 1, 1, 4]);

const BUZZER: BitField = FIELDS[0];
const LED: BitField = FIELDS[1];
const RELAY: BitField = FIELDS[2];
const AUTO_REPORT: BitField = FIELDS[3];
const REPORT_INTERVAL: BitField = FIELDS[4];

/// Device control-flag register, one byte on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlFlags {
    pub buzzer: bool,
    pub led: bool,
    pub relay: bool,
    pub auto_report: bool,
    /// Device-defined interval code, 0..=15
    pub report_interval: u8,
}

impl ControlFlags {
    pub fn decode(data: &[u8]) -> Result<Self> {
        parser::ensure_exact_len(data, CONTROL_PAYLOAD_LEN)?;
        Ok(Self::from_byte(data[0]))
    }

    pub fn from_byte(b: u8) -> Self {
        let w = b as u32;
        Self {
            buzzer: BUZZER.get_flag(w),
            led: LED.get_flag(w),
            relay: RELAY.get_flag(w),
            auto_report: AUTO_REPORT.get_flag(w),
            report_interval: REPORT_INTERVAL.get(w) as u8,
        }
    }

    /// Pack into the register byte. Fails if `report_interval` exceeds 4 bits.
    pub fn encode(&self) -> Result<[u8; CONTROL_PAYLOAD_LEN]> {
        let w = BUZZER.set_flag(0, self.buzzer);
        let w = LED.set_flag(w, self.led);
        let w = RELAY.set_flag(w, self.relay);
        let w = AUTO_REPORT.set_flag(w, self.auto_report);
        let w = REPORT_INTERVAL.set(w, self.report_interval as u32)?;
        Ok([w as u8])
    }

    /// Build a control request frame for `device_id`.
    pub fn to_frame(&self, device_id: DeviceId) -> Result<Frame> {
        Frame::request(device_id, MessageId::Control, &self.encode()?)
    }
}
