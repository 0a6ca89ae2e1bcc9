//! Binary codec for Linux input-event records read from `/dev/input/eventN`.
//!
//! Wire format (little-endian, `struct input_event`):
//! ```text
//! [tv_sec:W][tv_usec:W][type:2][code:2][value:4]
//! ```
//! `W` is the width of a C `long` on the host that produced the stream: 8 bytes
//! on 64-bit hosts (24-byte records), 4 bytes on 32-bit hosts (16-byte records).
//!
//! # Which codes matter?
//!
//! Only the multi-touch subset of the protocol is interpreted downstream:
//!
//! | Type        | Code                    | Meaning                              |
//! |-------------|-------------------------|--------------------------------------|
//! | `EV_SYN` 0  | `SYN_REPORT` 0          | end of one burst (value 0)           |
//! | `EV_ABS` 3  | `ABS_MT_SLOT` 47        | select the slot for later updates    |
//! | `EV_ABS` 3  | `ABS_MT_POSITION_X` 53  | X coordinate of the selected slot    |
//! | `EV_ABS` 3  | `ABS_MT_POSITION_Y` 54  | Y coordinate of the selected slot    |
//! | `EV_ABS` 3  | `ABS_MT_TRACKING_ID` 57 | new contact id, or `u32::MAX` = end  |

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Synchronisation event type.
pub const EV_SYN: u16 = 0x00;
/// Absolute axis event type.
pub const EV_ABS: u16 = 0x03;
/// `SYN_REPORT` code within [`EV_SYN`].
pub const SYN_REPORT: u16 = 0x00;

/// Selects the multi-touch slot that subsequent `ABS_MT_*` updates apply to.
pub const ABS_MT_SLOT: u16 = 0x2F;
/// Absolute X position of the contact in the selected slot.
pub const ABS_MT_POSITION_X: u16 = 0x35;
/// Absolute Y position of the contact in the selected slot.
pub const ABS_MT_POSITION_Y: u16 = 0x36;
/// Tracking id of the contact in the selected slot.
pub const ABS_MT_TRACKING_ID: u16 = 0x39;

/// Tracking-id value that ends the contact in the selected slot (`-1` as `u32`).
pub const TRACKING_ID_END: u32 = u32::MAX;

/// Errors that can occur while decoding a record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The byte slice is shorter than one full record.
    #[error("insufficient data: need {needed} bytes for one event record, got {available}")]
    InsufficientData { needed: usize, available: usize },
}

/// Width of the timestamp fields in a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordLayout {
    /// Two 8-byte timestamp fields; 24-byte records.
    Wide,
    /// Two 4-byte timestamp fields; 16-byte records.
    Narrow,
    /// Whatever the current host's `long` is.
    #[default]
    Native,
}

impl RecordLayout {
    /// Resolves [`RecordLayout::Native`] to a concrete width for this host.
    pub fn resolve(self) -> RecordLayout {
        match self {
            RecordLayout::Native if cfg!(target_pointer_width = "64") => RecordLayout::Wide,
            RecordLayout::Native => RecordLayout::Narrow,
            concrete => concrete,
        }
    }

    /// Size of one timestamp field in bytes.
    pub fn timestamp_width(self) -> usize {
        match self.resolve() {
            RecordLayout::Wide => 8,
            _ => 4,
        }
    }

    /// Total size of one record in bytes.
    pub fn record_size(self) -> usize {
        self.timestamp_width() * 2 + 8
    }
}

/// One decoded `input_event` record.
///
/// The timestamp is carried through for logging only; nothing downstream
/// depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventRecord {
    pub tv_sec: i64,
    pub tv_usec: i64,
    pub event_type: u16,
    pub code: u16,
    pub value: u32,
}

impl EventRecord {
    /// Creates a record with a zero timestamp.
    pub fn new(event_type: u16, code: u16, value: u32) -> Self {
        Self {
            event_type,
            code,
            value,
            ..Self::default()
        }
    }

    /// The record that separates two bursts: type, code and value all zero.
    pub fn sync() -> Self {
        Self::new(EV_SYN, SYN_REPORT, 0)
    }

    /// Returns `true` if type, code and value are all zero.
    pub fn is_sync_separator(&self) -> bool {
        self.event_type == 0 && self.code == 0 && self.value == 0
    }
}

/// Decodes one record from the beginning of `bytes`.
///
/// # Errors
///
/// Returns [`DecodeError::InsufficientData`] if `bytes` holds less than one
/// full record for `layout`.
pub fn decode_record(bytes: &[u8], layout: RecordLayout) -> Result<EventRecord, DecodeError> {
    let needed = layout.record_size();
    if bytes.len() < needed {
        return Err(DecodeError::InsufficientData {
            needed,
            available: bytes.len(),
        });
    }

    let w = layout.timestamp_width();
    let tv_sec = read_long(bytes, 0, w);
    let tv_usec = read_long(bytes, w, w);
    let off = w * 2;
    let event_type = u16::from_le_bytes([bytes[off], bytes[off + 1]]);
    let code = u16::from_le_bytes([bytes[off + 2], bytes[off + 3]]);
    let value = u32::from_le_bytes([
        bytes[off + 4],
        bytes[off + 5],
        bytes[off + 6],
        bytes[off + 7],
    ]);

    Ok(EventRecord {
        tv_sec,
        tv_usec,
        event_type,
        code,
        value,
    })
}

/// Encodes a record in the given layout.
///
/// Used to build captured streams for replay and tests.
pub fn encode_record(record: &EventRecord, layout: RecordLayout) -> Vec<u8> {
    let mut buf = Vec::with_capacity(layout.record_size());
    match layout.resolve() {
        RecordLayout::Wide => {
            buf.extend_from_slice(&record.tv_sec.to_le_bytes());
            buf.extend_from_slice(&record.tv_usec.to_le_bytes());
        }
        _ => {
            buf.extend_from_slice(&(record.tv_sec as i32).to_le_bytes());
            buf.extend_from_slice(&(record.tv_usec as i32).to_le_bytes());
        }
    }
    buf.extend_from_slice(&record.event_type.to_le_bytes());
    buf.extend_from_slice(&record.code.to_le_bytes());
    buf.extend_from_slice(&record.value.to_le_bytes());
    buf
}

fn read_long(bytes: &[u8], off: usize, width: usize) -> i64 {
    if width == 8 {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&bytes[off..off + 8]);
        i64::from_le_bytes(raw)
    } else {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&bytes[off..off + 4]);
        i32::from_le_bytes(raw) as i64
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
