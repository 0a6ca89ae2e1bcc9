//! Event decoder: turns raw [`EventRecord`]s into semantic touch sub-events.
//!
//! The device stream never repeats the slot number on position or tracking
//! records; it sends one `ABS_MT_SLOT` record and every following `ABS_MT_*`
//! record applies to that slot until the next one.  The decoder carries that
//! cursor in an explicit [`DecoderState`] and stamps the slot onto each
//! sub-event it returns, so the tracker never has to share the cursor.
//!
//! ```text
//! (3, 47, 0)   -> SlotSelect(0)
//! (3, 57, 12)  -> TrackingBegin { id: 12, slot: 0 }
//! (3, 53, 726) -> PositionX { slot: 0, value: 726 }
//! (3, 54, 296) -> PositionY { slot: 0, value: 296 }
//! (0, 0, 0)    -> SyncSeparator
//! ```

use crate::domain::contact::{Slot, TrackingId};
use crate::protocol::record::{
    EventRecord, ABS_MT_POSITION_X, ABS_MT_POSITION_Y, ABS_MT_SLOT, ABS_MT_TRACKING_ID, EV_ABS,
    TRACKING_ID_END,
};

/// A semantic sub-event decoded from one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchEvent {
    /// The current burst is complete; run one translation pass.
    SyncSeparator,
    /// Subsequent updates apply to this slot.
    SlotSelect(Slot),
    /// A new contact appeared in `slot`.
    TrackingBegin { id: TrackingId, slot: Slot },
    /// The contact in `slot` has ended.
    TrackingEnd { slot: Slot },
    /// New X coordinate for the contact in `slot`.
    PositionX { slot: Slot, value: i32 },
    /// New Y coordinate for the contact in `slot`.
    PositionY { slot: Slot, value: i32 },
}

/// Cursor state threaded through [`decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecoderState {
    /// Slot selected by the most recent `ABS_MT_SLOT` record (0 until one arrives).
    pub slot: Slot,
}

/// Decodes one record against the current decoder state.
///
/// Returns the updated state alongside the sub-event.  Records that are not
/// part of the modelled multi-touch subset decode to `None`.
pub fn decode(state: DecoderState, record: &EventRecord) -> (DecoderState, Option<TouchEvent>) {
    if record.is_sync_separator() {
        return (state, Some(TouchEvent::SyncSeparator));
    }
    if record.event_type != EV_ABS {
        return (state, None);
    }

    match record.code {
        ABS_MT_SLOT => (
            DecoderState { slot: record.value },
            Some(TouchEvent::SlotSelect(record.value)),
        ),
        ABS_MT_TRACKING_ID if record.value == TRACKING_ID_END => {
            (state, Some(TouchEvent::TrackingEnd { slot: state.slot }))
        }
        ABS_MT_TRACKING_ID => (
            state,
            Some(TouchEvent::TrackingBegin {
                id: record.value,
                slot: state.slot,
            }),
        ),
        ABS_MT_POSITION_X => (
            state,
            Some(TouchEvent::PositionX {
                slot: state.slot,
                value: record.value as i32,
            }),
        ),
        ABS_MT_POSITION_Y => (
            state,
            Some(TouchEvent::PositionY {
                slot: state.slot,
                value: record.value as i32,
            }),
        ),
        _ => (state, None),
    }
}

/// Owns a [`DecoderState`] and feeds it through [`decode`] one record at a time.
#[derive(Debug, Default)]
pub struct EventDecoder {
    state: DecoderState,
}

impl EventDecoder {
    /// Creates a decoder with slot 0 selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `record`, advancing the internal state.
    pub fn decode(&mut self, record: &EventRecord) -> Option<TouchEvent> {
        let (next, event) = decode(self.state, record);
        self.state = next;
        event
    }

    /// Returns the current cursor state.
    pub fn state(&self) -> DecoderState {
        self.state
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
