//! # touchpad-core
//!
//! Shared library for the touchscreen game controller: the input-event record
//! codec, the multi-touch decoder, the contact tracker, the button geometry
//! table with its hit tester, and key name translation tables.
//!
//! It has zero dependencies on OS APIs, device files or input emulation.
//!
//! # Architecture overview
//!
//! A touchscreen reports touches as a stream of small fixed-size records.
//! This crate turns that stream into per-contact state the daemon can map to
//! key presses:
//!
//! ```text
//! bytes ─► protocol::record ─► protocol::decoder ─► domain::tracker
//!                                                        │
//!                         domain::geometry (hit test) ◄──┘
//! ```
//!
//! - **`protocol`** – decoding raw `input_event` records and interpreting the
//!   multi-touch subset into [`TouchEvent`]s.
//! - **`domain`** – contacts, the tracker that owns them, and the geometry
//!   table of named buttons.
//! - **`keymap`** – button name to key code translation.

pub mod domain;
pub mod keymap;
pub mod protocol;

// Re-export the most-used types at the crate root.
pub use domain::contact::{Contact, ContactPhase, Slot, TrackingId, UNKNOWN_COORD};
pub use domain::geometry::{Button, ButtonShape, GeometryError, GeometryTable};
pub use domain::tracker::{DropReason, TouchTracker, Transition};
pub use keymap::{KeyCode, KeyMapper};
pub use protocol::decoder::{DecoderState, EventDecoder, TouchEvent};
pub use protocol::record::{decode_record, encode_record, DecodeError, EventRecord, RecordLayout};
