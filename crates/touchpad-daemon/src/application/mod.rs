//! Application layer use cases for the daemon.
//!
//! - **`translate_keys`** – maps tracked contacts to key press/release actions
//!   through a `KeyEmulator` injected at construction time.
//!
//! - **`process_events`** – wires the decoder, tracker and translator into the
//!   blocking record pipeline and defines the `RecordSource` it pulls from.

pub mod process_events;
pub mod translate_keys;
