//! touchpad-daemon library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the daemon do?
//!
//! It turns a touchscreen into a game controller.  The screen shows a fixed
//! picture of buttons; the daemon reads the raw multi-touch event stream,
//! follows every finger, and holds down the keyboard key named by whichever
//! button a finger is on:
//!
//! 1. Reads fixed-size event records from the touchscreen's event device.
//! 2. Decodes the multi-touch subset into per-slot sub-events.
//! 3. Tracks each contact from tracking-begin to tracking-end.
//! 4. On every sync separator, hit-tests each contact against the button
//!    table and presses or releases keys on a uinput virtual keyboard.

/// Application layer: use cases for the daemon.
pub mod application;

/// Infrastructure layer: device reader, key emulation, configuration.
pub mod infrastructure;
