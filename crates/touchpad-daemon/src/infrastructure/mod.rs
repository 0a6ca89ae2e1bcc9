//! Infrastructure layer for the daemon.
//!
//! Contains OS-facing adapters: the event device reader, key emulation and
//! configuration storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `touchpad_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`device`** – blocking reader of fixed-size event records from
//!   `/dev/input/eventN` or a captured event file.
//!
//! - **`input_emulation`** – implementations of `KeyEmulator`: a uinput
//!   virtual keyboard on Linux and a recording emulator for tests and
//!   `--dry-run`.
//!
//! - **`storage`** – TOML configuration file.

pub mod device;
pub mod input_emulation;
pub mod storage;
