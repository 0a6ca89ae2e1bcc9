//! Key emulation implementations.
//!
//! The uinput emulator is only compiled on Linux; the recording emulator is
//! available everywhere.

pub mod mock;

#[cfg(target_os = "linux")]
pub mod linux;
