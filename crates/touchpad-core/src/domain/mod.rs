//! Domain entities for the touchscreen controller.
//!
//! Pure logic with no OS, device or emulator dependencies:
//!
//! - [`geometry`] – named button regions and the hit tester.
//! - [`contact`] – one tracked touch.
//! - [`tracker`] – the contact set and its transition rules.

pub mod contact;
pub mod geometry;
pub mod tracker;
