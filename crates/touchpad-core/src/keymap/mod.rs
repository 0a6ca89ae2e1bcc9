//! Key name and key code translation tables.
//!
//! The canonical representation is [`KeyCode`].  Button names are parsed into
//! it at startup and translated to platform codes at the emulation boundary.

pub mod key;
pub mod linux_evdev;

pub use key::KeyCode;

/// Unified key mapper providing all translation directions.
pub struct KeyMapper;

impl KeyMapper {
    /// Translates a key name straight to a Linux `KEY_*` code.
    ///
    /// Returns `None` if the name is not a known key.
    pub fn name_to_evdev(name: &str) -> Option<u16> {
        KeyCode::from_name(name).map(linux_evdev::key_to_evdev)
    }
}
