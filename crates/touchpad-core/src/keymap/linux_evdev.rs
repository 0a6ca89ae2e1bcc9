//! [`KeyCode`] to Linux input-event key code translation.
//!
//! Values are the `KEY_*` constants from `linux/input-event-codes.h`; they are
//! what a uinput virtual keyboard emits in `EV_KEY` records.

use super::key::KeyCode;

/// Translates a [`KeyCode`] to its Linux `KEY_*` code.
pub fn key_to_evdev(key: KeyCode) -> u16 {
    match key {
        KeyCode::Escape => 1,       // KEY_ESC
        KeyCode::Digit1 => 2,       // KEY_1
        KeyCode::Digit2 => 3,
        KeyCode::Digit3 => 4,
        KeyCode::Digit4 => 5,
        KeyCode::Digit5 => 6,
        KeyCode::Digit6 => 7,
        KeyCode::Digit7 => 8,
        KeyCode::Digit8 => 9,
        KeyCode::Digit9 => 10,
        KeyCode::Digit0 => 11,      // KEY_0
        KeyCode::Backspace => 14,   // KEY_BACKSPACE
        KeyCode::Tab => 15,         // KEY_TAB
        KeyCode::KeyQ => 16,
        KeyCode::KeyW => 17,
        KeyCode::KeyE => 18,
        KeyCode::KeyR => 19,
        KeyCode::KeyT => 20,
        KeyCode::KeyY => 21,
        KeyCode::KeyU => 22,
        KeyCode::KeyI => 23,
        KeyCode::KeyO => 24,
        KeyCode::KeyP => 25,
        KeyCode::Enter => 28,       // KEY_ENTER
        KeyCode::ControlLeft => 29, // KEY_LEFTCTRL
        KeyCode::KeyA => 30,
        KeyCode::KeyS => 31,
        KeyCode::KeyD => 32,
        KeyCode::KeyF => 33,
        KeyCode::KeyG => 34,
        KeyCode::KeyH => 35,
        KeyCode::KeyJ => 36,
        KeyCode::KeyK => 37,
        KeyCode::KeyL => 38,
        KeyCode::ShiftLeft => 42,   // KEY_LEFTSHIFT
        KeyCode::KeyZ => 44,
        KeyCode::KeyX => 45,
        KeyCode::KeyC => 46,
        KeyCode::KeyV => 47,
        KeyCode::KeyB => 48,
        KeyCode::KeyN => 49,
        KeyCode::KeyM => 50,
        KeyCode::ShiftRight => 54,  // KEY_RIGHTSHIFT
        KeyCode::AltLeft => 56,     // KEY_LEFTALT
        KeyCode::Space => 57,       // KEY_SPACE
        KeyCode::F1 => 59,
        KeyCode::F2 => 60,
        KeyCode::F3 => 61,
        KeyCode::F4 => 62,
        KeyCode::F5 => 63,
        KeyCode::F6 => 64,
        KeyCode::F7 => 65,
        KeyCode::F8 => 66,
        KeyCode::F9 => 67,
        KeyCode::F10 => 68,
        KeyCode::F11 => 87,
        KeyCode::F12 => 88,
        KeyCode::ControlRight => 97, // KEY_RIGHTCTRL
        KeyCode::AltRight => 100,    // KEY_RIGHTALT
        KeyCode::Home => 102,
        KeyCode::ArrowUp => 103,
        KeyCode::PageUp => 104,
        KeyCode::ArrowLeft => 105,
        KeyCode::ArrowRight => 106,
        KeyCode::End => 107,
        KeyCode::ArrowDown => 108,
        KeyCode::PageDown => 109,
        KeyCode::Insert => 110,
        KeyCode::Delete => 111,
    }
}
