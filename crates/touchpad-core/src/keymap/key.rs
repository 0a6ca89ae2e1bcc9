//! Canonical key identifiers and their human-readable names.
//!
//! Button names in the geometry table double as key names: a button called
//! `"up arrow"` presses the Up key.  Names follow the common desktop
//! automation spelling (`"esc"`, `"enter"`, `"left shift"`, `"page up"`) and
//! are matched case-insensitively.

/// A key the controller can press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Letters
    KeyA,
    KeyB,
    KeyC,
    KeyD,
    KeyE,
    KeyF,
    KeyG,
    KeyH,
    KeyI,
    KeyJ,
    KeyK,
    KeyL,
    KeyM,
    KeyN,
    KeyO,
    KeyP,
    KeyQ,
    KeyR,
    KeyS,
    KeyT,
    KeyU,
    KeyV,
    KeyW,
    KeyX,
    KeyY,
    KeyZ,

    // Digits
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Digit0,

    // Control keys
    Enter,
    Escape,
    Backspace,
    Tab,
    Space,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Navigation cluster
    Insert,
    Home,
    PageUp,
    Delete,
    End,
    PageDown,
    ArrowRight,
    ArrowLeft,
    ArrowDown,
    ArrowUp,

    // Modifiers
    ControlLeft,
    ShiftLeft,
    AltLeft,
    ControlRight,
    ShiftRight,
    AltRight,
}

/// Primary name first; aliases follow the primary entry for the same key.
const NAMES: &[(&str, KeyCode)] = &[
    ("a", KeyCode::KeyA),
    ("b", KeyCode::KeyB),
    ("c", KeyCode::KeyC),
    ("d", KeyCode::KeyD),
    ("e", KeyCode::KeyE),
    ("f", KeyCode::KeyF),
    ("g", KeyCode::KeyG),
    ("h", KeyCode::KeyH),
    ("i", KeyCode::KeyI),
    ("j", KeyCode::KeyJ),
    ("k", KeyCode::KeyK),
    ("l", KeyCode::KeyL),
    ("m", KeyCode::KeyM),
    ("n", KeyCode::KeyN),
    ("o", KeyCode::KeyO),
    ("p", KeyCode::KeyP),
    ("q", KeyCode::KeyQ),
    ("r", KeyCode::KeyR),
    ("s", KeyCode::KeyS),
    ("t", KeyCode::KeyT),
    ("u", KeyCode::KeyU),
    ("v", KeyCode::KeyV),
    ("w", KeyCode::KeyW),
    ("x", KeyCode::KeyX),
    ("y", KeyCode::KeyY),
    ("z", KeyCode::KeyZ),
    ("1", KeyCode::Digit1),
    ("2", KeyCode::Digit2),
    ("3", KeyCode::Digit3),
    ("4", KeyCode::Digit4),
    ("5", KeyCode::Digit5),
    ("6", KeyCode::Digit6),
    ("7", KeyCode::Digit7),
    ("8", KeyCode::Digit8),
    ("9", KeyCode::Digit9),
    ("0", KeyCode::Digit0),
    ("enter", KeyCode::Enter),
    ("return", KeyCode::Enter),
    ("esc", KeyCode::Escape),
    ("escape", KeyCode::Escape),
    ("backspace", KeyCode::Backspace),
    ("tab", KeyCode::Tab),
    ("space", KeyCode::Space),
    ("f1", KeyCode::F1),
    ("f2", KeyCode::F2),
    ("f3", KeyCode::F3),
    ("f4", KeyCode::F4),
    ("f5", KeyCode::F5),
    ("f6", KeyCode::F6),
    ("f7", KeyCode::F7),
    ("f8", KeyCode::F8),
    ("f9", KeyCode::F9),
    ("f10", KeyCode::F10),
    ("f11", KeyCode::F11),
    ("f12", KeyCode::F12),
    ("insert", KeyCode::Insert),
    ("home", KeyCode::Home),
    ("page up", KeyCode::PageUp),
    ("delete", KeyCode::Delete),
    ("end", KeyCode::End),
    ("page down", KeyCode::PageDown),
    ("right arrow", KeyCode::ArrowRight),
    ("right", KeyCode::ArrowRight),
    ("left arrow", KeyCode::ArrowLeft),
    ("left", KeyCode::ArrowLeft),
    ("down arrow", KeyCode::ArrowDown),
    ("down", KeyCode::ArrowDown),
    ("up arrow", KeyCode::ArrowUp),
    ("up", KeyCode::ArrowUp),
    ("left ctrl", KeyCode::ControlLeft),
    ("ctrl", KeyCode::ControlLeft),
    ("left shift", KeyCode::ShiftLeft),
    ("shift", KeyCode::ShiftLeft),
    ("left alt", KeyCode::AltLeft),
    ("alt", KeyCode::AltLeft),
    ("right ctrl", KeyCode::ControlRight),
    ("right shift", KeyCode::ShiftRight),
    ("right alt", KeyCode::AltRight),
];

impl KeyCode {
    /// Parses a key name such as `"a"`, `"Up Arrow"` or `"esc"`.
    ///
    /// Surrounding whitespace is ignored and matching is case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim();
        NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(wanted))
            .map(|&(_, key)| key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_resolves_builtin_layout_names() {
        for (name, expected) in [
            ("a", KeyCode::KeyA),
            ("b", KeyCode::KeyB),
            ("x", KeyCode::KeyX),
            ("y", KeyCode::KeyY),
            ("up arrow", KeyCode::ArrowUp),
            ("down arrow", KeyCode::ArrowDown),
            ("left arrow", KeyCode::ArrowLeft),
            ("right arrow", KeyCode::ArrowRight),
            ("esc", KeyCode::Escape),
        ] {
            assert_eq!(KeyCode::from_name(name), Some(expected), "name {name:?}");
        }
    }

    #[test]
    fn test_from_name_is_case_insensitive_and_trims() {
        assert_eq!(KeyCode::from_name("  Left Shift "), Some(KeyCode::ShiftLeft));
        assert_eq!(KeyCode::from_name("ENTER"), Some(KeyCode::Enter));
    }

    #[test]
    fn test_from_name_rejects_unknown_names() {
        assert_eq!(KeyCode::from_name("hotkey"), None);
        assert_eq!(KeyCode::from_name(""), None);
    }
}
