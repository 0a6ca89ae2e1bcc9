//! Recording key emulator for tests and `--dry-run`.
//!
//! The real emulator creates a uinput device, which needs write access to
//! `/dev/uinput` and actually types on the machine running the tests.
//! `MockKeyEmulator` replaces that with in-memory recording: every press and
//! release is pushed into a `Mutex<Vec<String>>` so assertions can inspect
//! exactly what was emitted and in what order.
//!
//! # Usage in tests
//!
//! ```ignore
//! let emulator = Arc::new(MockKeyEmulator::new());
//! let translator = KeyActionTranslator::new(table, emulator.clone(), SlidePolicy::PressOnly);
//!
//! translator.run_pass(tracker.contacts_mut()).unwrap();
//!
//! assert_eq!(*emulator.presses.lock().unwrap(), vec!["a"]);
//! ```
//!
//! Set `should_fail` (or build with [`MockKeyEmulator::failing`]) to make
//! `press`/`release` return `EmulationError::Platform`.

use std::collections::HashSet;
use std::sync::Mutex;

use tracing::info;

use crate::application::translate_keys::{EmulationError, KeyEmulator};

/// A key emulator that records calls instead of injecting keys.
#[derive(Default)]
pub struct MockKeyEmulator {
    /// Every name passed to `press`, in call order.
    pub presses: Mutex<Vec<String>>,
    /// Every name passed to `release`, in call order.
    pub releases: Mutex<Vec<String>>,
    /// Names currently held.
    pub pressed: Mutex<HashSet<String>>,
    /// When `true`, `press` and `release` return an error without recording.
    pub should_fail: bool,
    /// Log each action at `info` level (used by `--dry-run`).
    pub announce: bool,
}

impl MockKeyEmulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// An emulator whose `press`/`release` always fail.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// An emulator that logs every action; nothing reaches the OS.
    pub fn dry_run() -> Self {
        Self {
            announce: true,
            ..Self::default()
        }
    }
}

impl KeyEmulator for MockKeyEmulator {
    fn press(&self, name: &str) -> Result<(), EmulationError> {
        if self.should_fail {
            return Err(EmulationError::Platform("mock failure".into()));
        }
        if self.announce {
            info!(key = name, "press (dry run)");
        }
        self.presses
            .lock()
            .map_err(|_| EmulationError::Platform("mock state poisoned".into()))?
            .push(name.to_string());
        self.pressed
            .lock()
            .map_err(|_| EmulationError::Platform("mock state poisoned".into()))?
            .insert(name.to_string());
        Ok(())
    }

    fn release(&self, name: &str) -> Result<(), EmulationError> {
        if self.should_fail {
            return Err(EmulationError::Platform("mock failure".into()));
        }
        if self.announce {
            info!(key = name, "release (dry run)");
        }
        self.releases
            .lock()
            .map_err(|_| EmulationError::Platform("mock state poisoned".into()))?
            .push(name.to_string());
        self.pressed
            .lock()
            .map_err(|_| EmulationError::Platform("mock state poisoned".into()))?
            .remove(name);
        Ok(())
    }

    fn is_pressed(&self, name: &str) -> bool {
        self.pressed
            .lock()
            .map(|pressed| pressed.contains(name))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_observable_until_release() {
        let emulator = MockKeyEmulator::new();

        emulator.press("a").unwrap();
        assert!(emulator.is_pressed("a"));

        emulator.release("a").unwrap();
        assert!(!emulator.is_pressed("a"));
        assert_eq!(*emulator.presses.lock().unwrap(), vec!["a"]);
        assert_eq!(*emulator.releases.lock().unwrap(), vec!["a"]);
    }

    #[test]
    fn test_failing_emulator_records_nothing() {
        let emulator = MockKeyEmulator::failing();

        assert!(emulator.press("a").is_err());
        assert!(emulator.release("a").is_err());
        assert!(emulator.presses.lock().unwrap().is_empty());
        assert!(!emulator.is_pressed("a"));
    }
}
