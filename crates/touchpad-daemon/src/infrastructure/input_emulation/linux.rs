//! Linux key emulation through a uinput virtual keyboard.
//!
//! # What is uinput?
//!
//! `/dev/uinput` lets a process create a virtual input device.  Events written
//! to it are delivered by the kernel exactly like events from real hardware, so
//! every consumer (X11, Wayland compositors, the console, games reading evdev)
//! sees ordinary key presses.
//!
//! The device is created once at startup and registers exactly the keys named
//! by the geometry table.  Each press or release is one `EV_KEY` event; the
//! evdev crate appends the `SYN_REPORT` that makes it visible.
//!
//! # Permissions
//!
//! Creating the device needs write access to `/dev/uinput` (root, or a udev
//! rule granting the `input` group access).  Without it the constructor fails
//! with a `Platform` error.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use evdev::{
    uinput::{VirtualDevice, VirtualDeviceBuilder},
    AttributeSet, EventType, InputEvent, Key,
};
use tracing::info;
use touchpad_core::{ButtonShape, GeometryTable, KeyMapper};

use crate::application::translate_keys::{EmulationError, KeyEmulator};

/// Name the virtual keyboard shows in `evtest` and `/proc/bus/input/devices`.
pub const DEVICE_NAME: &str = "touchpad-daemon virtual keyboard";

const KEY_UP: i32 = 0;
const KEY_DOWN: i32 = 1;

/// Virtual keyboard backed by `/dev/uinput`.
pub struct LinuxUinputEmulator {
    device: Mutex<VirtualDevice>,
    keys: HashMap<String, Key>,
    pressed: Mutex<HashSet<String>>,
}

impl LinuxUinputEmulator {
    /// Creates the virtual keyboard for every pressable button in `table`.
    ///
    /// Analog buttons are skipped: they never resolve, so they are never pressed.
    ///
    /// # Errors
    ///
    /// Returns [`EmulationError::UnknownKey`] if a button name has no key
    /// mapping, and [`EmulationError::Platform`] if the device cannot be created.
    pub fn new(table: &GeometryTable) -> Result<Self, EmulationError> {
        let keys = key_map(table)?;

        let mut key_set = AttributeSet::<Key>::new();
        for key in keys.values() {
            key_set.insert(*key);
        }

        let device = VirtualDeviceBuilder::new()
            .map_err(platform)?
            .name(DEVICE_NAME)
            .with_keys(&key_set)
            .map_err(platform)?
            .build()
            .map_err(platform)?;

        info!(keys = keys.len(), "created uinput virtual keyboard");

        Ok(Self {
            device: Mutex::new(device),
            keys,
            pressed: Mutex::new(HashSet::new()),
        })
    }

    fn emit(&self, name: &str, value: i32) -> Result<(), EmulationError> {
        let key = self
            .keys
            .get(name)
            .ok_or_else(|| EmulationError::UnknownKey(name.to_string()))?;
        let event = InputEvent::new(EventType::KEY, key.code(), value);

        let mut device = self
            .device
            .lock()
            .map_err(|_| EmulationError::Platform("uinput device lock poisoned".into()))?;
        device.emit(&[event]).map_err(platform)?;

        let mut pressed = self
            .pressed
            .lock()
            .map_err(|_| EmulationError::Platform("pressed-key set lock poisoned".into()))?;
        if value == KEY_DOWN {
            pressed.insert(name.to_string());
        } else {
            pressed.remove(name);
        }
        Ok(())
    }
}

impl KeyEmulator for LinuxUinputEmulator {
    fn press(&self, name: &str) -> Result<(), EmulationError> {
        self.emit(name, KEY_DOWN)
    }

    fn release(&self, name: &str) -> Result<(), EmulationError> {
        self.emit(name, KEY_UP)
    }

    fn is_pressed(&self, name: &str) -> bool {
        self.pressed
            .lock()
            .map(|pressed| pressed.contains(name))
            .unwrap_or(false)
    }
}

/// Maps every pressable button name in `table` to its evdev key.
fn key_map(table: &GeometryTable) -> Result<HashMap<String, Key>, EmulationError> {
    table
        .buttons()
        .filter(|b| !matches!(b.shape, ButtonShape::Analog { .. }))
        .map(|b| {
            KeyMapper::name_to_evdev(&b.name)
                .map(|code| (b.name.clone(), Key::new(code)))
                .ok_or_else(|| EmulationError::UnknownKey(b.name.clone()))
        })
        .collect()
}

fn platform(e: std::io::Error) -> EmulationError {
    EmulationError::Platform(e.to_string())
}
