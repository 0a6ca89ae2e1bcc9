//! KeyActionTranslator: turns tracked contacts into key press/release actions.
//!
//! This use case sits at the application layer and delegates to a
//! [`KeyEmulator`] trait object for the actual key injection.  The uinput and
//! recording implementations live in the infrastructure layer.
//!
//! # One translation pass
//!
//! A pass runs once per sync separator, over every contact the tracker holds:
//!
//! | Contact state                       | Action                                     |
//! |-------------------------------------|--------------------------------------------|
//! | ended, with an assigned button      | `release(button)` unless a finger is on it |
//! | active, resolves to button `B`      | `press(B)` unless `is_pressed(B)`          |
//! | active, resolves to nothing         | none                                       |
//!
//! Ended contacts are handled before active ones.  The assigned button is
//! then overwritten with the resolved one.  Under [`SlidePolicy::PressOnly`] a
//! contact that slides from `A` onto `B` leaves `A` held;
//! [`SlidePolicy::ReleaseOnLeave`] releases `A` first, unless another contact
//! is still on it.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use touchpad_core::{Contact, GeometryTable};

/// Error type for key emulation operations.
#[derive(Debug, Error)]
pub enum EmulationError {
    #[error("platform error: {0}")]
    Platform(String),
    #[error("no key mapping for button {0:?}")]
    UnknownKey(String),
}

/// Key emulation collaborator.
///
/// Implementations must make `press`/`release` immediately observable through
/// `is_pressed`.
pub trait KeyEmulator: Send + Sync {
    /// Emulates a key press (key-down event) for the named button.
    fn press(&self, name: &str) -> Result<(), EmulationError>;

    /// Emulates a key release (key-up event) for the named button.
    fn release(&self, name: &str) -> Result<(), EmulationError>;

    /// Returns `true` if the named key is currently held.
    fn is_pressed(&self, name: &str) -> bool;
}

/// What happens to the previously assigned button when a held contact slides
/// onto a different button (or off every button).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlidePolicy {
    /// Only the new button is pressed; the old one stays held until some
    /// contact assigned to it ends.
    #[default]
    PressOnly,
    /// The old button is released before the new one is pressed.
    ReleaseOnLeave,
}

/// Counts of the actions issued by one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassSummary {
    pub presses: usize,
    pub releases: usize,
}

/// The Key Action Translator use case.
pub struct KeyActionTranslator {
    table: GeometryTable,
    emulator: Arc<dyn KeyEmulator>,
    policy: SlidePolicy,
}

impl KeyActionTranslator {
    /// Creates a translator over the given table and emulator.
    pub fn new(
        table: GeometryTable,
        emulator: Arc<dyn KeyEmulator>,
        policy: SlidePolicy,
    ) -> Self {
        Self {
            table,
            emulator,
            policy,
        }
    }

    pub fn table(&self) -> &GeometryTable {
        &self.table
    }

    pub fn policy(&self) -> SlidePolicy {
        self.policy
    }

    /// Runs one translation pass over `contacts`.
    ///
    /// Every active contact is resolved first.  A button stays down while any
    /// active contact resolves to it: neither an ended contact nor (under
    /// [`SlidePolicy::ReleaseOnLeave`]) a contact sliding away releases a
    /// button another finger is still on.  Ended contacts are handled before
    /// active ones and have their assigned button taken, so a contact that is
    /// not purged afterwards never releases twice.
    ///
    /// # Errors
    ///
    /// Returns the first [`EmulationError`] raised by the emulator; the pass
    /// stops there and later contacts keep their previous assignment.
    pub fn run_pass<'a, I>(&self, contacts: I) -> Result<PassSummary, EmulationError>
    where
        I: IntoIterator<Item = &'a mut Contact>,
    {
        let mut contacts: Vec<&mut Contact> = contacts.into_iter().collect();
        let resolved: Vec<Option<String>> = contacts
            .iter()
            .map(|c| {
                c.position()
                    .filter(|_| c.active)
                    .and_then(|(x, y)| self.table.resolve(x, y))
                    .map(str::to_owned)
            })
            .collect();
        let held: HashSet<&str> = resolved.iter().flatten().map(String::as_str).collect();

        let mut summary = PassSummary::default();
        let mut released: HashSet<String> = HashSet::new();

        for contact in contacts.iter_mut().filter(|c| !c.active) {
            let Some(button) = contact.assigned_button.take() else {
                continue;
            };
            if released.contains(&button) {
                continue;
            }
            if held.contains(button.as_str()) {
                debug!(
                    tracking_id = contact.tracking_id,
                    %button,
                    "contact ended; key still held by another contact"
                );
                continue;
            }
            debug!(tracking_id = contact.tracking_id, %button, "release (contact ended)");
            self.emulator.release(&button)?;
            summary.releases += 1;
            released.insert(button);
        }

        for (contact, new_button) in contacts.iter_mut().zip(&resolved) {
            if !contact.active {
                continue;
            }

            if self.policy == SlidePolicy::ReleaseOnLeave {
                if let Some(old) = contact.assigned_button.as_deref() {
                    if !held.contains(old) && self.emulator.is_pressed(old) {
                        debug!(
                            tracking_id = contact.tracking_id,
                            button = old,
                            "release (slid off)"
                        );
                        self.emulator.release(old)?;
                        summary.releases += 1;
                    }
                }
            }

            if let Some(button) = new_button.as_deref() {
                if !self.emulator.is_pressed(button) {
                    debug!(tracking_id = contact.tracking_id, button, "press");
                    self.emulator.press(button)?;
                    summary.presses += 1;
                }
            }

            contact.assign(new_button.clone());
        }

        Ok(summary)
    }
}

/// Releases every button of `table` that `emulator` reports as held.
///
/// Used on shutdown.  Failures are collected rather than aborting so one
/// stuck key does not keep the others held.
pub fn release_all(
    emulator: &dyn KeyEmulator,
    table: &GeometryTable,
) -> (Vec<String>, Vec<EmulationError>) {
    let mut released = Vec::new();
    let mut errors = Vec::new();
    for button in table.buttons() {
        if !emulator.is_pressed(&button.name) {
            continue;
        }
        match emulator.release(&button.name) {
            Ok(()) => released.push(button.name.clone()),
            Err(e) => errors.push(e),
        }
    }
    (released, errors)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
