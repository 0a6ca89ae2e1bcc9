//! A single physical touch contact.

/// Stream-assigned contact identifier, unique among active contacts.
pub type TrackingId = u32;

/// Hardware multi-touch slot index; reused by the device after a contact ends.
pub type Slot = u32;

/// Coordinate value meaning "not reported yet".
pub const UNKNOWN_COORD: i32 = -1;

/// Where a contact is in its lifecycle.
///
/// ```text
/// New ──► Assigned(button) ⇄ Unassigned ──► Ended
///  └─────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase<'a> {
    /// Created but not yet seen by a translation pass.
    New,
    /// Currently over the named button.
    Assigned(&'a str),
    /// Evaluated at least once and not over any button.
    Unassigned,
    /// Ended; removed right after the next translation pass.
    Ended,
}

/// One touch tracked from tracking-begin to tracking-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub tracking_id: TrackingId,
    pub slot: Slot,
    pub x: i32,
    pub y: i32,
    /// `false` once the contact has ended; purged after one translation pass.
    pub active: bool,
    /// Button under this contact as of the last translation pass.
    pub assigned_button: Option<String>,
    evaluated: bool,
}

impl Contact {
    /// Creates an active contact with unknown coordinates and no button.
    pub fn new(tracking_id: TrackingId, slot: Slot) -> Self {
        Self {
            tracking_id,
            slot,
            x: UNKNOWN_COORD,
            y: UNKNOWN_COORD,
            active: true,
            assigned_button: None,
            evaluated: false,
        }
    }

    /// Returns both coordinates once both have been reported.
    pub fn position(&self) -> Option<(i32, i32)> {
        if self.x == UNKNOWN_COORD || self.y == UNKNOWN_COORD {
            None
        } else {
            Some((self.x, self.y))
        }
    }

    /// Records the outcome of a translation pass for an active contact.
    pub fn assign(&mut self, button: Option<String>) {
        self.assigned_button = button;
        self.evaluated = true;
    }

    pub fn phase(&self) -> ContactPhase<'_> {
        if !self.active {
            return ContactPhase::Ended;
        }
        match (&self.assigned_button, self.evaluated) {
            (Some(name), _) => ContactPhase::Assigned(name),
            (None, true) => ContactPhase::Unassigned,
            (None, false) => ContactPhase::New,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_contact_is_active_with_unknown_position() {
        let c = Contact::new(12, 0);
        assert!(c.active);
        assert_eq!((c.x, c.y), (UNKNOWN_COORD, UNKNOWN_COORD));
        assert_eq!(c.position(), None);
        assert_eq!(c.phase(), ContactPhase::New);
    }

    #[test]
    fn test_position_requires_both_axes() {
        let mut c = Contact::new(1, 0);
        c.x = 10;
        assert_eq!(c.position(), None);
        c.y = 20;
        assert_eq!(c.position(), Some((10, 20)));
    }

    #[test]
    fn test_phase_follows_assignment_and_end() {
        let mut c = Contact::new(1, 0);
        c.assign(Some("a".into()));
        assert_eq!(c.phase(), ContactPhase::Assigned("a"));
        c.assign(None);
        assert_eq!(c.phase(), ContactPhase::Unassigned);
        c.active = false;
        assert_eq!(c.phase(), ContactPhase::Ended);
    }
}
