//! Touch tracker: the set of known contacts and its transition rules.
//!
//! The tracker owns every [`Contact`] keyed by tracking id and applies decoded
//! [`TouchEvent`]s to it.  It never talks to the key emulator; on a sync
//! separator the caller runs a translation pass over [`TouchTracker::contacts_mut`]
//! and then calls [`TouchTracker::purge_ended`].
//!
//! Malformed sequences (position before any contact, end with no contact) are
//! absorbed here and logged; they never abort the pipeline.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::domain::contact::{Contact, Slot, TrackingId, UNKNOWN_COORD};
use crate::protocol::decoder::TouchEvent;

/// Why a sub-event was dropped without mutating the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Position update for a slot that has no active contact.
    NoContactForSlot(Slot),
    /// Tracking end with neither a slot match nor any active contact.
    NoContactToEnd(Slot),
}

/// What applying one sub-event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The caller should run one translation pass, then purge.
    PassRequested,
    /// Slot cursor moved; nothing to apply.
    SlotSelected(Slot),
    /// A contact was created (or re-announced) in a slot.
    Begun(TrackingId),
    /// A contact was marked ended.  `by_fallback` is set when it was chosen by
    /// the smallest-id rule instead of by slot.
    Ended {
        tracking_id: TrackingId,
        by_fallback: bool,
    },
    /// A coordinate of an existing contact changed.
    Moved(TrackingId),
    /// The event was absorbed without effect.
    Dropped(DropReason),
}

/// Owns the contact set.
#[derive(Debug, Default)]
pub struct TouchTracker {
    contacts: BTreeMap<TrackingId, Contact>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one decoded sub-event.
    pub fn apply(&mut self, event: TouchEvent) -> Transition {
        match event {
            TouchEvent::SyncSeparator => Transition::PassRequested,
            TouchEvent::SlotSelect(slot) => Transition::SlotSelected(slot),
            TouchEvent::TrackingBegin { id, slot } => self.begin(id, slot),
            TouchEvent::TrackingEnd { slot } => self.end(slot),
            TouchEvent::PositionX { slot, value } => self.update(slot, |c| c.x = value),
            TouchEvent::PositionY { slot, value } => self.update(slot, |c| c.y = value),
        }
    }

    fn begin(&mut self, id: TrackingId, slot: Slot) -> Transition {
        // A new id on an occupied slot means the device replaced the contact
        // without sending an end first.
        if let Some(previous) = self
            .contacts
            .values_mut()
            .find(|c| c.active && c.slot == slot && c.tracking_id != id)
        {
            warn!(
                slot,
                replaced = previous.tracking_id,
                new = id,
                "slot reused without tracking end; ending previous contact"
            );
            previous.active = false;
        }

        match self.contacts.get_mut(&id) {
            Some(existing) => {
                warn!(
                    tracking_id = id,
                    slot, "tracking begin for an id already tracked; overwriting"
                );
                existing.slot = slot;
                existing.x = UNKNOWN_COORD;
                existing.y = UNKNOWN_COORD;
                existing.active = true;
            }
            None => {
                debug!(tracking_id = id, slot, "contact begun");
                self.contacts.insert(id, Contact::new(id, slot));
            }
        }
        Transition::Begun(id)
    }

    fn end(&mut self, slot: Slot) -> Transition {
        if let Some(contact) = self.active_in_slot(slot) {
            contact.active = false;
            debug!(tracking_id = contact.tracking_id, slot, "contact ended");
            return Transition::Ended {
                tracking_id: contact.tracking_id,
                by_fallback: false,
            };
        }

        // Compatibility fallback for streams without reliable slot correlation:
        // BTreeMap iterates in ascending id order, so the first active one is the smallest.
        if let Some(contact) = self.contacts.values_mut().find(|c| c.active) {
            contact.active = false;
            warn!(
                slot,
                tracking_id = contact.tracking_id,
                "tracking end matched no slot; ended smallest active id"
            );
            return Transition::Ended {
                tracking_id: contact.tracking_id,
                by_fallback: true,
            };
        }

        warn!(slot, "tracking end with no active contact; dropped");
        Transition::Dropped(DropReason::NoContactToEnd(slot))
    }

    fn update(&mut self, slot: Slot, apply: impl FnOnce(&mut Contact)) -> Transition {
        match self.active_in_slot(slot) {
            Some(contact) => {
                apply(contact);
                Transition::Moved(contact.tracking_id)
            }
            None => {
                warn!(slot, "position update before tracking begin; dropped");
                Transition::Dropped(DropReason::NoContactForSlot(slot))
            }
        }
    }

    fn active_in_slot(&mut self, slot: Slot) -> Option<&mut Contact> {
        self.contacts
            .values_mut()
            .find(|c| c.active && c.slot == slot)
    }

    /// Removes every ended contact and returns their ids.
    pub fn purge_ended(&mut self) -> Vec<TrackingId> {
        let ended: Vec<TrackingId> = self
            .contacts
            .values()
            .filter(|c| !c.active)
            .map(|c| c.tracking_id)
            .collect();
        for id in &ended {
            self.contacts.remove(id);
        }
        ended
    }

    /// Contacts in ascending tracking-id order.
    pub fn contacts(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.values()
    }

    /// Mutable contacts in ascending tracking-id order, for a translation pass.
    pub fn contacts_mut(&mut self) -> impl Iterator<Item = &mut Contact> {
        self.contacts.values_mut()
    }

    pub fn get(&self, id: TrackingId) -> Option<&Contact> {
        self.contacts.get(&id)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn begin(id: TrackingId, slot: Slot) -> TouchEvent {
        TouchEvent::TrackingBegin { id, slot }
    }

    #[test]
    fn test_begin_inserts_active_contact_with_unknown_coordinates() {
        let mut tracker = TouchTracker::new();

        let t = tracker.apply(begin(12, 0));

        assert_eq!(t, Transition::Begun(12));
        let c = tracker.get(12).expect("contact present");
        assert_eq!(c.slot, 0);
        assert!(c.active);
        assert_eq!(c.position(), None);
        assert_eq!(c.assigned_button, None);
    }

    #[test]
    fn test_position_updates_contact_in_slot() {
        let mut tracker = TouchTracker::new();
        tracker.apply(begin(12, 0));

        tracker.apply(TouchEvent::PositionX { slot: 0, value: 726 });
        tracker.apply(TouchEvent::PositionY { slot: 0, value: 296 });

        assert_eq!(tracker.get(12).unwrap().position(), Some((726, 296)));
    }

    #[test]
    fn test_position_before_begin_is_dropped() {
        let mut tracker = TouchTracker::new();
        let t = tracker.apply(TouchEvent::PositionX { slot: 0, value: 5 });
        assert_eq!(t, Transition::Dropped(DropReason::NoContactForSlot(0)));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_end_marks_slot_contact_inactive_until_purge() {
        let mut tracker = TouchTracker::new();
        tracker.apply(begin(12, 0));

        let t = tracker.apply(TouchEvent::TrackingEnd { slot: 0 });

        assert_eq!(
            t,
            Transition::Ended {
                tracking_id: 12,
                by_fallback: false
            }
        );
        assert!(!tracker.get(12).unwrap().active, "still present, but inactive");
        assert_eq!(tracker.purge_ended(), vec![12]);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_end_without_slot_match_falls_back_to_smallest_active_id() {
        let mut tracker = TouchTracker::new();
        tracker.apply(begin(30, 1));
        tracker.apply(begin(7, 2));

        let t = tracker.apply(TouchEvent::TrackingEnd { slot: 5 });

        assert_eq!(
            t,
            Transition::Ended {
                tracking_id: 7,
                by_fallback: true
            }
        );
        assert!(tracker.get(30).unwrap().active);
    }

    #[test]
    fn test_fallback_skips_already_ended_contacts() {
        let mut tracker = TouchTracker::new();
        tracker.apply(begin(1, 0));
        tracker.apply(begin(2, 1));
        tracker.apply(TouchEvent::TrackingEnd { slot: 0 });

        let t = tracker.apply(TouchEvent::TrackingEnd { slot: 9 });

        assert_eq!(
            t,
            Transition::Ended {
                tracking_id: 2,
                by_fallback: true
            }
        );
    }

    #[test]
    fn test_end_with_no_contacts_is_dropped() {
        let mut tracker = TouchTracker::new();
        let t = tracker.apply(TouchEvent::TrackingEnd { slot: 0 });
        assert_eq!(t, Transition::Dropped(DropReason::NoContactToEnd(0)));
    }

    #[test]
    fn test_interleaved_slots_update_independently() {
        let mut tracker = TouchTracker::new();
        tracker.apply(begin(1, 0));
        tracker.apply(begin(2, 1));

        tracker.apply(TouchEvent::PositionX { slot: 1, value: 500 });
        tracker.apply(TouchEvent::PositionX { slot: 0, value: 100 });
        tracker.apply(TouchEvent::PositionY { slot: 0, value: 110 });
        tracker.apply(TouchEvent::PositionY { slot: 1, value: 510 });

        assert_eq!(tracker.get(1).unwrap().position(), Some((100, 110)));
        assert_eq!(tracker.get(2).unwrap().position(), Some((500, 510)));
    }

    #[test]
    fn test_begin_on_occupied_slot_ends_previous_contact() {
        let mut tracker = TouchTracker::new();
        tracker.apply(begin(1, 0));

        tracker.apply(begin(2, 0));

        assert!(!tracker.get(1).unwrap().active);
        assert!(tracker.get(2).unwrap().active);
        tracker.apply(TouchEvent::PositionX { slot: 0, value: 9 });
        assert_eq!(tracker.get(2).unwrap().x, 9);
        assert_eq!(tracker.get(1).unwrap().x, UNKNOWN_COORD);
    }

    #[test]
    fn test_duplicate_begin_overwrites_but_keeps_assigned_button() {
        let mut tracker = TouchTracker::new();
        tracker.apply(begin(4, 0));
        tracker.apply(TouchEvent::PositionX { slot: 0, value: 10 });
        tracker
            .contacts_mut()
            .for_each(|c| c.assign(Some("a".into())));

        tracker.apply(begin(4, 3));

        let c = tracker.get(4).unwrap();
        assert_eq!(c.slot, 3);
        assert_eq!(c.x, UNKNOWN_COORD);
        assert_eq!(c.assigned_button.as_deref(), Some("a"));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_sync_and_slot_select_do_not_mutate() {
        let mut tracker = TouchTracker::new();
        tracker.apply(begin(1, 0));

        assert_eq!(tracker.apply(TouchEvent::SyncSeparator), Transition::PassRequested);
        assert_eq!(tracker.apply(TouchEvent::SlotSelect(3)), Transition::SlotSelected(3));
        assert_eq!(tracker.len(), 1);
        assert!(tracker.purge_ended().is_empty());
    }

    #[test]
    fn test_contacts_iterate_in_ascending_id_order() {
        let mut tracker = TouchTracker::new();
        tracker.apply(begin(9, 0));
        tracker.apply(begin(3, 1));
        tracker.apply(begin(5, 2));

        let ids: Vec<_> = tracker.contacts().map(|c| c.tracking_id).collect();
        assert_eq!(ids, vec![3, 5, 9]);
    }
}
