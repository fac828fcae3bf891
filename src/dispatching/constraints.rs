//! Eligibility of persons for a single slot.
//!
//! # Exclusion layers
//!
//! 1. **Static**: refused weekday/shift pairs and away dates, projected
//!    onto the slots once before the pass ([`seed_static_exclusions`]).
//! 2. **Forward**: names added to later slots by earlier assignments
//!    (same day, next day, quota spreading). Stored on the slot as well.
//! 3. **Dynamic**: derived from the tracker when the slot is reached.
//!    - weekday: availability exhausted
//!    - weekend: weekend counter not at the rotation period, already
//!      assigned twice this week, or (with the quota guard) a multi-week
//!      quota with no availability left
//!
//! After exclusion, persons holding out for a later preferred slot this
//! week are deferred, unless that would leave nobody.

use std::collections::BTreeSet;

use crate::config::SchedulerConfig;
use crate::models::{Person, Role, ShiftSlot};
use crate::roster::Roster;
use crate::scheduler::AvailabilityTracker;

/// Projects refused weekday/shift pairs and away dates onto the slots.
pub fn seed_static_exclusions(slots: &mut [ShiftSlot], roster: &Roster) {
    for slot in slots.iter_mut() {
        for person in roster.persons() {
            if person.refuses(slot.weekday, slot.shift) || person.is_away_on(slot.date) {
                slot.exclude(person.name.as_str());
            }
        }
    }
}

/// Computes who may fill a slot given the current counters.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintEvaluator<'a> {
    roster: &'a Roster,
    config: &'a SchedulerConfig,
}

impl<'a> ConstraintEvaluator<'a> {
    /// Creates an evaluator over a roster.
    pub fn new(roster: &'a Roster, config: &'a SchedulerConfig) -> Self {
        Self { roster, config }
    }

    /// Whether the current counters bar the person from the slot.
    ///
    /// `week_slots` are all slots of the slot's ISO week.
    pub fn is_dynamically_excluded(
        &self,
        person: &Person,
        slot: &ShiftSlot,
        week_slots: &[ShiftSlot],
        tracker: &AvailabilityTracker,
    ) -> bool {
        let name = person.name.as_str();
        if !slot.is_weekend() {
            return tracker.availability(name) == 0;
        }

        if !tracker.is_weekend_ready(name) {
            return true;
        }
        if week_slots.iter().filter(|s| s.is_assigned(name)).count() >= 2 {
            return true;
        }
        self.config.weekend_quota_guard
            && person.quota.spans_weeks()
            && tracker.availability(name) == 0
    }

    /// Every roster name barred from the slot, across both roles.
    pub fn excluded_names(
        &self,
        slot: &ShiftSlot,
        week_slots: &[ShiftSlot],
        tracker: &AvailabilityTracker,
    ) -> BTreeSet<&'a str> {
        self.roster
            .persons()
            .iter()
            .filter(|p| {
                slot.is_excluded(&p.name)
                    || self.is_dynamically_excluded(p, slot, week_slots, tracker)
            })
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Persons of a role who may fill the slot, sorted by name.
    pub fn eligible(
        &self,
        role: Role,
        slot: &ShiftSlot,
        week_slots: &[ShiftSlot],
        tracker: &AvailabilityTracker,
    ) -> Vec<&'a Person> {
        self.roster
            .members(role)
            .into_iter()
            .filter(|p| {
                !slot.is_excluded(&p.name)
                    && !self.is_dynamically_excluded(p, slot, week_slots, tracker)
            })
            .collect()
    }

    /// Drops persons whose preferred slot comes later this week.
    ///
    /// A person who also prefers this very slot stays. If nobody would be
    /// left, the pool is returned untouched.
    pub fn defer_later_preferences(
        &self,
        pool: Vec<&'a Person>,
        slot: &ShiftSlot,
    ) -> Vec<&'a Person> {
        let kept: Vec<&'a Person> = pool
            .iter()
            .copied()
            .filter(|p| {
                p.prefers(slot.weekday, slot.shift)
                    || !p.preferred.has_later_than(slot.weekday, slot.shift)
            })
            .collect();

        if kept.is_empty() {
            pool
        } else {
            kept
        }
    }

    /// Eligible pool after preference deferral.
    pub fn candidates(
        &self,
        role: Role,
        slot: &ShiftSlot,
        week_slots: &[ShiftSlot],
        tracker: &AvailabilityTracker,
    ) -> Vec<&'a Person> {
        let pool = self.eligible(role, slot, week_slots, tracker);
        self.defer_later_preferences(pool, slot)
    }
}
