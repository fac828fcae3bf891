//! Per-person scheduling counters.
//!
//! The tracker is the single owner of the state that changes during a
//! pass. Everything else reads it by reference for one slot at a time.
//!
//! # Counters
//!
//! | Counter | Start | Changed by |
//! |---------|-------|------------|
//! | availability | `shifts_wanted` | consumed on assignment, restored at week change |
//! | weekend | rotation period | advanced at week change, zeroed on weekend duty |
//!
//! A person is weekend-ready only while their weekend counter sits exactly
//! at the rotation period.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::SchedulerConfig;
use crate::models::Quota;
use crate::roster::Roster;

/// Mutable counters of one person.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonState {
    /// Quota the counters are derived from.
    pub quota: Quota,
    /// Shifts left in the current quota window.
    pub availability: u32,
    /// Weeks since the last weekend shift, capped at the rotation period.
    pub weekend: u32,
}

/// Owns every person's counters, keyed by name.
#[derive(Debug, Clone)]
pub struct AvailabilityTracker {
    states: BTreeMap<String, PersonState>,
    weekend_period: u32,
    always_weekend_available: BTreeSet<String>,
}

impl AvailabilityTracker {
    /// Initializes counters for every person on the roster.
    pub fn new(roster: &Roster, config: &SchedulerConfig) -> Self {
        let states = roster
            .persons()
            .iter()
            .map(|p| {
                let state = PersonState {
                    quota: p.quota,
                    availability: p.quota.shifts_wanted,
                    weekend: config.weekend_period,
                };
                (p.name.clone(), state)
            })
            .collect();
        Self {
            states,
            weekend_period: config.weekend_period,
            always_weekend_available: config.always_weekend_available.clone(),
        }
    }

    /// Restores exhausted availability at the start of a new week.
    ///
    /// Persons wanting one shift per two weeks are only restored on even
    /// ISO week numbers.
    pub fn reset_weekly_availability(&mut self, iso_week: u32) {
        let odd_week = iso_week % 2 == 1;
        for state in self.states.values_mut() {
            if state.availability != 0 {
                continue;
            }
            if odd_week && state.quota.skips_odd_week_reset() {
                continue;
            }
            state.availability = state.quota.shifts_wanted;
        }
    }

    /// Moves every weekend counter one week on.
    pub fn advance_weekend_counters(&mut self) {
        for state in self.states.values_mut() {
            state.weekend = (state.weekend + 1).min(self.weekend_period);
        }
    }

    /// Uses up one shift of availability per name, never below zero.
    pub fn consume_availability<'n>(&mut self, names: impl IntoIterator<Item = &'n str>) {
        for name in names {
            if let Some(state) = self.states.get_mut(name) {
                state.availability = state.availability.saturating_sub(1);
            }
        }
    }

    /// Starts a new weekend cooldown for each name.
    ///
    /// Names on the always-available list keep their counter.
    pub fn mark_weekend_served<'n>(&mut self, names: impl IntoIterator<Item = &'n str>) {
        for name in names {
            if self.always_weekend_available.contains(name) {
                continue;
            }
            if let Some(state) = self.states.get_mut(name) {
                state.weekend = 0;
            }
        }
    }

    /// Counters of a person.
    pub fn state(&self, name: &str) -> Option<&PersonState> {
        self.states.get(name)
    }

    /// Remaining availability; zero for unknown names.
    pub fn availability(&self, name: &str) -> u32 {
        self.states.get(name).map_or(0, |s| s.availability)
    }

    /// Weekend counter; zero for unknown names.
    pub fn weekend_counter(&self, name: &str) -> u32 {
        self.states.get(name).map_or(0, |s| s.weekend)
    }

    /// Whether the person may take a weekend shift this week.
    pub fn is_weekend_ready(&self, name: &str) -> bool {
        self.states
            .get(name)
            .is_some_and(|s| s.weekend == self.weekend_period)
    }

    /// Configured rotation period in weeks.
    pub fn weekend_period(&self) -> u32 {
        self.weekend_period
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Person;

    fn tracker(config: &SchedulerConfig) -> AvailabilityTracker {
        let roster = Roster::new(vec![
            Person::caretaker("Ann", Quota::TWO_PER_WEEK),
            Person::caretaker("Bob", Quota::ONE_PER_TWO_WEEKS),
            Person::generalist("Cas", Quota::ONE_PER_WEEK),
        ])
        .unwrap();
        AvailabilityTracker::new(&roster, config)
    }

    #[test]
    fn test_initial_state() {
        let t = tracker(&SchedulerConfig::default());
        assert_eq!(t.availability("Ann"), 2);
        assert_eq!(t.availability("Bob"), 1);
        assert_eq!(t.weekend_counter("Cas"), 2);
        assert!(t.is_weekend_ready("Cas"));
        assert!(!t.is_weekend_ready("Nobody"));
    }

    #[test]
    fn test_consume_floors_at_zero() {
        let mut t = tracker(&SchedulerConfig::default());
        t.consume_availability(["Cas", "Cas", "Cas"]);
        assert_eq!(t.availability("Cas"), 0);
        t.consume_availability(["Ann"]);
        assert_eq!(t.availability("Ann"), 1);
    }

    #[test]
    fn test_reset_only_exhausted() {
        let mut t = tracker(&SchedulerConfig::default());
        t.consume_availability(["Ann", "Cas"]);
        t.reset_weekly_availability(16);
        // Ann still has a shift left: no top-up.
        assert_eq!(t.availability("Ann"), 1);
        assert_eq!(t.availability("Cas"), 1);
    }

    #[test]
    fn test_reset_skips_odd_week_for_one_per_two() {
        let mut t = tracker(&SchedulerConfig::default());
        t.consume_availability(["Bob", "Cas"]);

        t.reset_weekly_availability(15);
        assert_eq!(t.availability("Bob"), 0);
        assert_eq!(t.availability("Cas"), 1);

        t.reset_weekly_availability(16);
        assert_eq!(t.availability("Bob"), 1);
    }

    #[test]
    fn test_weekend_cycle() {
        let mut t = tracker(&SchedulerConfig::default());
        t.mark_weekend_served(["Ann"]);
        assert_eq!(t.weekend_counter("Ann"), 0);
        assert!(!t.is_weekend_ready("Ann"));

        t.advance_weekend_counters();
        assert_eq!(t.weekend_counter("Ann"), 1);
        t.advance_weekend_counters();
        t.advance_weekend_counters();
        assert_eq!(t.weekend_counter("Ann"), 2);
        assert!(t.is_weekend_ready("Ann"));
    }

    #[test]
    fn test_always_available_keeps_counter() {
        let config = SchedulerConfig::default()
            .with_weekend_period(4)
            .with_always_weekend_available("Cas");
        let mut t = tracker(&config);
        t.mark_weekend_served(["Ann", "Cas"]);
        assert_eq!(t.weekend_counter("Ann"), 0);
        assert_eq!(t.weekend_counter("Cas"), 4);
        assert!(t.is_weekend_ready("Cas"));
    }
}
