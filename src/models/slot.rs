//! Shift slot model.
//!
//! One slot per (date, shift). A slot holds at most one name per role and
//! the set of names that may not be placed on it. Names are plain keys
//! into the roster; the slot owns no person state.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Role, ShiftIndex, Weekday};
use crate::config::SchedulerConfig;

/// A single four-hour shift on a given date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftSlot {
    /// Calendar date.
    pub date: NaiveDate,
    /// Shift within the day.
    pub shift: ShiftIndex,
    /// ISO week-numbering year (differs from `date.year()` around New Year).
    pub iso_year: i32,
    /// ISO week number (1-53).
    pub iso_week: u32,
    /// ISO weekday.
    pub weekday: Weekday,
    /// Assigned caretaker, if any.
    pub caretaker: Option<String>,
    /// Assigned generalist, if any.
    pub generalist: Option<String>,
    /// Names that may not be assigned to this slot.
    pub excluded: BTreeSet<String>,
    /// Whether the date is a holiday; holiday slots stay empty.
    pub holiday: bool,
}

impl ShiftSlot {
    /// Creates an empty slot, deriving week data from the date.
    pub fn new(date: NaiveDate, shift: ShiftIndex) -> Self {
        let week = date.iso_week();
        Self {
            date,
            shift,
            iso_year: week.year(),
            iso_week: week.week(),
            weekday: date.weekday().into(),
            caretaker: None,
            generalist: None,
            excluded: BTreeSet::new(),
            holiday: false,
        }
    }

    /// (ISO year, ISO week) key; unique across year boundaries.
    #[inline]
    pub fn week_key(&self) -> (i32, u32) {
        (self.iso_year, self.iso_week)
    }

    /// Saturday or Sunday.
    #[inline]
    pub fn is_weekend(&self) -> bool {
        self.weekday.is_weekend()
    }

    /// Assigned name for a role.
    pub fn assignee(&self, role: Role) -> Option<&str> {
        match role {
            Role::Caretaker => self.caretaker.as_deref(),
            Role::Generalist => self.generalist.as_deref(),
        }
    }

    /// Sets the name for a role.
    pub fn assign(&mut self, role: Role, name: Option<String>) {
        match role {
            Role::Caretaker => self.caretaker = name,
            Role::Generalist => self.generalist = name,
        }
    }

    /// All assigned names (zero, one or two).
    pub fn assigned(&self) -> impl Iterator<Item = &str> + '_ {
        self.caretaker
            .as_deref()
            .into_iter()
            .chain(self.generalist.as_deref())
    }

    /// Whether the name is assigned in either role.
    pub fn is_assigned(&self, name: &str) -> bool {
        self.assigned().any(|n| n == name)
    }

    /// Whether the name is barred from this slot.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }

    /// Bars a name from this slot.
    pub fn exclude(&mut self, name: impl Into<String>) {
        self.excluded.insert(name.into());
    }

    /// Human-readable label, e.g. `2023-04-03 monday 07:00-11:00`.
    pub fn describe(&self, config: &SchedulerConfig) -> String {
        format!(
            "{} {} {}",
            self.date,
            config.weekday_label(self.weekday),
            config.shift_label(self.shift)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_week_data() {
        // 2023-01-01 is a Sunday in ISO week 52 of 2022.
        let slot = ShiftSlot::new(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), ShiftIndex::First);
        assert_eq!(slot.weekday, Weekday::Sunday);
        assert_eq!(slot.week_key(), (2022, 52));
        assert!(slot.is_weekend());
        assert_eq!(slot.assigned().count(), 0);
    }

    #[test]
    fn test_assign_and_query() {
        let mut slot = ShiftSlot::new(NaiveDate::from_ymd_opt(2023, 4, 4).unwrap(), ShiftIndex::Second);
        slot.assign(Role::Caretaker, Some("Ann".into()));
        slot.assign(Role::Generalist, Some("Bob".into()));
        assert_eq!(slot.assignee(Role::Caretaker), Some("Ann"));
        assert_eq!(slot.assigned().collect::<Vec<_>>(), vec!["Ann", "Bob"]);
        assert!(slot.is_assigned("Bob"));
        assert!(!slot.is_assigned("Cas"));

        slot.assign(Role::Generalist, None);
        assert_eq!(slot.assigned().count(), 1);
    }

    #[test]
    fn test_describe_uses_labels() {
        let slot = ShiftSlot::new(NaiveDate::from_ymd_opt(2023, 4, 3).unwrap(), ShiftIndex::First);
        let text = slot.describe(&SchedulerConfig::default());
        assert_eq!(text, "2023-04-03 monday 07:00-11:00");
    }
}
