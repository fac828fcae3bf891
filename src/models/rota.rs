//! Rota (filled shift grid) model.
//!
//! The result of a scheduling pass: every slot of the grid, in grid
//! order, with the names assigned to it. Unfilled roles are `None`; they
//! are an expected outcome, not a failure.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Role, ShiftSlot};
use crate::grid::Quarter;

/// A filled quarter rota.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rota {
    /// The quarter the grid was built for, if built from one.
    pub quarter: Option<Quarter>,
    /// All slots in date-then-shift order.
    pub slots: Vec<ShiftSlot>,
}

impl Rota {
    /// Wraps a processed slot sequence.
    pub fn new(quarter: Option<Quarter>, slots: Vec<ShiftSlot>) -> Self {
        Self { quarter, slots }
    }

    /// Number of slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// First and last date covered.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.slots.first()?.date, self.slots.last()?.date))
    }

    /// The four slots of a date.
    pub fn slots_on(&self, date: NaiveDate) -> Vec<&ShiftSlot> {
        self.slots.iter().filter(|s| s.date == date).collect()
    }

    /// All slots of an ISO week.
    pub fn slots_in_week(&self, iso_year: i32, iso_week: u32) -> Vec<&ShiftSlot> {
        self.slots
            .iter()
            .filter(|s| s.week_key() == (iso_year, iso_week))
            .collect()
    }

    /// Distinct (ISO year, ISO week) keys in grid order.
    pub fn weeks(&self) -> Vec<(i32, u32)> {
        let mut weeks: Vec<(i32, u32)> = Vec::new();
        for slot in &self.slots {
            if weeks.last() != Some(&slot.week_key()) {
                weeks.push(slot.week_key());
            }
        }
        weeks
    }

    /// Slots a person is assigned to.
    pub fn assignments_for(&self, name: &str) -> Vec<&ShiftSlot> {
        self.slots.iter().filter(|s| s.is_assigned(name)).collect()
    }

    /// Assignment count per assigned name.
    pub fn assignment_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for name in self.slots.iter().flat_map(ShiftSlot::assigned) {
            *counts.entry(name.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Non-holiday slots with no name for the role.
    pub fn unassigned(&self, role: Role) -> Vec<&ShiftSlot> {
        self.slots
            .iter()
            .filter(|s| !s.holiday && s.assignee(role).is_none())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftIndex;

    fn slot(y: i32, m: u32, d: u32, shift: ShiftIndex) -> ShiftSlot {
        ShiftSlot::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), shift)
    }

    fn sample_rota() -> Rota {
        let mut a = slot(2023, 4, 9, ShiftIndex::First); // Sunday, week 14
        a.assign(Role::Caretaker, Some("Ann".into()));
        a.assign(Role::Generalist, Some("Bob".into()));
        let mut b = slot(2023, 4, 10, ShiftIndex::First); // Monday, week 15
        b.holiday = true;
        let mut c = slot(2023, 4, 11, ShiftIndex::Second);
        c.assign(Role::Caretaker, Some("Ann".into()));
        Rota::new(None, vec![a, b, c])
    }

    #[test]
    fn test_weeks_in_order() {
        assert_eq!(sample_rota().weeks(), vec![(2023, 14), (2023, 15)]);
    }

    #[test]
    fn test_assignment_queries() {
        let rota = sample_rota();
        assert_eq!(rota.assignments_for("Ann").len(), 2);
        assert_eq!(rota.assignment_counts()["Bob"], 1);
        assert_eq!(rota.slots_in_week(2023, 15).len(), 2);
        assert_eq!(
            rota.slots_on(NaiveDate::from_ymd_opt(2023, 4, 9).unwrap()).len(),
            1
        );
    }

    #[test]
    fn test_unassigned_skips_holidays() {
        let rota = sample_rota();
        assert_eq!(rota.unassigned(Role::Caretaker).len(), 0);
        assert_eq!(rota.unassigned(Role::Generalist).len(), 1);
    }

    #[test]
    fn test_empty_rota() {
        let rota = Rota::default();
        assert_eq!(rota.date_range(), None);
        assert!(rota.weeks().is_empty());
    }
}
