//! Rota statistics.
//!
//! Summarizes a filled rota for whoever renders it.
//!
//! # Statistics
//!
//! | Statistic | Definition |
//! |-----------|-----------|
//! | Unassigned (per role) | Non-holiday slots with no name for the role |
//! | Holiday slots | Slots on holiday dates |
//! | Assignments | Shifts per roster person, zero included |
//! | Weekend assignments | Saturday and Sunday shifts per roster person |
//! | Never on weekend | Roster persons without a weekend shift |
//! | Never assigned | Roster persons without any shift |
//! | Fill rate | Filled role positions / open role positions |

use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::SchedulerConfig;
use crate::models::{Role, Rota};
use crate::roster::Roster;

/// Rota summary.
#[derive(Debug, Clone, Serialize)]
pub struct RotaReport {
    /// Non-holiday slots without a caretaker.
    pub unassigned_caretaker: usize,
    /// Non-holiday slots without a generalist.
    pub unassigned_generalist: usize,
    /// Slots falling on holidays.
    pub holiday_slots: usize,
    /// Shift count per roster person.
    pub assignments: BTreeMap<String, usize>,
    /// Weekend shift count per roster person.
    pub weekend_assignments: BTreeMap<String, usize>,
    /// Roster persons never scheduled on a weekend, sorted.
    pub never_on_weekend: Vec<String>,
    /// Roster persons never scheduled at all, sorted.
    pub never_assigned: Vec<String>,
    /// Fraction of open role positions that were filled (0.0..1.0).
    pub fill_rate: f64,
    /// Labelled unfilled positions, e.g. `2023-04-03 monday 07:00-11:00 (caretaker)`.
    pub unassigned_shifts: Vec<String>,
}

impl RotaReport {
    /// Computes the report.
    ///
    /// # Arguments
    /// * `rota` - The filled rota.
    /// * `roster` - The roster it was filled from (persons with no shifts
    ///   still appear).
    /// * `config` - Supplies the weekday and shift labels.
    pub fn calculate(rota: &Rota, roster: &Roster, config: &SchedulerConfig) -> Self {
        let mut assignments: BTreeMap<String, usize> =
            roster.persons().iter().map(|p| (p.name.clone(), 0)).collect();
        let mut weekend_assignments = assignments.clone();
        let mut unassigned_shifts = Vec::new();
        let mut holiday_slots = 0;
        let mut open_positions = 0;
        let mut filled_positions = 0;

        for slot in &rota.slots {
            if slot.holiday {
                holiday_slots += 1;
                continue;
            }
            for role in Role::ALL {
                open_positions += 1;
                match slot.assignee(role) {
                    Some(name) => {
                        filled_positions += 1;
                        *assignments.entry(name.to_string()).or_insert(0) += 1;
                        if slot.is_weekend() {
                            *weekend_assignments.entry(name.to_string()).or_insert(0) += 1;
                        }
                    }
                    None => {
                        unassigned_shifts.push(format!("{} ({role})", slot.describe(config)));
                    }
                }
            }
        }

        let names_with_zero = |counts: &BTreeMap<String, usize>| -> Vec<String> {
            counts
                .iter()
                .filter(|(_, n)| **n == 0)
                .map(|(name, _)| name.clone())
                .collect()
        };

        let fill_rate = if open_positions == 0 {
            1.0
        } else {
            filled_positions as f64 / open_positions as f64
        };

        Self {
            unassigned_caretaker: rota.unassigned(Role::Caretaker).len(),
            unassigned_generalist: rota.unassigned(Role::Generalist).len(),
            holiday_slots,
            never_on_weekend: names_with_zero(&weekend_assignments),
            never_assigned: names_with_zero(&assignments),
            assignments,
            weekend_assignments,
            fill_rate,
            unassigned_shifts,
        }
    }

    /// Unfilled positions across both roles.
    pub fn total_unassigned(&self) -> usize {
        self.unassigned_caretaker + self.unassigned_generalist
    }

    /// Whether the fill rate reaches the threshold.
    pub fn meets_fill_rate(&self, min_fill_rate: f64) -> bool {
        self.fill_rate >= min_fill_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Person, Quota, ShiftIndex, ShiftSlot};
    use chrono::NaiveDate;

    fn slot(d: u32, shift: ShiftIndex) -> ShiftSlot {
        ShiftSlot::new(NaiveDate::from_ymd_opt(2023, 4, d).unwrap(), shift)
    }

    fn roster() -> Roster {
        Roster::new(vec![
            Person::caretaker("Ann", Quota::ONE_PER_WEEK),
            Person::caretaker("Bob", Quota::ONE_PER_WEEK),
            Person::generalist("Cas", Quota::ONE_PER_WEEK),
        ])
        .unwrap()
    }

    // Monday filled, Tuesday half filled, Saturday holiday, Sunday Ann only.
    fn rota() -> Rota {
        let mut monday = slot(3, ShiftIndex::First);
        monday.assign(Role::Caretaker, Some("Ann".into()));
        monday.assign(Role::Generalist, Some("Cas".into()));
        let mut tuesday = slot(4, ShiftIndex::Third);
        tuesday.assign(Role::Generalist, Some("Cas".into()));
        let mut saturday = slot(8, ShiftIndex::First);
        saturday.holiday = true;
        let mut sunday = slot(9, ShiftIndex::Second);
        sunday.assign(Role::Caretaker, Some("Ann".into()));
        Rota::new(None, vec![monday, tuesday, saturday, sunday])
    }

    #[test]
    fn test_report_counts() {
        let report = RotaReport::calculate(&rota(), &roster(), &SchedulerConfig::default());

        assert_eq!(report.unassigned_caretaker, 1);
        assert_eq!(report.unassigned_generalist, 1);
        assert_eq!(report.total_unassigned(), 2);
        assert_eq!(report.holiday_slots, 1);
        assert_eq!(report.assignments["Ann"], 2);
        assert_eq!(report.assignments["Cas"], 2);
        assert_eq!(report.weekend_assignments["Ann"], 1);
        assert_eq!(report.never_assigned, vec!["Bob"]);
        assert_eq!(report.never_on_weekend, vec!["Bob", "Cas"]);
    }

    #[test]
    fn test_fill_rate_and_labels() {
        let report = RotaReport::calculate(&rota(), &roster(), &SchedulerConfig::default());

        assert!((report.fill_rate - 4.0 / 6.0).abs() < 1e-10);
        assert!(report.meets_fill_rate(0.6));
        assert!(!report.meets_fill_rate(0.7));
        assert_eq!(
            report.unassigned_shifts,
            vec![
                "2023-04-04 tuesday 15:00-19:00 (caretaker)".to_string(),
                "2023-04-09 sunday 11:00-15:00 (generalist)".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_rota() {
        let report = RotaReport::calculate(&Rota::default(), &roster(), &SchedulerConfig::default());
        assert_eq!(report.total_unassigned(), 0);
        assert!((report.fill_rate - 1.0).abs() < 1e-10);
        assert_eq!(report.never_assigned.len(), 3);
    }
}
