//! Rota scheduling and statistics.
//!
//! # Algorithm
//!
//! [`RotaScheduler`] walks the shift grid once, front to back, and fills
//! each slot with one caretaker and one generalist. It is a greedy
//! heuristic: no backtracking and no optimality guarantee. Unfillable
//! positions stay empty.
//!
//! # State
//!
//! [`AvailabilityTracker`] owns every person's counters for the duration
//! of a pass.
//!
//! # Report
//!
//! [`RotaReport`] summarizes the result: unfilled positions, assignments
//! per person, weekend coverage and fill rate.

mod greedy;
mod report;
mod tracker;

pub use greedy::{RotaRequest, RotaScheduler};
pub use report::RotaReport;
pub use tracker::{AvailabilityTracker, PersonState};
