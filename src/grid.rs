//! Shift grid builder.
//!
//! Builds the ordered slot sequence for a calendar quarter: four slots per
//! day, whole ISO weeks only, in date-then-shift order. The allocation pass
//! walks this sequence front to back, so the order is part of the contract.
//!
//! # Week alignment
//!
//! Calendar quarters rarely start on a Monday. The bounds are moved to
//! Monday/Sunday boundaries according to [`WeekAlignment`]:
//!
//! | Alignment | Start | End |
//! |-----------|-------|-----|
//! | `Forward` (default) | first Monday on/after quarter start | day before the first Monday on/after next quarter start |
//! | `Backward` | last Monday on/before quarter start | day before the last Monday on/before next quarter start |
//! | `Enclosing` | last Monday on/before quarter start | first Sunday on/after quarter end |
//!
//! `Forward` and `Backward` tile consecutive quarters without gaps or
//! overlap; `Enclosing` covers every day of the quarter but overlaps its
//! neighbours.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::models::{ShiftIndex, ShiftSlot, Weekday};

/// A calendar quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quarter {
    /// Calendar year.
    pub year: i32,
    /// Quarter number (1-4).
    pub quarter: u32,
}

impl Quarter {
    /// Creates a quarter, rejecting numbers outside 1..=4.
    pub fn new(year: i32, quarter: u32) -> Result<Self, GridError> {
        if !(1..=4).contains(&quarter) {
            return Err(GridError::InvalidQuarter(quarter));
        }
        let q = Self { year, quarter };
        q.first_day()?;
        q.next_first_day()?;
        Ok(q)
    }

    /// First calendar day of the quarter.
    pub fn first_day(&self) -> Result<NaiveDate, GridError> {
        let month = (self.quarter - 1) * 3 + 1;
        NaiveDate::from_ymd_opt(self.year, month, 1).ok_or(GridError::YearOutOfRange(self.year))
    }

    /// Last calendar day of the quarter.
    pub fn last_day(&self) -> Result<NaiveDate, GridError> {
        self.next_first_day()?
            .pred_opt()
            .ok_or(GridError::YearOutOfRange(self.year))
    }

    /// The following quarter.
    pub fn next(&self) -> Result<Self, GridError> {
        if self.quarter == 4 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.quarter + 1)
        }
    }

    fn next_first_day(&self) -> Result<NaiveDate, GridError> {
        let (year, month) = if self.quarter == 4 {
            (self.year + 1, 1)
        } else {
            (self.year, self.quarter * 3 + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(GridError::YearOutOfRange(self.year))
    }
}

/// How quarter bounds are moved to whole ISO weeks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekAlignment {
    /// Move both bounds forward to Monday boundaries.
    #[default]
    Forward,
    /// Move both bounds back to Monday boundaries.
    Backward,
    /// Extend the start back and the end forward.
    Enclosing,
}

/// The ordered slot sequence of a scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftGrid {
    /// Source quarter, when built from one.
    pub quarter: Option<Quarter>,
    slots: Vec<ShiftSlot>,
}

impl ShiftGrid {
    /// Builds the grid for a quarter with [`WeekAlignment::Forward`].
    pub fn for_quarter(year: i32, quarter: u32) -> Result<Self, GridError> {
        Self::for_quarter_aligned(year, quarter, WeekAlignment::Forward)
    }

    /// Builds the grid for a quarter with an explicit alignment.
    pub fn for_quarter_aligned(
        year: i32,
        quarter: u32,
        alignment: WeekAlignment,
    ) -> Result<Self, GridError> {
        let q = Quarter::new(year, quarter)?;
        let (first, last) = week_bounds(&q, alignment)?;
        let mut grid = Self::for_dates(first, last)?;
        grid.quarter = Some(q);
        Ok(grid)
    }

    /// Builds four slots for every day in `[first, last]`.
    pub fn for_dates(first: NaiveDate, last: NaiveDate) -> Result<Self, GridError> {
        let mut slots = Vec::new();
        let mut day = first;
        while day <= last {
            slots.extend(ShiftIndex::ALL.into_iter().map(|shift| ShiftSlot::new(day, shift)));
            day = day.succ_opt().ok_or(GridError::YearOutOfRange(day.year()))?;
        }
        if slots.is_empty() {
            return Err(GridError::Empty);
        }
        Ok(Self {
            quarter: None,
            slots,
        })
    }

    /// Accepts a prebuilt slot sequence after checking its order.
    pub fn from_slots(slots: Vec<ShiftSlot>) -> Result<Self, GridError> {
        if slots.is_empty() {
            return Err(GridError::Empty);
        }
        for (index, pair) in slots.windows(2).enumerate() {
            if (pair[0].date, pair[0].shift) >= (pair[1].date, pair[1].shift) {
                return Err(GridError::Unordered { index: index + 1 });
            }
        }
        Ok(Self {
            quarter: None,
            slots,
        })
    }

    /// Slots in iteration order.
    pub fn slots(&self) -> &[ShiftSlot] {
        &self.slots
    }

    /// Mutable access for seeding exclusions; the order cannot change.
    pub fn slots_mut(&mut self) -> &mut [ShiftSlot] {
        &mut self.slots
    }

    /// Consumes the grid, returning its slots.
    pub fn into_slots(self) -> Vec<ShiftSlot> {
        self.slots
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the grid has no slots. Always false for a built grid.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// First date.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.slots.first().map(|s| s.date)
    }

    /// Last date.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.slots.last().map(|s| s.date)
    }

    /// Number of distinct ISO weeks.
    pub fn week_count(&self) -> usize {
        let mut count = 0;
        let mut last = None;
        for slot in &self.slots {
            if last != Some(slot.week_key()) {
                count += 1;
                last = Some(slot.week_key());
            }
        }
        count
    }
}

/// Aligned `[first, last]` dates of a quarter grid.
pub fn week_bounds(
    quarter: &Quarter,
    alignment: WeekAlignment,
) -> Result<(NaiveDate, NaiveDate), GridError> {
    let start = quarter.first_day()?;
    let next_start = quarter.next_first_day()?;
    let out_of_range = GridError::YearOutOfRange(quarter.year);

    let (first, last) = match alignment {
        WeekAlignment::Forward => (
            monday_on_or_after(start),
            monday_on_or_after(next_start).pred_opt(),
        ),
        WeekAlignment::Backward => (
            monday_on_or_before(start),
            monday_on_or_before(next_start).pred_opt(),
        ),
        WeekAlignment::Enclosing => (
            monday_on_or_before(start),
            monday_on_or_after(next_start).pred_opt(),
        ),
    };
    Ok((first, last.ok_or(out_of_range)?))
}

fn monday_on_or_after(date: NaiveDate) -> NaiveDate {
    let ahead = (7 - date.weekday().num_days_from_monday()) % 7;
    date + chrono::Days::new(u64::from(ahead))
}

fn monday_on_or_before(date: NaiveDate) -> NaiveDate {
    date - chrono::Days::new(u64::from(date.weekday().num_days_from_monday()))
}

/// Whether a date is a Monday.
#[inline]
pub fn is_week_start(date: NaiveDate) -> bool {
    Weekday::from(date.weekday()) == Weekday::Monday
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_quarter_bounds() {
        let q = Quarter::new(2023, 2).unwrap();
        assert_eq!(q.first_day().unwrap(), date(2023, 4, 1));
        assert_eq!(q.last_day().unwrap(), date(2023, 6, 30));
        let q4 = Quarter::new(2023, 4).unwrap();
        assert_eq!(q4.last_day().unwrap(), date(2023, 12, 31));
        assert_eq!(q4.next().unwrap(), Quarter::new(2024, 1).unwrap());
    }

    #[test]
    fn test_invalid_quarter() {
        assert_eq!(Quarter::new(2023, 0), Err(GridError::InvalidQuarter(0)));
        assert_eq!(Quarter::new(2023, 5), Err(GridError::InvalidQuarter(5)));
        assert!(ShiftGrid::for_quarter(2023, 7).is_err());
    }

    #[test]
    fn test_forward_alignment_q2_2023() {
        // 2023-04-01 is a Saturday; 2023-07-01 is a Saturday.
        let grid = ShiftGrid::for_quarter(2023, 2).unwrap();
        assert_eq!(grid.first_date(), Some(date(2023, 4, 3)));
        assert_eq!(grid.last_date(), Some(date(2023, 7, 2)));
        assert_eq!(grid.week_count(), 13);
        assert_eq!(grid.len(), 13 * 7 * 4);
        assert!(is_week_start(grid.slots()[0].date));
        assert_eq!(grid.slots().last().unwrap().weekday, Weekday::Sunday);
    }

    #[test]
    fn test_backward_and_enclosing_alignment() {
        let back = ShiftGrid::for_quarter_aligned(2023, 2, WeekAlignment::Backward).unwrap();
        assert_eq!(back.first_date(), Some(date(2023, 3, 27)));
        assert_eq!(back.last_date(), Some(date(2023, 6, 25)));

        let enclosing = ShiftGrid::for_quarter_aligned(2023, 2, WeekAlignment::Enclosing).unwrap();
        assert_eq!(enclosing.first_date(), Some(date(2023, 3, 27)));
        assert_eq!(enclosing.last_date(), Some(date(2023, 7, 2)));
        assert_eq!(enclosing.week_count(), 14);
    }

    #[test]
    fn test_forward_quarters_tile() {
        for (year, quarter) in [(2024, 1), (2024, 2), (2024, 3), (2024, 4)] {
            let this = ShiftGrid::for_quarter(year, quarter).unwrap();
            let q = Quarter::new(year, quarter).unwrap().next().unwrap();
            let next = ShiftGrid::for_quarter(q.year, q.quarter).unwrap();
            assert_eq!(
                this.last_date().unwrap().succ_opt(),
                next.first_date(),
                "gap or overlap after {year} Q{quarter}"
            );
        }
    }

    #[test]
    fn test_monday_quarter_start_is_kept() {
        // 2024-04-01 is a Monday.
        let grid = ShiftGrid::for_quarter(2024, 2).unwrap();
        assert_eq!(grid.first_date(), Some(date(2024, 4, 1)));
    }

    #[test]
    fn test_slot_order_is_date_then_shift() {
        let grid = ShiftGrid::for_quarter(2023, 3).unwrap();
        let first_four: Vec<u8> = grid.slots()[..4].iter().map(|s| s.shift.number()).collect();
        assert_eq!(first_four, vec![1, 2, 3, 4]);
        assert!(grid
            .slots()
            .windows(2)
            .all(|w| (w[0].date, w[0].shift) < (w[1].date, w[1].shift)));
    }

    #[test]
    fn test_grid_is_idempotent() {
        let a = ShiftGrid::for_quarter(2025, 1).unwrap();
        let b = ShiftGrid::for_quarter(2025, 1).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), b.len());
    }

    #[test]
    fn test_q4_spills_into_next_iso_year() {
        // 2025-12-29 (Monday) starts ISO week 1 of 2026.
        let grid = ShiftGrid::for_quarter(2025, 4).unwrap();
        let last = grid.slots().last().unwrap();
        assert_eq!(last.date, date(2026, 1, 4));
        assert_eq!(last.week_key(), (2026, 1));
    }

    #[test]
    fn test_from_slots_checks_order() {
        let grid = ShiftGrid::for_dates(date(2023, 4, 3), date(2023, 4, 4)).unwrap();
        let mut slots = grid.into_slots();
        assert!(ShiftGrid::from_slots(slots.clone()).is_ok());
        slots.swap(0, 1);
        assert_eq!(
            ShiftGrid::from_slots(slots),
            Err(GridError::Unordered { index: 1 })
        );
        assert_eq!(ShiftGrid::from_slots(Vec::new()), Err(GridError::Empty));
    }
}
