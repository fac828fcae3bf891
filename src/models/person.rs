//! Person (volunteer) model.
//!
//! A person fills exactly one role, wants a fixed quota of shifts, and
//! carries three kinds of wishes:
//! - static exclusions: weekday/shift pairs they never work,
//! - preferred slots: weekday/shift pairs they would like to work,
//! - date-range exclusions: closed date intervals they are away.
//!
//! Persons are immutable during a scheduling pass. The mutable counters
//! live in the [`AvailabilityTracker`](crate::scheduler::AvailabilityTracker).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{DayShifts, Quota, ShiftIndex, Weekday};
use crate::error::ParseError;

/// Role pool a person belongs to. Every shift needs one of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Care specialist.
    Caretaker,
    /// General volunteer.
    Generalist,
}

impl Role {
    /// Both roles, caretaker first.
    pub const ALL: [Role; 2] = [Role::Caretaker, Role::Generalist];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Caretaker => f.write_str("caretaker"),
            Role::Generalist => f.write_str("generalist"),
        }
    }
}

impl FromStr for Role {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "caretaker" => Ok(Role::Caretaker),
            "generalist" => Ok(Role::Generalist),
            _ => Err(ParseError::InvalidRole(s.into())),
        }
    }
}

/// A closed date interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First excluded date (inclusive).
    pub start: NaiveDate,
    /// Last excluded date (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range. Inverted ranges are caught by roster validation.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range covering a single day.
    pub fn single(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// Whether `end` lies before `start`.
    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }

    /// Whether the date falls within the range (both ends inclusive).
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl FromStr for DateRange {
    type Err = ParseError;

    /// Parses `YYYY-MM-DD` or `YYYY-MM-DD>YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidDateRange(s.into());
        let parse = |text: &str| NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d");
        let range = match s.split_once('>') {
            Some((start, end)) => DateRange::new(
                parse(start).map_err(|_| invalid())?,
                parse(end).map_err(|_| invalid())?,
            ),
            None => DateRange::single(parse(s).map_err(|_| invalid())?),
        };
        if range.is_inverted() {
            return Err(invalid());
        }
        Ok(range)
    }
}

/// A volunteer on the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Unique name; also the key used in shift slots.
    pub name: String,
    /// Role pool.
    pub role: Role,
    /// Desired shift frequency.
    pub quota: Quota,
    /// Weekday/shift pairs the person never works.
    pub not_on: DayShifts,
    /// Weekday/shift pairs the person would like to work.
    pub preferred: DayShifts,
    /// Dates the person is away.
    pub unavailable: Vec<DateRange>,
}

impl Person {
    /// Creates a person without exclusions or preferences.
    pub fn new(name: impl Into<String>, role: Role, quota: Quota) -> Self {
        Self {
            name: name.into(),
            role,
            quota,
            not_on: DayShifts::new(),
            preferred: DayShifts::new(),
            unavailable: Vec::new(),
        }
    }

    /// Creates a caretaker.
    pub fn caretaker(name: impl Into<String>, quota: Quota) -> Self {
        Self::new(name, Role::Caretaker, quota)
    }

    /// Creates a generalist.
    pub fn generalist(name: impl Into<String>, quota: Quota) -> Self {
        Self::new(name, Role::Generalist, quota)
    }

    /// Never schedule on this weekday/shift.
    pub fn with_exclusion(mut self, day: Weekday, shift: ShiftIndex) -> Self {
        self.not_on.insert(day, shift);
        self
    }

    /// Never schedule on any shift of this weekday.
    pub fn with_excluded_day(mut self, day: Weekday) -> Self {
        self.not_on.insert_day(day);
        self
    }

    /// Replaces all static exclusions.
    pub fn with_exclusions(mut self, not_on: DayShifts) -> Self {
        self.not_on = not_on;
        self
    }

    /// Prefer this weekday/shift.
    pub fn with_preference(mut self, day: Weekday, shift: ShiftIndex) -> Self {
        self.preferred.insert(day, shift);
        self
    }

    /// Replaces all preferences.
    pub fn with_preferences(mut self, preferred: DayShifts) -> Self {
        self.preferred = preferred;
        self
    }

    /// Away during the given range.
    pub fn with_unavailable(mut self, range: DateRange) -> Self {
        self.unavailable.push(range);
        self
    }

    /// Number of excluded weekday/shift pairs.
    ///
    /// Used by the most-constrained-first fallback: the higher the count,
    /// the fewer open slots the person can fill.
    pub fn static_exclusion_count(&self) -> usize {
        self.not_on.count()
    }

    /// Whether the person is away on the date.
    pub fn is_away_on(&self, date: NaiveDate) -> bool {
        self.unavailable.iter().any(|r| r.contains(date))
    }

    /// Whether the person never works this weekday/shift.
    pub fn refuses(&self, day: Weekday, shift: ShiftIndex) -> bool {
        self.not_on.contains(day, shift)
    }

    /// Whether the person prefers this weekday/shift.
    pub fn prefers(&self, day: Weekday, shift: ShiftIndex) -> bool {
        self.preferred.contains(day, shift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("Caretaker".parse::<Role>().unwrap(), Role::Caretaker);
        assert_eq!(" generalist ".parse::<Role>().unwrap(), Role::Generalist);
        assert!("nurse".parse::<Role>().is_err());
    }

    #[test]
    fn test_date_range_parse() {
        let single: DateRange = "2023-04-22".parse().unwrap();
        assert_eq!(single, DateRange::single(date(2023, 4, 22)));

        let span: DateRange = "2023-05-01>2023-05-07".parse().unwrap();
        assert!(span.contains(date(2023, 5, 1)));
        assert!(span.contains(date(2023, 5, 7)));
        assert!(!span.contains(date(2023, 5, 8)));

        assert!("2023-05-07>2023-05-01".parse::<DateRange>().is_err());
        assert!("22-4-2023".parse::<DateRange>().is_err());
    }

    #[test]
    fn test_person_builder() {
        let p = Person::caretaker("Ann de Vries", Quota::TWO_PER_WEEK)
            .with_excluded_day(Weekday::Saturday)
            .with_exclusion(Weekday::Sunday, ShiftIndex::First)
            .with_preference(Weekday::Tuesday, ShiftIndex::First)
            .with_unavailable(DateRange::new(date(2023, 4, 10), date(2023, 4, 14)));

        assert_eq!(p.role, Role::Caretaker);
        assert_eq!(p.static_exclusion_count(), 5);
        assert!(p.refuses(Weekday::Saturday, ShiftIndex::Third));
        assert!(!p.refuses(Weekday::Sunday, ShiftIndex::Second));
        assert!(p.prefers(Weekday::Tuesday, ShiftIndex::First));
        assert!(p.is_away_on(date(2023, 4, 12)));
        assert!(!p.is_away_on(date(2023, 4, 15)));
    }
}
