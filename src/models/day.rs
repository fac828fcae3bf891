//! Weekday and shift codes.
//!
//! A day has four fixed four-hour shifts, numbered 1-4. Weekdays follow
//! ISO numbering (Monday = 1, Sunday = 7).
//!
//! [`DayShifts`] maps weekdays to sets of shifts. It is used both for a
//! person's static exclusions ("never on Saturday shifts 1-4") and for
//! their preferred slots ("Tuesday shift 1").

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// ISO weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Creates a weekday from its ISO number (1 = Monday).
    pub fn from_iso(number: u32) -> Option<Self> {
        match number {
            1..=7 => Some(Self::ALL[(number - 1) as usize]),
            _ => None,
        }
    }

    /// ISO number (1 = Monday, 7 = Sunday).
    #[inline]
    pub fn iso(self) -> u32 {
        self as u32 + 1
    }

    /// Zero-based index (0 = Monday).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Saturday or Sunday.
    #[inline]
    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }

    fn short_name(self) -> &'static str {
        match self {
            Weekday::Monday => "mon",
            Weekday::Tuesday => "tue",
            Weekday::Wednesday => "wed",
            Weekday::Thursday => "thu",
            Weekday::Friday => "fri",
            Weekday::Saturday => "sat",
            Weekday::Sunday => "sun",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        Self::ALL[day.num_days_from_monday() as usize]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for Weekday {
    type Err = ParseError;

    /// Accepts `mon`, `monday` (any case) or an ISO number `1`-`7`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        if let Ok(number) = token.parse::<u32>() {
            return Self::from_iso(number).ok_or_else(|| ParseError::InvalidWeekday(s.into()));
        }
        Self::ALL
            .into_iter()
            .find(|day| token == day.short_name() || token == full_name(*day))
            .ok_or_else(|| ParseError::InvalidWeekday(s.into()))
    }
}

fn full_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Monday => "monday",
        Weekday::Tuesday => "tuesday",
        Weekday::Wednesday => "wednesday",
        Weekday::Thursday => "thursday",
        Weekday::Friday => "friday",
        Weekday::Saturday => "saturday",
        Weekday::Sunday => "sunday",
    }
}

/// One of the four daily shifts.
///
/// Serialized as its number (1-4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ShiftIndex {
    First = 1,
    Second = 2,
    Third = 3,
    Fourth = 4,
}

impl ShiftIndex {
    /// All shifts in daily order.
    pub const ALL: [ShiftIndex; 4] = [
        ShiftIndex::First,
        ShiftIndex::Second,
        ShiftIndex::Third,
        ShiftIndex::Fourth,
    ];

    /// Shift number (1-4).
    #[inline]
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Zero-based index (0-3).
    #[inline]
    pub fn index(self) -> usize {
        self as usize - 1
    }
}

impl TryFrom<u8> for ShiftIndex {
    type Error = ParseError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        match number {
            1..=4 => Ok(Self::ALL[(number - 1) as usize]),
            _ => Err(ParseError::InvalidShift(number.to_string())),
        }
    }
}

impl From<ShiftIndex> for u8 {
    fn from(shift: ShiftIndex) -> Self {
        shift.number()
    }
}

impl fmt::Display for ShiftIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl FromStr for ShiftIndex {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| ParseError::InvalidShift(s.into()))
            .and_then(Self::try_from)
            .map_err(|_| ParseError::InvalidShift(s.into()))
    }
}

/// Weekday → set of shifts.
///
/// # Text format
/// `day:shift[,shift]*` entries separated by `#`, with an optional
/// trailing `#`. Whitespace is ignored. Example: `mon:1,2,3,4#sun:4#`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayShifts(BTreeMap<Weekday, BTreeSet<ShiftIndex>>);

impl DayShifts {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one (weekday, shift) pair.
    pub fn insert(&mut self, day: Weekday, shift: ShiftIndex) {
        self.0.entry(day).or_default().insert(shift);
    }

    /// Adds all four shifts of a weekday.
    pub fn insert_day(&mut self, day: Weekday) {
        self.0.entry(day).or_default().extend(ShiftIndex::ALL);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, day: Weekday, shift: ShiftIndex) -> Self {
        self.insert(day, shift);
        self
    }

    /// Whether the pair is present.
    pub fn contains(&self, day: Weekday, shift: ShiftIndex) -> bool {
        self.0.get(&day).is_some_and(|shifts| shifts.contains(&shift))
    }

    /// Shifts listed for a weekday, in daily order.
    pub fn shifts_on(&self, day: Weekday) -> impl Iterator<Item = ShiftIndex> + '_ {
        self.0.get(&day).into_iter().flatten().copied()
    }

    /// Whether any shift is listed for the weekday.
    pub fn has_day(&self, day: Weekday) -> bool {
        self.0.get(&day).is_some_and(|shifts| !shifts.is_empty())
    }

    /// All (weekday, shift) pairs in week order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, ShiftIndex)> + '_ {
        self.0
            .iter()
            .flat_map(|(day, shifts)| shifts.iter().map(move |shift| (*day, *shift)))
    }

    /// Number of (weekday, shift) pairs.
    pub fn count(&self) -> usize {
        self.0.values().map(BTreeSet::len).sum()
    }

    /// Whether no pair is listed.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Whether a pair strictly after `(day, shift)` exists in the same week.
    pub fn has_later_than(&self, day: Weekday, shift: ShiftIndex) -> bool {
        self.iter().any(|(d, s)| (d, s) > (day, shift))
    }
}

impl FromStr for DayShifts {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let invalid = || ParseError::InvalidDayShifts(s.into());
        let mut map = DayShifts::new();

        let body = compact.strip_suffix('#').unwrap_or(&compact);
        if body.is_empty() {
            return Ok(map);
        }

        for entry in body.split('#') {
            let (day, shifts) = entry.split_once(':').ok_or_else(invalid)?;
            let day: Weekday = day.parse().map_err(|_| invalid())?;
            if map.has_day(day) {
                return Err(invalid());
            }
            let mut seen = BTreeSet::new();
            for token in shifts.split(',') {
                let shift: ShiftIndex = token.parse().map_err(|_| invalid())?;
                // A shift listed twice for one day is a typo in the source.
                if !seen.insert(shift) {
                    return Err(invalid());
                }
            }
            map.0.insert(day, seen);
        }

        Ok(map)
    }
}

impl fmt::Display for DayShifts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (day, shifts) in &self.0 {
            let list: Vec<String> = shifts.iter().map(ToString::to_string).collect();
            write!(f, "{day}:{}#", list.join(","))?;
        }
        Ok(())
    }
}
