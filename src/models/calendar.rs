//! Holiday calendar.
//!
//! Holidays are non-workable dates: every shift on a holiday stays empty,
//! whoever is available. The scheduler only asks "is this date a
//! holiday?"; computing the dates is the job of a [`HolidayProvider`].
//!
//! # Providers
//! - [`DutchHolidays`]: the public holidays observed by a Dutch care
//!   organisation, including the Easter-dependent ones.
//! - Any custom provider, or a fixed list via [`HolidayCalendar::from_dates`].

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A set of holiday dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    dates: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    /// Creates an empty calendar (no holidays).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calendar from a fixed list of dates.
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// Collects the holidays of every year touched by `[first, last]`.
    ///
    /// A quarter grid aligned to whole weeks can spill into the next year,
    /// so a single-year lookup is not enough.
    pub fn for_range<P: HolidayProvider + ?Sized>(
        provider: &P,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Self {
        let dates = (first.year()..=last.year())
            .flat_map(|year| provider.holidays(year))
            .filter(|d| first <= *d && *d <= last)
            .collect();
        Self { dates }
    }

    /// Adds a holiday.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.dates.insert(date);
        self
    }

    /// Whether the date is a holiday.
    #[inline]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// All holidays in date order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }

    /// Number of holidays.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether there are no holidays.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Source of holiday dates for a year.
pub trait HolidayProvider {
    /// Holidays falling in `year`.
    fn holidays(&self, year: i32) -> Vec<NaiveDate>;
}

/// Dutch public holidays as observed by the hospice.
///
/// New Year's Day, Easter Sunday and Monday, King's Day (27 April),
/// Ascension Day, Whit Sunday and Monday, Christmas, Boxing Day and
/// New Year's Eve.
#[derive(Debug, Clone, Copy, Default)]
pub struct DutchHolidays;

impl HolidayProvider for DutchHolidays {
    fn holidays(&self, year: i32) -> Vec<NaiveDate> {
        let fixed = [(1, 1), (4, 27), (12, 25), (12, 26), (12, 31)];
        let mut days: Vec<NaiveDate> = fixed
            .iter()
            .filter_map(|&(m, d)| NaiveDate::from_ymd_opt(year, m, d))
            .collect();

        if let Some(easter) = easter_sunday(year) {
            // Easter, Easter Monday, Ascension (+39), Whit Sunday (+49), Whit Monday (+50)
            for offset in [0, 1, 39, 49, 50] {
                days.push(easter + Duration::days(offset));
            }
        }

        days.sort();
        days
    }
}

/// Gregorian Easter Sunday (anonymous Gregorian algorithm).
///
/// # Reference
/// Meeus (1991), "Astronomical Algorithms", Ch. 8
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}
