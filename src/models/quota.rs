//! Shift quota model.
//!
//! A quota `(shifts_wanted, per_weeks)` reads "this many shifts every
//! this many weeks". Only five combinations are offered to volunteers;
//! anything else is rejected when the roster is loaded.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Desired shift frequency of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Quota {
    /// Shifts per window.
    pub shifts_wanted: u32,
    /// Window length in weeks.
    pub per_weeks: u32,
}

impl Quota {
    /// One shift every week.
    pub const ONE_PER_WEEK: Quota = Quota::new(1, 1);
    /// Two shifts every week.
    pub const TWO_PER_WEEK: Quota = Quota::new(2, 1);
    /// One shift every two weeks.
    pub const ONE_PER_TWO_WEEKS: Quota = Quota::new(1, 2);
    /// Three shifts every two weeks.
    pub const THREE_PER_TWO_WEEKS: Quota = Quota::new(3, 2);
    /// Two shifts every three weeks.
    pub const TWO_PER_THREE_WEEKS: Quota = Quota::new(2, 3);

    /// The combinations a roster may use.
    pub const ALLOWED: [Quota; 5] = [
        Quota::ONE_PER_WEEK,
        Quota::TWO_PER_WEEK,
        Quota::ONE_PER_TWO_WEEKS,
        Quota::THREE_PER_TWO_WEEKS,
        Quota::TWO_PER_THREE_WEEKS,
    ];

    /// Creates a quota without checking it against [`ALLOWED`](Self::ALLOWED).
    pub const fn new(shifts_wanted: u32, per_weeks: u32) -> Self {
        Self {
            shifts_wanted,
            per_weeks,
        }
    }

    /// Whether this is one of the allowed combinations.
    pub fn is_allowed(&self) -> bool {
        Self::ALLOWED.contains(self)
    }

    /// Whether the shifts must be spread over more than one week.
    #[inline]
    pub fn spans_weeks(&self) -> bool {
        self.per_weeks > 1
    }

    /// Whether the week after the one that nearly exhausts the quota must
    /// stay free as well. True for (2,3) and (1,2).
    #[inline]
    pub fn blocks_following_week(&self) -> bool {
        self.spans_weeks() && self.shifts_wanted < self.per_weeks
    }

    /// Whether the weekly reset is skipped on odd ISO weeks.
    ///
    /// "Once every two weeks" is approximated by replenishing only on even
    /// week numbers instead of tracking a true two-week window.
    #[inline]
    pub fn skips_odd_week_reset(&self) -> bool {
        *self == Self::ONE_PER_TWO_WEEKS
    }
}

impl Default for Quota {
    fn default() -> Self {
        Self::ONE_PER_WEEK
    }
}

impl fmt::Display for Quota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.shifts_wanted, self.per_weeks)
    }
}

impl FromStr for Quota {
    type Err = ParseError;

    /// Parses `s,w` or `s/w`, e.g. `"3,2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidQuota(s.into());
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let (shifts, weeks) = compact
            .split_once(',')
            .or_else(|| compact.split_once('/'))
            .ok_or_else(invalid)?;
        let quota = Quota::new(
            shifts.parse().map_err(|_| invalid())?,
            weeks.parse().map_err(|_| invalid())?,
        );
        if quota.is_allowed() {
            Ok(quota)
        } else {
            Err(invalid())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowed() {
        assert_eq!("1,1".parse::<Quota>().unwrap(), Quota::ONE_PER_WEEK);
        assert_eq!(" 3, 2 ".parse::<Quota>().unwrap(), Quota::THREE_PER_TWO_WEEKS);
        assert_eq!("2/3".parse::<Quota>().unwrap(), Quota::TWO_PER_THREE_WEEKS);
    }

    #[test]
    fn test_parse_rejects_unlisted_pairs() {
        assert!("3,1".parse::<Quota>().is_err());
        assert!("0,1".parse::<Quota>().is_err());
        assert!("1".parse::<Quota>().is_err());
        assert!("a,b".parse::<Quota>().is_err());
    }

    #[test]
    fn test_spread_rules() {
        assert!(!Quota::ONE_PER_WEEK.spans_weeks());
        assert!(!Quota::TWO_PER_WEEK.spans_weeks());
        assert!(Quota::THREE_PER_TWO_WEEKS.spans_weeks());
        assert!(!Quota::THREE_PER_TWO_WEEKS.blocks_following_week());
        assert!(Quota::TWO_PER_THREE_WEEKS.blocks_following_week());
        assert!(Quota::ONE_PER_TWO_WEEKS.blocks_following_week());
        assert!(Quota::ONE_PER_TWO_WEEKS.skips_odd_week_reset());
        assert!(!Quota::TWO_PER_THREE_WEEKS.skips_odd_week_reset());
    }

    #[test]
    fn test_display() {
        assert_eq!(Quota::TWO_PER_THREE_WEEKS.to_string(), "2,3");
    }
}
