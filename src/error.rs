//! Error types.
//!
//! Only malformed input is an error. A shift that ends without an eligible
//! candidate is a normal outcome and is reported through the
//! [`Rota`](crate::models::Rota), never through these types.

use thiserror::Error;

use crate::validation::ValidationError;

/// A roster token could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Weekday token is not a known day name or ISO number.
    #[error("invalid weekday: \"{0}\"")]
    InvalidWeekday(String),

    /// Shift token is not a number in 1..=4.
    #[error("invalid shift: \"{0}\" (expected 1-4)")]
    InvalidShift(String),

    /// Quota token is malformed or not one of the allowed pairs.
    #[error("invalid quota: \"{0}\" (allowed: 1,1 2,1 1,2 3,2 2,3)")]
    InvalidQuota(String),

    /// Role name is neither caretaker nor generalist.
    #[error("invalid role: \"{0}\"")]
    InvalidRole(String),

    /// Day-and-shifts string does not follow `day:shift[,shift]*#...`.
    #[error("invalid day-and-shifts string: \"{0}\"")]
    InvalidDayShifts(String),

    /// Date or date range is malformed or inverted.
    #[error("invalid date range: \"{0}\"")]
    InvalidDateRange(String),
}

/// The shift grid could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Quarter number outside 1..=4.
    #[error("invalid quarter: {0} (expected 1-4)")]
    InvalidQuarter(u32),

    /// Year cannot be represented as a calendar date.
    #[error("year out of range: {0}")]
    YearOutOfRange(i32),

    /// A prebuilt slot sequence contained no slots.
    #[error("shift grid is empty")]
    Empty,

    /// A prebuilt slot sequence is not in date-then-shift order.
    #[error("shift grid is out of order at slot {index}")]
    Unordered { index: usize },
}

/// The roster could not be built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RosterError {
    /// A record failed to parse.
    #[error("record {index} ({name}): {source}")]
    Record {
        index: usize,
        name: String,
        #[source]
        source: ParseError,
    },

    /// The parsed persons failed validation.
    #[error("roster failed validation with {} error(s): {}", .0.len(), join_messages(.0))]
    Invalid(Vec<ValidationError>),
}

/// Top-level error of the scheduling entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RotaError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Grid(#[from] GridError),

    /// Scheduler configuration is inconsistent with itself or the roster.
    #[error("invalid configuration: {}", join_messages(.0))]
    InvalidConfig(Vec<ValidationError>),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
