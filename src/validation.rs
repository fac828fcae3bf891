//! Input validation for rota runs.
//!
//! Checks the roster and the scheduler configuration before any
//! scheduling state is created. Detects:
//! - Duplicate or empty person names
//! - Quotas outside the five allowed combinations
//! - Inverted date ranges
//! - A zero weekend rotation period
//! - Allow-list names that are not on the roster
//!
//! All problems are collected; validation never stops at the first one.

use std::collections::HashSet;

use crate::config::SchedulerConfig;
use crate::models::Person;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two persons share the same name.
    DuplicateName,
    /// A person has an empty name.
    EmptyName,
    /// A quota is not one of the allowed combinations.
    InvalidQuota,
    /// A date range ends before it starts.
    InvertedDateRange,
    /// The weekend rotation period is zero.
    InvalidWeekendPeriod,
    /// The configuration names a person who is not on the roster.
    UnknownPerson,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a list of persons.
///
/// Checks:
/// 1. Every name is non-empty
/// 2. No two persons share a name
/// 3. Every quota is allowed
/// 4. No date range is inverted
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_roster(persons: &[Person]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for (index, person) in persons.iter().enumerate() {
        if person.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                format!("Person {index} has no name"),
            ));
        } else if !names.insert(person.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate name: {}", person.name),
            ));
        }

        if !person.quota.is_allowed() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidQuota,
                format!("'{}' has quota {} which is not allowed", person.name, person.quota),
            ));
        }

        for range in person.unavailable.iter().filter(|r| r.is_inverted()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvertedDateRange,
                format!(
                    "'{}' is unavailable from {} to {}, which ends before it starts",
                    person.name, range.start, range.end
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a configuration against the roster it will run with.
pub fn validate_config(config: &SchedulerConfig, persons: &[Person]) -> ValidationResult {
    let mut errors = Vec::new();

    if config.weekend_period == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidWeekendPeriod,
            "Weekend period must be at least one week",
        ));
    }

    let names: HashSet<&str> = persons.iter().map(|p| p.name.as_str()).collect();
    for name in &config.always_weekend_available {
        if !names.contains(name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownPerson,
                format!("'{name}' is listed as always available for weekends but is not on the roster"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
