//! Scheduler configuration.
//!
//! Passed explicitly to [`RotaScheduler`](crate::scheduler::RotaScheduler);
//! there is no process-wide state. All fields have defaults, so a partial
//! document deserializes:
//!
//! ```
//! use u_rota::config::SchedulerConfig;
//!
//! let config: SchedulerConfig = serde_json::from_str(r#"{ "weekend_period": 4 }"#).unwrap();
//! assert_eq!(config.weekend_period, 4);
//! assert!(config.weekend_quota_guard);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::dispatching::FallbackPolicy;
use crate::models::{ShiftIndex, Weekday};

/// Default weekend rotation period in weeks.
pub const DEFAULT_WEEKEND_PERIOD: u32 = 2;

/// Scheduling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// A person becomes eligible for weekend slots once their weekend
    /// counter reaches this value (one weekend every N weeks).
    pub weekend_period: u32,
    /// Names that stay eligible for weekends after serving one.
    pub always_weekend_available: BTreeSet<String>,
    /// How to pick among eligible candidates when nobody prefers the slot.
    pub fallback: FallbackPolicy,
    /// On weekend slots, also exclude persons with a multi-week quota
    /// whose availability counter is exhausted.
    pub weekend_quota_guard: bool,
    /// Display names for Monday..Sunday.
    pub weekday_labels: [String; 7],
    /// Display names for shifts 1..4.
    pub shift_labels: [String; 4],
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            weekend_period: DEFAULT_WEEKEND_PERIOD,
            always_weekend_available: BTreeSet::new(),
            fallback: FallbackPolicy::default(),
            weekend_quota_guard: true,
            weekday_labels: [
                "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
            ]
            .map(String::from),
            shift_labels: ["07:00-11:00", "11:00-15:00", "15:00-19:00", "19:00-23:00"]
                .map(String::from),
        }
    }
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weekend rotation period.
    pub fn with_weekend_period(mut self, weeks: u32) -> Self {
        self.weekend_period = weeks;
        self
    }

    /// Adds a name to the always-weekend-available list.
    pub fn with_always_weekend_available(mut self, name: impl Into<String>) -> Self {
        self.always_weekend_available.insert(name.into());
        self
    }

    /// Sets the fallback selection policy.
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Enables or disables the weekend quota guard.
    pub fn with_weekend_quota_guard(mut self, enabled: bool) -> Self {
        self.weekend_quota_guard = enabled;
        self
    }

    /// Replaces the weekday labels (e.g. for another locale).
    pub fn with_weekday_labels(mut self, labels: [String; 7]) -> Self {
        self.weekday_labels = labels;
        self
    }

    /// Replaces the shift labels.
    pub fn with_shift_labels(mut self, labels: [String; 4]) -> Self {
        self.shift_labels = labels;
        self
    }

    /// Label for a weekday.
    pub fn weekday_label(&self, day: Weekday) -> &str {
        &self.weekday_labels[day.index()]
    }

    /// Label for a shift.
    pub fn shift_label(&self, shift: ShiftIndex) -> &str {
        &self.shift_labels[shift.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SchedulerConfig::default();
        assert_eq!(config.weekend_period, 2);
        assert_eq!(config.fallback, FallbackPolicy::MostConstrained);
        assert_eq!(config.weekday_label(Weekday::Sunday), "sunday");
        assert_eq!(config.shift_label(ShiftIndex::Fourth), "19:00-23:00");
    }

    #[test]
    fn test_builder() {
        let dutch = ["ma", "di", "wo", "do", "vr", "za", "zo"].map(String::from);
        let config = SchedulerConfig::new()
            .with_weekend_period(4)
            .with_always_weekend_available("Ann")
            .with_fallback(FallbackPolicy::Random)
            .with_weekend_quota_guard(false)
            .with_weekday_labels(dutch);

        assert_eq!(config.weekend_period, 4);
        assert!(config.always_weekend_available.contains("Ann"));
        assert_eq!(config.fallback, FallbackPolicy::Random);
        assert!(!config.weekend_quota_guard);
        assert_eq!(config.weekday_label(Weekday::Wednesday), "wo");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SchedulerConfig = serde_json::from_str(
            r#"{ "always_weekend_available": ["Bob"], "fallback": "random" }"#,
        )
        .unwrap();
        assert_eq!(config.weekend_period, DEFAULT_WEEKEND_PERIOD);
        assert!(config.always_weekend_available.contains("Bob"));
        assert_eq!(config.fallback, FallbackPolicy::Random);
    }
}
