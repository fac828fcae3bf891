//! Roster: the validated set of persons for one scheduling run.
//!
//! A [`Roster`] can only be built from input that passes validation, so
//! the scheduler never re-checks names, quotas or date ranges.
//!
//! # Records
//! [`RosterRecord`] is one row of a roster sheet with every field still a
//! string. Reading the sheet is up to the caller; any format serde can
//! deserialize into records will do.
//!
//! ```
//! use u_rota::roster::{Roster, RosterRecord};
//! use u_rota::models::Role;
//!
//! let record = RosterRecord::new("Ann", "caretaker", "3,2")
//!     .with_not_on("sat:1,2,3,4#sun:1,2,3,4#")
//!     .with_unavailable("2023-05-01>2023-05-07");
//! let roster = Roster::from_records(vec![record]).unwrap();
//! assert_eq!(roster.pool(Role::Caretaker), vec!["Ann"]);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::{ParseError, RosterError};
use crate::models::{DateRange, Person, Quota, Role};
use crate::validation::validate_roster;

/// One roster row as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterRecord {
    /// Person name.
    pub name: String,
    /// `caretaker` or `generalist`.
    pub role: String,
    /// Quota token, e.g. `3,2`.
    pub quota: String,
    /// Static exclusions, e.g. `mon:1,2,3,4#sun:1#`.
    #[serde(default)]
    pub not_on: String,
    /// Preferred slots in the same format as `not_on`.
    #[serde(default)]
    pub preferred: String,
    /// Comma-separated dates or `start>end` ranges.
    #[serde(default)]
    pub unavailable: String,
    /// Inactive rows are skipped.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl RosterRecord {
    /// Creates an active record without exclusions or preferences.
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        quota: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            quota: quota.into(),
            not_on: String::new(),
            preferred: String::new(),
            unavailable: String::new(),
            active: true,
        }
    }

    /// Sets the static exclusions.
    pub fn with_not_on(mut self, not_on: impl Into<String>) -> Self {
        self.not_on = not_on.into();
        self
    }

    /// Sets the preferred slots.
    pub fn with_preferred(mut self, preferred: impl Into<String>) -> Self {
        self.preferred = preferred.into();
        self
    }

    /// Sets the unavailable dates.
    pub fn with_unavailable(mut self, unavailable: impl Into<String>) -> Self {
        self.unavailable = unavailable.into();
        self
    }

    /// Sets the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Parses the record into a person.
    pub fn parse(&self) -> Result<Person, ParseError> {
        let unavailable = self
            .unavailable
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::parse::<DateRange>)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Person {
            name: self.name.trim().to_string(),
            role: self.role.parse()?,
            quota: self.quota.parse()?,
            not_on: self.not_on.parse()?,
            preferred: self.preferred.parse()?,
            unavailable,
        })
    }
}

/// Validated persons, in input order.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    persons: Vec<Person>,
    by_name: HashMap<String, usize>,
}

impl Roster {
    /// Validates and wraps a list of persons.
    pub fn new(persons: Vec<Person>) -> Result<Self, RosterError> {
        validate_roster(&persons).map_err(RosterError::Invalid)?;
        let by_name = persons
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.clone(), i))
            .collect();
        Ok(Self { persons, by_name })
    }

    /// Parses active records, then validates the result.
    ///
    /// The first record that fails to parse aborts the load; its index
    /// counts all records, inactive ones included.
    pub fn from_records(records: Vec<RosterRecord>) -> Result<Self, RosterError> {
        let mut persons = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if !record.active {
                continue;
            }
            let person = record.parse().map_err(|source| RosterError::Record {
                index,
                name: record.name.clone(),
                source,
            })?;
            persons.push(person);
        }
        Self::new(persons)
    }

    /// All persons.
    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    /// Looks up a person by name.
    pub fn get(&self, name: &str) -> Option<&Person> {
        self.by_name.get(name).and_then(|&i| self.persons.get(i))
    }

    /// Persons of a role, sorted by name.
    pub fn members(&self, role: Role) -> Vec<&Person> {
        let mut members: Vec<&Person> = self.persons.iter().filter(|p| p.role == role).collect();
        members.sort_by(|a, b| a.name.cmp(&b.name));
        members
    }

    /// Names of a role, sorted.
    pub fn pool(&self, role: Role) -> Vec<&str> {
        self.members(role).into_iter().map(|p| p.name.as_str()).collect()
    }

    /// Number of persons.
    pub fn len(&self) -> usize {
        self.persons.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Number of persons per quota within a role.
    ///
    /// Every allowed quota is present, with zero if nobody has it.
    pub fn quota_distribution(&self, role: Role) -> BTreeMap<Quota, usize> {
        let mut counts: BTreeMap<Quota, usize> = Quota::ALLOWED.iter().map(|&q| (q, 0)).collect();
        for person in self.persons.iter().filter(|p| p.role == role) {
            *counts.entry(person.quota).or_insert(0) += 1;
        }
        counts
    }
}
