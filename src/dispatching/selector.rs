//! Picks one name per role from an eligible pool.
//!
//! # Order
//!
//! 1. Holiday: nobody, whatever the pool holds.
//! 2. Preference: persons who prefer the slot's weekday and shift; one is
//!    drawn uniformly.
//! 3. Fallback: the whole pool, per [`FallbackPolicy`].
//! 4. Empty pool: nobody.
//!
//! All draws go through the caller's random source, so a seeded source
//! reproduces a rota exactly.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{Person, ShiftIndex, ShiftSlot};

/// How to choose when nobody in the pool prefers the slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Person with the most static exclusions; ties drawn uniformly.
    ///
    /// Spends hard-to-place volunteers first and keeps flexible ones for
    /// slots later in the quarter.
    #[default]
    MostConstrained,
    /// Uniform draw over the pool.
    Random,
}

/// Selects candidates for a slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateSelector {
    fallback: FallbackPolicy,
}

impl CandidateSelector {
    /// Creates a selector with the default fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback policy.
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Configured fallback policy.
    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    /// Persons in the pool who prefer the slot.
    ///
    /// When a person lists several preferred shifts for the slot's weekday,
    /// one of them is drawn for the comparison.
    pub fn preferring<'p, R: Rng + ?Sized>(
        &self,
        pool: &[&'p Person],
        slot: &ShiftSlot,
        rng: &mut R,
    ) -> Vec<&'p Person> {
        pool.iter()
            .copied()
            .filter(|person| {
                let shifts: Vec<ShiftIndex> = person.preferred.shifts_on(slot.weekday).collect();
                shifts.choose(&mut *rng) == Some(&slot.shift)
            })
            .collect()
    }

    /// Picks one person, or `None` for an empty pool.
    pub fn select<'p, R: Rng + ?Sized>(
        &self,
        pool: &[&'p Person],
        slot: &ShiftSlot,
        rng: &mut R,
    ) -> Option<&'p Person> {
        if pool.is_empty() {
            return None;
        }

        let preferring = self.preferring(pool, slot, rng);
        if let Some(person) = preferring.choose(rng) {
            return Some(*person);
        }

        match self.fallback {
            FallbackPolicy::Random => pool.choose(rng).copied(),
            FallbackPolicy::MostConstrained => {
                let most = pool.iter().map(|p| p.static_exclusion_count()).max()?;
                let top: Vec<&'p Person> = pool
                    .iter()
                    .copied()
                    .filter(|p| p.static_exclusion_count() == most)
                    .collect();
                top.choose(rng).copied()
            }
        }
    }

    /// Picks a caretaker and a generalist for the slot.
    ///
    /// Holidays yield `(None, None)` without drawing from the source.
    pub fn select_pair<'p, R: Rng + ?Sized>(
        &self,
        slot: &ShiftSlot,
        holiday: bool,
        caretakers: &[&'p Person],
        generalists: &[&'p Person],
        rng: &mut R,
    ) -> (Option<&'p Person>, Option<&'p Person>) {
        if holiday {
            return (None, None);
        }
        (
            self.select(caretakers, slot, rng),
            self.select(generalists, slot, rng),
        )
    }
}
