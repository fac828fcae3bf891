//! Single-pass greedy rota allocation.
//!
//! # Algorithm
//!
//! Slots are visited once, in grid order. For each slot:
//!
//! 1. On a new ISO week: restore exhausted availability and advance the
//!    weekend counters.
//! 2. Holiday: leave both roles empty.
//! 3. Narrow each role pool with the [`ConstraintEvaluator`] and pick one
//!    name per role with the [`CandidateSelector`].
//! 4. Commit: weekend duty resets the weekend counter, every assignment
//!    uses up availability.
//! 5. Exclude the assigned names from the rest of the day and all of the
//!    next day.
//! 6. Multi-week quotas with one shift left are excluded for the rest of
//!    the week, and for (2,3) and (1,2) for the following week as well.
//!
//! There is no backtracking. A role nobody can fill stays empty and shows
//! up in the [`Rota`] and the [`RotaReport`](super::RotaReport).
//!
//! # Complexity
//! O(s * p) where s=slots, p=persons (the weekly scan is bounded by 28
//! slots).

use std::ops::Range;

use rand::Rng;
use tracing::{debug, info, trace};

use crate::config::SchedulerConfig;
use crate::dispatching::{seed_static_exclusions, CandidateSelector, ConstraintEvaluator};
use crate::error::RotaError;
use crate::grid::ShiftGrid;
use crate::models::{HolidayCalendar, HolidayProvider, Person, Role, Rota, ShiftSlot};
use crate::roster::Roster;
use crate::validation::validate_config;

use super::AvailabilityTracker;

/// Input container for one scheduling run.
#[derive(Debug, Clone)]
pub struct RotaRequest {
    /// Validated persons.
    pub roster: Roster,
    /// Slots to fill.
    pub grid: ShiftGrid,
    /// Non-workable dates.
    pub holidays: HolidayCalendar,
}

impl RotaRequest {
    /// Creates a request without holidays.
    pub fn new(roster: Roster, grid: ShiftGrid) -> Self {
        Self {
            roster,
            grid,
            holidays: HolidayCalendar::new(),
        }
    }

    /// Creates a request for a quarter with the default week alignment.
    pub fn for_quarter(roster: Roster, year: i32, quarter: u32) -> Result<Self, RotaError> {
        Ok(Self::new(roster, ShiftGrid::for_quarter(year, quarter)?))
    }

    /// Sets the holiday calendar.
    pub fn with_holidays(mut self, holidays: HolidayCalendar) -> Self {
        self.holidays = holidays;
        self
    }

    /// Takes the holidays from a provider, for every year the grid touches.
    pub fn with_holiday_provider<P: HolidayProvider + ?Sized>(mut self, provider: &P) -> Self {
        if let (Some(first), Some(last)) = (self.grid.first_date(), self.grid.last_date()) {
            self.holidays = HolidayCalendar::for_range(provider, first, last);
        }
        self
    }
}

/// Greedy rota scheduler.
///
/// # Example
///
/// ```
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
/// use u_rota::grid::ShiftGrid;
/// use u_rota::models::{HolidayCalendar, Person, Quota, Role};
/// use u_rota::roster::Roster;
/// use u_rota::scheduler::RotaScheduler;
///
/// let roster = Roster::new(vec![
///     Person::caretaker("Ann", Quota::TWO_PER_WEEK),
///     Person::generalist("Bob", Quota::TWO_PER_WEEK),
/// ])
/// .unwrap();
/// let grid = ShiftGrid::for_quarter(2023, 2).unwrap();
/// let mut rng = SmallRng::seed_from_u64(42);
///
/// let rota = RotaScheduler::new()
///     .schedule(&roster, grid, &HolidayCalendar::new(), &mut rng)
///     .unwrap();
/// assert!(!rota.assignments_for("Ann").is_empty());
/// assert!(!rota.unassigned(Role::Caretaker).is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RotaScheduler {
    config: SchedulerConfig,
    selector: CandidateSelector,
}

impl RotaScheduler {
    /// Creates a scheduler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.selector = self.selector.with_fallback(config.fallback);
        self.config = config;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Fills the grid.
    ///
    /// Fails only if the configuration does not fit the roster; nothing is
    /// scheduled in that case.
    pub fn schedule<R: Rng + ?Sized>(
        &self,
        roster: &Roster,
        grid: ShiftGrid,
        holidays: &HolidayCalendar,
        rng: &mut R,
    ) -> Result<Rota, RotaError> {
        validate_config(&self.config, roster.persons()).map_err(RotaError::InvalidConfig)?;

        let quarter = grid.quarter;
        let mut slots = grid.into_slots();
        info!(
            slots = slots.len(),
            persons = roster.len(),
            holidays = holidays.len(),
            "scheduling rota"
        );

        seed_static_exclusions(&mut slots, roster);
        let evaluator = ConstraintEvaluator::new(roster, &self.config);
        let mut tracker = AvailabilityTracker::new(roster, &self.config);
        let weeks = week_spans(&slots);

        for (w, week) in weeks.iter().enumerate() {
            if w > 0 {
                let (iso_year, iso_week) = slots[week.start].week_key();
                tracker.reset_weekly_availability(iso_week);
                tracker.advance_weekend_counters();
                debug!(iso_year, iso_week, "new week, counters reset");
            }
            let next_week = weeks.get(w + 1).cloned();

            for i in week.clone() {
                let holiday = holidays.is_holiday(slots[i].date);
                let (caretaker, generalist) = {
                    let slot = &slots[i];
                    let week_slots = &slots[week.clone()];
                    let (caretakers, generalists) = if holiday {
                        (Vec::new(), Vec::new())
                    } else {
                        (
                            evaluator.candidates(Role::Caretaker, slot, week_slots, &tracker),
                            evaluator.candidates(Role::Generalist, slot, week_slots, &tracker),
                        )
                    };
                    self.selector
                        .select_pair(slot, holiday, &caretakers, &generalists, rng)
                };

                if holiday {
                    slots[i].holiday = true;
                    debug!(date = %slots[i].date, shift = %slots[i].shift, "holiday, slot left empty");
                    continue;
                }

                self.commit(&mut slots[i], [caretaker, generalist]);
                let assigned: Vec<&Person> = [caretaker, generalist].into_iter().flatten().collect();
                if assigned.is_empty() {
                    continue;
                }

                let names: Vec<&str> = assigned.iter().map(|p| p.name.as_str()).collect();
                if slots[i].is_weekend() {
                    tracker.mark_weekend_served(names.iter().copied());
                }
                tracker.consume_availability(names.iter().copied());

                // Same day and next day
                let date = slots[i].date;
                let next_day = date.succ_opt().unwrap_or(date);
                for later in slots[i + 1..]
                    .iter_mut()
                    .take_while(|s| s.date <= next_day)
                {
                    for name in &names {
                        later.exclude(*name);
                    }
                }

                for person in &assigned {
                    if !person.quota.spans_weeks() || tracker.availability(&person.name) != 1 {
                        continue;
                    }
                    exclude_in(&mut slots[i + 1..week.end], &person.name);
                    if person.quota.blocks_following_week() {
                        if let Some(next) = &next_week {
                            exclude_in(&mut slots[next.clone()], &person.name);
                        }
                    }
                    trace!(name = %person.name, quota = %person.quota, "quota spread over following slots");
                }
            }
        }

        let rota = Rota::new(quarter, slots);
        info!(
            unassigned_caretaker = rota.unassigned(Role::Caretaker).len(),
            unassigned_generalist = rota.unassigned(Role::Generalist).len(),
            "rota complete"
        );
        Ok(rota)
    }

    /// Schedules from a request.
    pub fn schedule_request<R: Rng + ?Sized>(
        &self,
        request: &RotaRequest,
        rng: &mut R,
    ) -> Result<Rota, RotaError> {
        self.schedule(
            &request.roster,
            request.grid.clone(),
            &request.holidays,
            rng,
        )
    }

    fn commit(&self, slot: &mut ShiftSlot, picks: [Option<&Person>; 2]) {
        for (role, pick) in Role::ALL.into_iter().zip(picks) {
            match pick {
                Some(person) => {
                    trace!(date = %slot.date, shift = %slot.shift, %role, name = %person.name, "assigned");
                    slot.assign(role, Some(person.name.clone()));
                }
                None => {
                    debug!(slot = %slot.describe(&self.config), %role, "no eligible candidate");
                }
            }
        }
    }
}

/// Index ranges of consecutive slots sharing an ISO week.
fn week_spans(slots: &[ShiftSlot]) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;
    for i in 1..=slots.len() {
        if i == slots.len() || slots[i].week_key() != slots[start].week_key() {
            spans.push(start..i);
            start = i;
        }
    }
    spans
}

fn exclude_in(slots: &mut [ShiftSlot], name: &str) {
    for slot in slots {
        slot.exclude(name);
    }
}
