//! Quarterly volunteer rota engine.
//!
//! Fills a quarter of four-hour care shifts with one caretaker and one
//! generalist each, honouring per-person quotas, refused days and shifts,
//! away dates, preferred shifts, rest days and a weekend duty rotation.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Person`, `Quota`, `ShiftSlot`, `Rota`,
//!   `HolidayCalendar`
//! - **`grid`**: Quarter and week alignment, the ordered `ShiftGrid`
//! - **`roster`**: Validated persons and string roster records
//! - **`dispatching`**: Per-slot eligibility and candidate selection
//! - **`scheduler`**: The greedy pass, counters and the rota report
//! - **`config`**: Scheduling parameters and display labels
//! - **`validation`**: Input integrity checks (duplicate names, quotas, date ranges)
//! - **`error`**: Error types for malformed input
//!
//! # Example
//!
//! ```
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//! use u_rota::config::SchedulerConfig;
//! use u_rota::models::DutchHolidays;
//! use u_rota::roster::{Roster, RosterRecord};
//! use u_rota::scheduler::{RotaReport, RotaRequest, RotaScheduler};
//!
//! let roster = Roster::from_records(vec![
//!     RosterRecord::new("Ann", "caretaker", "2,1"),
//!     RosterRecord::new("Bob", "generalist", "3,2").with_not_on("sun:1,2,3,4#"),
//! ])
//! .unwrap();
//! let request = RotaRequest::for_quarter(roster, 2023, 2)
//!     .unwrap()
//!     .with_holiday_provider(&DutchHolidays);
//!
//! let config = SchedulerConfig::default();
//! let scheduler = RotaScheduler::new().with_config(config.clone());
//! let rota = scheduler
//!     .schedule_request(&request, &mut SmallRng::seed_from_u64(7))
//!     .unwrap();
//!
//! let report = RotaReport::calculate(&rota, &request.roster, &config);
//! assert!(report.never_assigned.is_empty());
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"

pub mod config;
pub mod dispatching;
pub mod error;
pub mod grid;
pub mod models;
pub mod roster;
pub mod scheduler;
pub mod validation;
