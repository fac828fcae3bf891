//! Rota domain models.
//!
//! Provides the data types shared by the grid builder, the roster and the
//! allocation pass.
//!
//! # Domain Mappings
//!
//! | u-rota | Hospice | Clinic | Volunteer centre |
//! |--------|---------|--------|------------------|
//! | Person | Volunteer | Nurse | Helper |
//! | Role | Caretaker / Generalist | Registered / Assistant | Lead / Helper |
//! | ShiftSlot | Four-hour shift | Ward shift | Desk shift |
//! | Rota | Quarter planning | Duty roster | Schedule |

mod calendar;
mod day;
mod person;
mod quota;
mod rota;
mod slot;

pub use calendar::{easter_sunday, DutchHolidays, HolidayCalendar, HolidayProvider};
pub use day::{DayShifts, ShiftIndex, Weekday};
pub use person::{DateRange, Person, Role};
pub use quota::Quota;
pub use rota::Rota;
pub use slot::ShiftSlot;
