//! `campus-schedule` — per-agent daily activity schedules.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`activity`]  | `Activity`, `Schedule`, `Destination`, `parse_clock`      |
//! | [`generate`]  | `ScheduleTemplate`, `TemplateSlot` — seeded random plans  |
//! | [`loader`]    | `load_schedules_csv`, `load_schedules_reader`             |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Day model
//!
//! A schedule is a finite list of activities, each with an absolute
//! second-of-day start and a dwell duration.  Activities must not overlap:
//! every start lies strictly after the previous activity's start plus its
//! dwell.  Schedules are validated once at construction and never change.

pub mod activity;
pub mod error;
pub mod generate;
pub mod loader;

#[cfg(test)]
mod tests;

pub use activity::{Activity, Destination, Schedule, parse_clock};
pub use error::{ScheduleError, ScheduleResult};
pub use generate::{ScheduleTemplate, TemplateSlot};
pub use loader::{load_schedules_csv, load_schedules_reader};
