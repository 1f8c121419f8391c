// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod dance_dates;
mod error;
mod types;

#[cfg(test)]
mod tests;

pub use dance_dates::{DateEntry, generate_dance_dates, is_fifth_week};
pub use error::DomainError;
pub use types::{
    Assignment, AssignmentPatch, ClubNightType, ReminderDue, Schedule, ScheduleKind,
    parse_club_weekday, parse_iso_date, validate_date_range,
};
