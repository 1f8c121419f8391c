// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod assignment_tests;
mod promotion_tests;

use squarehead_domain::{DateEntry, Schedule, ScheduleKind, generate_dance_dates};
use time::{Date, Month, Weekday};

use crate::Persistence;

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("valid test date")
}

pub fn january_2025_wednesdays() -> Vec<DateEntry> {
    generate_dance_dates(
        date(2025, Month::January, 1),
        date(2025, Month::January, 31),
        Weekday::Wednesday,
    )
    .expect("generation succeeds")
}

pub fn new_schedule(name: &str, kind: ScheduleKind, start: Date, end: Date) -> Schedule {
    Schedule::new(String::from(name), kind, start, end).expect("valid schedule")
}

/// Creates an in-memory persistence adapter seeded with an active Next
/// schedule covering January 2025 Wednesdays.
pub fn persistence_with_next() -> (Persistence, Schedule) {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");
    let schedule = new_schedule(
        "January 2025",
        ScheduleKind::Next,
        date(2025, Month::January, 1),
        date(2025, Month::January, 31),
    );
    let (persisted, _) = persistence
        .create_schedule_with_assignments(schedule, &january_2025_wednesdays())
        .expect("schedule creation succeeds");
    (persistence, persisted)
}
