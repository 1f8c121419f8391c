// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod lifecycle_tests;

use std::collections::HashMap;

use time::{Date, Month, Weekday};

use squarehead_domain::DomainError;
use squarehead_persistence::Persistence;

use crate::auth::{AuthenticatedActor, Role};
use crate::capabilities::{Clock, ClubSettings, MemberDirectory, ReminderMailer, VolunteerContact};
use crate::handlers::create_next_schedule;
use crate::request_response::{CreateNextScheduleRequest, ScheduleResponse};

/// Membership directory backed by a fixed map.
pub struct StubDirectory {
    contacts: HashMap<i64, VolunteerContact>,
}

impl StubDirectory {
    pub fn empty() -> Self {
        Self {
            contacts: HashMap::new(),
        }
    }

    pub fn with_member(mut self, volunteer_id: i64, name: &str, email: &str) -> Self {
        self.contacts.insert(
            volunteer_id,
            VolunteerContact {
                name: String::from(name),
                email: String::from(email),
            },
        );
        self
    }
}

impl MemberDirectory for StubDirectory {
    fn resolve_volunteer(&self, volunteer_id: i64) -> Option<VolunteerContact> {
        self.contacts.get(&volunteer_id).cloned()
    }
}

/// Mailer that records deliveries and can be told to fail for specific
/// addresses.
#[derive(Default)]
pub struct CollectingMailer {
    pub sent: Vec<(String, String, String)>,
    pub failing_addresses: Vec<String>,
}

impl ReminderMailer for CollectingMailer {
    fn send_reminder(&mut self, email: &str, name: &str, dance_date: &str) -> Result<(), String> {
        if self.failing_addresses.iter().any(|a| a == email) {
            return Err(String::from("mailbox unavailable"));
        }
        self.sent.push((
            String::from(email),
            String::from(name),
            String::from(dance_date),
        ));
        Ok(())
    }
}

/// Club configuration with a fixed weekday and reminder lead times.
pub struct TestSettings {
    pub weekday: Weekday,
    pub offsets: Vec<u16>,
}

impl Default for TestSettings {
    fn default() -> Self {
        Self {
            weekday: Weekday::Wednesday,
            offsets: vec![7, 1],
        }
    }
}

impl ClubSettings for TestSettings {
    fn club_weekday(&self) -> Weekday {
        self.weekday
    }

    fn reminder_offsets(&self) -> Vec<u16> {
        self.offsets.clone()
    }
}

/// Clock pinned to a single date.
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Result<Date, DomainError> {
        Ok(self.0)
    }
}

pub fn admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-1"), Role::Admin)
}

pub fn member() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("member-1"), Role::Member)
}

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("valid test date")
}

/// Creates a persistence adapter holding an active Next schedule for
/// January 2025 (Wednesdays) via the API handler.
pub fn persistence_with_next() -> (Persistence, ScheduleResponse) {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");
    let response = create_next_schedule(
        &mut persistence,
        CreateNextScheduleRequest {
            name: String::from("January 2025"),
            start_date: String::from("2025-01-01"),
            end_date: String::from("2025-01-31"),
        },
        &admin(),
        &TestSettings::default(),
        &StubDirectory::empty(),
    )
    .expect("schedule creation succeeds");
    (persistence, response)
}
