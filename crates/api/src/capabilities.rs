// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability traits for the API layer's external dependencies.
//!
//! The roster does not own membership data, email delivery, or club
//! configuration. Handlers receive those through the traits defined here
//! so deployments can plug in their own providers and tests can use
//! in-memory stubs.

use chrono::Datelike;
use chrono_tz::Tz;
use time::{Date, Month, Weekday};

use squarehead_domain::DomainError;

/// Contact information for a club member, as resolved from the
/// membership system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolunteerContact {
    /// The member's display name.
    pub name: String,
    /// The member's email address.
    pub email: String,
}

/// Read-only lookup into the club's membership records.
pub trait MemberDirectory {
    /// Resolves a volunteer id to contact information, or `None` if the
    /// id is unknown to the membership system.
    fn resolve_volunteer(&self, volunteer_id: i64) -> Option<VolunteerContact>;
}

/// Outbound reminder delivery.
pub trait ReminderMailer {
    /// Sends a duty reminder to a single recipient.
    ///
    /// `dance_date` is the ISO 8601 date label of the club night the
    /// recipient is assigned to.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message if delivery fails. Failures are
    /// reported per recipient and never abort a sweep.
    fn send_reminder(&mut self, email: &str, name: &str, dance_date: &str) -> Result<(), String>;
}

/// Club-level roster configuration.
pub trait ClubSettings {
    /// The weekday the club dances on.
    fn club_weekday(&self) -> Weekday;

    /// Lead times, in days before a dance, at which reminders go out.
    fn reminder_offsets(&self) -> Vec<u16>;
}

/// Source of "today" for the reminder planner.
///
/// Abstracted so tests and backfill runs can pin the date.
pub trait Clock {
    /// The current date.
    ///
    /// # Errors
    ///
    /// Returns an error if the date cannot be determined.
    fn today(&self) -> Result<Date, DomainError>;
}

/// A [`Clock`] that reports the current date in the club's timezone.
///
/// Reminder lead times are measured against the club's wall-clock date,
/// not UTC, so a sweep run late at night does not shift by a day.
#[derive(Debug, Clone, Copy)]
pub struct TimezoneClock {
    tz: Tz,
}

impl TimezoneClock {
    /// Creates a clock for the named IANA timezone.
    ///
    /// # Errors
    ///
    /// Returns an error if the timezone name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, DomainError> {
        let tz: Tz = name
            .parse()
            .map_err(|_| DomainError::InvalidTimezone(name.to_string()))?;
        Ok(Self { tz })
    }
}

impl Clock for TimezoneClock {
    fn today(&self) -> Result<Date, DomainError> {
        let civil = chrono::Utc::now().with_timezone(&self.tz).date_naive();
        civil_to_date(civil)
    }
}

/// Converts a `chrono::NaiveDate` to a `time::Date`.
fn civil_to_date(civil: chrono::NaiveDate) -> Result<Date, DomainError> {
    let parse_failure = |error: String| DomainError::DateParseError {
        date_string: civil.to_string(),
        error,
    };

    let month_number: u8 = u8::try_from(civil.month()).map_err(|e| parse_failure(e.to_string()))?;
    let month: Month = Month::try_from(month_number).map_err(|e| parse_failure(e.to_string()))?;
    let day: u8 = u8::try_from(civil.day()).map_err(|e| parse_failure(e.to_string()))?;

    Date::from_calendar_date(civil.year(), month, day).map_err(|e| parse_failure(e.to_string()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_civil_to_date_converts_calendar_fields() {
        let civil = chrono::NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();
        let converted = civil_to_date(civil).unwrap();
        assert_eq!(
            converted,
            Date::from_calendar_date(2025, Month::January, 8).unwrap()
        );
    }

    #[test]
    fn test_timezone_clock_rejects_unknown_timezone() {
        let result = TimezoneClock::from_name("Mars/Olympus_Mons");
        assert!(matches!(result, Err(DomainError::InvalidTimezone(_))));
    }

    #[test]
    fn test_timezone_clock_accepts_iana_name() {
        let clock = TimezoneClock::from_name("America/Chicago").unwrap();
        assert!(clock.today().is_ok());
    }
}
