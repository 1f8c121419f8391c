// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::macros::format_description;
use time::{Date, Weekday};

/// Represents which roster a schedule is.
///
/// At most one schedule per kind may be active at any time. Promotion flips
/// the active Next schedule to Current after deactivating the prior Current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleKind {
    /// The roster presently in effect.
    Current,
    /// The roster being drafted for a future period.
    Next,
}

impl FromStr for ScheduleKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Current" => Ok(Self::Current),
            "Next" => Ok(Self::Next),
            _ => Err(DomainError::InvalidScheduleKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ScheduleKind {
    /// Converts this schedule kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "Current",
            Self::Next => "Next",
        }
    }
}

/// Represents the type of a club night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ClubNightType {
    /// A regular club night.
    #[default]
    Normal,
    /// The fifth occurrence of the club's weekday within its calendar month.
    FifthWeek,
}

impl FromStr for ClubNightType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Normal" => Ok(Self::Normal),
            "FifthWeek" => Ok(Self::FifthWeek),
            _ => Err(DomainError::InvalidNightType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ClubNightType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ClubNightType {
    /// Converts this club night type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::FifthWeek => "FifthWeek",
        }
    }
}

/// Represents a duty roster covering a span of club nights.
///
/// `schedule_id` is the canonical identifier assigned by the database.
/// `None` indicates the schedule has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// The canonical numeric identifier assigned by the database.
    pub schedule_id: Option<i64>,
    /// Display name (e.g., "Spring 2025").
    pub name: String,
    /// Whether this is the Current or Next roster.
    pub kind: ScheduleKind,
    /// First date covered by the roster (inclusive).
    pub start_date: Date,
    /// Last date covered by the roster (inclusive).
    pub end_date: Date,
    /// Whether this schedule is the active one of its kind.
    ///
    /// Retired schedules keep their rows with `is_active` false.
    pub is_active: bool,
}

impl Schedule {
    /// Creates a new active `Schedule` without a persisted ID.
    ///
    /// # Errors
    ///
    /// Returns an error if `start_date` is after `end_date`.
    pub fn new(
        name: String,
        kind: ScheduleKind,
        start_date: Date,
        end_date: Date,
    ) -> Result<Self, DomainError> {
        validate_date_range(start_date, end_date)?;
        Ok(Self {
            schedule_id: None,
            name,
            kind,
            start_date,
            end_date,
            is_active: true,
        })
    }

    /// Creates a `Schedule` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(
        schedule_id: i64,
        name: String,
        kind: ScheduleKind,
        start_date: Date,
        end_date: Date,
        is_active: bool,
    ) -> Self {
        Self {
            schedule_id: Some(schedule_id),
            name,
            kind,
            start_date,
            end_date,
            is_active,
        }
    }
}

/// Represents one club night within a schedule.
///
/// Up to two squareheads (volunteers) may be assigned per night. The two
/// slots are interchangeable; no invariant ties them together, and nothing
/// forbids the same volunteer holding both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// The canonical numeric identifier assigned by the database.
    pub assignment_id: Option<i64>,
    /// The schedule this assignment belongs to. Exclusive ownership: an
    /// assignment belongs to exactly one schedule.
    pub schedule_id: i64,
    /// The calendar date of the club night. Unique within the schedule.
    pub dance_date: Date,
    /// Whether this is a normal or fifth-week night.
    pub night_type: ClubNightType,
    /// First volunteer slot (external member id).
    pub squarehead1_id: Option<i64>,
    /// Second volunteer slot (external member id).
    pub squarehead2_id: Option<i64>,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl Assignment {
    /// Creates a new unassigned `Assignment` without a persisted ID.
    #[must_use]
    pub const fn new(schedule_id: i64, dance_date: Date, night_type: ClubNightType) -> Self {
        Self {
            assignment_id: None,
            schedule_id,
            dance_date,
            night_type,
            squarehead1_id: None,
            squarehead2_id: None,
            notes: None,
        }
    }
}

/// A partial update to a single assignment.
///
/// Outer `Option` distinguishes "leave unchanged" from "set"; the inner
/// `Option` on the volunteer slots and notes allows clearing a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentPatch {
    /// New value for the first volunteer slot, if supplied.
    pub squarehead1_id: Option<Option<i64>>,
    /// New value for the second volunteer slot, if supplied.
    pub squarehead2_id: Option<Option<i64>>,
    /// New club night type, if supplied.
    pub night_type: Option<ClubNightType>,
    /// New notes value, if supplied.
    pub notes: Option<Option<String>>,
}

impl AssignmentPatch {
    /// Returns whether the patch supplies no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.squarehead1_id.is_none()
            && self.squarehead2_id.is_none()
            && self.night_type.is_none()
            && self.notes.is_none()
    }

    /// Validates that the patch carries at least one field.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyUpdate` if no fields are supplied.
    pub const fn validate(&self) -> Result<(), DomainError> {
        if self.is_empty() {
            return Err(DomainError::EmptyUpdate);
        }
        Ok(())
    }
}

/// A single reminder owed to a volunteer for one club night.
///
/// Transient planner output; recomputed on every sweep, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderDue {
    /// The assignment the reminder is for.
    pub assignment_id: i64,
    /// The date of the club night.
    pub dance_date: Date,
    /// The volunteer owed the reminder.
    pub volunteer_id: i64,
    /// How many days before the night the reminder fires.
    pub day_offset: u16,
}

/// Validates that a date range is non-empty (start on or before end).
///
/// # Errors
///
/// Returns `DomainError::InvalidDateRange` if `start` is after `end`.
pub fn validate_date_range(start: Date, end: Date) -> Result<(), DomainError> {
    if start > end {
        return Err(DomainError::InvalidDateRange { start, end });
    }
    Ok(())
}

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_iso_date(s: &str) -> Result<Date, DomainError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(s, &format).map_err(|e| DomainError::DateParseError {
        date_string: s.to_string(),
        error: e.to_string(),
    })
}

/// Parses a club weekday name (case-insensitive English, e.g. "Wednesday").
///
/// # Errors
///
/// Returns `DomainError::InvalidWeekday` if the name is not recognized.
pub fn parse_club_weekday(s: &str) -> Result<Weekday, DomainError> {
    match s.to_lowercase().as_str() {
        "monday" => Ok(Weekday::Monday),
        "tuesday" => Ok(Weekday::Tuesday),
        "wednesday" => Ok(Weekday::Wednesday),
        "thursday" => Ok(Weekday::Thursday),
        "friday" => Ok(Weekday::Friday),
        "saturday" => Ok(Weekday::Saturday),
        "sunday" => Ok(Weekday::Sunday),
        _ => Err(DomainError::InvalidWeekday(s.to_string())),
    }
}
