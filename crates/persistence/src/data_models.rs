// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs bridging the database schema and the domain types.
//!
//! Dates are stored as ISO 8601 `TEXT` (`YYYY-MM-DD`), so lexicographic
//! ordering in SQL matches calendar ordering. Decoding a row can fail if
//! stored text does not parse; that surfaces as a `CorruptRecord` error
//! rather than a panic.

use diesel::prelude::*;
use std::str::FromStr;
use squarehead_domain::{Assignment, ClubNightType, Schedule, ScheduleKind, parse_iso_date};

use crate::error::PersistenceError;

/// A row from the `schedules` table.
#[derive(Debug, Clone, Queryable)]
pub struct ScheduleRow {
    pub schedule_id: i64,
    pub name: String,
    pub kind: String,
    pub start_date: String,
    pub end_date: String,
    pub is_active: i32,
}

impl ScheduleRow {
    /// Decodes this row into its domain representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored kind or dates do not parse.
    pub fn into_domain(self) -> Result<Schedule, PersistenceError> {
        let kind: ScheduleKind = ScheduleKind::from_str(&self.kind)?;
        let start_date = parse_iso_date(&self.start_date)?;
        let end_date = parse_iso_date(&self.end_date)?;
        Ok(Schedule::with_id(
            self.schedule_id,
            self.name,
            kind,
            start_date,
            end_date,
            self.is_active != 0,
        ))
    }
}

/// A row from the `assignments` table.
#[derive(Debug, Clone, Queryable)]
pub struct AssignmentRow {
    pub assignment_id: i64,
    pub schedule_id: i64,
    pub dance_date: String,
    pub night_type: String,
    pub squarehead1_id: Option<i64>,
    pub squarehead2_id: Option<i64>,
    pub notes: Option<String>,
}

impl AssignmentRow {
    /// Decodes this row into its domain representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored night type or date does not parse.
    pub fn into_domain(self) -> Result<Assignment, PersistenceError> {
        let night_type: ClubNightType = ClubNightType::from_str(&self.night_type)?;
        let dance_date = parse_iso_date(&self.dance_date)?;
        Ok(Assignment {
            assignment_id: Some(self.assignment_id),
            schedule_id: self.schedule_id,
            dance_date,
            night_type,
            squarehead1_id: self.squarehead1_id,
            squarehead2_id: self.squarehead2_id,
            notes: self.notes,
        })
    }
}

/// Outcome of clearing an active schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearOutcome {
    /// Whether a schedule row was deleted.
    pub schedule_deleted: bool,
    /// How many assignment rows were deleted.
    pub assignments_deleted: usize,
}

impl ClearOutcome {
    /// The outcome of clearing when no active schedule of the kind exists.
    pub const NOTHING: Self = Self {
        schedule_deleted: false,
        assignments_deleted: 0,
    };
}
