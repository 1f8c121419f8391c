// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response DTOs for the API layer.
//!
//! These are distinct from domain types and represent the API contract.
//! Dates cross the boundary as ISO 8601 strings.

use serde::{Deserialize, Serialize};

/// A volunteer slot on an assignment, with the name resolved from the
/// membership directory where possible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerSlot {
    /// The membership id of the volunteer.
    pub volunteer_id: i64,
    /// The volunteer's display name, or `None` if the id is unknown to
    /// the membership system.
    pub name: Option<String>,
}

/// A single club-night assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentResponse {
    /// The assignment id.
    pub assignment_id: i64,
    /// The dance date (ISO 8601).
    pub dance_date: String,
    /// The night type ("Normal" or "FifthWeek").
    pub night_type: String,
    /// The first volunteer slot, if filled.
    pub squarehead1: Option<VolunteerSlot>,
    /// The second volunteer slot, if filled.
    pub squarehead2: Option<VolunteerSlot>,
    /// Free-form notes for the night.
    pub notes: Option<String>,
}

/// A schedule with its assignments in date order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    /// The schedule id.
    pub schedule_id: i64,
    /// The human-readable schedule name.
    pub name: String,
    /// The schedule kind ("Current" or "Next").
    pub kind: String,
    /// The first covered date (ISO 8601).
    pub start_date: String,
    /// The last covered date (ISO 8601).
    pub end_date: String,
    /// The schedule's assignments, ordered by dance date ascending.
    pub assignments: Vec<AssignmentResponse>,
}

/// API request to create (or replace) the next schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNextScheduleRequest {
    /// The human-readable schedule name.
    pub name: String,
    /// The first date to cover (ISO 8601).
    pub start_date: String,
    /// The last date to cover (ISO 8601, inclusive).
    pub end_date: String,
}

/// API request to add dates to the next schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddDatesRequest {
    /// The first date of the added range (ISO 8601).
    pub start_date: String,
    /// The last date of the added range (ISO 8601, inclusive).
    pub end_date: String,
}

/// API response for extending the next schedule with new dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddDatesResponse {
    /// The widened schedule with all of its assignments.
    pub schedule: ScheduleResponse,
    /// Only the assignments this operation created, in date order.
    /// Dates already present in the schedule are skipped and do not
    /// appear here.
    pub new_assignments: Vec<AssignmentResponse>,
}

/// API request to partially update an assignment.
///
/// Each field distinguishes "not supplied" (absent, keep the stored
/// value) from "supplied as null" (clear the value). At least one field
/// must be supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAssignmentRequest {
    /// The first volunteer slot: absent keeps, null clears, a value sets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squarehead1_id: Option<Option<i64>>,
    /// The second volunteer slot: absent keeps, null clears, a value sets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squarehead2_id: Option<Option<i64>>,
    /// The night type override ("Normal" or "FifthWeek").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night_type: Option<String>,
    /// Notes: absent keeps, null clears, a value sets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}

/// API response for a successful assignment deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAssignmentResponse {
    /// The deleted assignment's id.
    pub assignment_id: i64,
    /// The deleted assignment's dance date (ISO 8601).
    pub dance_date: String,
    /// A success message.
    pub message: String,
}

/// API response for clearing a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearScheduleResponse {
    /// Whether a schedule row was deleted.
    pub schedule_deleted: bool,
    /// How many assignments were deleted with it.
    pub assignments_deleted: usize,
    /// A summary message.
    pub message: String,
}

/// API response for a reminder sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderReport {
    /// How many reminders were due in this sweep.
    pub due_count: usize,
    /// How many reminders were delivered.
    pub sent_count: usize,
    /// Per-recipient failure descriptions. A failed recipient never
    /// aborts the rest of the sweep.
    pub errors: Vec<String>,
}
