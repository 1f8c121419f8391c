// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operation handlers.
//!
//! Every mutating handler enforces authorization before touching
//! persistence, translates API requests into domain types, and
//! translates domain and persistence errors into API errors so internal
//! details never leak to callers.

use std::str::FromStr;

use time::Date;
use tracing::info;

use squarehead_domain::{
    AssignmentPatch, ClubNightType, Schedule, ScheduleKind, generate_dance_dates, parse_iso_date,
    validate_date_range,
};
use squarehead_persistence::{ClearOutcome, Persistence};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::capabilities::{Clock, ClubSettings, MemberDirectory, ReminderMailer};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::reminders::{dispatch_reminders, plan_reminders};
use crate::request_response::{
    AddDatesRequest, AddDatesResponse, AssignmentResponse, ClearScheduleResponse,
    CreateNextScheduleRequest, DeleteAssignmentResponse, ReminderReport, ScheduleResponse,
    UpdateAssignmentRequest, VolunteerSlot,
};

fn missing_row_id() -> ApiError {
    ApiError::Internal {
        message: String::from("Persisted row is missing its id"),
    }
}

fn resolve_slot(volunteer_id: Option<i64>, directory: &dyn MemberDirectory) -> Option<VolunteerSlot> {
    volunteer_id.map(|id| VolunteerSlot {
        volunteer_id: id,
        name: directory.resolve_volunteer(id).map(|contact| contact.name),
    })
}

fn assignment_response(
    assignment: &squarehead_domain::Assignment,
    directory: &dyn MemberDirectory,
) -> Result<AssignmentResponse, ApiError> {
    let assignment_id: i64 = assignment.assignment_id.ok_or_else(missing_row_id)?;
    Ok(AssignmentResponse {
        assignment_id,
        dance_date: assignment.dance_date.to_string(),
        night_type: assignment.night_type.as_str().to_string(),
        squarehead1: resolve_slot(assignment.squarehead1_id, directory),
        squarehead2: resolve_slot(assignment.squarehead2_id, directory),
        notes: assignment.notes.clone(),
    })
}

fn schedule_response(
    persistence: &mut Persistence,
    schedule: &Schedule,
    directory: &dyn MemberDirectory,
) -> Result<ScheduleResponse, ApiError> {
    let schedule_id: i64 = schedule.schedule_id.ok_or_else(missing_row_id)?;
    let assignments = persistence
        .list_assignments(schedule_id)
        .map_err(translate_persistence_error)?;

    Ok(ScheduleResponse {
        schedule_id,
        name: schedule.name.clone(),
        kind: schedule.kind.as_str().to_string(),
        start_date: schedule.start_date.to_string(),
        end_date: schedule.end_date.to_string(),
        assignments: assignments
            .iter()
            .map(|assignment| assignment_response(assignment, directory))
            .collect::<Result<Vec<AssignmentResponse>, ApiError>>()?,
    })
}

/// Retrieves the active schedule of the given kind with its assignments.
///
/// Read-only; requires no authorization. Returns `Ok(None)` when no
/// active schedule of that kind exists.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn get_schedule(
    persistence: &mut Persistence,
    kind: ScheduleKind,
    directory: &dyn MemberDirectory,
) -> Result<Option<ScheduleResponse>, ApiError> {
    let Some(schedule) = persistence
        .get_active_schedule(kind)
        .map_err(translate_persistence_error)?
    else {
        return Ok(None);
    };
    Ok(Some(schedule_response(persistence, &schedule, directory)?))
}

/// Creates the next schedule with one empty assignment per club night.
///
/// Any previously active next schedule is retired (kept for history).
/// The club's dance weekday determines which dates in the range become
/// club nights, and dates falling past day 28 of a month are marked as
/// fifth-week nights.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized (not an Admin)
/// - A date fails to parse or the start date is after the end date
/// - Persistence fails
pub fn create_next_schedule(
    persistence: &mut Persistence,
    request: CreateNextScheduleRequest,
    actor: &AuthenticatedActor,
    settings: &dyn ClubSettings,
    directory: &dyn MemberDirectory,
) -> Result<ScheduleResponse, ApiError> {
    AuthorizationService::require_admin(actor, "create_next_schedule")?;

    let start: Date = parse_iso_date(&request.start_date).map_err(translate_domain_error)?;
    let end: Date = parse_iso_date(&request.end_date).map_err(translate_domain_error)?;

    let schedule: Schedule = Schedule::new(request.name, ScheduleKind::Next, start, end)
        .map_err(translate_domain_error)?;
    let entries = generate_dance_dates(start, end, settings.club_weekday())
        .map_err(translate_domain_error)?;

    let (persisted, created) = persistence
        .create_schedule_with_assignments(schedule, &entries)
        .map_err(translate_persistence_error)?;

    info!(
        actor = %actor.id,
        schedule_id = persisted.schedule_id,
        nights = created.len(),
        "Created next schedule"
    );
    schedule_response(persistence, &persisted, directory)
}

/// Adds club nights in a new date range to the active next schedule.
///
/// Dates already present are skipped, and the schedule's stored range is
/// widened to cover the union of the old and new bounds. The response
/// carries the assignments this call created separately from the full
/// list, so callers can see exactly what was added.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized (not an Admin)
/// - A date fails to parse or the start date is after the end date
/// - No active next schedule exists
/// - Persistence fails
pub fn add_dates_to_next_schedule(
    persistence: &mut Persistence,
    request: AddDatesRequest,
    actor: &AuthenticatedActor,
    settings: &dyn ClubSettings,
    directory: &dyn MemberDirectory,
) -> Result<AddDatesResponse, ApiError> {
    AuthorizationService::require_admin(actor, "add_dates_to_next_schedule")?;

    let start: Date = parse_iso_date(&request.start_date).map_err(translate_domain_error)?;
    let end: Date = parse_iso_date(&request.end_date).map_err(translate_domain_error)?;
    validate_date_range(start, end).map_err(translate_domain_error)?;

    let Some(next) = persistence
        .get_active_schedule(ScheduleKind::Next)
        .map_err(translate_persistence_error)?
    else {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Schedule"),
            message: String::from("No active next schedule exists"),
        });
    };
    let schedule_id: i64 = next.schedule_id.ok_or_else(missing_row_id)?;

    let entries = generate_dance_dates(start, end, settings.club_weekday())
        .map_err(translate_domain_error)?;
    let (widened, created) = persistence
        .add_dates_to_schedule(schedule_id, start, end, &entries)
        .map_err(translate_persistence_error)?;

    info!(
        actor = %actor.id,
        schedule_id,
        nights_added = created.len(),
        "Added dates to next schedule"
    );
    let new_assignments: Vec<AssignmentResponse> = created
        .iter()
        .map(|assignment| assignment_response(assignment, directory))
        .collect::<Result<Vec<AssignmentResponse>, ApiError>>()?;
    Ok(AddDatesResponse {
        schedule: schedule_response(persistence, &widened, directory)?,
        new_assignments,
    })
}

/// Partially updates an assignment.
///
/// Only supplied fields change. Volunteer slots and notes distinguish
/// "absent" (keep) from "null" (clear).
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized (not an Admin)
/// - No field is supplied, or the night type does not parse
/// - The assignment does not exist
/// - Persistence fails
pub fn update_assignment(
    persistence: &mut Persistence,
    assignment_id: i64,
    request: UpdateAssignmentRequest,
    actor: &AuthenticatedActor,
    directory: &dyn MemberDirectory,
) -> Result<AssignmentResponse, ApiError> {
    AuthorizationService::require_admin(actor, "update_assignment")?;

    let night_type: Option<ClubNightType> = match request.night_type {
        Some(value) => Some(ClubNightType::from_str(&value).map_err(translate_domain_error)?),
        None => None,
    };
    let patch = AssignmentPatch {
        squarehead1_id: request.squarehead1_id,
        squarehead2_id: request.squarehead2_id,
        night_type,
        notes: request.notes,
    };
    patch.validate().map_err(translate_domain_error)?;

    let Some(updated) = persistence
        .update_assignment(assignment_id, &patch)
        .map_err(translate_persistence_error)?
    else {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Assignment"),
            message: format!("Assignment {assignment_id} does not exist"),
        });
    };

    info!(actor = %actor.id, assignment_id, "Updated assignment");
    assignment_response(&updated, directory)
}

/// Deletes a single assignment.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized (not an Admin)
/// - The assignment does not exist
/// - Persistence fails
pub fn delete_assignment(
    persistence: &mut Persistence,
    assignment_id: i64,
    actor: &AuthenticatedActor,
) -> Result<DeleteAssignmentResponse, ApiError> {
    AuthorizationService::require_admin(actor, "delete_assignment")?;

    let Some((deleted_id, dance_date)) = persistence
        .delete_assignment(assignment_id)
        .map_err(translate_persistence_error)?
    else {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Assignment"),
            message: format!("Assignment {assignment_id} does not exist"),
        });
    };

    info!(actor = %actor.id, assignment_id, "Deleted assignment");
    Ok(DeleteAssignmentResponse {
        assignment_id: deleted_id,
        dance_date: dance_date.to_string(),
        message: format!("Deleted assignment for {dance_date}"),
    })
}

/// Promotes the active next schedule to current.
///
/// The previously active current schedule (if any) is retired but kept.
/// The whole transition commits atomically; a reader never observes a
/// partial promotion.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized (not an Admin)
/// - No active next schedule exists
/// - Persistence fails
pub fn promote_next_to_current(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    directory: &dyn MemberDirectory,
) -> Result<ScheduleResponse, ApiError> {
    AuthorizationService::require_admin(actor, "promote_next_to_current")?;

    let Some(promoted) = persistence
        .promote_next_to_current()
        .map_err(translate_persistence_error)?
    else {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Schedule"),
            message: String::from("No active next schedule exists to promote"),
        });
    };

    info!(actor = %actor.id, schedule_id = promoted.schedule_id, "Promoted next schedule to current");
    schedule_response(persistence, &promoted, directory)
}

/// Clears the active schedule of the given kind.
///
/// Deletes the schedule row and all of its assignments. Clearing when no
/// active schedule of the kind exists is a reported no-op, not an error.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized (not an Admin)
/// - Persistence fails
pub fn clear_schedule(
    persistence: &mut Persistence,
    kind: ScheduleKind,
    actor: &AuthenticatedActor,
) -> Result<ClearScheduleResponse, ApiError> {
    AuthorizationService::require_admin(actor, "clear_schedule")?;

    let outcome: ClearOutcome = persistence
        .clear_active_schedule(kind)
        .map_err(translate_persistence_error)?;

    let message: String = if outcome.schedule_deleted {
        format!(
            "Cleared the {kind} schedule and {} assignments",
            outcome.assignments_deleted
        )
    } else {
        format!("No active {kind} schedule to clear")
    };

    Ok(ClearScheduleResponse {
        schedule_deleted: outcome.schedule_deleted,
        assignments_deleted: outcome.assignments_deleted,
        message,
    })
}

/// Runs a reminder sweep against the active current schedule.
///
/// Computes which reminders are due on the clock's date given the club's
/// configured lead times, then delivers them. A missing current schedule
/// yields an empty report. Delivery failures are isolated per recipient
/// and reported; they never abort the sweep.
///
/// The sweep is driven by a periodic job, so it requires no role: any
/// authenticated actor may trigger it. It persists nothing and sends
/// only to volunteers already on the roster.
///
/// # Errors
///
/// Returns an error if:
/// - The clock or reminder configuration is invalid
/// - Persistence fails
pub fn run_reminder_sweep(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    settings: &dyn ClubSettings,
    clock: &dyn Clock,
    directory: &dyn MemberDirectory,
    mailer: &mut dyn ReminderMailer,
) -> Result<ReminderReport, ApiError> {
    let today: Date = clock.today().map_err(translate_domain_error)?;

    let Some(current) = persistence
        .get_active_schedule(ScheduleKind::Current)
        .map_err(translate_persistence_error)?
    else {
        return Ok(ReminderReport {
            due_count: 0,
            sent_count: 0,
            errors: Vec::new(),
        });
    };
    let schedule_id: i64 = current.schedule_id.ok_or_else(missing_row_id)?;

    let assignments = persistence
        .list_assignments(schedule_id)
        .map_err(translate_persistence_error)?;
    let due = plan_reminders(today, &settings.reminder_offsets(), &assignments)
        .map_err(translate_domain_error)?;

    let report: ReminderReport = dispatch_reminders(&due, directory, mailer);
    info!(
        actor = %actor.id,
        due = report.due_count,
        sent = report.sent_count,
        "Ran reminder sweep"
    );
    Ok(report)
}
