// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::Date;
use tracing::{debug, info};

use squarehead_domain::{Assignment, AssignmentPatch, ClubNightType, DateEntry};

use crate::diesel_schema::assignments;
use crate::error::PersistenceError;
use crate::queries::assignments::get_assignment;
use crate::sqlite::last_insert_rowid;

/// Bulk-inserts one assignment per date entry, volunteer slots empty.
///
/// `night_type` is set from the entry's fifth-week flag. Returns the
/// created assignments in the order of the entries (date order, as the
/// sequencer emits them).
///
/// # Errors
///
/// Returns an error if any insert fails (e.g., a duplicate date within
/// the schedule).
pub fn insert_assignments(
    conn: &mut SqliteConnection,
    schedule_id: i64,
    entries: &[DateEntry],
) -> Result<Vec<Assignment>, PersistenceError> {
    let mut created: Vec<Assignment> = Vec::with_capacity(entries.len());

    for entry in entries {
        let night_type: ClubNightType = if entry.is_fifth_week {
            ClubNightType::FifthWeek
        } else {
            ClubNightType::Normal
        };

        diesel::insert_into(assignments::table)
            .values((
                assignments::schedule_id.eq(schedule_id),
                assignments::dance_date.eq(entry.date.to_string()),
                assignments::night_type.eq(night_type.as_str()),
            ))
            .execute(conn)?;

        let assignment_id: i64 = last_insert_rowid(conn)?;
        let mut assignment = Assignment::new(schedule_id, entry.date, night_type);
        assignment.assignment_id = Some(assignment_id);
        created.push(assignment);
    }

    info!(
        schedule_id,
        count = created.len(),
        "Inserted assignments for schedule"
    );
    Ok(created)
}

/// Applies a partial update to an assignment.
///
/// Only the fields supplied in the patch change; the row is read first so
/// unsupplied fields keep their stored values. Returns `Ok(None)` if the
/// assignment does not exist.
///
/// # Errors
///
/// Returns an error if the read or update fails.
pub fn update_assignment(
    conn: &mut SqliteConnection,
    assignment_id: i64,
    patch: &AssignmentPatch,
) -> Result<Option<Assignment>, PersistenceError> {
    let Some(current) = get_assignment(conn, assignment_id)? else {
        return Ok(None);
    };

    let squarehead1_id: Option<i64> = patch.squarehead1_id.unwrap_or(current.squarehead1_id);
    let squarehead2_id: Option<i64> = patch.squarehead2_id.unwrap_or(current.squarehead2_id);
    let night_type: ClubNightType = patch.night_type.unwrap_or(current.night_type);
    let notes: Option<String> = patch.notes.clone().unwrap_or(current.notes);

    diesel::update(assignments::table)
        .filter(assignments::assignment_id.eq(assignment_id))
        .set((
            assignments::squarehead1_id.eq(squarehead1_id),
            assignments::squarehead2_id.eq(squarehead2_id),
            assignments::night_type.eq(night_type.as_str()),
            assignments::notes.eq(&notes),
        ))
        .execute(conn)?;

    debug!(assignment_id, "Updated assignment");

    Ok(Some(Assignment {
        squarehead1_id,
        squarehead2_id,
        night_type,
        notes,
        ..current
    }))
}

/// Deletes a single assignment.
///
/// Returns the deleted row's identifying data `(assignment_id, dance_date)`
/// for caller confirmation messaging, or `Ok(None)` if the id does not
/// exist.
///
/// # Errors
///
/// Returns an error if the read or delete fails.
pub fn delete_assignment(
    conn: &mut SqliteConnection,
    assignment_id: i64,
) -> Result<Option<(i64, Date)>, PersistenceError> {
    let Some(current) = get_assignment(conn, assignment_id)? else {
        return Ok(None);
    };

    diesel::delete(assignments::table)
        .filter(assignments::assignment_id.eq(assignment_id))
        .execute(conn)?;

    info!(assignment_id, dance_date = %current.dance_date, "Deleted assignment");
    Ok(Some((assignment_id, current.dance_date)))
}

/// Deletes all assignments owned by a schedule.
///
/// Returns the number of rows deleted.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_assignments_for_schedule(
    conn: &mut SqliteConnection,
    schedule_id: i64,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::delete(assignments::table)
        .filter(assignments::schedule_id.eq(schedule_id))
        .execute(conn)?;

    info!(schedule_id, rows_affected, "Deleted schedule assignments");
    Ok(rows_affected)
}
