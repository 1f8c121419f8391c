// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use squarehead_domain::{Schedule, ScheduleKind};

use crate::diesel_schema::schedules;
use crate::error::PersistenceError;
use crate::queries::schedules::get_schedule;
use crate::sqlite::last_insert_rowid;

/// Inserts a new schedule row.
///
/// The caller (inside the same transaction) is responsible for first
/// deactivating any prior active schedule of the same kind, so the
/// single-active-per-kind invariant holds when the transaction commits.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_schedule(
    conn: &mut SqliteConnection,
    schedule: &Schedule,
) -> Result<i64, PersistenceError> {
    info!(
        name = %schedule.name,
        kind = %schedule.kind,
        start_date = %schedule.start_date,
        end_date = %schedule.end_date,
        "Creating schedule"
    );

    diesel::insert_into(schedules::table)
        .values((
            schedules::name.eq(&schedule.name),
            schedules::kind.eq(schedule.kind.as_str()),
            schedules::start_date.eq(schedule.start_date.to_string()),
            schedules::end_date.eq(schedule.end_date.to_string()),
            schedules::is_active.eq(i32::from(schedule.is_active)),
        ))
        .execute(conn)?;

    let schedule_id: i64 = last_insert_rowid(conn)?;

    info!(schedule_id, "Schedule created");
    Ok(schedule_id)
}

/// Deactivates every active schedule of the given kind.
///
/// Rows are kept (soft delete); their assignments remain queryable by id.
/// Returns the number of rows deactivated.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn deactivate_active_schedules(
    conn: &mut SqliteConnection,
    kind: ScheduleKind,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::update(schedules::table)
        .filter(schedules::kind.eq(kind.as_str()))
        .filter(schedules::is_active.eq(1))
        .set(schedules::is_active.eq(0))
        .execute(conn)?;

    if rows_affected > 0 {
        info!(kind = %kind, rows_affected, "Deactivated active schedule(s)");
    }
    Ok(rows_affected)
}

/// Changes the kind of a schedule (the promotion flip, Next to Current).
///
/// # Errors
///
/// Returns a not-found error if the schedule does not exist.
pub fn set_schedule_kind(
    conn: &mut SqliteConnection,
    schedule_id: i64,
    kind: ScheduleKind,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(schedules::table)
        .filter(schedules::schedule_id.eq(schedule_id))
        .set(schedules::kind.eq(kind.as_str()))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::ScheduleNotFound(format!(
            "Schedule with ID {schedule_id} not found"
        )));
    }

    info!(schedule_id, kind = %kind, "Changed schedule kind");
    Ok(())
}

/// Widens a schedule's stored range to the union of its current bounds
/// and the supplied bounds.
///
/// `start_date` becomes the earlier of the two starts, `end_date` the
/// later of the two ends. Returns the updated schedule.
///
/// # Errors
///
/// Returns a not-found error if the schedule does not exist.
pub fn widen_schedule_range(
    conn: &mut SqliteConnection,
    schedule_id: i64,
    new_start: time::Date,
    new_end: time::Date,
) -> Result<Schedule, PersistenceError> {
    let current: Schedule = get_schedule(conn, schedule_id)?.ok_or_else(|| {
        PersistenceError::ScheduleNotFound(format!("Schedule with ID {schedule_id} not found"))
    })?;

    let widened_start: time::Date = current.start_date.min(new_start);
    let widened_end: time::Date = current.end_date.max(new_end);

    diesel::update(schedules::table)
        .filter(schedules::schedule_id.eq(schedule_id))
        .set((
            schedules::start_date.eq(widened_start.to_string()),
            schedules::end_date.eq(widened_end.to_string()),
        ))
        .execute(conn)?;

    debug!(
        schedule_id,
        start_date = %widened_start,
        end_date = %widened_end,
        "Widened schedule range"
    );

    Ok(Schedule {
        start_date: widened_start,
        end_date: widened_end,
        ..current
    })
}

/// Deletes a schedule row outright.
///
/// Callers must delete (or cascade) the schedule's assignments in the
/// same transaction. Returns whether a row was deleted.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_schedule_row(
    conn: &mut SqliteConnection,
    schedule_id: i64,
) -> Result<bool, PersistenceError> {
    let rows_affected: usize = diesel::delete(schedules::table)
        .filter(schedules::schedule_id.eq(schedule_id))
        .execute(conn)?;

    if rows_affected > 0 {
        info!(schedule_id, "Deleted schedule row");
    }
    Ok(rows_affected > 0)
}
