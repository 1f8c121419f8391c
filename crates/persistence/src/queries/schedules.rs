// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use squarehead_domain::{Schedule, ScheduleKind};

use crate::data_models::ScheduleRow;
use crate::diesel_schema::schedules;
use crate::error::PersistenceError;

/// Retrieves the unique active schedule of the given kind, if any.
///
/// The single-active-per-kind invariant is maintained by the mutation
/// side; this query simply returns the first active row of the kind.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
pub fn get_active_schedule(
    conn: &mut SqliteConnection,
    kind: ScheduleKind,
) -> Result<Option<Schedule>, PersistenceError> {
    let row: Option<ScheduleRow> = schedules::table
        .filter(schedules::kind.eq(kind.as_str()))
        .filter(schedules::is_active.eq(1))
        .first::<ScheduleRow>(conn)
        .optional()?;

    row.map(ScheduleRow::into_domain).transpose()
}

/// Retrieves a schedule by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
pub fn get_schedule(
    conn: &mut SqliteConnection,
    schedule_id: i64,
) -> Result<Option<Schedule>, PersistenceError> {
    let row: Option<ScheduleRow> = schedules::table
        .filter(schedules::schedule_id.eq(schedule_id))
        .first::<ScheduleRow>(conn)
        .optional()?;

    row.map(ScheduleRow::into_domain).transpose()
}
