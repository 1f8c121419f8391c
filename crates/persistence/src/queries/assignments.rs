// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use squarehead_domain::Assignment;

use crate::data_models::AssignmentRow;
use crate::diesel_schema::assignments;
use crate::error::PersistenceError;

/// Lists all assignments for a schedule, ordered by dance date ascending.
///
/// ISO 8601 text dates sort lexicographically in calendar order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_assignments(
    conn: &mut SqliteConnection,
    schedule_id: i64,
) -> Result<Vec<Assignment>, PersistenceError> {
    let rows: Vec<AssignmentRow> = assignments::table
        .filter(assignments::schedule_id.eq(schedule_id))
        .order(assignments::dance_date.asc())
        .load::<AssignmentRow>(conn)?;

    rows.into_iter().map(AssignmentRow::into_domain).collect()
}

/// Retrieves a single assignment by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
pub fn get_assignment(
    conn: &mut SqliteConnection,
    assignment_id: i64,
) -> Result<Option<Assignment>, PersistenceError> {
    let row: Option<AssignmentRow> = assignments::table
        .filter(assignments::assignment_id.eq(assignment_id))
        .first::<AssignmentRow>(conn)
        .optional()?;

    row.map(AssignmentRow::into_domain).transpose()
}

/// Lists the dance dates already present in a schedule, as stored text.
///
/// Used by the add-dates duplicate guard.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_assignment_dates(
    conn: &mut SqliteConnection,
    schedule_id: i64,
) -> Result<Vec<String>, PersistenceError> {
    Ok(assignments::table
        .filter(assignments::schedule_id.eq(schedule_id))
        .select(assignments::dance_date)
        .load::<String>(conn)?)
}
