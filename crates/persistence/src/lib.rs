// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Squarehead Duty Roster.
//!
//! This crate provides `SQLite` persistence for schedules and their
//! assignments, built on Diesel with embedded migrations.
//!
//! ## Transactional guarantees
//!
//! Every multi-row operation (schedule creation, adding dates, promotion,
//! bulk clear) runs inside a single database transaction. A concurrent
//! reader sees either the pre-state or the post-state of the whole
//! operation, never a partial one; on any failure the transaction rolls
//! back and the prior state is preserved unchanged.
//!
//! ## Testing
//!
//! Tests run against unique in-memory databases. Each call to
//! [`Persistence::new_in_memory`] receives a sequential database name via
//! an atomic counter, ensuring deterministic isolation without time-based
//! collisions.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::prelude::*;
use diesel::SqliteConnection;
use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use squarehead_domain::{Assignment, AssignmentPatch, DateEntry, Schedule, ScheduleKind};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::ClearOutcome;
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the roster tables.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Unique shared in-memory database name per call so tests are isolated.
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_roster_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let conn: SqliteConnection = sqlite::open_database(&shared_memory_url, false)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let conn: SqliteConnection = sqlite::open_database(path_str, true)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Retrieves the unique active schedule of the given kind, or `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_active_schedule(
        &mut self,
        kind: ScheduleKind,
    ) -> Result<Option<Schedule>, PersistenceError> {
        queries::get_active_schedule(&mut self.conn, kind)
    }

    /// Retrieves a schedule by ID (active or retired).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_schedule(&mut self, schedule_id: i64) -> Result<Option<Schedule>, PersistenceError> {
        queries::get_schedule(&mut self.conn, schedule_id)
    }

    /// Lists a schedule's assignments ordered by dance date ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_assignments(
        &mut self,
        schedule_id: i64,
    ) -> Result<Vec<Assignment>, PersistenceError> {
        queries::list_assignments(&mut self.conn, schedule_id)
    }

    /// Retrieves a single assignment by ID, or `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_assignment(
        &mut self,
        assignment_id: i64,
    ) -> Result<Option<Assignment>, PersistenceError> {
        queries::get_assignment(&mut self.conn, assignment_id)
    }

    // ========================================================================
    // Single-row mutations
    // ========================================================================

    /// Applies a partial update to an assignment.
    ///
    /// Returns the updated assignment, or `Ok(None)` if the id does not
    /// exist (an explicit not-found result, not an error).
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_assignment(
        &mut self,
        assignment_id: i64,
        patch: &AssignmentPatch,
    ) -> Result<Option<Assignment>, PersistenceError> {
        mutations::update_assignment(&mut self.conn, assignment_id, patch)
    }

    /// Deletes a single assignment.
    ///
    /// Returns the deleted row's `(assignment_id, dance_date)`, or
    /// `Ok(None)` if the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_assignment(
        &mut self,
        assignment_id: i64,
    ) -> Result<Option<(i64, time::Date)>, PersistenceError> {
        mutations::delete_assignment(&mut self.conn, assignment_id)
    }

    // ========================================================================
    // Composite transactional operations
    // ========================================================================

    /// Creates a new active schedule and bulk-inserts its assignments,
    /// in one transaction.
    ///
    /// Any prior active schedule of the same kind is deactivated first
    /// (soft delete, history preserved), so the single-active-per-kind
    /// invariant holds when the transaction commits.
    ///
    /// # Errors
    ///
    /// Returns an error if any step fails; the transaction rolls back and
    /// nothing is persisted.
    pub fn create_schedule_with_assignments(
        &mut self,
        schedule: Schedule,
        entries: &[DateEntry],
    ) -> Result<(Schedule, Vec<Assignment>), PersistenceError> {
        self.conn
            .transaction::<_, PersistenceError, _>(|conn| {
                mutations::deactivate_active_schedules(conn, schedule.kind)?;

                let schedule_id: i64 = mutations::insert_schedule(conn, &schedule)?;
                let created: Vec<Assignment> =
                    mutations::insert_assignments(conn, schedule_id, entries)?;

                let persisted = Schedule {
                    schedule_id: Some(schedule_id),
                    ..schedule
                };
                Ok((persisted, created))
            })
    }

    /// Adds new dates to an existing schedule, in one transaction.
    ///
    /// Entries whose date is already present in the schedule are skipped
    /// (duplicate-date guard), and the schedule's stored range is widened
    /// to the union of its old bounds and the supplied bounds. Returns the
    /// updated schedule and only the newly created assignments.
    ///
    /// # Errors
    ///
    /// Returns an error if any step fails; the transaction rolls back.
    pub fn add_dates_to_schedule(
        &mut self,
        schedule_id: i64,
        new_start: time::Date,
        new_end: time::Date,
        entries: &[DateEntry],
    ) -> Result<(Schedule, Vec<Assignment>), PersistenceError> {
        self.conn
            .transaction::<_, PersistenceError, _>(|conn| {
                let existing: HashSet<String> =
                    queries::list_assignment_dates(conn, schedule_id)?
                        .into_iter()
                        .collect();

                let fresh: Vec<DateEntry> = entries
                    .iter()
                    .copied()
                    .filter(|entry| !existing.contains(&entry.date.to_string()))
                    .collect();

                let created: Vec<Assignment> =
                    mutations::insert_assignments(conn, schedule_id, &fresh)?;
                let widened: Schedule =
                    mutations::widen_schedule_range(conn, schedule_id, new_start, new_end)?;

                Ok((widened, created))
            })
    }

    /// Promotes the active Next schedule to Current, in one transaction.
    ///
    /// The prior active Current schedule (if any) is deactivated but kept;
    /// the Next schedule's kind flips to Current and it stays active.
    /// Returns `Ok(None)` when no active Next schedule exists, leaving
    /// everything untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if any step fails; the transaction rolls back and
    /// no partial promotion is observable.
    pub fn promote_next_to_current(&mut self) -> Result<Option<Schedule>, PersistenceError> {
        self.conn
            .transaction::<_, PersistenceError, _>(|conn| {
                let Some(next) = queries::get_active_schedule(conn, ScheduleKind::Next)? else {
                    return Ok(None);
                };
                let next_id: i64 = next.schedule_id.ok_or_else(|| {
                    PersistenceError::Other("Active schedule row missing its id".to_string())
                })?;

                mutations::deactivate_active_schedules(conn, ScheduleKind::Current)?;
                mutations::set_schedule_kind(conn, next_id, ScheduleKind::Current)?;

                info!(schedule_id = next_id, "Promoted next schedule to current");
                queries::get_schedule(conn, next_id)
            })
    }

    /// Deletes the active schedule of the given kind and all of its
    /// assignments, in one transaction.
    ///
    /// A no-op returning zero counts if no active schedule of the kind
    /// exists; this is a reported non-error.
    ///
    /// # Errors
    ///
    /// Returns an error if any step fails; the transaction rolls back.
    pub fn clear_active_schedule(
        &mut self,
        kind: ScheduleKind,
    ) -> Result<ClearOutcome, PersistenceError> {
        self.conn
            .transaction::<_, PersistenceError, _>(|conn| {
                let Some(schedule) = queries::get_active_schedule(conn, kind)? else {
                    return Ok(ClearOutcome::NOTHING);
                };
                let schedule_id: i64 = schedule.schedule_id.ok_or_else(|| {
                    PersistenceError::Other("Active schedule row missing its id".to_string())
                })?;

                // Assignments go first so the schedule row is never orphaned
                // mid-transaction even without cascade support.
                let assignments_deleted: usize =
                    mutations::delete_assignments_for_schedule(conn, schedule_id)?;
                let schedule_deleted: bool = mutations::delete_schedule_row(conn, schedule_id)?;

                info!(
                    kind = %kind,
                    schedule_id,
                    assignments_deleted,
                    "Cleared active schedule"
                );
                Ok(ClearOutcome {
                    schedule_deleted,
                    assignments_deleted,
                })
            })
    }
}
