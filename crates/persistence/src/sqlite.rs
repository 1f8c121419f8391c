// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite session setup.
//!
//! Everything here is PRAGMA- and migration-level plumbing that Diesel's
//! DSL cannot express. Roster queries and mutations live in the `queries`
//! and `mutations` modules and use Diesel DSL exclusively.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(QueryableByName)]
struct ForeignKeyPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Opens a `SQLite` database, applies session PRAGMAs, and brings the
/// schema up to date.
///
/// Foreign key enforcement is switched on and then read back:
/// assignments reference their owning schedule, and a session that
/// silently dropped the PRAGMA would let orphaned rows through.
/// `write_ahead_log` enables WAL journaling for better read concurrency;
/// it only makes sense for file-backed databases, so in-memory callers
/// pass `false`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established, a PRAGMA
/// is rejected or left unenforced, or a migration fails.
pub fn open_database(
    database_url: &str,
    write_ahead_log: bool,
) -> Result<SqliteConnection, PersistenceError> {
    info!("Opening SQLite database at: {}", database_url);

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    // PRAGMAs are raw SQL; Diesel has no DSL for them.
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    if write_ahead_log {
        diesel::sql_query("PRAGMA journal_mode = WAL")
            .execute(&mut conn)
            .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    }

    let enforced: i32 = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<ForeignKeyPragma>(&mut conn)?
        .foreign_keys;
    if enforced == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }
    debug!("SQLite foreign key enforcement is enabled");

    info!("Running SQLite database migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;

    Ok(conn)
}

/// Reads the rowid of the most recent insert on this connection.
///
/// `SQLite` doesn't support `RETURNING` clauses in all contexts, so
/// inserts that need their generated id query `last_insert_rowid()`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}
