// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use squarehead_domain::DomainError;

/// Errors raised by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// An underlying database error.
    DatabaseError(String),
    /// The connection could not be established.
    DatabaseConnectionFailed(String),
    /// A schema migration failed to apply.
    MigrationFailed(String),
    /// A query failed to execute.
    QueryFailed(String),
    /// The adapter could not be set up.
    InitializationError(String),
    /// The session reports foreign keys as unenforced.
    ForeignKeyEnforcementNotEnabled,
    /// The requested schedule was not found.
    ScheduleNotFound(String),
    /// The requested assignment was not found.
    AssignmentNotFound(i64),
    /// A stored row could not be decoded into its domain representation.
    CorruptRecord(String),
    /// Some other requested row was not found.
    NotFound(String),
    /// Anything that does not fit the variants above.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::ScheduleNotFound(msg) => write!(f, "Schedule not found: {msg}"),
            Self::AssignmentNotFound(id) => write!(f, "Assignment not found: {id}"),
            Self::CorruptRecord(msg) => write!(f, "Corrupt record: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::CorruptRecord(err.to_string())
    }
}
