// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! Domain and storage errors never cross this boundary directly; the
//! `translate_*` functions below map them into the API contract.

use squarehead_domain::DomainError;
use squarehead_persistence::PersistenceError;

/// Identity and permission failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The asserted identity could not be accepted.
    AuthenticationFailed {
        /// Why it was rejected.
        reason: String,
    },
    /// The actor's role does not permit the attempted action.
    Unauthorized {
        /// The attempted action.
        action: String,
        /// The role it requires.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Errors the API contract exposes to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The asserted identity could not be accepted.
    AuthenticationFailed {
        /// Why it was rejected.
        reason: String,
    },
    /// The actor's role does not permit the attempted action.
    Unauthorized {
        /// The attempted action.
        action: String,
        /// The role it requires.
        required_role: String,
    },
    /// A roster rule was violated.
    DomainRuleViolation {
        /// Short machine-readable rule name.
        rule: String,
        /// Human-readable description of the violation.
        message: String,
    },
    /// A request field failed validation.
    InvalidInput {
        /// The offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },
    /// The addressed schedule or assignment does not exist.
    ResourceNotFound {
        /// What kind of thing was missing.
        resource_type: String,
        /// Human-readable description of what was looked up.
        message: String,
    },
    /// Something failed below the API contract.
    Internal {
        /// Description of the failure.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Maps a domain error onto the API contract.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidDateRange { start, end } => ApiError::DomainRuleViolation {
            rule: String::from("start_before_end"),
            message: format!("Start date {start} must not be after end date {end}"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Date arithmetic overflow while {operation}"),
        },
        DomainError::InvalidScheduleKind(value) => ApiError::InvalidInput {
            field: String::from("schedule_kind"),
            message: format!("Invalid schedule kind: '{value}'. Must be 'Current' or 'Next'"),
        },
        DomainError::InvalidNightType(value) => ApiError::InvalidInput {
            field: String::from("night_type"),
            message: format!("Invalid night type: '{value}'. Must be 'Normal' or 'FifthWeek'"),
        },
        DomainError::InvalidWeekday(value) => ApiError::InvalidInput {
            field: String::from("weekday"),
            message: format!("Invalid weekday: '{value}'"),
        },
        DomainError::EmptyUpdate => ApiError::InvalidInput {
            field: String::from("update"),
            message: String::from("At least one field must be supplied"),
        },
        DomainError::InvalidReminderOffset { offset } => ApiError::InvalidInput {
            field: String::from("reminder_offset"),
            message: format!("Invalid reminder offset: {offset}. Must be a positive day count"),
        },
        DomainError::InvalidTimezone(value) => ApiError::InvalidInput {
            field: String::from("timezone"),
            message: format!("Invalid timezone: '{value}'"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Not-found conditions surface as `ResourceNotFound`; everything else is
/// an internal error so storage details are not leaked to callers.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::ScheduleNotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Schedule"),
            message,
        },
        PersistenceError::AssignmentNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Assignment"),
            message: format!("Assignment {id} does not exist"),
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
