// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A date range has its end before its start.
    InvalidDateRange {
        /// The start of the range.
        start: Date,
        /// The end of the range.
        end: Date,
    },
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Schedule kind is not one of the allowed values.
    InvalidScheduleKind(String),
    /// Club night type is not one of the allowed values.
    InvalidNightType(String),
    /// Weekday name is not recognized.
    InvalidWeekday(String),
    /// An assignment update supplied no fields to change.
    EmptyUpdate,
    /// A reminder offset is not a positive number of days.
    InvalidReminderOffset {
        /// The invalid offset value.
        offset: i64,
    },
    /// Timezone name is not recognized.
    InvalidTimezone(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateRange { start, end } => {
                write!(f, "Invalid date range: {start} is after {end}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::InvalidScheduleKind(value) => {
                write!(f, "Invalid schedule kind: {value}. Must be Current or Next")
            }
            Self::InvalidNightType(value) => {
                write!(
                    f,
                    "Invalid club night type: {value}. Must be Normal or FifthWeek"
                )
            }
            Self::InvalidWeekday(value) => write!(f, "Invalid weekday name: {value}"),
            Self::EmptyUpdate => write!(f, "No fields to update"),
            Self::InvalidReminderOffset { offset } => {
                write!(
                    f,
                    "Invalid reminder offset: {offset}. Must be a positive number of days"
                )
            }
            Self::InvalidTimezone(value) => write!(f, "Invalid timezone: {value}"),
        }
    }
}

impl std::error::Error for DomainError {}
