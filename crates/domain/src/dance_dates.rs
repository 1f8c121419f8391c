// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dance date sequence generation.
//!
//! Turns an inclusive date range and a target weekday into the ordered
//! sequence of club nights, flagging fifth-week nights. Pure functions,
//! no state, no I/O; the same inputs always yield the same sequence.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::{Date, Duration, Weekday};

/// One generated club night date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateEntry {
    /// The calendar date of the club night.
    pub date: Date,
    /// Whether the date is a fifth-week night.
    pub is_fifth_week: bool,
}

/// Returns whether a date is the fifth occurrence of its weekday within
/// its calendar month.
///
/// The predicate is `day_of_month > 28`: any date past the 28th is the
/// fifth such weekday of its month. February in non-leap years never
/// reaches day 29, so the predicate is trivially false there.
#[must_use]
pub const fn is_fifth_week(date: Date) -> bool {
    date.day() > 28
}

/// Generates the ordered sequence of club nights in `[start, end]` that
/// fall on `target_weekday`.
///
/// The cursor advances one day at a time from `start` until it lands on
/// the target weekday, then strides in fixed 7-day steps. Both bounds are
/// inclusive: if `start` itself falls on the target weekday it is the
/// first entry. An empty range (`start > end`) or a range containing no
/// matching weekday yields an empty sequence.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if a date step exceeds
/// the representable calendar range.
pub fn generate_dance_dates(
    start: Date,
    end: Date,
    target_weekday: Weekday,
) -> Result<Vec<DateEntry>, DomainError> {
    let mut cursor: Date = start;

    while cursor <= end && cursor.weekday() != target_weekday {
        cursor = cursor
            .next_day()
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: "seeking the first club night".to_string(),
            })?;
    }

    let mut entries: Vec<DateEntry> = Vec::new();
    while cursor <= end {
        entries.push(DateEntry {
            date: cursor,
            is_fifth_week: is_fifth_week(cursor),
        });
        cursor = cursor.checked_add(Duration::days(7)).ok_or_else(|| {
            DomainError::DateArithmeticOverflow {
                operation: "stepping to the next club night".to_string(),
            }
        })?;
    }

    Ok(entries)
}
