// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reminder planning and dispatch.
//!
//! Planning is pure: given a date, the configured lead times, and a
//! schedule's assignments, it computes which reminders are due. Dispatch
//! resolves recipients through the membership directory and hands each
//! reminder to the mailer, isolating per-recipient failures.

use time::{Date, Duration};
use tracing::info;

use squarehead_domain::{Assignment, DomainError, ReminderDue};

use crate::capabilities::{MemberDirectory, ReminderMailer};
use crate::request_response::ReminderReport;

/// Computes the reminders due on `today`.
///
/// A reminder is due for every filled volunteer slot of every assignment
/// whose dance date is exactly one configured offset ahead of `today`.
/// Assignments with both slots empty produce nothing. The result is
/// deterministic: offsets in configured order, assignments in the given
/// order, first slot before second.
///
/// # Errors
///
/// Returns an error if an offset is zero or a target date overflows the
/// calendar.
pub fn plan_reminders(
    today: Date,
    offsets: &[u16],
    assignments: &[Assignment],
) -> Result<Vec<ReminderDue>, DomainError> {
    let mut due: Vec<ReminderDue> = Vec::new();

    for offset in offsets {
        if *offset == 0 {
            return Err(DomainError::InvalidReminderOffset { offset: 0 });
        }

        let target: Date = today
            .checked_add(Duration::days(i64::from(*offset)))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: "computing the reminder target date".to_string(),
            })?;

        for assignment in assignments {
            if assignment.dance_date != target {
                continue;
            }
            let Some(assignment_id) = assignment.assignment_id else {
                continue;
            };

            for volunteer_id in [assignment.squarehead1_id, assignment.squarehead2_id]
                .into_iter()
                .flatten()
            {
                due.push(ReminderDue {
                    assignment_id,
                    dance_date: assignment.dance_date,
                    volunteer_id,
                    day_offset: *offset,
                });
            }
        }
    }

    Ok(due)
}

/// Delivers planned reminders through the mailer.
///
/// Each recipient is handled independently: an unresolvable volunteer id
/// or a delivery failure is recorded in the report and the sweep moves
/// on to the next reminder.
pub fn dispatch_reminders(
    due: &[ReminderDue],
    directory: &dyn MemberDirectory,
    mailer: &mut dyn ReminderMailer,
) -> ReminderReport {
    let mut sent_count: usize = 0;
    let mut errors: Vec<String> = Vec::new();

    for reminder in due {
        let Some(contact) = directory.resolve_volunteer(reminder.volunteer_id) else {
            errors.push(format!(
                "Volunteer {} has no directory entry; skipped reminder for {}",
                reminder.volunteer_id, reminder.dance_date
            ));
            continue;
        };

        let date_label: String = reminder.dance_date.to_string();
        match mailer.send_reminder(&contact.email, &contact.name, &date_label) {
            Ok(()) => sent_count += 1,
            Err(message) => errors.push(format!(
                "Failed to send reminder to {} for {}: {message}",
                contact.email, reminder.dance_date
            )),
        }
    }

    info!(
        due = due.len(),
        sent = sent_count,
        failed = errors.len(),
        "Dispatched reminder sweep"
    );

    ReminderReport {
        due_count: due.len(),
        sent_count,
        errors,
    }
}
