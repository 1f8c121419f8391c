// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Promotion transition tests, including rollback atomicity.

use diesel::prelude::*;
use squarehead_domain::{ScheduleKind, generate_dance_dates};
use time::{Month, Weekday};

use crate::tests::{date, new_schedule, persistence_with_next};
use crate::{Persistence, PersistenceError, mutations, queries};

/// Seeds an active Current schedule alongside the Next draft.
fn seed_current(persistence: &mut Persistence) -> i64 {
    let schedule = new_schedule(
        "December 2024",
        ScheduleKind::Current,
        date(2024, Month::December, 1),
        date(2024, Month::December, 31),
    );
    let entries = generate_dance_dates(
        date(2024, Month::December, 1),
        date(2024, Month::December, 31),
        Weekday::Wednesday,
    )
    .expect("generation succeeds");
    let (persisted, _) = persistence
        .create_schedule_with_assignments(schedule, &entries)
        .expect("creation succeeds");
    persisted.schedule_id.expect("persisted id")
}

#[test]
fn test_promote_flips_next_to_current_and_retires_old_current() {
    let (mut persistence, next) = persistence_with_next();
    let next_id = next.schedule_id.expect("persisted id");
    let old_current_id = seed_current(&mut persistence);

    let promoted = persistence
        .promote_next_to_current()
        .expect("promotion succeeds")
        .expect("a next schedule existed");

    assert_eq!(promoted.schedule_id, Some(next_id));
    assert_eq!(promoted.kind, ScheduleKind::Current);
    assert!(promoted.is_active);

    // Exactly one active Current schedule, and no active Next remains.
    let active_current = persistence
        .get_active_schedule(ScheduleKind::Current)
        .expect("query succeeds")
        .expect("an active current exists");
    assert_eq!(active_current.schedule_id, Some(next_id));
    assert!(
        persistence
            .get_active_schedule(ScheduleKind::Next)
            .expect("query succeeds")
            .is_none()
    );

    // The previously-active Current schedule is retired but retained.
    let old = persistence
        .get_schedule(old_current_id)
        .expect("query succeeds")
        .expect("history retained");
    assert!(!old.is_active);
    assert_eq!(old.kind, ScheduleKind::Current);
}

#[test]
fn test_promote_with_no_current_schedule_is_allowed() {
    let (mut persistence, next) = persistence_with_next();

    let promoted = persistence
        .promote_next_to_current()
        .expect("promotion succeeds")
        .expect("a next schedule existed");

    assert_eq!(promoted.schedule_id, next.schedule_id);
    assert_eq!(promoted.kind, ScheduleKind::Current);
}

#[test]
fn test_promote_with_no_next_schedule_returns_none() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");
    seed_current(&mut persistence);

    let promoted = persistence
        .promote_next_to_current()
        .expect("promotion query succeeds");

    assert!(promoted.is_none());

    // The existing Current schedule is untouched.
    assert!(
        persistence
            .get_active_schedule(ScheduleKind::Current)
            .expect("query succeeds")
            .is_some()
    );
}

#[test]
fn test_failed_promotion_transaction_rolls_back_completely() {
    let (mut persistence, next) = persistence_with_next();
    let next_id = next.schedule_id.expect("persisted id");
    let old_current_id = seed_current(&mut persistence);

    let before_current = persistence
        .get_schedule(old_current_id)
        .expect("query succeeds");
    let before_next = persistence.get_schedule(next_id).expect("query succeeds");

    // Run the promotion steps but inject a failure before commit.
    let result = persistence
        .conn
        .transaction::<(), PersistenceError, _>(|conn| {
            mutations::deactivate_active_schedules(conn, ScheduleKind::Current)?;
            mutations::set_schedule_kind(conn, next_id, ScheduleKind::Current)?;
            Err(PersistenceError::Other("injected failure".to_string()))
        });
    assert!(result.is_err());

    // After rollback the prior Current and Next states are unchanged.
    let after_current = persistence
        .get_schedule(old_current_id)
        .expect("query succeeds");
    let after_next = persistence.get_schedule(next_id).expect("query succeeds");
    assert_eq!(before_current, after_current);
    assert_eq!(before_next, after_next);

    let active_next = queries::get_active_schedule(&mut persistence.conn, ScheduleKind::Next)
        .expect("query succeeds")
        .expect("next draft still active");
    assert_eq!(active_next.schedule_id, Some(next_id));
    assert_eq!(active_next.kind, ScheduleKind::Next);
}
