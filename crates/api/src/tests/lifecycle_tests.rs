// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule lifecycle tests through the API boundary.

use squarehead_domain::ScheduleKind;
use squarehead_persistence::Persistence;

use crate::error::ApiError;
use crate::handlers::{
    add_dates_to_next_schedule, clear_schedule, create_next_schedule, get_schedule,
    promote_next_to_current,
};
use crate::request_response::{AddDatesRequest, CreateNextScheduleRequest};
use crate::tests::{StubDirectory, TestSettings, admin, persistence_with_next};

#[test]
fn test_create_next_schedule_generates_club_nights() {
    let (_, response) = persistence_with_next();

    assert_eq!(response.name, "January 2025");
    assert_eq!(response.kind, "Next");
    assert_eq!(response.start_date, "2025-01-01");
    assert_eq!(response.end_date, "2025-01-31");
    assert_eq!(response.assignments.len(), 5);

    let dates: Vec<&str> = response
        .assignments
        .iter()
        .map(|a| a.dance_date.as_str())
        .collect();
    assert_eq!(
        dates,
        vec![
            "2025-01-01",
            "2025-01-08",
            "2025-01-15",
            "2025-01-22",
            "2025-01-29"
        ]
    );

    // January 29 is the only fifth-week night; all slots start empty.
    assert_eq!(response.assignments[4].night_type, "FifthWeek");
    assert_eq!(response.assignments[0].night_type, "Normal");
    assert!(
        response
            .assignments
            .iter()
            .all(|a| a.squarehead1.is_none() && a.squarehead2.is_none())
    );
}

#[test]
fn test_get_schedule_returns_active_next_and_no_current() {
    let (mut persistence, created) = persistence_with_next();
    let directory = StubDirectory::empty();

    let next = get_schedule(&mut persistence, ScheduleKind::Next, &directory)
        .expect("query succeeds")
        .expect("an active next exists");
    assert_eq!(next.schedule_id, created.schedule_id);

    let current = get_schedule(&mut persistence, ScheduleKind::Current, &directory)
        .expect("query succeeds");
    assert!(current.is_none());
}

#[test]
fn test_create_next_schedule_rejects_malformed_date() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    let result = create_next_schedule(
        &mut persistence,
        CreateNextScheduleRequest {
            name: String::from("Broken"),
            start_date: String::from("January 1st, 2025"),
            end_date: String::from("2025-01-31"),
        },
        &admin(),
        &TestSettings::default(),
        &StubDirectory::empty(),
    );

    let err = result.expect_err("malformed date must be rejected");
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "date"));
}

#[test]
fn test_create_next_schedule_rejects_end_before_start() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    let result = create_next_schedule(
        &mut persistence,
        CreateNextScheduleRequest {
            name: String::from("Backwards"),
            start_date: String::from("2025-01-31"),
            end_date: String::from("2025-01-01"),
        },
        &admin(),
        &TestSettings::default(),
        &StubDirectory::empty(),
    );

    let err = result.expect_err("inverted range must be rejected");
    assert!(matches!(
        err,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "start_before_end"
    ));
}

#[test]
fn test_add_dates_extends_next_schedule_without_duplicates() {
    let (mut persistence, _) = persistence_with_next();

    let response = add_dates_to_next_schedule(
        &mut persistence,
        AddDatesRequest {
            start_date: String::from("2025-01-15"),
            end_date: String::from("2025-02-28"),
        },
        &admin(),
        &TestSettings::default(),
        &StubDirectory::empty(),
    )
    .expect("add dates succeeds");

    assert_eq!(response.schedule.start_date, "2025-01-01");
    assert_eq!(response.schedule.end_date, "2025-02-28");
    assert_eq!(response.schedule.assignments.len(), 9);

    // Only the February nights are new; the overlapping January dates
    // were already present and are not reported as created.
    let new_dates: Vec<&str> = response
        .new_assignments
        .iter()
        .map(|a| a.dance_date.as_str())
        .collect();
    assert_eq!(
        new_dates,
        vec!["2025-02-05", "2025-02-12", "2025-02-19", "2025-02-26"]
    );
    assert!(
        response
            .new_assignments
            .iter()
            .all(|a| a.squarehead1.is_none() && a.squarehead2.is_none())
    );
}

#[test]
fn test_add_dates_without_next_schedule_is_not_found() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    let result = add_dates_to_next_schedule(
        &mut persistence,
        AddDatesRequest {
            start_date: String::from("2025-02-01"),
            end_date: String::from("2025-02-28"),
        },
        &admin(),
        &TestSettings::default(),
        &StubDirectory::empty(),
    );

    let err = result.expect_err("no next schedule to extend");
    assert!(matches!(
        err,
        ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Schedule"
    ));
}

#[test]
fn test_promote_makes_next_the_current_schedule() {
    let (mut persistence, created) = persistence_with_next();
    let directory = StubDirectory::empty();

    let promoted = promote_next_to_current(&mut persistence, &admin(), &directory)
        .expect("promotion succeeds");
    assert_eq!(promoted.schedule_id, created.schedule_id);
    assert_eq!(promoted.kind, "Current");
    assert_eq!(promoted.assignments.len(), 5);

    let current = get_schedule(&mut persistence, ScheduleKind::Current, &directory)
        .expect("query succeeds")
        .expect("an active current exists");
    assert_eq!(current.schedule_id, created.schedule_id);
    assert!(
        get_schedule(&mut persistence, ScheduleKind::Next, &directory)
            .expect("query succeeds")
            .is_none()
    );
}

#[test]
fn test_promote_without_next_schedule_is_not_found() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    let result = promote_next_to_current(&mut persistence, &admin(), &StubDirectory::empty());

    let err = result.expect_err("nothing to promote");
    assert!(matches!(
        err,
        ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Schedule"
    ));
}

#[test]
fn test_clear_next_schedule_reports_deletions() {
    let (mut persistence, _) = persistence_with_next();

    let response = clear_schedule(&mut persistence, ScheduleKind::Next, &admin())
        .expect("clear succeeds");

    assert!(response.schedule_deleted);
    assert_eq!(response.assignments_deleted, 5);
    assert!(
        get_schedule(&mut persistence, ScheduleKind::Next, &StubDirectory::empty())
            .expect("query succeeds")
            .is_none()
    );
}

#[test]
fn test_clear_with_no_active_schedule_is_reported_noop() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    let response = clear_schedule(&mut persistence, ScheduleKind::Current, &admin())
        .expect("clear succeeds");

    assert!(!response.schedule_deleted);
    assert_eq!(response.assignments_deleted, 0);
    assert!(response.message.contains("No active"));
}
