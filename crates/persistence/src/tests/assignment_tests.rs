// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment update and delete tests.

use squarehead_domain::{Assignment, AssignmentPatch, ClubNightType};
use time::Month;

use crate::tests::{date, persistence_with_next};
use crate::Persistence;

fn first_assignment(persistence: &mut Persistence, schedule_id: i64) -> Assignment {
    persistence
        .list_assignments(schedule_id)
        .expect("list succeeds")
        .into_iter()
        .next()
        .expect("at least one assignment")
}

#[test]
fn test_update_assignment_changes_only_patched_fields() {
    let (mut persistence, schedule) = persistence_with_next();
    let schedule_id = schedule.schedule_id.expect("persisted id");
    let assignment = first_assignment(&mut persistence, schedule_id);
    let assignment_id = assignment.assignment_id.expect("persisted id");

    let patch = AssignmentPatch {
        squarehead1_id: Some(Some(42)),
        notes: Some(Some("Bring the door float".to_string())),
        ..AssignmentPatch::default()
    };
    let updated = persistence
        .update_assignment(assignment_id, &patch)
        .expect("update succeeds")
        .expect("assignment exists");

    assert_eq!(updated.squarehead1_id, Some(42));
    assert_eq!(updated.notes.as_deref(), Some("Bring the door float"));

    // Untouched fields keep their stored values.
    assert_eq!(updated.squarehead2_id, assignment.squarehead2_id);
    assert_eq!(updated.night_type, assignment.night_type);
    assert_eq!(updated.dance_date, assignment.dance_date);

    // The change is persisted, not just echoed.
    let reread = persistence
        .get_assignment(assignment_id)
        .expect("query succeeds")
        .expect("assignment exists");
    assert_eq!(reread, updated);
}

#[test]
fn test_update_assignment_can_clear_a_volunteer_slot() {
    let (mut persistence, schedule) = persistence_with_next();
    let schedule_id = schedule.schedule_id.expect("persisted id");
    let assignment_id = first_assignment(&mut persistence, schedule_id)
        .assignment_id
        .expect("persisted id");

    let fill = AssignmentPatch {
        squarehead1_id: Some(Some(7)),
        squarehead2_id: Some(Some(8)),
        ..AssignmentPatch::default()
    };
    persistence
        .update_assignment(assignment_id, &fill)
        .expect("update succeeds")
        .expect("assignment exists");

    // Explicit null clears the slot; the other slot is untouched.
    let clear = AssignmentPatch {
        squarehead1_id: Some(None),
        ..AssignmentPatch::default()
    };
    let updated = persistence
        .update_assignment(assignment_id, &clear)
        .expect("update succeeds")
        .expect("assignment exists");

    assert!(updated.squarehead1_id.is_none());
    assert_eq!(updated.squarehead2_id, Some(8));
}

#[test]
fn test_update_assignment_can_override_night_type() {
    let (mut persistence, schedule) = persistence_with_next();
    let schedule_id = schedule.schedule_id.expect("persisted id");
    let assignment = first_assignment(&mut persistence, schedule_id);
    assert_eq!(assignment.night_type, ClubNightType::Normal);

    let patch = AssignmentPatch {
        night_type: Some(ClubNightType::FifthWeek),
        ..AssignmentPatch::default()
    };
    let updated = persistence
        .update_assignment(assignment.assignment_id.expect("persisted id"), &patch)
        .expect("update succeeds")
        .expect("assignment exists");

    assert_eq!(updated.night_type, ClubNightType::FifthWeek);
}

#[test]
fn test_update_unknown_assignment_returns_none() {
    let (mut persistence, _) = persistence_with_next();

    let patch = AssignmentPatch {
        squarehead1_id: Some(Some(1)),
        ..AssignmentPatch::default()
    };
    let result = persistence
        .update_assignment(999, &patch)
        .expect("update query succeeds");

    assert!(result.is_none());
}

#[test]
fn test_delete_assignment_returns_id_and_date() {
    let (mut persistence, schedule) = persistence_with_next();
    let schedule_id = schedule.schedule_id.expect("persisted id");
    let assignment_id = first_assignment(&mut persistence, schedule_id)
        .assignment_id
        .expect("persisted id");

    let deleted = persistence
        .delete_assignment(assignment_id)
        .expect("delete succeeds")
        .expect("assignment existed");

    assert_eq!(deleted, (assignment_id, date(2025, Month::January, 1)));
    assert!(
        persistence
            .get_assignment(assignment_id)
            .expect("query succeeds")
            .is_none()
    );
    assert_eq!(
        persistence
            .list_assignments(schedule_id)
            .expect("list succeeds")
            .len(),
        4
    );
}

#[test]
fn test_delete_unknown_assignment_returns_none() {
    let (mut persistence, _) = persistence_with_next();

    let result = persistence
        .delete_assignment(999)
        .expect("delete query succeeds");

    assert!(result.is_none());
}
