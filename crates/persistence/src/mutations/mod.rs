// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations on the roster tables.
//!
//! Functions here operate on a single connection and do not open
//! transactions themselves; the `Persistence` adapter wraps composite
//! operations (create, add-dates, promote, clear) in one transaction so
//! partial writes never persist.

pub mod assignments;
pub mod schedules;

pub use assignments::{
    delete_assignment, delete_assignments_for_schedule, insert_assignments, update_assignment,
};
pub use schedules::{
    deactivate_active_schedules, delete_schedule_row, insert_schedule, set_schedule_kind,
    widen_schedule_range,
};
