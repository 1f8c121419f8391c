// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries over the roster tables.

pub mod assignments;
pub mod schedules;

pub use assignments::{get_assignment, list_assignment_dates, list_assignments};
pub use schedules::{get_active_schedule, get_schedule};
