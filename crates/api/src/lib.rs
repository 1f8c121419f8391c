// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Squarehead Duty Roster.
//!
//! This crate sits between the HTTP surface and the domain/persistence
//! layers. It owns:
//!
//! - role-based authorization, enforced before persistence access
//! - request/response DTOs, kept distinct from domain types
//! - explicit error translation so domain and storage errors never leak
//! - reminder planning and dispatch through capability traits

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod capabilities;
mod error;
mod handlers;
mod reminders;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role, authenticate_stub};
pub use capabilities::{
    Clock, ClubSettings, MemberDirectory, ReminderMailer, TimezoneClock, VolunteerContact,
};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    add_dates_to_next_schedule, clear_schedule, create_next_schedule, delete_assignment,
    get_schedule, promote_next_to_current, run_reminder_sweep, update_assignment,
};
pub use reminders::{dispatch_reminders, plan_reminders};
pub use request_response::{
    AddDatesRequest, AddDatesResponse, AssignmentResponse, ClearScheduleResponse,
    CreateNextScheduleRequest, DeleteAssignmentResponse, ReminderReport, ScheduleResponse,
    UpdateAssignmentRequest, VolunteerSlot,
};
