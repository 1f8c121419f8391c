// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor identity and role-based access control.

use crate::error::AuthError;

/// The role an actor holds, which decides what they may do to the
/// roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Admin role: club officers with roster authority.
    ///
    /// Admins may perform:
    /// - creation and replacement of the next schedule
    /// - adding dates to the next schedule
    /// - editing and deleting assignments
    /// - promotion of the next schedule to current
    /// - clearing schedules
    Admin,
    /// Member role: regular club members.
    ///
    /// Members may view the current and next schedules and trigger
    /// reminder sweeps, but may not change the roster in any way.
    Member,
}

/// An actor whose identity has passed authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// Opaque identifier, echoed into audit logs.
    pub id: String,
    /// The role this actor holds.
    pub role: Role,
}

impl AuthenticatedActor {
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }
}

/// Placeholder authentication.
///
/// Real credential checking is out of scope for now; callers assert an
/// identity and role, and this only rejects the degenerate empty id. A
/// deployment fronted by real auth would replace this function.
///
/// # Errors
///
/// Returns an error if the actor id is empty.
pub fn authenticate_stub(actor_id: String, role: Role) -> Result<AuthenticatedActor, AuthError> {
    if actor_id.is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }
    Ok(AuthenticatedActor::new(actor_id, role))
}

/// Role checks for roster operations.
///
/// Checks run before any persistence access, so a denied request never
/// touches the database.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that an actor holds the Admin role for a mutating action.
    ///
    /// # Errors
    ///
    /// Returns an error naming the action if the actor is a plain
    /// member.
    pub fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Member => Err(AuthError::Unauthorized {
                action: String::from(action),
                required_role: String::from("Admin"),
            }),
        }
    }
}
