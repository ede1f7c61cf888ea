// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use gigdesk_audit::Actor;
use gigdesk_domain::StaffId;

use crate::error::AuthError;

/// Actor roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Admin role: office staff who book events and settle attendance.
    ///
    /// Admins may perform:
    /// - creation and deletion of gigs and appointments
    /// - staff registration
    /// - attendance corrections and payouts
    /// - claims and check-ins on behalf of any staff member
    Admin,
    /// Staff role: bartenders and servers working events.
    ///
    /// Staff may claim and release slots and check in and out, always as
    /// themselves.
    Staff,
}

impl Role {
    /// Returns the role name recorded in audit events.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
        }
    }
}

/// An authenticated actor with an associated role.
///
/// The identifier is the actor's username, the same value staff rosters
/// hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this authenticated actor into an audit Actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), String::from(self.role.as_str()))
    }
}

/// Stub authentication.
///
/// Identity is established upstream; this only rejects an empty actor ID.
///
/// # Errors
///
/// Returns an error if `actor_id` is empty.
pub fn authenticate_stub(actor_id: String, role: Role) -> Result<AuthenticatedActor, AuthError> {
    if actor_id.trim().is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }
    Ok(AuthenticatedActor::new(actor_id, role))
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that the actor is an admin.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for any other role.
    pub fn authorize_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Staff => Err(AuthError::Unauthorized {
                action: String::from(action),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks that the actor may act for `staff_id`.
    ///
    /// Admins may act for anyone; staff only for themselves.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` when a staff member acts for someone else.
    pub fn authorize_act_as(
        actor: &AuthenticatedActor,
        staff_id: &StaffId,
        action: &str,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Staff if actor.id == staff_id.value() => Ok(()),
            Role::Staff => Err(AuthError::Unauthorized {
                action: format!("{action} for '{staff_id}'"),
                required_role: String::from("Admin"),
            }),
        }
    }
}
