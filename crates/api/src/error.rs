// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use gigdesk::CoreError;
use gigdesk_domain::DomainError;
use gigdesk_persistence::PersistenceError;
use tracing::{error, warn};

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The write lost a race with another request.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { message, .. }
            | Self::ResourceNotFound { message, .. }
            | Self::Conflict { message } => write!(f, "{message}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

fn rule_violation(rule: &str, err: &DomainError) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: String::from(rule),
        message: err.to_string(),
    }
}

fn invalid_input(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: String::from(field),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::EventNotFound(event) => ApiError::ResourceNotFound {
            resource_type: String::from(event.kind().noun()),
            message: err.to_string(),
        },
        DomainError::CapacityExceeded { .. } => rule_violation("roster_capacity", &err),
        DomainError::AlreadyClaimed { .. } => rule_violation("unique_claim", &err),
        DomainError::NotClaimed { .. } => rule_violation("claim_required", &err),
        DomainError::TooEarly { .. } => rule_violation("check_in_window", &err),
        DomainError::TooFarAway { .. } => rule_violation("geofence", &err),
        DomainError::LocationUnavailable { .. } => rule_violation("location_required", &err),
        DomainError::VenueUnlocated(_) => rule_violation("venue_location", &err),
        DomainError::NotCheckedIn { .. } => rule_violation("open_session_required", &err),
        DomainError::AttendanceIncomplete { .. } => {
            rule_violation("closed_session_required", &err)
        }
        DomainError::InvalidAttendanceWindow { .. } => rule_violation("attendance_window", &err),
        DomainError::AlreadyPaid { .. } => rule_violation("single_payout", &err),
        DomainError::MissingPayRate(_) => rule_violation("pay_rate_required", &err),
        DomainError::PayoutOverflow(_) => rule_violation("payout_range", &err),
        DomainError::InvalidStaffId(_) => invalid_input("staff_id", &err),
        DomainError::InvalidDisplayName(_) => invalid_input("display_name", &err),
        DomainError::InvalidCoordinates { .. } => invalid_input("coordinates", &err),
        DomainError::InvalidEvent { field, .. } => invalid_input(field, &err),
        DomainError::InvalidEventKind(_) => invalid_input("kind", &err),
        DomainError::InvalidRosterKind(_) => invalid_input("roster", &err),
        DomainError::InvalidTimezone(_) => invalid_input("timezone", &err),
        DomainError::InvalidSchedule { .. } => invalid_input("scheduled_at", &err),
        DomainError::TimestampParseError { .. } => invalid_input("timestamp", &err),
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::UnsupportedCommand { .. } => {
            error!(error = %err, "Command routed to the wrong transition");
            ApiError::Internal {
                message: err.to_string(),
            }
        }
    }
}

/// Translates a persistence error into an API error.
///
/// Lost races become `Conflict`; storage failures are logged and hidden
/// behind `Internal`.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::EventNotFound { kind, event_id } => ApiError::ResourceNotFound {
            resource_type: kind.clone(),
            message: format!("{kind} #{event_id} not found"),
        },
        PersistenceError::ConcurrentModification { .. } | PersistenceError::UniqueViolation(_) => {
            warn!(error = %err, "Write rejected by a concurrent change");
            ApiError::Conflict {
                message: err.to_string(),
            }
        }
        PersistenceError::AuditEventNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("audit event"),
            message: format!("Audit event {id} not found"),
        },
        other => {
            error!(error = %other, "Persistence failure");
            ApiError::Internal {
                message: other.to_string(),
            }
        }
    }
}
