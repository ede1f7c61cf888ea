// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The two kinds of bookable event.
///
/// Gigs and appointments share every claim and attendance rule. They differ
/// only in where their venue coordinates come from and in how payouts are rated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// A client booking with its own venue and hourly pay.
    Gig,
    /// A consultation at the default venue, paid at a flat rate.
    Appointment,
}

impl EventKind {
    /// Returns the stored representation of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gig => "gig",
            Self::Appointment => "appointment",
        }
    }

    /// Returns the noun used in user-facing messages.
    #[must_use]
    pub const fn noun(&self) -> &'static str {
        self.as_str()
    }

    /// Returns the plural path segment used by the HTTP surface.
    #[must_use]
    pub const fn route_segment(&self) -> &'static str {
        match self {
            Self::Gig => "gigs",
            Self::Appointment => "appointments",
        }
    }
}

impl FromStr for EventKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gig" | "gigs" => Ok(Self::Gig),
            "appointment" | "appointments" => Ok(Self::Appointment),
            _ => Err(DomainError::InvalidEventKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which roster of an event a claim targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RosterKind {
    /// The staff who will work the event.
    Primary,
    /// Standby staff.
    Backup,
}

impl RosterKind {
    /// Returns the stored representation of this roster.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Backup => "backup",
        }
    }
}

impl FromStr for RosterKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "primary" => Ok(Self::Primary),
            "backup" => Ok(Self::Backup),
            _ => Err(DomainError::InvalidRosterKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for RosterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identifies one event across both kinds.
///
/// Gig 7 and appointment 7 are different events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventRef {
    kind: EventKind,
    id: i64,
}

impl EventRef {
    /// Creates a new event reference.
    #[must_use]
    pub const fn new(kind: EventKind, id: i64) -> Self {
        Self { kind, id }
    }

    /// Returns the event kind.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// Returns the event's numeric identifier within its kind.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }
}

impl std::fmt::Display for EventRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} #{}", self.kind.noun(), self.id)
    }
}

/// The maximum length of a staff identifier.
pub const MAX_STAFF_ID_LEN: usize = 64;

/// A staff member's username.
///
/// Identifiers are compared exactly. Surrounding whitespace is trimmed on parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffId(String);

impl StaffId {
    /// Wraps a value that is already known to be valid, such as one read back from storage.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Parses and validates user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty, too long, or contains whitespace.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidStaffId(
                "Staff identifier cannot be empty".to_string(),
            ));
        }
        if trimmed.len() > MAX_STAFF_ID_LEN {
            return Err(DomainError::InvalidStaffId(format!(
                "Staff identifier cannot exceed {MAX_STAFF_ID_LEN} characters"
            )));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidStaffId(format!(
                "Staff identifier '{trimmed}' cannot contain whitespace"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StaffId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A directory entry mapping a username to a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    /// The staff member's username.
    pub staff_id: StaffId,
    /// The name shown on rosters.
    pub display_name: String,
}

impl StaffMember {
    /// Creates a directory entry, validating the display name.
    ///
    /// # Errors
    ///
    /// Returns an error if the display name is empty after trimming.
    pub fn new(staff_id: StaffId, display_name: &str) -> Result<Self, DomainError> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(DomainError::InvalidDisplayName(
                "Display name cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            staff_id,
            display_name: display_name.to_string(),
        })
    }
}
