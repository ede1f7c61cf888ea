// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::geo::Coordinates;
use crate::payout::MAX_HOURLY_PAY_CENTS;
use crate::types::{EventKind, EventRef, RosterKind, StaffId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Where an event takes place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Street address as entered by the admin.
    pub address: String,
    /// Venue coordinates, if known.
    pub coordinates: Option<Coordinates>,
}

/// A gig or appointment with two independently sized staffing rosters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookableEvent {
    /// Identifier within the event's kind. `None` until persisted.
    pub event_id: Option<i64>,
    /// Gig or appointment.
    pub kind: EventKind,
    /// The client the event is booked for.
    pub client: String,
    /// Free-form description such as "Wedding" or "Mixology class".
    pub event_type: String,
    /// The instant the event begins. Check-in is closed before this.
    pub scheduled_at: OffsetDateTime,
    /// Expected length of the event.
    pub duration_hours: Option<f64>,
    /// Venue.
    pub location: Location,
    /// Primary roster capacity.
    pub staff_needed: u32,
    /// Backup roster capacity.
    pub backup_needed: u32,
    /// Hourly pay in cents. Appointments use the flat appointment rate instead.
    pub hourly_pay_cents: Option<i64>,
    /// Primary roster in claim order.
    pub claimed_by: Vec<StaffId>,
    /// Backup roster in claim order.
    pub backup_claimed_by: Vec<StaffId>,
    /// Bumped on every persisted roster or attendance change.
    pub version: i64,
}

impl BookableEvent {
    /// Returns the event reference, or `None` for an unsaved event.
    #[must_use]
    pub fn event_ref(&self) -> Option<EventRef> {
        self.event_id.map(|id| EventRef::new(self.kind, id))
    }

    /// Returns the given roster in claim order.
    #[must_use]
    pub fn roster(&self, roster: RosterKind) -> &[StaffId] {
        match roster {
            RosterKind::Primary => &self.claimed_by,
            RosterKind::Backup => &self.backup_claimed_by,
        }
    }

    /// Returns the capacity of the given roster.
    #[must_use]
    pub const fn capacity(&self, roster: RosterKind) -> u32 {
        match roster {
            RosterKind::Primary => self.staff_needed,
            RosterKind::Backup => self.backup_needed,
        }
    }

    /// Returns how many slots remain on the given roster.
    #[must_use]
    pub fn open_slots(&self, roster: RosterKind) -> u32 {
        let taken = u32::try_from(self.roster(roster).len()).unwrap_or(u32::MAX);
        self.capacity(roster).saturating_sub(taken)
    }

    /// Returns whether the staff member holds a slot on the given roster.
    #[must_use]
    pub fn has_claimed(&self, roster: RosterKind, staff_id: &StaffId) -> bool {
        self.roster(roster).contains(staff_id)
    }

    /// Appends a staff member to a roster.
    ///
    /// Capacity is checked before membership, so a full roster reports
    /// `CapacityExceeded` even to someone already on it.
    ///
    /// # Errors
    ///
    /// Returns `CapacityExceeded` or `AlreadyClaimed`.
    pub fn claim(&mut self, roster: RosterKind, staff_id: &StaffId) -> Result<(), DomainError> {
        if self.open_slots(roster) == 0 {
            return Err(DomainError::CapacityExceeded {
                kind: self.kind,
                roster,
                capacity: self.capacity(roster),
            });
        }
        if self.has_claimed(roster, staff_id) {
            return Err(DomainError::AlreadyClaimed {
                kind: self.kind,
                roster,
                staff_id: staff_id.value().to_string(),
            });
        }
        self.roster_mut(roster).push(staff_id.clone());
        Ok(())
    }

    /// Removes one occurrence of a staff member from a roster.
    ///
    /// # Errors
    ///
    /// Returns `NotClaimed` if the staff member is not on the roster.
    pub fn release(&mut self, roster: RosterKind, staff_id: &StaffId) -> Result<(), DomainError> {
        let kind = self.kind;
        let list = self.roster_mut(roster);
        let Some(position) = list.iter().position(|s| s == staff_id) else {
            return Err(DomainError::NotClaimed {
                kind,
                roster,
                staff_id: staff_id.value().to_string(),
            });
        };
        list.remove(position);
        Ok(())
    }

    /// Resolves the venue used for the geofence.
    ///
    /// Appointments without coordinates fall back to `fallback`. Gigs without
    /// coordinates have no venue.
    #[must_use]
    pub fn venue(&self, fallback: Coordinates) -> Option<Coordinates> {
        match (self.location.coordinates, self.kind) {
            (Some(coordinates), _) => Some(coordinates),
            (None, EventKind::Appointment) => Some(fallback),
            (None, EventKind::Gig) => None,
        }
    }

    fn roster_mut(&mut self, roster: RosterKind) -> &mut Vec<StaffId> {
        match roster {
            RosterKind::Primary => &mut self.claimed_by,
            RosterKind::Backup => &mut self.backup_claimed_by,
        }
    }
}

/// Validates the admin-supplied fields of an event.
///
/// # Errors
///
/// Returns `InvalidEvent` naming the first offending field.
pub fn validate_event(event: &BookableEvent) -> Result<(), DomainError> {
    if event.client.trim().is_empty() {
        return Err(DomainError::InvalidEvent {
            field: "client",
            reason: "Client cannot be empty".to_string(),
        });
    }
    if event.event_type.trim().is_empty() {
        return Err(DomainError::InvalidEvent {
            field: "event_type",
            reason: "Event type cannot be empty".to_string(),
        });
    }
    if event.location.address.trim().is_empty() {
        return Err(DomainError::InvalidEvent {
            field: "address",
            reason: "Address cannot be empty".to_string(),
        });
    }
    if let Some(hours) = event
        .duration_hours
        .filter(|hours| !hours.is_finite() || *hours <= 0.0)
    {
        return Err(DomainError::InvalidEvent {
            field: "duration_hours",
            reason: format!("Duration must be a positive number of hours, got {hours}"),
        });
    }
    if let Some(cents) = event.hourly_pay_cents.filter(|cents| *cents < 0) {
        return Err(DomainError::InvalidEvent {
            field: "hourly_pay_cents",
            reason: format!("Hourly pay cannot be negative, got {cents}"),
        });
    }
    if let Some(cents) = event
        .hourly_pay_cents
        .filter(|cents| *cents > MAX_HOURLY_PAY_CENTS)
    {
        return Err(DomainError::InvalidEvent {
            field: "hourly_pay_cents",
            reason: format!(
                "Hourly pay cannot exceed {MAX_HOURLY_PAY_CENTS} cents, got {cents}"
            ),
        });
    }
    for roster in [RosterKind::Primary, RosterKind::Backup] {
        let list = event.roster(roster);
        let capacity = usize::try_from(event.capacity(roster)).unwrap_or(usize::MAX);
        if list.len() > capacity {
            return Err(DomainError::InvalidEvent {
                field: "roster",
                reason: format!(
                    "{roster} roster holds {} staff but only {capacity} are needed",
                    list.len()
                ),
            });
        }
        for (index, staff_id) in list.iter().enumerate() {
            if list[..index].contains(staff_id) {
                return Err(DomainError::InvalidEvent {
                    field: "roster",
                    reason: format!("'{staff_id}' appears twice on the {roster} roster"),
                });
            }
        }
    }
    Ok(())
}
