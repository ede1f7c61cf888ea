// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Geofenced check-in and check-out rules.

use crate::error::DomainError;
use crate::event::BookableEvent;
use crate::geo::{
    CallerLocation, Coordinates, DEFAULT_APPOINTMENT_VENUE, GEOFENCE_RADIUS_MILES, Geofence,
};
use crate::schedule::format_timestamp;
use crate::types::{EventRef, StaffId};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// Seconds in an hour.
const SECONDS_PER_HOUR: f64 = 3600.0;

/// One staff member's attendance at one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The event attended.
    pub event: EventRef,
    /// The staff member.
    pub staff_id: StaffId,
    /// Most recent check-in.
    pub check_in_time: Option<OffsetDateTime>,
    /// Most recent check-out.
    pub check_out_time: Option<OffsetDateTime>,
    /// Whether a check-in has not yet been followed by a check-out.
    pub is_checked_in: bool,
    /// Whether a payout has been recorded.
    pub is_paid: bool,
}

impl AttendanceRecord {
    /// Creates a record for a first check-in.
    #[must_use]
    pub const fn checked_in(event: EventRef, staff_id: StaffId, at: OffsetDateTime) -> Self {
        Self {
            event,
            staff_id,
            check_in_time: Some(at),
            check_out_time: None,
            is_checked_in: true,
            is_paid: false,
        }
    }

    /// Returns whether the check-out precedes the check-in.
    ///
    /// A re-check-in after a check-out leaves the stale check-out in place,
    /// which produces this state until the next check-out.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        matches!(
            (self.check_in_time, self.check_out_time),
            (Some(check_in), Some(check_out)) if check_out < check_in
        )
    }

    /// Returns the worked time of a closed, well-ordered session.
    #[must_use]
    pub fn worked_duration(&self) -> Option<Duration> {
        if self.is_checked_in {
            return None;
        }
        match (self.check_in_time, self.check_out_time) {
            (Some(check_in), Some(check_out)) if check_out >= check_in => {
                Some(check_out - check_in)
            }
            _ => None,
        }
    }

    /// Returns hours worked, unrounded, for a closed session.
    #[must_use]
    pub fn hours_worked(&self) -> Option<f64> {
        self.worked_duration()
            .and_then(|worked| worked.whole_seconds().to_f64())
            .map(|seconds| seconds / SECONDS_PER_HOUR)
    }
}

/// Where check-ins are accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttendancePolicy {
    /// Venue for appointments without coordinates.
    pub fallback_venue: Coordinates,
    /// Geofence radius in miles.
    pub radius_miles: f64,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            fallback_venue: DEFAULT_APPOINTMENT_VENUE,
            radius_miles: GEOFENCE_RADIUS_MILES,
        }
    }
}

impl AttendancePolicy {
    /// Builds the geofence around an event's venue.
    ///
    /// # Errors
    ///
    /// Returns `VenueUnlocated` for a gig without coordinates.
    pub fn geofence_for(
        &self,
        event: &BookableEvent,
        event_ref: EventRef,
    ) -> Result<Geofence, DomainError> {
        event
            .venue(self.fallback_venue)
            .map(|venue| Geofence::new(venue, self.radius_miles))
            .ok_or(DomainError::VenueUnlocated(event_ref))
    }
}

/// The result of a successful check-in or check-out.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceOutcome {
    /// The record to persist.
    pub record: AttendanceRecord,
    /// How far the caller was from the venue, in miles.
    pub distance_miles: f64,
    /// Set when a check-in replaced a session that was still open.
    pub replaced_open_session: bool,
    /// Set when a check-out moved the end of an already closed session.
    pub repeated_check_out: bool,
}

fn locate(
    event: &BookableEvent,
    event_ref: EventRef,
    location: &CallerLocation,
    policy: &AttendancePolicy,
) -> Result<f64, DomainError> {
    let caller = location.require()?;
    policy.geofence_for(event, event_ref)?.admit(caller)
}

/// Decides a check-in.
///
/// Rules are checked in order: not before the scheduled start, a usable
/// caller position, a locatable venue, then the geofence. A repeat check-in
/// resets the check-in time and keeps any earlier check-out.
///
/// # Errors
///
/// Returns `TooEarly`, `LocationUnavailable`, `VenueUnlocated` or `TooFarAway`.
pub fn check_in(
    event: &BookableEvent,
    event_ref: EventRef,
    existing: Option<&AttendanceRecord>,
    staff_id: &StaffId,
    location: &CallerLocation,
    now: OffsetDateTime,
    policy: &AttendancePolicy,
) -> Result<AttendanceOutcome, DomainError> {
    if now < event.scheduled_at {
        return Err(DomainError::TooEarly {
            scheduled_at: event.scheduled_at,
            attempted_at: now,
        });
    }
    let distance_miles = locate(event, event_ref, location, policy)?;

    let (record, replaced_open_session) = match existing {
        Some(previous) => {
            let mut record = previous.clone();
            record.check_in_time = Some(now);
            record.is_checked_in = true;
            (record, previous.is_checked_in)
        }
        None => (
            AttendanceRecord::checked_in(event_ref, staff_id.clone(), now),
            false,
        ),
    };

    Ok(AttendanceOutcome {
        record,
        distance_miles,
        replaced_open_session,
        repeated_check_out: false,
    })
}

/// Decides a check-out.
///
/// The caller's position is checked before the record, so a caller outside
/// the fence learns that first. Checking out of a closed session moves its
/// check-out time forward.
///
/// # Errors
///
/// Returns `LocationUnavailable`, `VenueUnlocated`, `TooFarAway` or
/// `NotCheckedIn`.
pub fn check_out(
    event: &BookableEvent,
    event_ref: EventRef,
    existing: Option<&AttendanceRecord>,
    staff_id: &StaffId,
    location: &CallerLocation,
    now: OffsetDateTime,
    policy: &AttendancePolicy,
) -> Result<AttendanceOutcome, DomainError> {
    let distance_miles = locate(event, event_ref, location, policy)?;

    let Some(previous) = existing else {
        return Err(DomainError::NotCheckedIn {
            event: event_ref,
            staff_id: staff_id.value().to_string(),
        });
    };

    let mut record = previous.clone();
    record.check_out_time = Some(now);
    record.is_checked_in = false;

    Ok(AttendanceOutcome {
        record,
        distance_miles,
        replaced_open_session: false,
        repeated_check_out: !previous.is_checked_in,
    })
}

/// Applies an administrative correction to both timestamps.
///
/// # Errors
///
/// Returns `NotCheckedIn` if there is no record, `AlreadyPaid` if the record
/// has been paid, or `InvalidAttendanceWindow` if the check-out precedes the
/// check-in.
pub fn adjust_attendance(
    event_ref: EventRef,
    existing: Option<&AttendanceRecord>,
    staff_id: &StaffId,
    check_in_time: OffsetDateTime,
    check_out_time: OffsetDateTime,
) -> Result<AttendanceRecord, DomainError> {
    let Some(previous) = existing else {
        return Err(DomainError::NotCheckedIn {
            event: event_ref,
            staff_id: staff_id.value().to_string(),
        });
    };
    if previous.is_paid {
        return Err(DomainError::AlreadyPaid {
            event: event_ref,
            staff_id: staff_id.value().to_string(),
        });
    }
    if check_out_time < check_in_time {
        return Err(DomainError::InvalidAttendanceWindow {
            check_in: format_timestamp(check_in_time)?,
            check_out: format_timestamp(check_out_time)?,
        });
    }

    let mut record = previous.clone();
    record.check_in_time = Some(check_in_time);
    record.check_out_time = Some(check_out_time);
    record.is_checked_in = false;
    Ok(record)
}
