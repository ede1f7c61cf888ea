// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{EventKind, EventRef, RosterKind};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The referenced event does not exist.
    EventNotFound(EventRef),
    /// The roster already holds as many staff as the event needs.
    CapacityExceeded {
        /// The kind of event being claimed.
        kind: EventKind,
        /// The roster that is full.
        roster: RosterKind,
        /// The number of slots on that roster.
        capacity: u32,
    },
    /// The staff member is already on the roster.
    AlreadyClaimed {
        /// The kind of event being claimed.
        kind: EventKind,
        /// The roster that was targeted.
        roster: RosterKind,
        /// The staff identifier.
        staff_id: String,
    },
    /// The staff member is not on the roster.
    NotClaimed {
        /// The kind of event being released.
        kind: EventKind,
        /// The roster that was targeted.
        roster: RosterKind,
        /// The staff identifier.
        staff_id: String,
    },
    /// Check-in was attempted before the event's scheduled start.
    TooEarly {
        /// The scheduled start of the event.
        scheduled_at: time::OffsetDateTime,
        /// The instant the check-in was attempted.
        attempted_at: time::OffsetDateTime,
    },
    /// The caller is outside the geofence around the event.
    TooFarAway {
        /// Great-circle distance from the venue, in miles.
        distance_miles: f64,
        /// The geofence radius, in miles.
        radius_miles: f64,
    },
    /// The caller could not supply a usable position.
    LocationUnavailable {
        /// Why no position was available.
        reason: String,
    },
    /// The event has no coordinates and no fallback venue applies.
    VenueUnlocated(EventRef),
    /// Check-out (or an adjustment) was attempted without an open attendance session.
    NotCheckedIn {
        /// The event.
        event: EventRef,
        /// The staff identifier.
        staff_id: String,
    },
    /// Payment requires a closed attendance session.
    AttendanceIncomplete {
        /// The event.
        event: EventRef,
        /// The staff identifier.
        staff_id: String,
    },
    /// The attendance session ends before it starts.
    InvalidAttendanceWindow {
        /// The check-in time (RFC 3339).
        check_in: String,
        /// The check-out time (RFC 3339).
        check_out: String,
    },
    /// The attendance record has already been paid out.
    AlreadyPaid {
        /// The event.
        event: EventRef,
        /// The staff identifier.
        staff_id: String,
    },
    /// A gig has no hourly pay rate to compute a payout from.
    MissingPayRate(EventRef),
    /// The payout for a session does not fit in a cent amount.
    PayoutOverflow(EventRef),
    /// Staff identifier is empty or invalid.
    InvalidStaffId(String),
    /// Display name is empty or invalid.
    InvalidDisplayName(String),
    /// Coordinates are out of range or not finite.
    InvalidCoordinates {
        /// The rejected latitude.
        latitude: f64,
        /// The rejected longitude.
        longitude: f64,
    },
    /// Event details are missing or invalid.
    InvalidEvent {
        /// The offending field.
        field: &'static str,
        /// Description of the problem.
        reason: String,
    },
    /// Unknown event kind.
    InvalidEventKind(String),
    /// Unknown roster kind.
    InvalidRosterKind(String),
    /// Timezone name could not be resolved.
    InvalidTimezone(String),
    /// A local date/time could not be placed on the timeline.
    InvalidSchedule {
        /// Description of the problem.
        reason: String,
    },
    /// Failed to parse a timestamp string.
    TimestampParseError {
        /// The invalid timestamp string.
        value: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventNotFound(event) => write!(f, "{event} not found"),
            Self::CapacityExceeded { kind, roster, .. } => match roster {
                RosterKind::Primary => write!(f, "Max staff claimed for this {}", kind.noun()),
                RosterKind::Backup => {
                    write!(f, "Max backup staff claimed for this {}", kind.noun())
                }
            },
            Self::AlreadyClaimed {
                kind,
                roster,
                staff_id,
            } => match roster {
                RosterKind::Primary => {
                    write!(f, "User '{staff_id}' has already claimed this {}", kind.noun())
                }
                RosterKind::Backup => write!(
                    f,
                    "User '{staff_id}' has already claimed a backup spot for this {}",
                    kind.noun()
                ),
            },
            Self::NotClaimed {
                kind,
                roster,
                staff_id,
            } => match roster {
                RosterKind::Primary => {
                    write!(f, "User '{staff_id}' has not claimed this {}", kind.noun())
                }
                RosterKind::Backup => write!(
                    f,
                    "User '{staff_id}' has not claimed a backup spot for this {}",
                    kind.noun()
                ),
            },
            Self::TooEarly {
                scheduled_at,
                attempted_at,
            } => write!(
                f,
                "Check-in opens at {scheduled_at}; attempted at {attempted_at}"
            ),
            Self::TooFarAway {
                distance_miles,
                radius_miles,
            } => write!(
                f,
                "You must be within {radius_miles} mile(s) of the event location to check in/out (currently {distance_miles:.2} miles away)"
            ),
            Self::LocationUnavailable { reason } => {
                write!(f, "Current location is unavailable: {reason}")
            }
            Self::VenueUnlocated(event) => {
                write!(f, "{event} has no coordinates to check in against")
            }
            Self::NotCheckedIn { event, staff_id } => {
                write!(f, "User '{staff_id}' is not checked in to {event}")
            }
            Self::AttendanceIncomplete { event, staff_id } => write!(
                f,
                "Attendance for user '{staff_id}' at {event} has no completed check-out"
            ),
            Self::InvalidAttendanceWindow {
                check_in,
                check_out,
            } => write!(
                f,
                "Check-out time {check_out} is earlier than check-in time {check_in}"
            ),
            Self::AlreadyPaid { event, staff_id } => {
                write!(f, "User '{staff_id}' has already been paid for {event}")
            }
            Self::MissingPayRate(event) => write!(f, "{event} has no hourly pay rate"),
            Self::PayoutOverflow(event) => {
                write!(f, "Payout for {event} is too large to record")
            }
            Self::InvalidStaffId(msg) => write!(f, "Invalid staff identifier: {msg}"),
            Self::InvalidDisplayName(msg) => write!(f, "Invalid display name: {msg}"),
            Self::InvalidCoordinates {
                latitude,
                longitude,
            } => write!(f, "Invalid coordinates: ({latitude}, {longitude})"),
            Self::InvalidEvent { field, reason } => {
                write!(f, "Invalid event field '{field}': {reason}")
            }
            Self::InvalidEventKind(value) => write!(
                f,
                "Invalid event kind: '{value}'. Must be 'gig' or 'appointment'"
            ),
            Self::InvalidRosterKind(value) => write!(
                f,
                "Invalid roster: '{value}'. Must be 'primary' or 'backup'"
            ),
            Self::InvalidTimezone(tz) => write!(f, "Invalid timezone: {tz}"),
            Self::InvalidSchedule { reason } => write!(f, "Invalid schedule: {reason}"),
            Self::TimestampParseError { value, error } => {
                write!(f, "Failed to parse timestamp '{value}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
