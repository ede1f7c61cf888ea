// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gigdesk_domain::{CallerLocation, Coordinates, EventKind, RosterKind, StaffId};
use time::{Date, OffsetDateTime, Time};

/// A command represents user or admin intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Book a new gig or appointment.
    CreateEvent {
        /// Gig or appointment.
        kind: EventKind,
        /// The client.
        client: String,
        /// Free-form event type.
        event_type: String,
        /// Local calendar date of the start.
        date: Date,
        /// Local wall-clock start time.
        start_time: Time,
        /// Expected length in hours.
        duration_hours: Option<f64>,
        /// Street address.
        address: String,
        /// Venue coordinates, if known.
        coordinates: Option<Coordinates>,
        /// Primary roster capacity.
        staff_needed: u32,
        /// Backup roster capacity.
        backup_needed: u32,
        /// Hourly pay in cents.
        hourly_pay_cents: Option<i64>,
    },
    /// Remove an event together with its rosters and attendance.
    DeleteEvent,
    /// Add a staff member to a roster.
    ClaimSlot {
        /// Which roster.
        roster: RosterKind,
        /// The staff member claiming.
        staff_id: StaffId,
    },
    /// Remove a staff member from a roster.
    ReleaseSlot {
        /// Which roster.
        roster: RosterKind,
        /// The staff member releasing.
        staff_id: StaffId,
    },
    /// Start an attendance session.
    CheckIn {
        /// The staff member.
        staff_id: StaffId,
        /// Where the caller says they are.
        location: CallerLocation,
        /// When the request arrived.
        at: OffsetDateTime,
    },
    /// End an attendance session.
    CheckOut {
        /// The staff member.
        staff_id: StaffId,
        /// Where the caller says they are.
        location: CallerLocation,
        /// When the request arrived.
        at: OffsetDateTime,
    },
    /// Correct both timestamps of an attendance record.
    AdjustAttendance {
        /// The staff member.
        staff_id: StaffId,
        /// Corrected check-in.
        check_in_time: OffsetDateTime,
        /// Corrected check-out.
        check_out_time: OffsetDateTime,
    },
    /// Record a payout for a closed attendance session.
    MarkPaid {
        /// The staff member.
        staff_id: StaffId,
    },
    /// Add a staff member to the directory.
    RegisterStaff {
        /// Username.
        staff_id: StaffId,
        /// Name shown on rosters.
        display_name: String,
    },
}

impl Command {
    /// Returns the command's name, used as the audit action name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateEvent { .. } => "CreateEvent",
            Self::DeleteEvent => "DeleteEvent",
            Self::ClaimSlot { .. } => "ClaimSlot",
            Self::ReleaseSlot { .. } => "ReleaseSlot",
            Self::CheckIn { .. } => "CheckIn",
            Self::CheckOut { .. } => "CheckOut",
            Self::AdjustAttendance { .. } => "AdjustAttendance",
            Self::MarkPaid { .. } => "MarkPaid",
            Self::RegisterStaff { .. } => "RegisterStaff",
        }
    }
}
