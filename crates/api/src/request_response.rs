// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use serde::{Deserialize, Serialize};

/// API request to book a gig or an appointment.
///
/// `date` and `start_time` are local to `timezone`, or to the service's
/// configured timezone when it is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    /// Client name.
    pub client: String,
    /// Kind of function, e.g. "Wedding".
    pub event_type: String,
    /// Local date, `YYYY-MM-DD`.
    pub date: String,
    /// Local start time, `HH:MM` or `HH:MM:SS`.
    pub start_time: String,
    /// IANA timezone name.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Planned length in hours.
    #[serde(default)]
    pub duration_hours: Option<f64>,
    /// Venue address.
    pub address: String,
    /// Venue latitude.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Venue longitude.
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Primary slots.
    pub staff_needed: u32,
    /// Backup slots.
    #[serde(default)]
    pub backup_needed: u32,
    /// Hourly pay for gig staff, in cents.
    #[serde(default)]
    pub hourly_pay_cents: Option<i64>,
}

/// One roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimerInfo {
    /// Username.
    pub staff_id: String,
    /// Directory name, or the username when unregistered.
    pub display_name: String,
}

/// A bookable event as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInfo {
    /// The event identifier.
    pub event_id: i64,
    /// "gig" or "appointment".
    pub kind: String,
    /// Client name.
    pub client: String,
    /// Kind of function.
    pub event_type: String,
    /// Start time, RFC 3339 UTC.
    pub scheduled_at: String,
    /// Planned length in hours.
    pub duration_hours: Option<f64>,
    /// Venue address.
    pub address: String,
    /// Venue latitude.
    pub latitude: Option<f64>,
    /// Venue longitude.
    pub longitude: Option<f64>,
    /// Primary slots.
    pub staff_needed: u32,
    /// Backup slots.
    pub backup_needed: u32,
    /// Hourly pay in cents.
    pub hourly_pay_cents: Option<i64>,
    /// Primary roster in claim order.
    pub claimed_by: Vec<ClaimerInfo>,
    /// Backup roster in claim order.
    pub backup_claimed_by: Vec<ClaimerInfo>,
    /// Unclaimed primary slots.
    pub open_slots: u32,
    /// Unclaimed backup slots.
    pub open_backup_slots: u32,
    /// Storage version.
    pub version: i64,
}

/// API response for a created event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventResponse {
    /// The stored event.
    pub event: EventInfo,
    /// A success message.
    pub message: String,
}

/// API response listing events of one kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEventsResponse {
    /// Events, earliest first.
    pub events: Vec<EventInfo>,
}

/// API response for a deleted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteEventResponse {
    /// "gig" or "appointment".
    pub kind: String,
    /// The deleted event's identifier.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to claim or release a slot.
///
/// Staff omit `staff_id` and act as themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    /// Whose slot, for admins acting on someone's behalf.
    #[serde(default)]
    pub staff_id: Option<String>,
}

/// API response for a claim or release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimResponse {
    /// The event after the change.
    pub event: EventInfo,
    /// A success message.
    pub message: String,
}

/// API request to check in or out.
///
/// The caller reports either a position or the reason none is available.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRequest {
    /// Whose attendance, for admins acting on someone's behalf.
    #[serde(default)]
    pub staff_id: Option<String>,
    /// Caller latitude.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Caller longitude.
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Why the caller could not determine a position.
    #[serde(default)]
    pub location_error: Option<String>,
}

/// An attendance record as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceInfo {
    /// "gig" or "appointment".
    pub kind: String,
    /// The event identifier.
    pub event_id: i64,
    /// Username.
    pub staff_id: String,
    /// Most recent check-in, RFC 3339 UTC.
    pub check_in_time: Option<String>,
    /// Most recent check-out, RFC 3339 UTC.
    pub check_out_time: Option<String>,
    /// Whether a session is open.
    pub is_checked_in: bool,
    /// Whether a payout was recorded.
    pub is_paid: bool,
    /// Hours worked, for a closed session.
    pub hours_worked: Option<f64>,
    /// Whether the check-out predates the check-in.
    pub is_inverted: bool,
}

/// API response for a check-in, check-out or adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceResponse {
    /// The stored record.
    pub attendance: AttendanceInfo,
    /// Caller distance from the venue, in miles.
    pub distance_miles: Option<f64>,
    /// A success message.
    pub message: String,
}

/// API request to correct a staff member's attendance times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustAttendanceRequest {
    /// New check-in time, RFC 3339.
    pub check_in_time: String,
    /// New check-out time, RFC 3339.
    pub check_out_time: String,
}

/// One row of the admin attendance report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceListingInfo {
    /// The record.
    pub attendance: AttendanceInfo,
    /// The event's client.
    pub client: String,
    /// The event's type.
    pub event_type: String,
    /// Event start, RFC 3339 UTC.
    pub scheduled_at: String,
}

/// API response for the admin attendance report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListAttendanceResponse {
    /// Records by event start.
    pub records: Vec<AttendanceListingInfo>,
}

/// A payout as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutInfo {
    /// The payout identifier.
    pub payout_id: i64,
    /// Kind of the event paid for.
    pub kind: String,
    /// The event paid for, until it is deleted.
    pub event_id: Option<i64>,
    /// Who was paid.
    pub staff_id: String,
    /// Raw seconds worked.
    pub worked_seconds: i64,
    /// Rate in cents per hour.
    pub hourly_rate_cents: i64,
    /// Amount in cents.
    pub amount_cents: i64,
    /// Amount formatted as dollars.
    pub amount: String,
    /// Payment description.
    pub memo: String,
    /// When the payout was recorded, RFC 3339 UTC.
    pub paid_at: String,
}

/// API response for a recorded payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkPaidResponse {
    /// The payout.
    pub payout: PayoutInfo,
    /// Hours worked, unrounded.
    pub hours_worked: f64,
    /// A success message.
    pub message: String,
}

/// API response listing payouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPayoutsResponse {
    /// Payouts, newest first.
    pub payouts: Vec<PayoutInfo>,
}

/// API request to add a staff member to the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterStaffRequest {
    /// Username.
    pub staff_id: String,
    /// Name shown on rosters.
    pub display_name: String,
}

/// A staff directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffInfo {
    /// Username.
    pub staff_id: String,
    /// Name shown on rosters.
    pub display_name: String,
}

/// API response for a registered staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterStaffResponse {
    /// The new entry.
    pub staff: StaffInfo,
    /// A success message.
    pub message: String,
}

/// API response listing the staff directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListStaffResponse {
    /// Entries by username.
    pub staff: Vec<StaffInfo>,
}

/// An audit event as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventInfo {
    /// The audit event identifier.
    pub audit_event_id: i64,
    /// Who acted.
    pub actor_id: String,
    /// The actor's role.
    pub actor_type: String,
    /// Request identifier.
    pub cause_id: String,
    /// Request description.
    pub cause_description: String,
    /// Action name.
    pub action: String,
    /// Action details.
    pub details: Option<String>,
    /// State before.
    pub before: String,
    /// State after.
    pub after: String,
}

/// API response for an event's audit timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTimelineResponse {
    /// "gig" or "appointment".
    pub kind: String,
    /// The event identifier.
    pub event_id: i64,
    /// Audit events, oldest first.
    pub events: Vec<AuditEventInfo>,
}
