// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gigdesk_audit::{AuditEvent, StateSnapshot};
use gigdesk_domain::{
    AttendanceRecord, BookableEvent, PayoutQuote, StaffId, StaffMember, format_timestamp,
};

fn join_roster(roster: &[StaffId]) -> String {
    roster
        .iter()
        .map(StaffId::value)
        .collect::<Vec<_>>()
        .join(",")
}

/// Summarises an event's rosters for audit purposes.
#[must_use]
pub fn roster_snapshot(event: &BookableEvent) -> StateSnapshot {
    StateSnapshot::new(format!(
        "primary=[{}]/{},backup=[{}]/{}",
        join_roster(&event.claimed_by),
        event.staff_needed,
        join_roster(&event.backup_claimed_by),
        event.backup_needed
    ))
}

/// Summarises an attendance record for audit purposes.
#[must_use]
pub fn attendance_snapshot(record: Option<&AttendanceRecord>) -> StateSnapshot {
    let Some(record) = record else {
        return StateSnapshot::new(String::from("attendance=none"));
    };
    let stamp = |instant: Option<time::OffsetDateTime>| {
        instant
            .and_then(|i| format_timestamp(i).ok())
            .unwrap_or_else(|| String::from("-"))
    };
    StateSnapshot::new(format!(
        "in={},out={},checked_in={},paid={}",
        stamp(record.check_in_time),
        stamp(record.check_out_time),
        record.is_checked_in,
        record.is_paid
    ))
}

/// The result of a successful roster transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The event after the transition. For a deletion this is the event being removed.
    pub new_event: BookableEvent,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of a successful check-in, check-out or adjustment.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceTransition {
    /// The record to persist.
    pub record: AttendanceRecord,
    /// Distance of the caller from the venue, for check-in and check-out.
    pub distance_miles: Option<f64>,
    /// Set when a check-in replaced a session that was still open.
    pub replaced_open_session: bool,
    /// Set when a check-out moved the end of an already closed session.
    pub repeated_check_out: bool,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of marking a session paid.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentTransition {
    /// The record with `is_paid` set.
    pub record: AttendanceRecord,
    /// The computed payout.
    pub quote: PayoutQuote,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of a bootstrap operation.
///
/// Bootstrap operations create new top-level records rather than changing an
/// existing event. The audit event's target is assigned once storage has
/// allocated the new event's identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapResult {
    /// The event to insert, for `CreateEvent`.
    pub event: Option<BookableEvent>,
    /// The directory entry to insert, for `RegisterStaff`.
    pub staff_member: Option<StaffMember>,
    /// The audit event recording this operation.
    pub audit_event: AuditEvent,
}
