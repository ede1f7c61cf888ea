// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{
    AttendanceTransition, BootstrapResult, PaymentTransition, TransitionResult,
    attendance_snapshot, roster_snapshot,
};
use chrono_tz::Tz;
use gigdesk_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use gigdesk_domain::{
    AttendancePolicy, AttendanceRecord, BookableEvent, EventRef, Location, StaffMember,
    adjust_attendance, check_in, check_out, format_dollars, local_to_utc, quote_payout,
    validate_event,
};

const fn unsupported(command: &Command, transition: &'static str) -> CoreError {
    CoreError::UnsupportedCommand {
        command: command.name(),
        transition,
    }
}

/// Applies a bootstrap command, producing a new record and its audit event.
///
/// Bootstrap commands (`CreateEvent`, `RegisterStaff`) do not operate on an
/// existing event. Event dates and times are interpreted in `tz`.
///
/// # Errors
///
/// Returns an error if the command violates domain rules or is not a
/// bootstrap command.
pub fn apply_bootstrap(
    command: Command,
    tz: Tz,
    actor: Actor,
    cause: Cause,
) -> Result<BootstrapResult, CoreError> {
    let name = command.name();
    match command {
        Command::CreateEvent {
            kind,
            client,
            event_type,
            date,
            start_time,
            duration_hours,
            address,
            coordinates,
            staff_needed,
            backup_needed,
            hourly_pay_cents,
        } => {
            let scheduled_at = local_to_utc(date, start_time, tz)?;
            let event = BookableEvent {
                event_id: None,
                kind,
                client: client.trim().to_string(),
                event_type: event_type.trim().to_string(),
                scheduled_at,
                duration_hours,
                location: Location {
                    address: address.trim().to_string(),
                    coordinates,
                },
                staff_needed,
                backup_needed,
                hourly_pay_cents,
                claimed_by: Vec::new(),
                backup_claimed_by: Vec::new(),
                version: 0,
            };
            validate_event(&event)?;

            let action = Action::new(
                String::from(name),
                Some(format!(
                    "Booked {kind} for {} on {date} at {start_time} ({tz})",
                    event.client
                )),
            );
            let audit_event = AuditEvent::new_global(
                actor,
                cause,
                action,
                StateSnapshot::new(String::from("event=none")),
                roster_snapshot(&event),
            );

            Ok(BootstrapResult {
                event: Some(event),
                staff_member: None,
                audit_event,
            })
        }
        Command::RegisterStaff {
            staff_id,
            display_name,
        } => {
            let member = StaffMember::new(staff_id, &display_name)?;
            let action = Action::new(
                String::from(name),
                Some(format!(
                    "Registered '{}' as {}",
                    member.staff_id, member.display_name
                )),
            );
            let audit_event = AuditEvent::new_global(
                actor,
                cause,
                action,
                StateSnapshot::new(String::from("staff=none")),
                StateSnapshot::new(format!("staff={}", member.staff_id)),
            );

            Ok(BootstrapResult {
                event: None,
                staff_member: Some(member),
                audit_event,
            })
        }
        other => Err(unsupported(&other, "apply_bootstrap")),
    }
}

/// Applies a roster command to an existing event.
///
/// Handles `ClaimSlot`, `ReleaseSlot` and `DeleteEvent`. The input event is
/// never modified.
///
/// # Errors
///
/// Returns an error if the command violates domain rules or is not a roster
/// command.
pub fn apply(
    event: &BookableEvent,
    event_ref: EventRef,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let name = command.name();
    let before = roster_snapshot(event);
    let mut new_event = event.clone();

    let details = match command {
        Command::ClaimSlot { roster, staff_id } => {
            new_event.claim(roster, &staff_id)?;
            format!("'{staff_id}' claimed a {roster} slot on {event_ref}")
        }
        Command::ReleaseSlot { roster, staff_id } => {
            new_event.release(roster, &staff_id)?;
            format!("'{staff_id}' released a {roster} slot on {event_ref}")
        }
        Command::DeleteEvent => format!("Deleted {event_ref} for {}", event.client),
        other => return Err(unsupported(&other, "apply")),
    };

    let after = if name == "DeleteEvent" {
        StateSnapshot::new(String::from("event=deleted"))
    } else {
        roster_snapshot(&new_event)
    };

    let audit_event = AuditEvent::new(
        event_ref,
        actor,
        cause,
        Action::new(String::from(name), Some(details)),
        before,
        after,
    );

    Ok(TransitionResult {
        new_event,
        audit_event,
    })
}

/// Applies an attendance command.
///
/// Handles `CheckIn`, `CheckOut` and `AdjustAttendance`. `existing` is the
/// current record for the command's staff member at this event, if any.
///
/// # Errors
///
/// Returns an error if the command violates domain rules or is not an
/// attendance command.
pub fn apply_attendance(
    event: &BookableEvent,
    event_ref: EventRef,
    existing: Option<&AttendanceRecord>,
    command: Command,
    policy: &AttendancePolicy,
    actor: Actor,
    cause: Cause,
) -> Result<AttendanceTransition, CoreError> {
    let name = command.name();
    let before = attendance_snapshot(existing);

    let (record, distance_miles, session_flags, details) = match command {
        Command::CheckIn {
            staff_id,
            location,
            at,
        } => {
            let outcome = check_in(event, event_ref, existing, &staff_id, &location, at, policy)?;
            let details = format!(
                "'{staff_id}' checked in to {event_ref} {:.2} mi from the venue",
                outcome.distance_miles
            );
            (
                outcome.record,
                Some(outcome.distance_miles),
                (outcome.replaced_open_session, false),
                details,
            )
        }
        Command::CheckOut {
            staff_id,
            location,
            at,
        } => {
            let outcome = check_out(event, event_ref, existing, &staff_id, &location, at, policy)?;
            let details = format!(
                "'{staff_id}' checked out of {event_ref} {:.2} mi from the venue",
                outcome.distance_miles
            );
            (
                outcome.record,
                Some(outcome.distance_miles),
                (false, outcome.repeated_check_out),
                details,
            )
        }
        Command::AdjustAttendance {
            staff_id,
            check_in_time,
            check_out_time,
        } => {
            let record =
                adjust_attendance(event_ref, existing, &staff_id, check_in_time, check_out_time)?;
            let details = format!("Adjusted attendance for '{staff_id}' at {event_ref}");
            (record, None, (false, false), details)
        }
        other => return Err(unsupported(&other, "apply_attendance")),
    };

    let (replaced_open_session, repeated_check_out) = session_flags;

    let audit_event = AuditEvent::new(
        event_ref,
        actor,
        cause,
        Action::new(String::from(name), Some(details)),
        before,
        attendance_snapshot(Some(&record)),
    );

    Ok(AttendanceTransition {
        record,
        distance_miles,
        replaced_open_session,
        repeated_check_out,
        audit_event,
    })
}

/// Applies a `MarkPaid` command to a closed attendance record.
///
/// The payout memo dates the event in `tz`.
///
/// # Errors
///
/// Returns an error if the record cannot be paid or the command is not
/// `MarkPaid`.
pub fn apply_payment(
    event: &BookableEvent,
    record: &AttendanceRecord,
    command: Command,
    tz: Tz,
    actor: Actor,
    cause: Cause,
) -> Result<PaymentTransition, CoreError> {
    let staff_id = match command {
        Command::MarkPaid { staff_id } => staff_id,
        other => return Err(unsupported(&other, "apply_payment")),
    };
    let quote = quote_payout(event, record, tz)?;

    let mut paid = record.clone();
    paid.is_paid = true;

    let action = Action::new(
        String::from("MarkPaid"),
        Some(format!(
            "Paid '{staff_id}' {} for {}",
            format_dollars(quote.amount_cents),
            record.event
        )),
    );
    let audit_event = AuditEvent::new(
        record.event,
        actor,
        cause,
        action,
        attendance_snapshot(Some(record)),
        attendance_snapshot(Some(&paid)),
    );

    Ok(PaymentTransition {
        record: paid,
        quote,
        audit_event,
    })
}
