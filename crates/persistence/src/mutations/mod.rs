// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! The submodules hold single-table writes. The functions here combine them
//! with the audit event for the change inside one immediate transaction, so
//! a change and its audit record are stored together or not at all.
//!
//! Every write to an existing event first advances the event's `version`
//! with a conditional update. A writer holding a stale copy of the event
//! matches no row and gets `ConcurrentModification` back.

pub mod attendance;
pub mod audit;
pub mod events;
pub mod roster;
pub mod staff;

use diesel::SqliteConnection;
use gigdesk_audit::AuditEvent;
use gigdesk_domain::{
    AttendanceRecord, BookableEvent, EventRef, PayoutQuote, RosterKind, StaffMember,
};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Inserts a new event and its creation audit event.
///
/// The audit event's target is set to the newly assigned ID. Returns the
/// stored event.
///
/// # Errors
///
/// Returns an error if either write fails; nothing is stored in that case.
pub fn persist_new_event(
    conn: &mut SqliteConnection,
    event: &BookableEvent,
    audit_event: &AuditEvent,
) -> Result<BookableEvent, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let event_id: i64 = events::insert_event(conn, event)?;
        let event_ref: EventRef = EventRef::new(event.kind, event_id);

        let mut audit_event: AuditEvent = audit_event.clone();
        audit_event.target = Some(event_ref);
        audit::persist_audit_event(conn, &audit_event)?;

        info!(event = %event_ref, client = %event.client, "Created event");

        let mut stored: BookableEvent = event.clone();
        stored.event_id = Some(event_id);
        stored.version = 0;
        Ok(stored)
    })
}

/// Deletes an event that is still at `expected_version`.
///
/// # Errors
///
/// Returns `EventNotFound` or `ConcurrentModification` if the event is
/// gone or has changed.
pub fn persist_event_deletion(
    conn: &mut SqliteConnection,
    event_ref: EventRef,
    expected_version: i64,
    audit_event: &AuditEvent,
) -> Result<(), PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        events::delete_event(conn, event_ref, expected_version)?;
        audit::persist_audit_event(conn, audit_event)?;
        info!(event = %event_ref, "Deleted event");
        Ok(())
    })
}

/// Stores a roster change computed from `before`.
///
/// Returns `after` with its version advanced.
///
/// # Errors
///
/// Returns `ConcurrentModification` if the stored event is no longer at
/// `before.version`, and `UniqueViolation` if a claim already exists.
pub fn persist_roster_transition(
    conn: &mut SqliteConnection,
    event_ref: EventRef,
    before: &BookableEvent,
    after: &BookableEvent,
    audit_event: &AuditEvent,
) -> Result<BookableEvent, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let version: i64 = events::bump_version(conn, event_ref, before.version)?;
        for kind in [RosterKind::Primary, RosterKind::Backup] {
            roster::apply_roster_diff(
                conn,
                event_ref.id(),
                kind,
                before.roster(kind),
                after.roster(kind),
            )?;
        }
        audit::persist_audit_event(conn, audit_event)?;

        debug!(event = %event_ref, version, "Persisted roster transition");

        let mut stored: BookableEvent = after.clone();
        stored.version = version;
        Ok(stored)
    })
}

/// Stores an attendance record written against an event at
/// `expected_version`.
///
/// Returns the event's new version.
///
/// # Errors
///
/// Returns `EventNotFound` or `ConcurrentModification` if the event is
/// gone or has changed.
pub fn persist_attendance(
    conn: &mut SqliteConnection,
    event_ref: EventRef,
    expected_version: i64,
    record: &AttendanceRecord,
    audit_event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let version: i64 = events::bump_version(conn, event_ref, expected_version)?;
        attendance::upsert_attendance(conn, record)?;
        audit::persist_audit_event(conn, audit_event)?;

        debug!(
            event = %event_ref,
            staff_id = %record.staff_id,
            checked_in = record.is_checked_in,
            "Persisted attendance"
        );
        Ok(version)
    })
}

/// Marks a record paid and records the payout.
///
/// Returns the payout ID.
///
/// # Errors
///
/// Returns `EventNotFound` or `ConcurrentModification` if the event is
/// gone or has changed.
pub fn persist_payment(
    conn: &mut SqliteConnection,
    event_ref: EventRef,
    expected_version: i64,
    record: &AttendanceRecord,
    quote: &PayoutQuote,
    paid_at: OffsetDateTime,
    audit_event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        events::bump_version(conn, event_ref, expected_version)?;
        attendance::upsert_attendance(conn, record)?;
        let payout_id: i64 = attendance::insert_payout(conn, record, quote, paid_at)?;
        audit::persist_audit_event(conn, audit_event)?;

        info!(
            event = %event_ref,
            staff_id = %record.staff_id,
            payout_id,
            amount_cents = quote.amount_cents,
            "Recorded payout"
        );
        Ok(payout_id)
    })
}

/// Adds a staff member to the directory along with its audit event.
///
/// # Errors
///
/// Returns `UniqueViolation` if the username is taken.
pub fn persist_staff_registration(
    conn: &mut SqliteConnection,
    member: &StaffMember,
    audit_event: &AuditEvent,
) -> Result<(), PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        staff::insert_staff(conn, member)?;
        audit::persist_audit_event(conn, audit_event)?;
        info!(staff_id = %member.staff_id, "Registered staff member");
        Ok(())
    })
}
