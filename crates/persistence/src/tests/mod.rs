// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod attendance_tests;
mod initialization_tests;
mod roster_tests;

use gigdesk_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use gigdesk_domain::{BookableEvent, Coordinates, EventKind, EventRef, Location};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::Persistence;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn create_test_audit_event(target: Option<EventRef>, name: &str) -> AuditEvent {
    let action = Action::new(String::from(name), None);
    let before = StateSnapshot::new(String::from("before"));
    let after = StateSnapshot::new(String::from("after"));
    match target {
        Some(target) => AuditEvent::new(
            target,
            create_test_actor(),
            create_test_cause(),
            action,
            before,
            after,
        ),
        None => AuditEvent::new_global(
            create_test_actor(),
            create_test_cause(),
            action,
            before,
            after,
        ),
    }
}

pub fn miami() -> Coordinates {
    Coordinates::new(25.7617, -80.1918).unwrap()
}

/// An unsaved gig in Miami starting 2025-06-01 18:00 UTC.
pub fn create_test_gig(staff_needed: u32, backup_needed: u32) -> BookableEvent {
    create_test_gig_at(datetime!(2025-06-01 18:00 UTC), staff_needed, backup_needed)
}

pub fn create_test_gig_at(
    scheduled_at: OffsetDateTime,
    staff_needed: u32,
    backup_needed: u32,
) -> BookableEvent {
    BookableEvent {
        event_id: None,
        kind: EventKind::Gig,
        client: String::from("Rivera Wedding"),
        event_type: String::from("Wedding"),
        scheduled_at,
        duration_hours: Some(4.0),
        location: Location {
            address: String::from("100 Biscayne Blvd, Miami, FL"),
            coordinates: Some(miami()),
        },
        staff_needed,
        backup_needed,
        hourly_pay_cents: Some(3000),
        claimed_by: Vec::new(),
        backup_claimed_by: Vec::new(),
        version: 0,
    }
}

/// An unsaved appointment with no recorded coordinates.
pub fn create_test_appointment() -> BookableEvent {
    BookableEvent {
        event_id: None,
        kind: EventKind::Appointment,
        client: String::from("Chen"),
        event_type: String::from("Tasting"),
        scheduled_at: datetime!(2025-06-02 14:00 UTC),
        duration_hours: None,
        location: Location {
            address: String::from("Studio"),
            coordinates: None,
        },
        staff_needed: 1,
        backup_needed: 0,
        hourly_pay_cents: None,
        claimed_by: Vec::new(),
        backup_claimed_by: Vec::new(),
        version: 0,
    }
}

/// Stores `event` and returns it with its ID and reference.
pub fn create_persisted_event(
    persistence: &mut Persistence,
    event: &BookableEvent,
) -> (BookableEvent, EventRef) {
    let stored = persistence
        .create_event(event, &create_test_audit_event(None, "CreateEvent"))
        .expect("event should persist");
    let event_ref = stored.event_ref().expect("stored event has an id");
    (stored, event_ref)
}
