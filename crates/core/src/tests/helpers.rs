// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gigdesk_audit::{Actor, Cause};
use gigdesk_domain::{BookableEvent, Coordinates, EventKind, EventRef, Location};
use time::macros::datetime;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-123"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Admin request"))
}

pub fn miami() -> Coordinates {
    Coordinates::new(25.7617, -80.1918).unwrap()
}

pub fn create_test_gig_ref() -> EventRef {
    EventRef::new(EventKind::Gig, 1)
}

/// Gig G1: one primary slot, one backup slot, Miami, 2025-06-01 18:00 UTC.
pub fn create_test_gig() -> BookableEvent {
    BookableEvent {
        event_id: Some(1),
        kind: EventKind::Gig,
        client: String::from("Rivera Wedding"),
        event_type: String::from("Wedding"),
        scheduled_at: datetime!(2025-06-01 18:00 UTC),
        duration_hours: Some(4.0),
        location: Location {
            address: String::from("100 Biscayne Blvd, Miami, FL"),
            coordinates: Some(miami()),
        },
        staff_needed: 1,
        backup_needed: 1,
        hourly_pay_cents: Some(3000),
        claimed_by: Vec::new(),
        backup_claimed_by: Vec::new(),
        version: 0,
    }
}
