// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BookableEvent, Coordinates, EARTH_RADIUS_MILES, EventKind, EventRef, Location};
use time::macros::datetime;

pub const MIAMI: (f64, f64) = (25.7617, -80.1918);

pub fn miami() -> Coordinates {
    Coordinates::new(MIAMI.0, MIAMI.1).unwrap()
}

/// Returns a point `miles` due north of `origin`.
pub fn point_north_of(origin: Coordinates, miles: f64) -> Coordinates {
    let latitude = origin.latitude() + (miles / EARTH_RADIUS_MILES).to_degrees();
    Coordinates::new(latitude, origin.longitude()).unwrap()
}

pub fn create_test_gig(staff_needed: u32, backup_needed: u32) -> BookableEvent {
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
        staff_needed,
        backup_needed,
        hourly_pay_cents: Some(3000),
        claimed_by: Vec::new(),
        backup_claimed_by: Vec::new(),
        version: 0,
    }
}

pub fn create_test_appointment() -> BookableEvent {
    BookableEvent {
        event_id: Some(1),
        kind: EventKind::Appointment,
        client: String::from("Jordan Lee"),
        event_type: String::from("Consultation"),
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

pub fn gig_ref() -> EventRef {
    EventRef::new(EventKind::Gig, 1)
}

pub fn appointment_ref() -> EventRef {
    EventRef::new(EventKind::Appointment, 1)
}
