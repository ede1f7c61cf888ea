// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use gigdesk_audit::Cause;
use gigdesk_domain::{EventKind, EventRef};
use gigdesk_persistence::Persistence;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{
    AttendanceRequest, AuthenticatedActor, ClaimRequest, CreateEventRequest, Role, ServiceConfig,
    create_event,
};

pub const VENUE_LATITUDE: f64 = 25.7617;
pub const VENUE_LONGITUDE: f64 = -80.1918;

/// 2025-06-01 14:00 in New York.
pub const GIG_START: OffsetDateTime = datetime!(2025-06-01 18:00 UTC);

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("office"), Role::Admin)
}

pub fn create_test_staff(id: &str) -> AuthenticatedActor {
    AuthenticatedActor::new(String::from(id), Role::Staff)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn setup_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_gig_request(staff_needed: u32, backup_needed: u32) -> CreateEventRequest {
    CreateEventRequest {
        client: String::from("Rivera Wedding"),
        event_type: String::from("Wedding"),
        date: String::from("2025-06-01"),
        start_time: String::from("14:00"),
        timezone: None,
        duration_hours: Some(4.0),
        address: String::from("100 Biscayne Blvd, Miami, FL"),
        latitude: Some(VENUE_LATITUDE),
        longitude: Some(VENUE_LONGITUDE),
        staff_needed,
        backup_needed,
        hourly_pay_cents: Some(3000),
    }
}

/// Books a gig through the API and returns its reference.
pub fn create_test_gig(
    persistence: &mut Persistence,
    staff_needed: u32,
    backup_needed: u32,
) -> EventRef {
    let response = create_event(
        persistence,
        &ServiceConfig::default(),
        EventKind::Gig,
        create_gig_request(staff_needed, backup_needed),
        &create_test_admin(),
        create_test_cause(),
    )
    .expect("Failed to create gig");
    EventRef::new(EventKind::Gig, response.event.event_id)
}

pub fn own_claim() -> ClaimRequest {
    ClaimRequest::default()
}

/// A location report at the venue.
pub fn at_venue() -> AttendanceRequest {
    AttendanceRequest {
        latitude: Some(VENUE_LATITUDE),
        longitude: Some(VENUE_LONGITUDE),
        ..AttendanceRequest::default()
    }
}
