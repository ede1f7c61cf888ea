// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Geofenced check-in and check-out through the API.

use gigdesk_domain::{EventKind, EventRef};
use time::Duration;

use crate::{
    AdjustAttendanceRequest, ApiError, AttendanceRequest, CreateEventRequest, ServiceConfig,
    adjust_attendance, check_in, check_out, create_event, list_attendance,
};

use super::helpers::{
    GIG_START, at_venue, create_gig_request, create_test_admin, create_test_cause,
    create_test_gig, create_test_staff, setup_test_persistence,
};

fn assert_rule(result: Result<impl std::fmt::Debug, ApiError>, expected_rule: &str) {
    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => assert_eq!(rule, expected_rule),
        other => panic!("Expected {expected_rule} violation, got {other:?}"),
    }
}

/// Fort Lauderdale, roughly 25 miles north of the venue.
fn far_away() -> AttendanceRequest {
    AttendanceRequest {
        latitude: Some(26.1224),
        longitude: Some(-80.1373),
        ..AttendanceRequest::default()
    }
}

#[test]
fn test_check_in_and_out_records_hours() {
    let mut persistence = setup_test_persistence();
    let config = ServiceConfig::default();
    let gig = create_test_gig(&mut persistence, 1, 0);
    let alice = create_test_staff("alice");

    let checked_in = check_in(
        &mut persistence,
        &config,
        gig,
        &at_venue(),
        &alice,
        create_test_cause(),
        GIG_START + Duration::minutes(5),
    )
    .unwrap();
    assert!(checked_in.attendance.is_checked_in);
    assert_eq!(
        checked_in.attendance.check_in_time.as_deref(),
        Some("2025-06-01T18:05:00Z")
    );
    assert_eq!(checked_in.distance_miles, Some(0.0));

    let checked_out = check_out(
        &mut persistence,
        &config,
        gig,
        &at_venue(),
        &alice,
        create_test_cause(),
        GIG_START + Duration::minutes(125),
    )
    .unwrap();
    assert!(!checked_out.attendance.is_checked_in);
    assert_eq!(checked_out.attendance.hours_worked, Some(2.0));
    assert!(!checked_out.attendance.is_inverted);
}

#[test]
fn test_check_in_before_start_is_too_early() {
    let mut persistence = setup_test_persistence();
    let gig = create_test_gig(&mut persistence, 1, 0);

    let result = check_in(
        &mut persistence,
        &ServiceConfig::default(),
        gig,
        &at_venue(),
        &create_test_staff("alice"),
        create_test_cause(),
        GIG_START - Duration::seconds(1),
    );

    assert_rule(result, "check_in_window");
}

#[test]
fn test_check_in_at_exact_start_is_allowed() {
    let mut persistence = setup_test_persistence();
    let gig = create_test_gig(&mut persistence, 1, 0);

    let result = check_in(
        &mut persistence,
        &ServiceConfig::default(),
        gig,
        &at_venue(),
        &create_test_staff("alice"),
        create_test_cause(),
        GIG_START,
    );

    assert!(result.is_ok());
}

#[test]
fn test_check_in_requires_a_location() {
    let mut persistence = setup_test_persistence();
    let gig = create_test_gig(&mut persistence, 1, 0);
    let reports = [
        AttendanceRequest::default(),
        AttendanceRequest {
            location_error: Some(String::from("User denied Geolocation")),
            ..at_venue()
        },
        AttendanceRequest {
            latitude: Some(25.7617),
            ..AttendanceRequest::default()
        },
    ];

    for report in &reports {
        let result = check_in(
            &mut persistence,
            &ServiceConfig::default(),
            gig,
            report,
            &create_test_staff("alice"),
            create_test_cause(),
            GIG_START,
        );
        assert_rule(result, "location_required");
    }
}

#[test]
fn test_check_in_outside_geofence_is_rejected() {
    let mut persistence = setup_test_persistence();
    let gig = create_test_gig(&mut persistence, 1, 0);

    let result = check_in(
        &mut persistence,
        &ServiceConfig::default(),
        gig,
        &far_away(),
        &create_test_staff("alice"),
        create_test_cause(),
        GIG_START,
    );

    assert_rule(result, "geofence");
}

#[test]
fn test_gig_without_coordinates_cannot_be_checked_into() {
    let mut persistence = setup_test_persistence();
    let request = CreateEventRequest {
        latitude: None,
        longitude: None,
        ..create_gig_request(1, 0)
    };
    let response = create_event(
        &mut persistence,
        &ServiceConfig::default(),
        EventKind::Gig,
        request,
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();
    let gig = EventRef::new(EventKind::Gig, response.event.event_id);

    let result = check_in(
        &mut persistence,
        &ServiceConfig::default(),
        gig,
        &at_venue(),
        &create_test_staff("alice"),
        create_test_cause(),
        GIG_START,
    );

    assert_rule(result, "venue_location");
}

#[test]
fn test_appointment_without_coordinates_uses_fallback_venue() {
    let mut persistence = setup_test_persistence();
    let request = CreateEventRequest {
        latitude: None,
        longitude: None,
        ..create_gig_request(1, 0)
    };
    let response = create_event(
        &mut persistence,
        &ServiceConfig::default(),
        EventKind::Appointment,
        request,
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();
    let appointment = EventRef::new(EventKind::Appointment, response.event.event_id);

    let result = check_in(
        &mut persistence,
        &ServiceConfig::default(),
        appointment,
        &at_venue(),
        &create_test_staff("alice"),
        create_test_cause(),
        GIG_START,
    );

    assert!(result.is_ok());
}

#[test]
fn test_check_out_without_record_is_rejected() {
    let mut persistence = setup_test_persistence();
    let gig = create_test_gig(&mut persistence, 1, 0);

    let result = check_out(
        &mut persistence,
        &ServiceConfig::default(),
        gig,
        &at_venue(),
        &create_test_staff("alice"),
        create_test_cause(),
        GIG_START,
    );

    assert_rule(result, "open_session_required");
}

#[test]
fn test_check_out_outside_geofence_is_checked_first() {
    let mut persistence = setup_test_persistence();
    let gig = create_test_gig(&mut persistence, 1, 0);

    let result = check_out(
        &mut persistence,
        &ServiceConfig::default(),
        gig,
        &far_away(),
        &create_test_staff("alice"),
        create_test_cause(),
        GIG_START,
    );

    assert_rule(result, "geofence");
}

#[test]
fn test_repeated_check_out_moves_check_out_time() {
    let mut persistence = setup_test_persistence();
    let config = ServiceConfig::default();
    let gig = create_test_gig(&mut persistence, 1, 0);
    let alice = create_test_staff("alice");

    check_in(
        &mut persistence,
        &config,
        gig,
        &at_venue(),
        &alice,
        create_test_cause(),
        GIG_START,
    )
    .unwrap();
    for hours in [2, 3] {
        check_out(
            &mut persistence,
            &config,
            gig,
            &at_venue(),
            &alice,
            create_test_cause(),
            GIG_START + Duration::hours(hours),
        )
        .unwrap();
    }

    let records = list_attendance(&mut persistence, &create_test_admin())
        .unwrap()
        .records;
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].attendance.check_out_time.as_deref(),
        Some("2025-06-01T21:00:00Z")
    );
    assert_eq!(records[0].attendance.hours_worked, Some(3.0));
}

#[test]
fn test_repeated_check_in_restarts_session() {
    let mut persistence = setup_test_persistence();
    let config = ServiceConfig::default();
    let gig = create_test_gig(&mut persistence, 1, 0);
    let alice = create_test_staff("alice");

    for minutes in [0, 30] {
        check_in(
            &mut persistence,
            &config,
            gig,
            &at_venue(),
            &alice,
            create_test_cause(),
            GIG_START + Duration::minutes(minutes),
        )
        .unwrap();
    }
    let response = check_out(
        &mut persistence,
        &config,
        gig,
        &at_venue(),
        &alice,
        create_test_cause(),
        GIG_START + Duration::minutes(90),
    )
    .unwrap();

    assert_eq!(response.attendance.hours_worked, Some(1.0));
}

#[test]
fn test_adjust_attendance_rewrites_both_times() {
    let mut persistence = setup_test_persistence();
    let config = ServiceConfig::default();
    let gig = create_test_gig(&mut persistence, 1, 0);
    check_in(
        &mut persistence,
        &config,
        gig,
        &at_venue(),
        &create_test_staff("alice"),
        create_test_cause(),
        GIG_START,
    )
    .unwrap();

    let response = adjust_attendance(
        &mut persistence,
        &config,
        gig,
        "alice",
        &AdjustAttendanceRequest {
            check_in_time: String::from("2025-06-01T18:00:00Z"),
            check_out_time: String::from("2025-06-01T21:30:00Z"),
        },
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();

    assert!(!response.attendance.is_checked_in);
    assert_eq!(response.attendance.hours_worked, Some(3.5));
}

#[test]
fn test_adjust_attendance_rejects_inverted_window() {
    let mut persistence = setup_test_persistence();
    let config = ServiceConfig::default();
    let gig = create_test_gig(&mut persistence, 1, 0);
    check_in(
        &mut persistence,
        &config,
        gig,
        &at_venue(),
        &create_test_staff("alice"),
        create_test_cause(),
        GIG_START,
    )
    .unwrap();

    let result = adjust_attendance(
        &mut persistence,
        &config,
        gig,
        "alice",
        &AdjustAttendanceRequest {
            check_in_time: String::from("2025-06-01T21:00:00Z"),
            check_out_time: String::from("2025-06-01T18:00:00Z"),
        },
        &create_test_admin(),
        create_test_cause(),
    );

    assert_rule(result, "attendance_window");
}

#[test]
fn test_adjust_attendance_rejects_malformed_timestamp() {
    let mut persistence = setup_test_persistence();
    let gig = create_test_gig(&mut persistence, 1, 0);

    let result = adjust_attendance(
        &mut persistence,
        &ServiceConfig::default(),
        gig,
        "alice",
        &AdjustAttendanceRequest {
            check_in_time: String::from("yesterday"),
            check_out_time: String::from("2025-06-01T18:00:00Z"),
        },
        &create_test_admin(),
        create_test_cause(),
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_list_attendance_includes_event_details() {
    let mut persistence = setup_test_persistence();
    let gig = create_test_gig(&mut persistence, 1, 0);
    check_in(
        &mut persistence,
        &ServiceConfig::default(),
        gig,
        &at_venue(),
        &create_test_staff("alice"),
        create_test_cause(),
        GIG_START,
    )
    .unwrap();

    let listing = list_attendance(&mut persistence, &create_test_admin()).unwrap();

    assert_eq!(listing.records.len(), 1);
    let row = &listing.records[0];
    assert_eq!(row.client, "Rivera Wedding");
    assert_eq!(row.scheduled_at, "2025-06-01T18:00:00Z");
    assert_eq!(row.attendance.staff_id, "alice");
    assert!(row.attendance.is_checked_in);
}
