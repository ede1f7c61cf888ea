// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, EventKind, EventRef, MAX_STAFF_ID_LEN, RosterKind, StaffId, StaffMember};
use std::str::FromStr;

#[test]
fn test_event_kind_accepts_singular_and_plural() {
    assert_eq!(EventKind::from_str("gig").unwrap(), EventKind::Gig);
    assert_eq!(EventKind::from_str("gigs").unwrap(), EventKind::Gig);
    assert_eq!(
        EventKind::from_str("appointments").unwrap(),
        EventKind::Appointment
    );
    assert!(matches!(
        EventKind::from_str("party"),
        Err(DomainError::InvalidEventKind(_))
    ));
}

#[test]
fn test_event_kind_route_segment() {
    assert_eq!(EventKind::Gig.route_segment(), "gigs");
    assert_eq!(EventKind::Appointment.route_segment(), "appointments");
}

#[test]
fn test_roster_kind_round_trips_through_text() {
    for roster in [RosterKind::Primary, RosterKind::Backup] {
        assert_eq!(RosterKind::from_str(roster.as_str()).unwrap(), roster);
    }
    assert!(RosterKind::from_str("standby").is_err());
}

#[test]
fn test_event_refs_of_different_kinds_differ() {
    let gig = EventRef::new(EventKind::Gig, 7);
    let appointment = EventRef::new(EventKind::Appointment, 7);

    assert_ne!(gig, appointment);
    assert_eq!(gig.to_string(), "gig #7");
}

#[test]
fn test_staff_id_parse_trims_whitespace() {
    let staff_id = StaffId::parse("  alice ").unwrap();
    assert_eq!(staff_id.value(), "alice");
}

#[test]
fn test_staff_id_parse_rejects_empty() {
    assert!(matches!(
        StaffId::parse("   "),
        Err(DomainError::InvalidStaffId(_))
    ));
}

#[test]
fn test_staff_id_parse_rejects_inner_whitespace() {
    assert!(StaffId::parse("alice smith").is_err());
}

#[test]
fn test_staff_id_parse_rejects_overlong() {
    let long = "a".repeat(MAX_STAFF_ID_LEN + 1);
    assert!(StaffId::parse(&long).is_err());
}

#[test]
fn test_staff_member_requires_display_name() {
    assert!(matches!(
        StaffMember::new(StaffId::new("alice"), " "),
        Err(DomainError::InvalidDisplayName(_))
    ));
    let member = StaffMember::new(StaffId::new("alice"), " Alice Rivera ").unwrap();
    assert_eq!(member.display_name, "Alice Rivera");
}
