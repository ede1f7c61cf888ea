// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_actor, create_test_cause, miami};
use crate::{Command, CoreError, apply_bootstrap};
use gigdesk_domain::{DomainError, EventKind, StaffId};
use time::macros::{date, datetime, time};

fn create_event_command(address: &str) -> Command {
    Command::CreateEvent {
        kind: EventKind::Gig,
        client: String::from("  Rivera Wedding "),
        event_type: String::from("Wedding"),
        date: date!(2025 - 06 - 01),
        start_time: time!(18:00),
        duration_hours: Some(4.0),
        address: String::from(address),
        coordinates: Some(miami()),
        staff_needed: 2,
        backup_needed: 1,
        hourly_pay_cents: Some(3000),
    }
}

#[test]
fn test_create_event_converts_local_time_to_utc() {
    let result = apply_bootstrap(
        create_event_command("100 Biscayne Blvd, Miami, FL"),
        chrono_tz::America::New_York,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let event = result.event.unwrap();
    assert_eq!(event.scheduled_at, datetime!(2025-06-01 22:00 UTC));
    assert_eq!(event.client, "Rivera Wedding");
    assert!(event.claimed_by.is_empty());
    assert_eq!(event.event_id, None);
    assert_eq!(result.audit_event.target(), None);
    assert_eq!(result.audit_event.action.name, "CreateEvent");
}

#[test]
fn test_create_event_rejects_blank_address() {
    let command = create_event_command(" ");

    let result = apply_bootstrap(
        command,
        chrono_tz::America::New_York,
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidEvent {
            field: "address",
            ..
        }))
    ));
}

#[test]
fn test_register_staff_produces_member() {
    let result = apply_bootstrap(
        Command::RegisterStaff {
            staff_id: StaffId::new("alice"),
            display_name: String::from("Alice Rivera"),
        },
        chrono_tz::America::New_York,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let member = result.staff_member.unwrap();
    assert_eq!(member.display_name, "Alice Rivera");
    assert!(result.event.is_none());
    assert_eq!(result.audit_event.after.data, "staff=alice");
}

#[test]
fn test_bootstrap_rejects_roster_commands() {
    let result = apply_bootstrap(
        Command::DeleteEvent,
        chrono_tz::America::New_York,
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::UnsupportedCommand {
            transition: "apply_bootstrap",
            ..
        })
    ));
}
