// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gigdesk::{Command, apply_attendance, apply_payment};
use gigdesk_domain::{
    AttendancePolicy, AttendanceRecord, BookableEvent, CallerLocation, EventKind, EventRef,
    StaffId,
};
use time::OffsetDateTime;
use time::macros::datetime;

use super::{
    create_persisted_event, create_test_actor, create_test_audit_event, create_test_cause,
    create_test_gig, miami,
};
use crate::Persistence;
use crate::error::PersistenceError;

fn record_attendance(
    persistence: &mut Persistence,
    event_ref: EventRef,
    command: Command,
) -> AttendanceRecord {
    let event: BookableEvent = persistence.get_event(event_ref).unwrap().unwrap();
    let staff_id = match &command {
        Command::CheckIn { staff_id, .. } | Command::CheckOut { staff_id, .. } => {
            staff_id.clone()
        }
        _ => panic!("attendance command expected"),
    };
    let existing = persistence.get_attendance(event_ref, &staff_id).unwrap();
    let transition = apply_attendance(
        &event,
        event_ref,
        existing.as_ref(),
        command,
        &AttendancePolicy::default(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    persistence
        .persist_attendance(
            event_ref,
            event.version,
            &transition.record,
            &transition.audit_event,
        )
        .unwrap();
    transition.record
}

fn check_in(persistence: &mut Persistence, event_ref: EventRef, at: OffsetDateTime) {
    record_attendance(
        persistence,
        event_ref,
        Command::CheckIn {
            staff_id: StaffId::new("alice"),
            location: CallerLocation::Known(miami()),
            at,
        },
    );
}

fn check_out(persistence: &mut Persistence, event_ref: EventRef, at: OffsetDateTime) {
    record_attendance(
        persistence,
        event_ref,
        Command::CheckOut {
            staff_id: StaffId::new("alice"),
            location: CallerLocation::Known(miami()),
            at,
        },
    );
}

#[test]
fn test_check_in_creates_record() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (_, event_ref) = create_persisted_event(&mut persistence, &create_test_gig(1, 1));

    check_in(&mut persistence, event_ref, datetime!(2025-06-01 18:05 UTC));

    let record = persistence
        .get_attendance(event_ref, &StaffId::new("alice"))
        .unwrap()
        .unwrap();
    assert!(record.is_checked_in);
    assert_eq!(record.check_in_time, Some(datetime!(2025-06-01 18:05 UTC)));
    assert!(record.check_out_time.is_none());
    assert!(!record.is_paid);
}

#[test]
fn test_attendance_write_advances_event_version() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (_, event_ref) = create_persisted_event(&mut persistence, &create_test_gig(1, 1));

    check_in(&mut persistence, event_ref, datetime!(2025-06-01 18:05 UTC));

    assert_eq!(persistence.get_event(event_ref).unwrap().unwrap().version, 1);
}

#[test]
fn test_check_out_updates_the_same_record() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (_, event_ref) = create_persisted_event(&mut persistence, &create_test_gig(1, 1));

    check_in(&mut persistence, event_ref, datetime!(2025-06-01 18:05 UTC));
    check_out(&mut persistence, event_ref, datetime!(2025-06-01 20:05 UTC));

    let listings = persistence.list_attendance().unwrap();
    assert_eq!(listings.len(), 1, "one record per (event, staff)");
    let record = &listings[0].record;
    assert!(!record.is_checked_in);
    assert_eq!(record.check_out_time, Some(datetime!(2025-06-01 20:05 UTC)));
    assert_eq!(record.hours_worked(), Some(2.0));
}

#[test]
fn test_re_check_in_overwrites_check_in_time() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (_, event_ref) = create_persisted_event(&mut persistence, &create_test_gig(1, 1));

    check_in(&mut persistence, event_ref, datetime!(2025-06-01 18:05 UTC));
    check_out(&mut persistence, event_ref, datetime!(2025-06-01 19:00 UTC));
    check_in(&mut persistence, event_ref, datetime!(2025-06-01 19:30 UTC));

    let record = persistence
        .get_attendance(event_ref, &StaffId::new("alice"))
        .unwrap()
        .unwrap();
    assert!(record.is_checked_in);
    assert_eq!(record.check_in_time, Some(datetime!(2025-06-01 19:30 UTC)));
    assert_eq!(record.check_out_time, Some(datetime!(2025-06-01 19:00 UTC)));
}

#[test]
fn test_stale_attendance_write_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (gig, event_ref) = create_persisted_event(&mut persistence, &create_test_gig(1, 1));
    check_in(&mut persistence, event_ref, datetime!(2025-06-01 18:05 UTC));

    let record = AttendanceRecord::checked_in(
        event_ref,
        StaffId::new("bob"),
        datetime!(2025-06-01 18:10 UTC),
    );
    let result = persistence.persist_attendance(
        event_ref,
        gig.version,
        &record,
        &create_test_audit_event(Some(event_ref), "CheckIn"),
    );

    assert!(matches!(
        result,
        Err(PersistenceError::ConcurrentModification { .. })
    ));
    assert!(
        persistence
            .get_attendance(event_ref, &StaffId::new("bob"))
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_list_attendance_includes_event_details() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (_, event_ref) = create_persisted_event(&mut persistence, &create_test_gig(1, 1));
    check_in(&mut persistence, event_ref, datetime!(2025-06-01 18:05 UTC));

    let listings = persistence.list_attendance().unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].client, "Rivera Wedding");
    assert_eq!(listings[0].event_type, "Wedding");
    assert_eq!(listings[0].scheduled_at, datetime!(2025-06-01 18:00 UTC));
    assert_eq!(listings[0].record.event.kind(), EventKind::Gig);
    assert!(listings[0].record.hours_worked().is_none(), "session still open");
}

#[test]
fn test_payment_records_payout_and_marks_paid() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (_, event_ref) = create_persisted_event(&mut persistence, &create_test_gig(1, 1));
    check_in(&mut persistence, event_ref, datetime!(2025-06-01 18:00 UTC));
    check_out(&mut persistence, event_ref, datetime!(2025-06-01 20:00 UTC));

    let event = persistence.get_event(event_ref).unwrap().unwrap();
    let record = persistence
        .get_attendance(event_ref, &StaffId::new("alice"))
        .unwrap()
        .unwrap();
    let payment = apply_payment(
        &event,
        &record,
        Command::MarkPaid {
            staff_id: StaffId::new("alice"),
        },
        chrono_tz::America::New_York,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let payout_id = persistence
        .persist_payment(
            event_ref,
            event.version,
            &payment.record,
            &payment.quote,
            datetime!(2025-06-02 09:00 UTC),
            &payment.audit_event,
        )
        .unwrap();

    let payouts = persistence.list_payouts().unwrap();
    assert_eq!(payouts.len(), 1);
    assert_eq!(payouts[0].payout_id, payout_id);
    assert_eq!(payouts[0].event, Some(event_ref));
    assert_eq!(payouts[0].amount_cents, 6000);
    assert_eq!(payouts[0].worked_seconds, 7200);
    assert_eq!(payouts[0].paid_at, datetime!(2025-06-02 09:00 UTC));

    let stored = persistence
        .get_attendance(event_ref, &StaffId::new("alice"))
        .unwrap()
        .unwrap();
    assert!(stored.is_paid);
}

#[test]
fn test_payout_survives_event_deletion() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (_, event_ref) = create_persisted_event(&mut persistence, &create_test_gig(1, 1));
    check_in(&mut persistence, event_ref, datetime!(2025-06-01 18:00 UTC));
    check_out(&mut persistence, event_ref, datetime!(2025-06-01 19:00 UTC));

    let event = persistence.get_event(event_ref).unwrap().unwrap();
    let record = persistence
        .get_attendance(event_ref, &StaffId::new("alice"))
        .unwrap()
        .unwrap();
    let payment = apply_payment(
        &event,
        &record,
        Command::MarkPaid {
            staff_id: StaffId::new("alice"),
        },
        chrono_tz::America::New_York,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    persistence
        .persist_payment(
            event_ref,
            event.version,
            &payment.record,
            &payment.quote,
            datetime!(2025-06-02 09:00 UTC),
            &payment.audit_event,
        )
        .unwrap();

    persistence
        .delete_event(
            event_ref,
            event.version + 1,
            &create_test_audit_event(Some(event_ref), "DeleteEvent"),
        )
        .unwrap();

    assert!(
        persistence.list_attendance().unwrap().is_empty(),
        "attendance goes with the event"
    );
    let payouts = persistence.list_payouts().unwrap();
    assert_eq!(payouts.len(), 1);
    assert!(payouts[0].event.is_none());
    assert_eq!(payouts[0].amount_cents, 3000);
}
