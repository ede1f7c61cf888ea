// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gigdesk::{Command, apply};
use gigdesk_domain::{RosterKind, StaffId};

use super::{
    create_persisted_event, create_test_actor, create_test_cause, create_test_gig,
};
use crate::Persistence;
use crate::error::PersistenceError;
use crate::mutations::roster::insert_claims;

fn claim(
    persistence: &mut Persistence,
    event: &gigdesk_domain::BookableEvent,
    roster: RosterKind,
    staff: &str,
) -> Result<gigdesk_domain::BookableEvent, PersistenceError> {
    let event_ref = event.event_ref().unwrap();
    let result = apply(
        event,
        event_ref,
        Command::ClaimSlot {
            roster,
            staff_id: StaffId::new(staff),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    persistence.persist_roster_transition(event_ref, event, &result.new_event, &result.audit_event)
}

#[test]
fn test_claim_is_persisted_and_version_advances() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (gig, event_ref) = create_persisted_event(&mut persistence, &create_test_gig(2, 1));

    let after = claim(&mut persistence, &gig, RosterKind::Primary, "alice").unwrap();
    assert_eq!(after.version, 1);

    let loaded = persistence.get_event(event_ref).unwrap().unwrap();
    assert_eq!(loaded.claimed_by, vec![StaffId::new("alice")]);
    assert!(loaded.backup_claimed_by.is_empty());
    assert_eq!(loaded.version, 1);
}

#[test]
fn test_claims_load_in_claim_order() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (gig, event_ref) = create_persisted_event(&mut persistence, &create_test_gig(3, 0));

    let gig = claim(&mut persistence, &gig, RosterKind::Primary, "zoe").unwrap();
    let gig = claim(&mut persistence, &gig, RosterKind::Primary, "adam").unwrap();
    claim(&mut persistence, &gig, RosterKind::Primary, "mia").unwrap();

    let loaded = persistence.get_event(event_ref).unwrap().unwrap();
    assert_eq!(
        loaded.claimed_by,
        vec![
            StaffId::new("zoe"),
            StaffId::new("adam"),
            StaffId::new("mia")
        ]
    );
}

#[test]
fn test_release_keeps_remaining_order() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (gig, event_ref) = create_persisted_event(&mut persistence, &create_test_gig(3, 0));
    let gig = claim(&mut persistence, &gig, RosterKind::Primary, "a").unwrap();
    let gig = claim(&mut persistence, &gig, RosterKind::Primary, "b").unwrap();
    let gig = claim(&mut persistence, &gig, RosterKind::Primary, "c").unwrap();

    let result = apply(
        &gig,
        event_ref,
        Command::ReleaseSlot {
            roster: RosterKind::Primary,
            staff_id: StaffId::new("b"),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    persistence
        .persist_roster_transition(event_ref, &gig, &result.new_event, &result.audit_event)
        .unwrap();

    let loaded = persistence.get_event(event_ref).unwrap().unwrap();
    assert_eq!(loaded.claimed_by, vec![StaffId::new("a"), StaffId::new("c")]);
}

#[test]
fn test_same_staff_may_hold_both_rosters() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (gig, event_ref) = create_persisted_event(&mut persistence, &create_test_gig(1, 1));

    let gig = claim(&mut persistence, &gig, RosterKind::Primary, "alice").unwrap();
    claim(&mut persistence, &gig, RosterKind::Backup, "alice").unwrap();

    let loaded = persistence.get_event(event_ref).unwrap().unwrap();
    assert_eq!(loaded.claimed_by, vec![StaffId::new("alice")]);
    assert_eq!(loaded.backup_claimed_by, vec![StaffId::new("alice")]);
}

#[test]
fn test_stale_transition_is_rejected_without_writing() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (gig, event_ref) = create_persisted_event(&mut persistence, &create_test_gig(1, 0));

    // Both requests load version 0; only the first may win the last slot.
    claim(&mut persistence, &gig, RosterKind::Primary, "alice").unwrap();
    let second = claim(&mut persistence, &gig, RosterKind::Primary, "bob");

    assert!(matches!(
        second,
        Err(PersistenceError::ConcurrentModification {
            expected_version: 0,
            ..
        })
    ));
    let loaded = persistence.get_event(event_ref).unwrap().unwrap();
    assert_eq!(loaded.claimed_by, vec![StaffId::new("alice")]);
    assert_eq!(
        persistence.get_audit_timeline(event_ref).unwrap().len(),
        2,
        "create and the winning claim only"
    );
}

#[test]
fn test_unique_index_rejects_duplicate_claim_rows() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (_, event_ref) = create_persisted_event(&mut persistence, &create_test_gig(2, 0));
    let alice = vec![StaffId::new("alice")];

    insert_claims(&mut persistence.conn, event_ref.id(), RosterKind::Primary, &alice).unwrap();
    let result = insert_claims(&mut persistence.conn, event_ref.id(), RosterKind::Primary, &alice);

    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
}
