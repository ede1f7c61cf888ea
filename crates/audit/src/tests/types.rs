// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use gigdesk_domain::{EventKind, EventRef};

fn create_test_parts() -> (Actor, Cause, Action, StateSnapshot, StateSnapshot) {
    (
        Actor::new(String::from("alice"), String::from("staff")),
        Cause::new(String::from("req-1"), String::from("Claim request")),
        Action::new(String::from("ClaimSlot"), Some(String::from("primary"))),
        StateSnapshot::new(String::from("primary=[]")),
        StateSnapshot::new(String::from("primary=[alice]")),
    )
}

#[test]
fn test_action_creation_with_details() {
    let action: Action = Action::new(String::from("CheckIn"), Some(String::from("0.00 mi")));

    assert_eq!(action.name, "CheckIn");
    assert_eq!(action.details, Some(String::from("0.00 mi")));
}

#[test]
fn test_audit_event_carries_target_event() {
    let (actor, cause, action, before, after) = create_test_parts();
    let target = EventRef::new(EventKind::Gig, 3);

    let event: AuditEvent = AuditEvent::new(target, actor.clone(), cause, action, before, after);

    assert_eq!(event.target(), Some(target));
    assert_eq!(event.event_id, None);
    assert_eq!(event.actor, actor);
    assert_eq!(event.after.data, "primary=[alice]");
}

#[test]
fn test_global_audit_event_has_no_target() {
    let (actor, cause, action, before, after) = create_test_parts();

    let event: AuditEvent = AuditEvent::new_global(actor, cause, action, before, after);

    assert_eq!(event.target(), None);
}

#[test]
fn test_audit_events_for_different_kinds_differ() {
    let (actor, cause, action, before, after) = create_test_parts();

    let gig = AuditEvent::new(
        EventRef::new(EventKind::Gig, 1),
        actor.clone(),
        cause.clone(),
        action.clone(),
        before.clone(),
        after.clone(),
    );
    let appointment = AuditEvent::new(
        EventRef::new(EventKind::Appointment, 1),
        actor,
        cause,
        action,
        before,
        after,
    );

    assert_ne!(gig, appointment);
}
