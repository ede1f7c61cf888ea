// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use gigdesk_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use gigdesk_domain::{EventKind, EventRef};

use super::reconstruct;
use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Diesel Queryable struct for full audit event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventFullRow {
    audit_event_id: i64,
    target_kind: Option<String>,
    target_id: Option<i64>,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
}

fn audit_event_from_row(row: AuditEventFullRow) -> Result<AuditEvent, PersistenceError> {
    let actor_data: ActorData = serde_json::from_str(&row.actor_json)?;
    let cause_data: CauseData = serde_json::from_str(&row.cause_json)?;
    let action_data: ActionData = serde_json::from_str(&row.action_json)?;
    let before_data: StateSnapshotData = serde_json::from_str(&row.before_snapshot_json)?;
    let after_data: StateSnapshotData = serde_json::from_str(&row.after_snapshot_json)?;

    let target: Option<EventRef> = match (row.target_kind, row.target_id) {
        (Some(kind), Some(id)) => {
            let kind: EventKind = reconstruct(kind.parse())?;
            Some(EventRef::new(kind, id))
        }
        _ => None,
    };

    Ok(AuditEvent {
        event_id: Some(row.audit_event_id),
        target,
        actor: Actor::new(actor_data.id, actor_data.actor_type),
        cause: Cause::new(cause_data.id, cause_data.description),
        action: Action::new(action_data.name, action_data.details),
        before: StateSnapshot::new(before_data.data),
        after: StateSnapshot::new(after_data.data),
    })
}

/// Retrieves an audit event by ID.
///
/// # Errors
///
/// Returns an error if the event is not found or cannot be deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    audit_event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let result = audit_events::table
        .filter(audit_events::audit_event_id.eq(audit_event_id))
        .select(AuditEventFullRow::as_select())
        .first::<AuditEventFullRow>(conn);

    let row: AuditEventFullRow = match result {
        Ok(r) => r,
        Err(diesel::result::Error::NotFound) => {
            return Err(PersistenceError::AuditEventNotFound(audit_event_id));
        }
        Err(e) => return Err(PersistenceError::from(e)),
    };

    audit_event_from_row(row)
}

/// Retrieves the audit timeline of one bookable event, oldest first.
///
/// The timeline survives deletion of the event itself.
///
/// # Errors
///
/// Returns an error if events cannot be retrieved or deserialized.
pub fn get_audit_timeline(
    conn: &mut SqliteConnection,
    event_ref: EventRef,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventFullRow> = audit_events::table
        .filter(audit_events::target_kind.eq(event_ref.kind().as_str()))
        .filter(audit_events::target_id.eq(event_ref.id()))
        .order(audit_events::audit_event_id.asc())
        .select(AuditEventFullRow::as_select())
        .load::<AuditEventFullRow>(conn)?;

    rows.into_iter().map(audit_event_from_row).collect()
}
