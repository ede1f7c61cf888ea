// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event rows and the version column that guards them.

use diesel::SqliteConnection;
use diesel::prelude::*;
use gigdesk_domain::{BookableEvent, EventRef, RosterKind, format_timestamp};
use num_traits::ToPrimitive;
use tracing::warn;

use super::roster::insert_claims;
use crate::backend::PersistenceBackend;
use crate::diesel_schema::events;
use crate::error::PersistenceError;
use crate::queries::events::lookup_event_version;

pub(crate) fn stored_timestamp(instant: time::OffsetDateTime) -> Result<String, PersistenceError> {
    format_timestamp(instant).map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

fn stored_capacity(value: u32, field: &str) -> Result<i32, PersistenceError> {
    value.to_i32().ok_or_else(|| {
        PersistenceError::SerializationError(format!("{field} out of range: {value}"))
    })
}

/// Inserts an event row and any roster it already carries.
///
/// Returns the new event ID. The stored version starts at 0.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_event(
    conn: &mut SqliteConnection,
    event: &BookableEvent,
) -> Result<i64, PersistenceError> {
    let latitude: Option<f64> = event.location.coordinates.map(|c| c.latitude());
    let longitude: Option<f64> = event.location.coordinates.map(|c| c.longitude());

    diesel::insert_into(events::table)
        .values((
            events::kind.eq(event.kind.as_str()),
            events::client.eq(&event.client),
            events::event_type.eq(&event.event_type),
            events::scheduled_at.eq(stored_timestamp(event.scheduled_at)?),
            events::duration_hours.eq(event.duration_hours),
            events::address.eq(&event.location.address),
            events::latitude.eq(latitude),
            events::longitude.eq(longitude),
            events::staff_needed.eq(stored_capacity(event.staff_needed, "staff_needed")?),
            events::backup_needed.eq(stored_capacity(event.backup_needed, "backup_needed")?),
            events::hourly_pay_cents.eq(event.hourly_pay_cents),
            events::version.eq(0_i64),
        ))
        .execute(conn)?;

    let event_id: i64 = conn.get_last_insert_rowid()?;

    insert_claims(conn, event_id, RosterKind::Primary, &event.claimed_by)?;
    insert_claims(conn, event_id, RosterKind::Backup, &event.backup_claimed_by)?;

    Ok(event_id)
}

/// Explains why a version-conditional write matched no row.
fn conflict_error(
    conn: &mut SqliteConnection,
    event_ref: EventRef,
    expected_version: i64,
) -> Result<PersistenceError, PersistenceError> {
    let kind: String = event_ref.kind().as_str().to_string();
    Ok(match lookup_event_version(conn, event_ref)? {
        None => PersistenceError::EventNotFound {
            kind,
            event_id: event_ref.id(),
        },
        Some(actual_version) => {
            warn!(
                event = %event_ref,
                expected_version,
                actual_version,
                "Rejected write to a concurrently modified event"
            );
            PersistenceError::ConcurrentModification {
                kind,
                event_id: event_ref.id(),
                expected_version,
            }
        }
    })
}

/// Advances an event's version, provided it is still `expected_version`.
///
/// Returns the new version.
///
/// # Errors
///
/// Returns `EventNotFound` if the event is gone and `ConcurrentModification`
/// if another writer got there first.
pub fn bump_version(
    conn: &mut SqliteConnection,
    event_ref: EventRef,
    expected_version: i64,
) -> Result<i64, PersistenceError> {
    let updated: usize = diesel::update(
        events::table
            .filter(events::event_id.eq(event_ref.id()))
            .filter(events::kind.eq(event_ref.kind().as_str()))
            .filter(events::version.eq(expected_version)),
    )
    .set(events::version.eq(events::version + 1_i64))
    .execute(conn)?;

    if updated == 0 {
        return Err(conflict_error(conn, event_ref, expected_version)?);
    }

    Ok(expected_version + 1)
}

/// Deletes an event, provided its version is still `expected_version`.
///
/// Roster and attendance rows go with it. Payouts keep their amounts and
/// lose the event link.
///
/// # Errors
///
/// Returns `EventNotFound` or `ConcurrentModification` as for
/// [`bump_version`].
pub fn delete_event(
    conn: &mut SqliteConnection,
    event_ref: EventRef,
    expected_version: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(
        events::table
            .filter(events::event_id.eq(event_ref.id()))
            .filter(events::kind.eq(event_ref.kind().as_str()))
            .filter(events::version.eq(expected_version)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(conflict_error(conn, event_ref, expected_version)?);
    }

    Ok(())
}
