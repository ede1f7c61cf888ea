// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event and roster queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use gigdesk_domain::{
    BookableEvent, Coordinates, EventKind, EventRef, Location, RosterKind, StaffId,
};
use num_traits::ToPrimitive;

use super::{parse_stored_timestamp, reconstruct};
use crate::data_models::{ClaimRow, EventRow};
use crate::diesel_schema::{events, roster_claims};
use crate::error::PersistenceError;

fn load_claims(
    conn: &mut SqliteConnection,
    event_ids: &[i64],
) -> Result<Vec<ClaimRow>, PersistenceError> {
    Ok(roster_claims::table
        .filter(roster_claims::event_id.eq_any(event_ids))
        .order(roster_claims::claim_id.asc())
        .select(ClaimRow::as_select())
        .load::<ClaimRow>(conn)?)
}

fn roster_from_claims(claims: &[ClaimRow], event_id: i64, roster: RosterKind) -> Vec<StaffId> {
    claims
        .iter()
        .filter(|claim| claim.event_id == event_id && claim.roster == roster.as_str())
        .map(|claim| StaffId::new(&claim.staff_id))
        .collect()
}

fn stored_capacity(value: i32, field: &str) -> Result<u32, PersistenceError> {
    value.to_u32().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("{field} out of range: {value}"))
    })
}

fn event_from_row(row: EventRow, claims: &[ClaimRow]) -> Result<BookableEvent, PersistenceError> {
    let kind: EventKind = reconstruct(row.kind.parse())?;
    let coordinates: Option<Coordinates> = match (row.latitude, row.longitude) {
        (Some(latitude), Some(longitude)) => {
            Some(reconstruct(Coordinates::new(latitude, longitude))?)
        }
        _ => None,
    };

    Ok(BookableEvent {
        event_id: Some(row.event_id),
        kind,
        client: row.client,
        event_type: row.event_type,
        scheduled_at: parse_stored_timestamp(&row.scheduled_at)?,
        duration_hours: row.duration_hours,
        location: Location {
            address: row.address,
            coordinates,
        },
        staff_needed: stored_capacity(row.staff_needed, "staff_needed")?,
        backup_needed: stored_capacity(row.backup_needed, "backup_needed")?,
        hourly_pay_cents: row.hourly_pay_cents,
        claimed_by: roster_from_claims(claims, row.event_id, RosterKind::Primary),
        backup_claimed_by: roster_from_claims(claims, row.event_id, RosterKind::Backup),
        version: row.version,
    })
}

/// Loads one event with both rosters in claim order.
///
/// Returns `None` when no event of that kind has that id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn lookup_event(
    conn: &mut SqliteConnection,
    event_ref: EventRef,
) -> Result<Option<BookableEvent>, PersistenceError> {
    let row: Option<EventRow> = events::table
        .filter(events::event_id.eq(event_ref.id()))
        .filter(events::kind.eq(event_ref.kind().as_str()))
        .select(EventRow::as_select())
        .first::<EventRow>(conn)
        .optional()?;

    match row {
        Some(row) => {
            let claims: Vec<ClaimRow> = load_claims(conn, &[row.event_id])?;
            Ok(Some(event_from_row(row, &claims)?))
        }
        None => Ok(None),
    }
}

/// Lists every event of a kind, earliest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn list_events(
    conn: &mut SqliteConnection,
    kind: EventKind,
) -> Result<Vec<BookableEvent>, PersistenceError> {
    let rows: Vec<EventRow> = events::table
        .filter(events::kind.eq(kind.as_str()))
        .order((events::scheduled_at.asc(), events::event_id.asc()))
        .select(EventRow::as_select())
        .load::<EventRow>(conn)?;

    let ids: Vec<i64> = rows.iter().map(|row| row.event_id).collect();
    let claims: Vec<ClaimRow> = load_claims(conn, &ids)?;

    rows.into_iter()
        .map(|row| event_from_row(row, &claims))
        .collect()
}

/// Returns the stored version of an event, or `None` if it does not exist.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn lookup_event_version(
    conn: &mut SqliteConnection,
    event_ref: EventRef,
) -> Result<Option<i64>, PersistenceError> {
    Ok(events::table
        .filter(events::event_id.eq(event_ref.id()))
        .filter(events::kind.eq(event_ref.kind().as_str()))
        .select(events::version)
        .first::<i64>(conn)
        .optional()?)
}
