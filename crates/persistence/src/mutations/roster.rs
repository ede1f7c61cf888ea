// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use gigdesk_domain::{RosterKind, StaffId};

use crate::diesel_schema::roster_claims;
use crate::error::PersistenceError;

/// Appends claims to a roster in the order given.
///
/// # Errors
///
/// Returns `UniqueViolation` if a staff member already holds a slot on that
/// roster.
pub fn insert_claims(
    conn: &mut SqliteConnection,
    event_id: i64,
    roster: RosterKind,
    staff_ids: &[StaffId],
) -> Result<(), PersistenceError> {
    // One statement per claim keeps claim_id order equal to roster order.
    for staff_id in staff_ids {
        diesel::insert_into(roster_claims::table)
            .values((
                roster_claims::event_id.eq(event_id),
                roster_claims::roster.eq(roster.as_str()),
                roster_claims::staff_id.eq(staff_id.value()),
            ))
            .execute(conn)?;
    }
    Ok(())
}

/// Removes claims from a roster.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_claims(
    conn: &mut SqliteConnection,
    event_id: i64,
    roster: RosterKind,
    staff_ids: &[StaffId],
) -> Result<(), PersistenceError> {
    if staff_ids.is_empty() {
        return Ok(());
    }
    let values: Vec<&str> = staff_ids.iter().map(StaffId::value).collect();
    diesel::delete(
        roster_claims::table
            .filter(roster_claims::event_id.eq(event_id))
            .filter(roster_claims::roster.eq(roster.as_str()))
            .filter(roster_claims::staff_id.eq_any(values)),
    )
    .execute(conn)?;
    Ok(())
}

/// Rewrites one roster from `before` to `after`.
///
/// Staff present in both keep their original row, so claim order survives
/// unrelated releases.
///
/// # Errors
///
/// Returns an error if a write fails.
pub fn apply_roster_diff(
    conn: &mut SqliteConnection,
    event_id: i64,
    roster: RosterKind,
    before: &[StaffId],
    after: &[StaffId],
) -> Result<(), PersistenceError> {
    let removed: Vec<StaffId> = before
        .iter()
        .filter(|id| !after.contains(id))
        .cloned()
        .collect();
    let added: Vec<StaffId> = after
        .iter()
        .filter(|id| !before.contains(id))
        .cloned()
        .collect();

    delete_claims(conn, event_id, roster, &removed)?;
    insert_claims(conn, event_id, roster, &added)
}
