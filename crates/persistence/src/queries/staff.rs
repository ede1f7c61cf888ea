// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff directory queries.

use std::collections::HashMap;

use diesel::SqliteConnection;
use diesel::prelude::*;
use gigdesk_domain::{StaffId, StaffMember};

use crate::data_models::StaffRow;
use crate::diesel_schema::staff;
use crate::error::PersistenceError;

/// Lists the staff directory ordered by username.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_staff(conn: &mut SqliteConnection) -> Result<Vec<StaffMember>, PersistenceError> {
    let rows: Vec<StaffRow> = staff::table
        .order(staff::staff_id.asc())
        .select(StaffRow::as_select())
        .load::<StaffRow>(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| StaffMember {
            staff_id: StaffId::new(&row.staff_id),
            display_name: row.display_name,
        })
        .collect())
}

/// Resolves display names for the given usernames.
///
/// A username missing from the directory maps to itself.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn display_names(
    conn: &mut SqliteConnection,
    staff_ids: &[&StaffId],
) -> Result<HashMap<String, String>, PersistenceError> {
    let wanted: Vec<String> = staff_ids
        .iter()
        .map(|id| id.value().to_string())
        .collect();

    let rows: Vec<StaffRow> = staff::table
        .filter(staff::staff_id.eq_any(&wanted))
        .select(StaffRow::as_select())
        .load::<StaffRow>(conn)?;

    let mut names: HashMap<String, String> = rows
        .into_iter()
        .map(|row| (row.staff_id, row.display_name))
        .collect();
    for id in wanted {
        names.entry(id.clone()).or_insert(id);
    }

    Ok(names)
}
