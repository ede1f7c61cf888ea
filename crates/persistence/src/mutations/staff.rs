// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use gigdesk_domain::StaffMember;

use crate::diesel_schema::staff;
use crate::error::PersistenceError;

/// Adds a staff member to the directory.
///
/// # Errors
///
/// Returns `UniqueViolation` if the username is taken.
pub fn insert_staff(
    conn: &mut SqliteConnection,
    member: &StaffMember,
) -> Result<(), PersistenceError> {
    diesel::insert_into(staff::table)
        .values((
            staff::staff_id.eq(member.staff_id.value()),
            staff::display_name.eq(&member.display_name),
        ))
        .execute(conn)?;
    Ok(())
}
