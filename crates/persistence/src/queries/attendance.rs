// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attendance queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use gigdesk_domain::{AttendanceRecord, EventKind, EventRef, StaffId};

use super::{parse_optional_timestamp, parse_stored_timestamp, reconstruct};
use crate::data_models::{AttendanceListing, AttendanceRow};
use crate::diesel_schema::{attendance, events};
use crate::error::PersistenceError;

fn record_from_row(
    row: AttendanceRow,
    event: EventRef,
) -> Result<AttendanceRecord, PersistenceError> {
    Ok(AttendanceRecord {
        event,
        staff_id: StaffId::new(&row.staff_id),
        check_in_time: parse_optional_timestamp(row.check_in_time.as_deref())?,
        check_out_time: parse_optional_timestamp(row.check_out_time.as_deref())?,
        is_checked_in: row.is_checked_in,
        is_paid: row.is_paid,
    })
}

/// Loads the attendance record for one staff member at one event.
///
/// The caller is expected to have resolved `event_ref` already; only the
/// event id is matched here.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn lookup_attendance(
    conn: &mut SqliteConnection,
    event_ref: EventRef,
    staff_id: &StaffId,
) -> Result<Option<AttendanceRecord>, PersistenceError> {
    let row: Option<AttendanceRow> = attendance::table
        .filter(attendance::event_id.eq(event_ref.id()))
        .filter(attendance::staff_id.eq(staff_id.value()))
        .select(AttendanceRow::as_select())
        .first::<AttendanceRow>(conn)
        .optional()?;

    row.map(|row| record_from_row(row, event_ref)).transpose()
}

/// Lists every attendance record with its event, by event start then username.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn list_attendance(
    conn: &mut SqliteConnection,
) -> Result<Vec<AttendanceListing>, PersistenceError> {
    let rows: Vec<(AttendanceRow, (String, String, String, String))> = attendance::table
        .inner_join(events::table)
        .order((
            events::scheduled_at.asc(),
            events::event_id.asc(),
            attendance::staff_id.asc(),
        ))
        .select((
            AttendanceRow::as_select(),
            (
                events::kind,
                events::client,
                events::event_type,
                events::scheduled_at,
            ),
        ))
        .load::<(AttendanceRow, (String, String, String, String))>(conn)?;

    rows.into_iter()
        .map(|(row, (kind, client, event_type, scheduled_at))| {
            let kind: EventKind = reconstruct(kind.parse())?;
            let event: EventRef = EventRef::new(kind, row.event_id);
            Ok(AttendanceListing {
                record: record_from_row(row, event)?,
                client,
                event_type,
                scheduled_at: parse_stored_timestamp(&scheduled_at)?,
            })
        })
        .collect()
}
