// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attendance and payout rows.

use diesel::SqliteConnection;
use diesel::prelude::*;
use gigdesk_domain::{AttendanceRecord, PayoutQuote};
use time::OffsetDateTime;

use super::events::stored_timestamp;
use crate::backend::PersistenceBackend;
use crate::diesel_schema::{attendance, payouts};
use crate::error::PersistenceError;

/// Inserts or overwrites the record for `(event, staff)`.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_attendance(
    conn: &mut SqliteConnection,
    record: &AttendanceRecord,
) -> Result<(), PersistenceError> {
    let check_in_time: Option<String> = record.check_in_time.map(stored_timestamp).transpose()?;
    let check_out_time: Option<String> =
        record.check_out_time.map(stored_timestamp).transpose()?;

    diesel::insert_into(attendance::table)
        .values((
            attendance::event_id.eq(record.event.id()),
            attendance::staff_id.eq(record.staff_id.value()),
            attendance::check_in_time.eq(check_in_time.as_deref()),
            attendance::check_out_time.eq(check_out_time.as_deref()),
            attendance::is_checked_in.eq(record.is_checked_in),
            attendance::is_paid.eq(record.is_paid),
        ))
        .on_conflict((attendance::event_id, attendance::staff_id))
        .do_update()
        .set((
            attendance::check_in_time.eq(check_in_time.as_deref()),
            attendance::check_out_time.eq(check_out_time.as_deref()),
            attendance::is_checked_in.eq(record.is_checked_in),
            attendance::is_paid.eq(record.is_paid),
        ))
        .execute(conn)?;

    Ok(())
}

/// Records a payout and returns its ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_payout(
    conn: &mut SqliteConnection,
    record: &AttendanceRecord,
    quote: &PayoutQuote,
    paid_at: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(payouts::table)
        .values((
            payouts::event_id.eq(Some(record.event.id())),
            payouts::event_kind.eq(record.event.kind().as_str()),
            payouts::staff_id.eq(record.staff_id.value()),
            payouts::worked_seconds.eq(quote.worked_seconds),
            payouts::hourly_rate_cents.eq(quote.hourly_rate_cents),
            payouts::amount_cents.eq(quote.amount_cents),
            payouts::memo.eq(&quote.memo),
            payouts::paid_at.eq(stored_timestamp(paid_at)?),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
