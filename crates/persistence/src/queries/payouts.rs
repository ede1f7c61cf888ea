// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use gigdesk_domain::{EventKind, EventRef, StaffId};

use super::{parse_stored_timestamp, reconstruct};
use crate::data_models::{PayoutRecord, PayoutRow};
use crate::diesel_schema::payouts;
use crate::error::PersistenceError;

/// Lists recorded payouts, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn list_payouts(conn: &mut SqliteConnection) -> Result<Vec<PayoutRecord>, PersistenceError> {
    let rows: Vec<PayoutRow> = payouts::table
        .order(payouts::payout_id.desc())
        .select(PayoutRow::as_select())
        .load::<PayoutRow>(conn)?;

    rows.into_iter()
        .map(|row| {
            let kind: EventKind = reconstruct(row.event_kind.parse())?;
            Ok(PayoutRecord {
                payout_id: row.payout_id,
                kind,
                event: row.event_id.map(|id| EventRef::new(kind, id)),
                staff_id: StaffId::new(&row.staff_id),
                worked_seconds: row.worked_seconds,
                hourly_rate_cents: row.hourly_rate_cents,
                amount_cents: row.amount_cents,
                memo: row.memo,
                paid_at: parse_stored_timestamp(&row.paid_at)?,
            })
        })
        .collect()
}
