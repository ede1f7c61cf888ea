// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use gigdesk_domain::{AttendanceRecord, EventKind, EventRef, StaffId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::diesel_schema::{attendance, events, payouts, roster_claims, staff};

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = events)]
pub(crate) struct EventRow {
    pub event_id: i64,
    pub kind: String,
    pub client: String,
    pub event_type: String,
    pub scheduled_at: String,
    pub duration_hours: Option<f64>,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub staff_needed: i32,
    pub backup_needed: i32,
    pub hourly_pay_cents: Option<i64>,
    pub version: i64,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = roster_claims)]
pub(crate) struct ClaimRow {
    pub event_id: i64,
    pub roster: String,
    pub staff_id: String,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = attendance)]
pub(crate) struct AttendanceRow {
    pub event_id: i64,
    pub staff_id: String,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub is_checked_in: bool,
    pub is_paid: bool,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = payouts)]
pub(crate) struct PayoutRow {
    pub payout_id: i64,
    pub event_id: Option<i64>,
    pub event_kind: String,
    pub staff_id: String,
    pub worked_seconds: i64,
    pub hourly_rate_cents: i64,
    pub amount_cents: i64,
    pub memo: String,
    pub paid_at: String,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = staff)]
pub(crate) struct StaffRow {
    pub staff_id: String,
    pub display_name: String,
}

/// An attendance record together with the event it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceListing {
    /// The record.
    pub record: AttendanceRecord,
    /// The event's client.
    pub client: String,
    /// The event's type.
    pub event_type: String,
    /// When the event starts.
    pub scheduled_at: OffsetDateTime,
}

/// A recorded payout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutRecord {
    /// Storage identifier.
    pub payout_id: i64,
    /// Kind of the event paid for.
    pub kind: EventKind,
    /// The event paid for. `None` once the event has been deleted.
    pub event: Option<EventRef>,
    /// Who was paid.
    pub staff_id: StaffId,
    /// Raw seconds worked.
    pub worked_seconds: i64,
    /// Rate applied, in cents per hour.
    pub hourly_rate_cents: i64,
    /// Amount paid, in cents.
    pub amount_cents: i64,
    /// Payment description.
    pub memo: String,
    /// When the payout was recorded.
    pub paid_at: OffsetDateTime,
}
