// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::attendance::AttendanceRecord;
use crate::error::DomainError;
use crate::event::BookableEvent;
use crate::schedule::{format_timestamp, local_date_label};
use crate::types::{EventKind, EventRef};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Flat hourly rate for appointments, in cents.
pub const APPOINTMENT_HOURLY_RATE_CENTS: i64 = 2500;

/// Highest hourly rate a gig may offer, in cents ($100,000.00).
pub const MAX_HOURLY_PAY_CENTS: i64 = 10_000_000;

const SECONDS_PER_HOUR: i64 = 3600;

/// A computed payout for one closed attendance session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutQuote {
    /// Raw seconds between check-in and check-out.
    pub worked_seconds: i64,
    /// Hours worked, unrounded.
    pub hours_worked: f64,
    /// Rate applied, in cents per hour.
    pub hourly_rate_cents: i64,
    /// Amount owed, rounded to the nearest cent.
    pub amount_cents: i64,
    /// Description attached to the payment.
    pub memo: String,
}

/// Returns the hourly rate that applies to an event.
///
/// # Errors
///
/// Returns `MissingPayRate` for a gig with no hourly pay.
pub fn hourly_rate_cents(event: &BookableEvent, event_ref: EventRef) -> Result<i64, DomainError> {
    match event.kind {
        EventKind::Appointment => Ok(APPOINTMENT_HOURLY_RATE_CENTS),
        EventKind::Gig => event
            .hourly_pay_cents
            .ok_or(DomainError::MissingPayRate(event_ref)),
    }
}

/// Computes what a staff member is owed for a session.
///
/// # Errors
///
/// Returns `AlreadyPaid`, `AttendanceIncomplete` for an open or never-closed
/// session, `InvalidAttendanceWindow` for a check-out before the check-in, or
/// `MissingPayRate`, or `PayoutOverflow` if the amount does not fit in an
/// `i64`.
pub fn quote_payout(
    event: &BookableEvent,
    record: &AttendanceRecord,
    tz: Tz,
) -> Result<PayoutQuote, DomainError> {
    let event_ref = record.event;
    if record.is_paid {
        return Err(DomainError::AlreadyPaid {
            event: event_ref,
            staff_id: record.staff_id.value().to_string(),
        });
    }
    let (Some(check_in), Some(check_out)) = (record.check_in_time, record.check_out_time) else {
        return Err(DomainError::AttendanceIncomplete {
            event: event_ref,
            staff_id: record.staff_id.value().to_string(),
        });
    };
    if record.is_checked_in {
        return Err(DomainError::AttendanceIncomplete {
            event: event_ref,
            staff_id: record.staff_id.value().to_string(),
        });
    }
    if check_out < check_in {
        return Err(DomainError::InvalidAttendanceWindow {
            check_in: format_timestamp(check_in)?,
            check_out: format_timestamp(check_out)?,
        });
    }

    let rate = hourly_rate_cents(event, event_ref)?;
    let worked_seconds = (check_out - check_in).whole_seconds();
    let amount_cents =
        prorate_cents(worked_seconds, rate).ok_or(DomainError::PayoutOverflow(event_ref))?;
    let hours_worked = record.hours_worked().unwrap_or_default();
    let memo = format!(
        "Payment for {} ({}) on {}, worked {hours_worked:.2} hours",
        event.client,
        event.event_type,
        local_date_label(event.scheduled_at, tz)?
    );

    Ok(PayoutQuote {
        worked_seconds,
        hours_worked,
        hourly_rate_cents: rate,
        amount_cents,
        memo,
    })
}

/// Pays `seconds` at `rate_cents` per hour, rounding half up to the cent.
///
/// Returns `None` on overflow.
#[must_use]
pub const fn prorate_cents(seconds: i64, rate_cents: i64) -> Option<i64> {
    match seconds.checked_mul(rate_cents) {
        Some(product) => match product.checked_add(SECONDS_PER_HOUR / 2) {
            Some(total) => Some(total / SECONDS_PER_HOUR),
            None => None,
        },
        None => None,
    }
}

/// Formats cents as dollars, e.g. `$50.00`.
#[must_use]
pub fn format_dollars(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}
