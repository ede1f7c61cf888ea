// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conversion between the business's wall clock and stored UTC instants.
//!
//! Admins enter event dates and times in the business's local timezone.
//! Everything downstream (check-in gating, hours worked) works on UTC
//! instants, and only payout memos convert back to a local calendar date.

use crate::error::DomainError;
use chrono::{NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Timezone used when none is configured.
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// Resolves an IANA timezone name.
///
/// # Errors
///
/// Returns `InvalidTimezone` if the name is unknown.
pub fn parse_timezone(name: &str) -> Result<Tz, DomainError> {
    name.parse()
        .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
}

/// Places a local wall-clock date and time on the UTC timeline.
///
/// During a DST fall-back the earlier of the two instants is used.
///
/// # Errors
///
/// Returns `InvalidSchedule` if the wall-clock time does not exist in `tz`
/// (a DST spring-forward gap) or cannot be represented.
pub fn local_to_utc(
    date: time::Date,
    wall_clock: time::Time,
    tz: Tz,
) -> Result<OffsetDateTime, DomainError> {
    let naive_date = NaiveDate::from_ymd_opt(
        date.year(),
        u32::from(u8::from(date.month())),
        u32::from(date.day()),
    )
    .ok_or_else(|| DomainError::InvalidSchedule {
        reason: format!("Invalid date: {date}"),
    })?;

    let naive_time = NaiveTime::from_hms_opt(
        u32::from(wall_clock.hour()),
        u32::from(wall_clock.minute()),
        u32::from(wall_clock.second()),
    )
    .ok_or_else(|| DomainError::InvalidSchedule {
        reason: format!("Invalid time: {wall_clock}"),
    })?;

    let local = tz
        .from_local_datetime(&naive_date.and_time(naive_time))
        .earliest()
        .ok_or_else(|| DomainError::InvalidSchedule {
            reason: format!("{date} {wall_clock} does not exist in {tz} (skipped by DST)"),
        })?;

    OffsetDateTime::from_unix_timestamp(local.timestamp()).map_err(|e| {
        DomainError::InvalidSchedule {
            reason: e.to_string(),
        }
    })
}

/// Formats the local calendar date of an instant as `MM/DD/YYYY`.
///
/// # Errors
///
/// Returns `InvalidSchedule` if the instant is outside chrono's range.
pub fn local_date_label(instant: OffsetDateTime, tz: Tz) -> Result<String, DomainError> {
    let utc = chrono::DateTime::from_timestamp(instant.unix_timestamp(), 0).ok_or_else(|| {
        DomainError::InvalidSchedule {
            reason: format!("Instant {instant} is out of range"),
        }
    })?;
    Ok(utc.with_timezone(&tz).format("%m/%d/%Y").to_string())
}

/// Formats an instant as RFC 3339 in UTC.
///
/// # Errors
///
/// Returns `TimestampParseError` if the instant cannot be formatted.
pub fn format_timestamp(instant: OffsetDateTime) -> Result<String, DomainError> {
    instant
        .to_offset(time::UtcOffset::UTC)
        .format(&Rfc3339)
        .map_err(|e| DomainError::TimestampParseError {
            value: instant.to_string(),
            error: e.to_string(),
        })
}

/// Parses an RFC 3339 timestamp.
///
/// # Errors
///
/// Returns `TimestampParseError` if the string is not RFC 3339.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, DomainError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| DomainError::TimestampParseError {
        value: value.to_string(),
        error: e.to_string(),
    })
}
