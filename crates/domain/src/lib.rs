// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod attendance;
mod error;
mod event;
mod geo;
mod payout;
mod schedule;
mod types;

#[cfg(test)]
mod tests;

pub use attendance::{
    AttendanceOutcome, AttendancePolicy, AttendanceRecord, adjust_attendance, check_in,
    check_out,
};
pub use error::DomainError;
pub use event::{BookableEvent, Location, validate_event};
pub use geo::{
    CallerLocation, Coordinates, DEFAULT_APPOINTMENT_VENUE, EARTH_RADIUS_MILES,
    GEOFENCE_RADIUS_MILES, Geofence, LocationError, distance_miles,
};
pub use payout::{
    APPOINTMENT_HOURLY_RATE_CENTS, MAX_HOURLY_PAY_CENTS, PayoutQuote, format_dollars,
    hourly_rate_cents, prorate_cents, quote_payout,
};
pub use schedule::{
    DEFAULT_TIMEZONE, format_timestamp, local_date_label, local_to_utc, parse_timezone,
    parse_timestamp,
};
pub use types::{EventKind, EventRef, MAX_STAFF_ID_LEN, RosterKind, StaffId, StaffMember};
