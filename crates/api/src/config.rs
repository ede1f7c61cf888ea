// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono_tz::Tz;
use gigdesk_domain::{AttendancePolicy, DomainError, parse_timezone};

/// Settings shared by every request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceConfig {
    /// Geofence radius and the appointment fallback venue.
    pub attendance_policy: AttendancePolicy,
    /// Timezone for local event dates and payout memos.
    pub timezone: Tz,
}

impl ServiceConfig {
    /// Builds a configuration from a policy and an IANA timezone name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTimezone` if the name is unknown.
    pub fn new(attendance_policy: AttendancePolicy, timezone: &str) -> Result<Self, DomainError> {
        Ok(Self {
            attendance_policy,
            timezone: parse_timezone(timezone)?,
        })
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            attendance_policy: AttendancePolicy::default(),
            timezone: chrono_tz::America::New_York,
        }
    }
}
