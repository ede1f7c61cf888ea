// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! All queries use Diesel DSL and turn rows back into domain values. A row
//! that no longer passes domain validation is reported as a
//! `ReconstructionError`, never repaired.

pub mod attendance;
pub mod audit;
pub mod events;
pub mod payouts;
pub mod staff;

use gigdesk_domain::{DomainError, parse_timestamp};
use time::OffsetDateTime;

use crate::error::PersistenceError;

pub(crate) fn reconstruct<T>(result: Result<T, DomainError>) -> Result<T, PersistenceError> {
    result.map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

pub(crate) fn parse_stored_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    reconstruct(parse_timestamp(value))
}

pub(crate) fn parse_optional_timestamp(
    value: Option<&str>,
) -> Result<Option<OffsetDateTime>, PersistenceError> {
    value.map(parse_stored_timestamp).transpose()
}
