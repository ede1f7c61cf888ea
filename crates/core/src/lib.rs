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

mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

use gigdesk_domain::{BookableEvent, DomainError, EventRef};

// Re-export public types and functions
pub use apply::{apply, apply_attendance, apply_bootstrap, apply_payment};
pub use command::Command;
pub use error::CoreError;
pub use state::{
    AttendanceTransition, BootstrapResult, PaymentTransition, TransitionResult,
    attendance_snapshot, roster_snapshot,
};

/// Validates that a loaded event exists.
///
/// This is a read-only validation that does not create audit events.
///
/// # Errors
///
/// Returns `EventNotFound` if `event` is `None`.
pub fn require_event(
    event: Option<BookableEvent>,
    event_ref: EventRef,
) -> Result<BookableEvent, DomainError> {
    event.ok_or(DomainError::EventNotFound(event_ref))
}
