// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the gigdesk staffing portal.
//!
//! Handlers authorize the caller, run core transitions and persist the
//! results. Transport concerns live in the server crate.

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

mod auth;
mod config;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role, authenticate_stub};
pub use config::ServiceConfig;
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    adjust_attendance, check_in, check_out, claim_slot, create_event, delete_event, get_audit_timeline,
    get_event, list_attendance, list_events, list_payouts, list_staff, mark_paid, register_staff,
    release_slot,
};
pub use request_response::{
    AdjustAttendanceRequest, AttendanceInfo, AttendanceListingInfo, AttendanceRequest,
    AttendanceResponse, AuditEventInfo, AuditTimelineResponse, ClaimRequest, ClaimResponse,
    ClaimerInfo, CreateEventRequest, CreateEventResponse, DeleteEventResponse, EventInfo,
    ListAttendanceResponse, ListEventsResponse, ListPayoutsResponse, ListStaffResponse,
    MarkPaidResponse, PayoutInfo, RegisterStaffRequest, RegisterStaffResponse, StaffInfo,
};
