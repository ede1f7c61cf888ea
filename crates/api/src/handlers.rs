// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every state-changing handler follows the same sequence: authorize, load
//! the current event, apply a core transition, then persist the result and
//! its audit event in one storage transaction. Handlers take `now` from the
//! caller so that time-dependent rules stay testable.

use std::collections::HashMap;

use chrono_tz::Tz;
use gigdesk::{
    AttendanceTransition, BootstrapResult, Command, PaymentTransition, TransitionResult, apply,
    apply_attendance, apply_bootstrap, apply_payment, require_event,
};
use gigdesk_audit::{AuditEvent, Cause};
use gigdesk_domain::{
    AttendanceRecord, BookableEvent, CallerLocation, Coordinates, DomainError, EventKind,
    EventRef, RosterKind, StaffId, StaffMember, format_dollars, format_timestamp, parse_timestamp,
    parse_timezone,
};
use gigdesk_persistence::{AttendanceListing, Persistence, PayoutRecord, PersistenceError};
use time::macros::format_description;
use time::{Date, OffsetDateTime, Time};
use tracing::{info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::config::ServiceConfig;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AdjustAttendanceRequest, AttendanceInfo, AttendanceListingInfo, AttendanceRequest,
    AttendanceResponse, AuditEventInfo, AuditTimelineResponse, ClaimRequest, ClaimResponse,
    ClaimerInfo, CreateEventRequest, CreateEventResponse, DeleteEventResponse, EventInfo,
    ListAttendanceResponse, ListEventsResponse, ListPayoutsResponse, ListStaffResponse,
    MarkPaidResponse, PayoutInfo, RegisterStaffRequest, RegisterStaffResponse, StaffInfo,
};

// ============================================================================
// Conversions
// ============================================================================

fn timestamp_text(instant: OffsetDateTime) -> Result<String, ApiError> {
    format_timestamp(instant).map_err(|e| ApiError::Internal {
        message: e.to_string(),
    })
}

fn optional_timestamp_text(instant: Option<OffsetDateTime>) -> Result<Option<String>, ApiError> {
    instant.map(timestamp_text).transpose()
}

fn roster_info(
    roster: &[StaffId],
    names: &HashMap<String, String>,
) -> Vec<ClaimerInfo> {
    roster
        .iter()
        .map(|id| ClaimerInfo {
            staff_id: id.value().to_string(),
            display_name: names
                .get(id.value())
                .cloned()
                .unwrap_or_else(|| id.value().to_string()),
        })
        .collect()
}

/// Builds the API view of an event, resolving claimer display names.
fn event_info(persistence: &mut Persistence, event: &BookableEvent) -> Result<EventInfo, ApiError> {
    let event_id: i64 = event.event_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Stored event has no identifier"),
    })?;
    let claimers: Vec<&StaffId> = event
        .claimed_by
        .iter()
        .chain(event.backup_claimed_by.iter())
        .collect();
    let names = persistence
        .display_names(&claimers)
        .map_err(translate_persistence_error)?;

    Ok(EventInfo {
        event_id,
        kind: event.kind.as_str().to_string(),
        client: event.client.clone(),
        event_type: event.event_type.clone(),
        scheduled_at: timestamp_text(event.scheduled_at)?,
        duration_hours: event.duration_hours,
        address: event.location.address.clone(),
        latitude: event.location.coordinates.map(|c| c.latitude()),
        longitude: event.location.coordinates.map(|c| c.longitude()),
        staff_needed: event.staff_needed,
        backup_needed: event.backup_needed,
        hourly_pay_cents: event.hourly_pay_cents,
        claimed_by: roster_info(&event.claimed_by, &names),
        backup_claimed_by: roster_info(&event.backup_claimed_by, &names),
        open_slots: event.open_slots(RosterKind::Primary),
        open_backup_slots: event.open_slots(RosterKind::Backup),
        version: event.version,
    })
}

fn attendance_info(record: &AttendanceRecord) -> Result<AttendanceInfo, ApiError> {
    Ok(AttendanceInfo {
        kind: record.event.kind().as_str().to_string(),
        event_id: record.event.id(),
        staff_id: record.staff_id.value().to_string(),
        check_in_time: optional_timestamp_text(record.check_in_time)?,
        check_out_time: optional_timestamp_text(record.check_out_time)?,
        is_checked_in: record.is_checked_in,
        is_paid: record.is_paid,
        hours_worked: record.hours_worked(),
        is_inverted: record.is_inverted(),
    })
}

fn payout_info(payout: &PayoutRecord) -> Result<PayoutInfo, ApiError> {
    Ok(PayoutInfo {
        payout_id: payout.payout_id,
        kind: payout.kind.as_str().to_string(),
        event_id: payout.event.map(|event| event.id()),
        staff_id: payout.staff_id.value().to_string(),
        worked_seconds: payout.worked_seconds,
        hourly_rate_cents: payout.hourly_rate_cents,
        amount_cents: payout.amount_cents,
        amount: format_dollars(payout.amount_cents),
        memo: payout.memo.clone(),
        paid_at: timestamp_text(payout.paid_at)?,
    })
}

fn audit_event_info(event: AuditEvent) -> Result<AuditEventInfo, ApiError> {
    let audit_event_id: i64 = event.event_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Stored audit event has no identifier"),
    })?;
    Ok(AuditEventInfo {
        audit_event_id,
        actor_id: event.actor.id,
        actor_type: event.actor.actor_type,
        cause_id: event.cause.id,
        cause_description: event.cause.description,
        action: event.action.name,
        details: event.action.details,
        before: event.before.data,
        after: event.after.data,
    })
}

/// Resolves whose slot or attendance a request concerns.
///
/// Defaults to the acting user.
fn resolve_staff_id(
    actor: &AuthenticatedActor,
    requested: Option<&str>,
) -> Result<StaffId, ApiError> {
    StaffId::parse(requested.unwrap_or(&actor.id)).map_err(translate_domain_error)
}

fn load_event(persistence: &mut Persistence, event_ref: EventRef) -> Result<BookableEvent, ApiError> {
    let event: Option<BookableEvent> = persistence
        .get_event(event_ref)
        .map_err(translate_persistence_error)?;
    require_event(event, event_ref).map_err(translate_domain_error)
}

fn parse_local_date(value: &str) -> Result<Date, ApiError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).map_err(|e| {
        ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{value}': {e}"),
        }
    })
}

fn parse_local_time(value: &str) -> Result<Time, ApiError> {
    let value = value.trim();
    Time::parse(value, format_description!("[hour]:[minute]:[second]"))
        .or_else(|_| Time::parse(value, format_description!("[hour]:[minute]")))
        .map_err(|e| ApiError::InvalidInput {
            field: String::from("start_time"),
            message: format!("Failed to parse time '{value}': {e}"),
        })
}

fn parse_coordinates(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Option<Coordinates>, ApiError> {
    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Coordinates::new(latitude, longitude)
            .map(Some)
            .map_err(translate_domain_error),
        (None, None) => Ok(None),
        _ => Err(ApiError::InvalidInput {
            field: String::from("coordinates"),
            message: String::from("Latitude and longitude must be given together"),
        }),
    }
}

// ============================================================================
// Events
// ============================================================================

/// Books a gig or an appointment.
///
/// Admin only. The local date and time are interpreted in the request's
/// timezone, falling back to the configured one.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - A field is malformed or fails validation
/// - Persistence fails
pub fn create_event(
    persistence: &mut Persistence,
    config: &ServiceConfig,
    kind: EventKind,
    request: CreateEventRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CreateEventResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "create_event")?;

    let tz: Tz = match request.timezone.as_deref() {
        Some(name) => parse_timezone(name).map_err(translate_domain_error)?,
        None => config.timezone,
    };

    let command: Command = Command::CreateEvent {
        kind,
        client: request.client,
        event_type: request.event_type,
        date: parse_local_date(&request.date)?,
        start_time: parse_local_time(&request.start_time)?,
        duration_hours: request.duration_hours,
        address: request.address,
        coordinates: parse_coordinates(request.latitude, request.longitude)?,
        staff_needed: request.staff_needed,
        backup_needed: request.backup_needed,
        hourly_pay_cents: request.hourly_pay_cents,
    };

    let result: BootstrapResult = apply_bootstrap(
        command,
        tz,
        authenticated_actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;
    let event: BookableEvent = result.event.ok_or_else(|| ApiError::Internal {
        message: String::from("CreateEvent produced no event"),
    })?;

    let stored: BookableEvent = persistence
        .create_event(&event, &result.audit_event)
        .map_err(translate_persistence_error)?;
    let info: EventInfo = event_info(persistence, &stored)?;

    Ok(CreateEventResponse {
        message: format!(
            "Booked {} #{} for {}",
            kind.noun(),
            info.event_id,
            info.client
        ),
        event: info,
    })
}

/// Returns one event with its rosters.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the event does not exist.
pub fn get_event(
    persistence: &mut Persistence,
    event_ref: EventRef,
) -> Result<EventInfo, ApiError> {
    let event: BookableEvent = load_event(persistence, event_ref)?;
    event_info(persistence, &event)
}

/// Lists events of one kind, earliest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_events(
    persistence: &mut Persistence,
    kind: EventKind,
) -> Result<ListEventsResponse, ApiError> {
    let events: Vec<BookableEvent> = persistence
        .list_events(kind)
        .map_err(translate_persistence_error)?;
    let events: Vec<EventInfo> = events
        .iter()
        .map(|event| event_info(persistence, event))
        .collect::<Result<_, _>>()?;
    Ok(ListEventsResponse { events })
}

/// Deletes an event with its rosters and attendance.
///
/// Admin only. Recorded payouts are kept.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the event does not exist
/// or it changed while being deleted.
pub fn delete_event(
    persistence: &mut Persistence,
    event_ref: EventRef,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<DeleteEventResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "delete_event")?;

    let event: BookableEvent = load_event(persistence, event_ref)?;
    let result: TransitionResult = apply(
        &event,
        event_ref,
        Command::DeleteEvent,
        authenticated_actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    persistence
        .delete_event(event_ref, event.version, &result.audit_event)
        .map_err(translate_persistence_error)?;

    Ok(DeleteEventResponse {
        kind: event_ref.kind().as_str().to_string(),
        event_id: event_ref.id(),
        message: format!("Deleted {event_ref}"),
    })
}

// ============================================================================
// Rosters
// ============================================================================

/// Claims or releases a roster slot.
fn change_roster(
    persistence: &mut Persistence,
    event_ref: EventRef,
    roster: RosterKind,
    claim: bool,
    request: &ClaimRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ClaimResponse, ApiError> {
    let action: &str = if claim { "claim" } else { "unclaim" };
    let staff_id: StaffId = resolve_staff_id(authenticated_actor, request.staff_id.as_deref())?;
    AuthorizationService::authorize_act_as(authenticated_actor, &staff_id, action)?;

    let event: BookableEvent = load_event(persistence, event_ref)?;
    let command: Command = if claim {
        Command::ClaimSlot {
            roster,
            staff_id: staff_id.clone(),
        }
    } else {
        Command::ReleaseSlot {
            roster,
            staff_id: staff_id.clone(),
        }
    };

    let result: TransitionResult = apply(
        &event,
        event_ref,
        command,
        authenticated_actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let stored: BookableEvent = persistence
        .persist_roster_transition(event_ref, &event, &result.new_event, &result.audit_event)
        .map_err(translate_persistence_error)?;

    info!(
        event = %event_ref,
        staff_id = %staff_id,
        roster = %roster,
        action,
        "Roster updated"
    );

    let message: String = if claim {
        format!("'{staff_id}' claimed a {roster} slot on {event_ref}")
    } else {
        format!("'{staff_id}' released a {roster} slot on {event_ref}")
    };

    Ok(ClaimResponse {
        event: event_info(persistence, &stored)?,
        message,
    })
}

/// Claims a slot on one of an event's rosters.
///
/// Staff claim for themselves; admins may name anyone.
///
/// # Errors
///
/// Returns an error if:
/// - A staff member names someone else
/// - The event does not exist
/// - The roster is full (`roster_capacity`)
/// - The staff member already holds a slot on that roster (`unique_claim`)
/// - Another request changed the event first (`Conflict`)
pub fn claim_slot(
    persistence: &mut Persistence,
    event_ref: EventRef,
    roster: RosterKind,
    request: &ClaimRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ClaimResponse, ApiError> {
    change_roster(
        persistence,
        event_ref,
        roster,
        true,
        request,
        authenticated_actor,
        cause,
    )
}

/// Releases a slot on one of an event's rosters.
///
/// # Errors
///
/// Returns an error if a staff member names someone else, the event does
/// not exist, the staff member holds no slot on that roster, or another
/// request changed the event first.
pub fn release_slot(
    persistence: &mut Persistence,
    event_ref: EventRef,
    roster: RosterKind,
    request: &ClaimRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ClaimResponse, ApiError> {
    change_roster(
        persistence,
        event_ref,
        roster,
        false,
        request,
        authenticated_actor,
        cause,
    )
}

// ============================================================================
// Attendance
// ============================================================================

/// Runs an attendance command and persists the resulting record.
#[allow(clippy::too_many_arguments)]
fn record_attendance(
    persistence: &mut Persistence,
    config: &ServiceConfig,
    event_ref: EventRef,
    event: &BookableEvent,
    staff_id: &StaffId,
    command: Command,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<AttendanceTransition, ApiError> {
    let existing: Option<AttendanceRecord> = persistence
        .get_attendance(event_ref, staff_id)
        .map_err(translate_persistence_error)?;

    let transition: AttendanceTransition = apply_attendance(
        event,
        event_ref,
        existing.as_ref(),
        command,
        &config.attendance_policy,
        authenticated_actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    persistence
        .persist_attendance(
            event_ref,
            event.version,
            &transition.record,
            &transition.audit_event,
        )
        .map_err(translate_persistence_error)?;

    Ok(transition)
}

/// Checks a staff member in to an event.
///
/// Allowed from the scheduled start onwards and only within the geofence
/// around the venue. A repeated check-in restarts the session.
///
/// # Errors
///
/// Returns an error if:
/// - A staff member names someone else
/// - The event does not exist
/// - `now` is before the scheduled start (`check_in_window`)
/// - The caller reported no usable location (`location_required`)
/// - The event has no venue coordinates (`venue_location`)
/// - The caller is outside the geofence (`geofence`)
pub fn check_in(
    persistence: &mut Persistence,
    config: &ServiceConfig,
    event_ref: EventRef,
    request: &AttendanceRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<AttendanceResponse, ApiError> {
    let staff_id: StaffId = resolve_staff_id(authenticated_actor, request.staff_id.as_deref())?;
    AuthorizationService::authorize_act_as(authenticated_actor, &staff_id, "check_in")?;

    let event: BookableEvent = load_event(persistence, event_ref)?;
    let location: CallerLocation = CallerLocation::from_report(
        request.latitude,
        request.longitude,
        request.location_error.as_deref(),
    );

    let transition: AttendanceTransition = record_attendance(
        persistence,
        config,
        event_ref,
        &event,
        &staff_id,
        Command::CheckIn {
            staff_id: staff_id.clone(),
            location,
            at: now,
        },
        authenticated_actor,
        cause,
    )?;

    if transition.replaced_open_session {
        warn!(
            event = %event_ref,
            staff_id = %staff_id,
            "Check-in replaced a session that was never checked out"
        );
    }
    info!(
        event = %event_ref,
        staff_id = %staff_id,
        distance_miles = transition.distance_miles,
        "Checked in"
    );

    Ok(AttendanceResponse {
        attendance: attendance_info(&transition.record)?,
        distance_miles: transition.distance_miles,
        message: format!("'{staff_id}' checked in to {event_ref}"),
    })
}

/// Checks a staff member out of an event.
///
/// Requires an attendance record and a location within the geofence. A
/// repeated check-out moves the recorded check-out time forward.
///
/// # Errors
///
/// Returns an error if:
/// - A staff member names someone else
/// - The event does not exist
/// - The caller reported no usable location (`location_required`)
/// - The caller is outside the geofence (`geofence`)
/// - The staff member never checked in (`open_session_required`)
pub fn check_out(
    persistence: &mut Persistence,
    config: &ServiceConfig,
    event_ref: EventRef,
    request: &AttendanceRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<AttendanceResponse, ApiError> {
    let staff_id: StaffId = resolve_staff_id(authenticated_actor, request.staff_id.as_deref())?;
    AuthorizationService::authorize_act_as(authenticated_actor, &staff_id, "check_out")?;

    let event: BookableEvent = load_event(persistence, event_ref)?;
    let location: CallerLocation = CallerLocation::from_report(
        request.latitude,
        request.longitude,
        request.location_error.as_deref(),
    );

    let transition: AttendanceTransition = record_attendance(
        persistence,
        config,
        event_ref,
        &event,
        &staff_id,
        Command::CheckOut {
            staff_id: staff_id.clone(),
            location,
            at: now,
        },
        authenticated_actor,
        cause,
    )?;

    if transition.repeated_check_out {
        warn!(
            event = %event_ref,
            staff_id = %staff_id,
            "Check-out moved the end of a session that was already closed"
        );
    }
    if transition.record.is_inverted() {
        warn!(
            event = %event_ref,
            staff_id = %staff_id,
            "Check-out is earlier than the recorded check-in"
        );
    }
    info!(
        event = %event_ref,
        staff_id = %staff_id,
        hours_worked = transition.record.hours_worked(),
        "Checked out"
    );

    Ok(AttendanceResponse {
        attendance: attendance_info(&transition.record)?,
        distance_miles: transition.distance_miles,
        message: format!("'{staff_id}' checked out of {event_ref}"),
    })
}

/// Corrects both timestamps of an attendance record.
///
/// Admin only. The corrected session is closed.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, a timestamp is malformed,
/// no record exists, the record is paid, or the check-out precedes the
/// check-in.
pub fn adjust_attendance(
    persistence: &mut Persistence,
    config: &ServiceConfig,
    event_ref: EventRef,
    staff_id: &str,
    request: &AdjustAttendanceRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<AttendanceResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "adjust_attendance")?;

    let staff_id: StaffId = StaffId::parse(staff_id).map_err(translate_domain_error)?;
    let check_in_time: OffsetDateTime =
        parse_timestamp(request.check_in_time.trim()).map_err(translate_domain_error)?;
    let check_out_time: OffsetDateTime =
        parse_timestamp(request.check_out_time.trim()).map_err(translate_domain_error)?;

    let event: BookableEvent = load_event(persistence, event_ref)?;
    let transition: AttendanceTransition = record_attendance(
        persistence,
        config,
        event_ref,
        &event,
        &staff_id,
        Command::AdjustAttendance {
            staff_id: staff_id.clone(),
            check_in_time,
            check_out_time,
        },
        authenticated_actor,
        cause,
    )?;

    info!(event = %event_ref, staff_id = %staff_id, "Adjusted attendance");

    Ok(AttendanceResponse {
        attendance: attendance_info(&transition.record)?,
        distance_miles: None,
        message: format!("Adjusted attendance for '{staff_id}' at {event_ref}"),
    })
}

/// Lists every attendance record with its event.
///
/// Admin only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the query fails.
pub fn list_attendance(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListAttendanceResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "list_attendance")?;

    let listings: Vec<AttendanceListing> = persistence
        .list_attendance()
        .map_err(translate_persistence_error)?;
    let records: Vec<AttendanceListingInfo> = listings
        .into_iter()
        .map(|listing| {
            Ok(AttendanceListingInfo {
                attendance: attendance_info(&listing.record)?,
                client: listing.client,
                event_type: listing.event_type,
                scheduled_at: timestamp_text(listing.scheduled_at)?,
            })
        })
        .collect::<Result<_, ApiError>>()?;

    Ok(ListAttendanceResponse { records })
}

// ============================================================================
// Payouts
// ============================================================================

/// Pays a staff member for a closed attendance session.
///
/// Admin only. Gigs pay their hourly rate and appointments a flat rate.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The event or the attendance record does not exist
/// - The session is open or inverted
/// - The session was already paid
/// - A gig has no hourly rate
pub fn mark_paid(
    persistence: &mut Persistence,
    config: &ServiceConfig,
    event_ref: EventRef,
    staff_id: &str,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<MarkPaidResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "mark_paid")?;

    let staff_id: StaffId = StaffId::parse(staff_id).map_err(translate_domain_error)?;
    let event: BookableEvent = load_event(persistence, event_ref)?;
    let record: AttendanceRecord = persistence
        .get_attendance(event_ref, &staff_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| {
            translate_domain_error(DomainError::NotCheckedIn {
                event: event_ref,
                staff_id: staff_id.value().to_string(),
            })
        })?;

    let payment: PaymentTransition = apply_payment(
        &event,
        &record,
        Command::MarkPaid {
            staff_id: staff_id.clone(),
        },
        config.timezone,
        authenticated_actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let payout_id: i64 = persistence
        .persist_payment(
            event_ref,
            event.version,
            &payment.record,
            &payment.quote,
            now,
            &payment.audit_event,
        )
        .map_err(translate_persistence_error)?;

    let payout: PayoutRecord = PayoutRecord {
        payout_id,
        kind: event_ref.kind(),
        event: Some(event_ref),
        staff_id: staff_id.clone(),
        worked_seconds: payment.quote.worked_seconds,
        hourly_rate_cents: payment.quote.hourly_rate_cents,
        amount_cents: payment.quote.amount_cents,
        memo: payment.quote.memo.clone(),
        paid_at: now,
    };

    Ok(MarkPaidResponse {
        payout: payout_info(&payout)?,
        hours_worked: payment.quote.hours_worked,
        message: format!(
            "Paid '{staff_id}' {} for {event_ref}",
            format_dollars(payment.quote.amount_cents)
        ),
    })
}

/// Lists recorded payouts, newest first.
///
/// Admin only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the query fails.
pub fn list_payouts(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListPayoutsResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "list_payouts")?;

    let payouts: Vec<PayoutRecord> = persistence
        .list_payouts()
        .map_err(translate_persistence_error)?;
    let payouts: Vec<PayoutInfo> = payouts
        .iter()
        .map(payout_info)
        .collect::<Result<_, _>>()?;

    Ok(ListPayoutsResponse { payouts })
}

// ============================================================================
// Staff Directory
// ============================================================================

/// Adds a staff member to the directory.
///
/// Admin only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, a field is invalid, or
/// the username is taken.
pub fn register_staff(
    persistence: &mut Persistence,
    request: RegisterStaffRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<RegisterStaffResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "register_staff")?;

    let staff_id: StaffId = StaffId::parse(&request.staff_id).map_err(translate_domain_error)?;
    let result: BootstrapResult = apply_bootstrap(
        Command::RegisterStaff {
            staff_id,
            display_name: request.display_name,
        },
        chrono_tz::UTC,
        authenticated_actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;
    let member: StaffMember = result.staff_member.ok_or_else(|| ApiError::Internal {
        message: String::from("RegisterStaff produced no staff member"),
    })?;

    persistence
        .register_staff(&member, &result.audit_event)
        .map_err(|e| match e {
            PersistenceError::UniqueViolation(_) => {
                ApiError::DomainRuleViolation {
                    rule: String::from("unique_staff_id"),
                    message: format!("Staff member '{}' already exists", member.staff_id),
                }
            }
            other => translate_persistence_error(other),
        })?;

    Ok(RegisterStaffResponse {
        message: format!("Registered '{}'", member.staff_id),
        staff: StaffInfo {
            staff_id: member.staff_id.value().to_string(),
            display_name: member.display_name,
        },
    })
}

/// Lists the staff directory.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_staff(persistence: &mut Persistence) -> Result<ListStaffResponse, ApiError> {
    let staff: Vec<StaffInfo> = persistence
        .list_staff()
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(|member| StaffInfo {
            staff_id: member.staff_id.value().to_string(),
            display_name: member.display_name,
        })
        .collect();
    Ok(ListStaffResponse { staff })
}

// ============================================================================
// Audit
// ============================================================================

/// Returns an event's audit timeline, oldest first.
///
/// Admin only. The timeline remains readable after the event is deleted.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the query fails.
pub fn get_audit_timeline(
    persistence: &mut Persistence,
    event_ref: EventRef,
    authenticated_actor: &AuthenticatedActor,
) -> Result<AuditTimelineResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "get_audit_timeline")?;

    let events: Vec<AuditEventInfo> = persistence
        .get_audit_timeline(event_ref)
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(audit_event_info)
        .collect::<Result<_, _>>()?;

    Ok(AuditTimelineResponse {
        kind: event_ref.kind().as_str().to_string(),
        event_id: event_ref.id(),
        events,
    })
}
