// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP routes.
//!
//! Callers identify themselves with the `x-actor-id` and `x-actor-role`
//! headers. An optional `x-request-id` header becomes the audit cause ID.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode},
    routing::{get, patch, post},
};
use gigdesk_api::{
    AdjustAttendanceRequest, AttendanceRequest, AttendanceResponse, AuditTimelineResponse,
    AuthenticatedActor, ClaimRequest, ClaimResponse, CreateEventRequest, CreateEventResponse,
    DeleteEventResponse, EventInfo, ListAttendanceResponse, ListEventsResponse,
    ListPayoutsResponse, ListStaffResponse, MarkPaidResponse, RegisterStaffRequest,
    RegisterStaffResponse, Role, ServiceConfig, authenticate_stub,
};
use gigdesk_audit::Cause;
use gigdesk_domain::{EventKind, EventRef, RosterKind};
use gigdesk_persistence::Persistence;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::info;

use crate::error::HttpError;

const ACTOR_ID_HEADER: &str = "x-actor-id";
const ACTOR_ROLE_HEADER: &str = "x-actor-role";
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Application state shared across handlers.
///
/// The persistence lock is held for the whole of each request so that a
/// load, decide and persist sequence cannot interleave with another.
#[derive(Clone)]
pub struct AppState {
    /// Storage.
    pub persistence: Arc<Mutex<Persistence>>,
    /// Geofence and timezone settings.
    pub config: ServiceConfig,
}

impl AppState {
    #[must_use]
    pub fn new(persistence: Persistence, config: ServiceConfig) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            config,
        }
    }
}

/// Query parameters for the audit timeline.
#[derive(Debug, Deserialize)]
pub struct AuditTimelineQuery {
    /// "gig" or "appointment".
    pub kind: String,
    /// The event identifier.
    pub event_id: i64,
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok".
    pub status: String,
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn parse_role(role_str: &str) -> Result<Role, HttpError> {
    match role_str.to_lowercase().as_str() {
        "admin" => Ok(Role::Admin),
        "staff" => Ok(Role::Staff),
        _ => Err(HttpError::new(
            StatusCode::BAD_REQUEST,
            format!("Invalid role: '{role_str}'. Must be 'admin' or 'staff'"),
        )),
    }
}

/// Authenticates the caller and names the audit cause.
fn request_context(
    headers: &HeaderMap,
    description: &str,
) -> Result<(AuthenticatedActor, Cause), HttpError> {
    let role_str: &str = header_value(headers, ACTOR_ROLE_HEADER).ok_or_else(|| {
        HttpError::new(
            StatusCode::UNAUTHORIZED,
            format!("Missing {ACTOR_ROLE_HEADER} header"),
        )
    })?;
    let role: Role = parse_role(role_str)?;
    let actor_id: String = header_value(headers, ACTOR_ID_HEADER)
        .unwrap_or_default()
        .to_string();
    let actor: AuthenticatedActor = authenticate_stub(actor_id, role)
        .map_err(|e| HttpError::new(StatusCode::UNAUTHORIZED, e.to_string()))?;
    let cause: Cause = Cause::new(
        header_value(headers, REQUEST_ID_HEADER)
            .unwrap_or("http")
            .to_string(),
        String::from(description),
    );
    Ok((actor, cause))
}

fn parse_kind(segment: &str) -> Result<EventKind, HttpError> {
    segment
        .parse()
        .map_err(|_| HttpError::new(StatusCode::NOT_FOUND, format!("Unknown path '/{segment}'")))
}

fn parse_event_ref(segment: &str, event_id: i64) -> Result<EventRef, HttpError> {
    Ok(EventRef::new(parse_kind(segment)?, event_id))
}

/// The current instant, truncated to whole seconds.
fn now() -> Result<OffsetDateTime, HttpError> {
    OffsetDateTime::now_utc()
        .replace_nanosecond(0)
        .map_err(|e| HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

#[allow(clippy::unused_async)]
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

async fn handle_create_event(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(kind): Path<String>,
    Json(req): Json<CreateEventRequest>,
) -> Result<Json<CreateEventResponse>, HttpError> {
    let kind: EventKind = parse_kind(&kind)?;
    let (actor, cause) = request_context(&headers, "Create event")?;
    info!(actor_id = %actor.id, %kind, client = %req.client, "Handling create_event request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateEventResponse = gigdesk_api::create_event(
        &mut persistence,
        &app_state.config,
        kind,
        req,
        &actor,
        cause,
    )?;
    Ok(Json(response))
}

async fn handle_list_events(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(kind): Path<String>,
) -> Result<Json<ListEventsResponse>, HttpError> {
    let kind: EventKind = parse_kind(&kind)?;
    request_context(&headers, "List events")?;

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(gigdesk_api::list_events(&mut persistence, kind)?))
}

async fn handle_get_event(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path((kind, event_id)): Path<(String, i64)>,
) -> Result<Json<EventInfo>, HttpError> {
    let event_ref: EventRef = parse_event_ref(&kind, event_id)?;
    request_context(&headers, "Get event")?;

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(gigdesk_api::get_event(&mut persistence, event_ref)?))
}

async fn handle_delete_event(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path((kind, event_id)): Path<(String, i64)>,
) -> Result<Json<DeleteEventResponse>, HttpError> {
    let event_ref: EventRef = parse_event_ref(&kind, event_id)?;
    let (actor, cause) = request_context(&headers, "Delete event")?;
    info!(actor_id = %actor.id, event = %event_ref, "Handling delete_event request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(gigdesk_api::delete_event(
        &mut persistence,
        event_ref,
        &actor,
        cause,
    )?))
}

async fn change_roster(
    app_state: &AppState,
    headers: &HeaderMap,
    event_ref: EventRef,
    roster: RosterKind,
    claim: bool,
    req: &ClaimRequest,
) -> Result<Json<ClaimResponse>, HttpError> {
    let description: &str = if claim { "Claim slot" } else { "Release slot" };
    let (actor, cause) = request_context(headers, description)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ClaimResponse = if claim {
        gigdesk_api::claim_slot(&mut persistence, event_ref, roster, req, &actor, cause)?
    } else {
        gigdesk_api::release_slot(&mut persistence, event_ref, roster, req, &actor, cause)?
    };
    Ok(Json(response))
}

async fn handle_claim(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path((kind, event_id)): Path<(String, i64)>,
    Json(req): Json<ClaimRequest>,
) -> Result<Json<ClaimResponse>, HttpError> {
    let event_ref: EventRef = parse_event_ref(&kind, event_id)?;
    change_roster(&app_state, &headers, event_ref, RosterKind::Primary, true, &req).await
}

async fn handle_unclaim(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path((kind, event_id)): Path<(String, i64)>,
    Json(req): Json<ClaimRequest>,
) -> Result<Json<ClaimResponse>, HttpError> {
    let event_ref: EventRef = parse_event_ref(&kind, event_id)?;
    change_roster(&app_state, &headers, event_ref, RosterKind::Primary, false, &req).await
}

async fn handle_claim_backup(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path((kind, event_id)): Path<(String, i64)>,
    Json(req): Json<ClaimRequest>,
) -> Result<Json<ClaimResponse>, HttpError> {
    let event_ref: EventRef = parse_event_ref(&kind, event_id)?;
    change_roster(&app_state, &headers, event_ref, RosterKind::Backup, true, &req).await
}

async fn handle_unclaim_backup(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path((kind, event_id)): Path<(String, i64)>,
    Json(req): Json<ClaimRequest>,
) -> Result<Json<ClaimResponse>, HttpError> {
    let event_ref: EventRef = parse_event_ref(&kind, event_id)?;
    change_roster(&app_state, &headers, event_ref, RosterKind::Backup, false, &req).await
}

async fn handle_check_in(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path((kind, event_id)): Path<(String, i64)>,
    Json(req): Json<AttendanceRequest>,
) -> Result<Json<AttendanceResponse>, HttpError> {
    let event_ref: EventRef = parse_event_ref(&kind, event_id)?;
    let (actor, cause) = request_context(&headers, "Check in")?;
    let now: OffsetDateTime = now()?;

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(gigdesk_api::check_in(
        &mut persistence,
        &app_state.config,
        event_ref,
        &req,
        &actor,
        cause,
        now,
    )?))
}

async fn handle_check_out(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path((kind, event_id)): Path<(String, i64)>,
    Json(req): Json<AttendanceRequest>,
) -> Result<Json<AttendanceResponse>, HttpError> {
    let event_ref: EventRef = parse_event_ref(&kind, event_id)?;
    let (actor, cause) = request_context(&headers, "Check out")?;
    let now: OffsetDateTime = now()?;

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(gigdesk_api::check_out(
        &mut persistence,
        &app_state.config,
        event_ref,
        &req,
        &actor,
        cause,
        now,
    )?))
}

async fn handle_adjust_attendance(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path((kind, event_id, username)): Path<(String, i64, String)>,
    Json(req): Json<AdjustAttendanceRequest>,
) -> Result<Json<AttendanceResponse>, HttpError> {
    let event_ref: EventRef = parse_event_ref(&kind, event_id)?;
    let (actor, cause) = request_context(&headers, "Adjust attendance")?;
    info!(actor_id = %actor.id, event = %event_ref, %username, "Handling adjust_attendance request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(gigdesk_api::adjust_attendance(
        &mut persistence,
        &app_state.config,
        event_ref,
        &username,
        &req,
        &actor,
        cause,
    )?))
}

async fn handle_mark_paid(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path((kind, event_id, username)): Path<(String, i64, String)>,
) -> Result<Json<MarkPaidResponse>, HttpError> {
    let event_ref: EventRef = parse_event_ref(&kind, event_id)?;
    let (actor, cause) = request_context(&headers, "Mark paid")?;
    let now: OffsetDateTime = now()?;
    info!(actor_id = %actor.id, event = %event_ref, %username, "Handling mark_paid request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(gigdesk_api::mark_paid(
        &mut persistence,
        &app_state.config,
        event_ref,
        &username,
        &actor,
        cause,
        now,
    )?))
}

async fn handle_list_attendance(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListAttendanceResponse>, HttpError> {
    let (actor, _) = request_context(&headers, "List attendance")?;

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(gigdesk_api::list_attendance(&mut persistence, &actor)?))
}

async fn handle_list_payouts(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListPayoutsResponse>, HttpError> {
    let (actor, _) = request_context(&headers, "List payouts")?;

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(gigdesk_api::list_payouts(&mut persistence, &actor)?))
}

async fn handle_register_staff(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<RegisterStaffRequest>,
) -> Result<Json<RegisterStaffResponse>, HttpError> {
    let (actor, cause) = request_context(&headers, "Register staff")?;
    info!(actor_id = %actor.id, staff_id = %req.staff_id, "Handling register_staff request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(gigdesk_api::register_staff(
        &mut persistence,
        req,
        &actor,
        cause,
    )?))
}

async fn handle_list_staff(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListStaffResponse>, HttpError> {
    request_context(&headers, "List staff")?;

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(gigdesk_api::list_staff(&mut persistence)?))
}

async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Query(query): Query<AuditTimelineQuery>,
) -> Result<Json<AuditTimelineResponse>, HttpError> {
    let event_ref: EventRef = parse_event_ref(&query.kind, query.event_id)?;
    let (actor, _) = request_context(&headers, "Get audit timeline")?;

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(gigdesk_api::get_audit_timeline(
        &mut persistence,
        event_ref,
        &actor,
    )?))
}

/// Builds the application router with all endpoints.
///
/// Static paths take priority over the `/{kind}` routes.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/payouts", get(handle_list_payouts))
        .route("/staff", get(handle_list_staff).post(handle_register_staff))
        .route("/admin/attendance", get(handle_list_attendance))
        .route("/audit/timeline", get(handle_get_audit_timeline))
        .route("/{kind}", get(handle_list_events).post(handle_create_event))
        .route(
            "/{kind}/{event_id}",
            get(handle_get_event).delete(handle_delete_event),
        )
        .route("/{kind}/{event_id}/claim", patch(handle_claim))
        .route("/{kind}/{event_id}/unclaim", patch(handle_unclaim))
        .route("/{kind}/{event_id}/claim-backup", patch(handle_claim_backup))
        .route(
            "/{kind}/{event_id}/unclaim-backup",
            patch(handle_unclaim_backup),
        )
        .route("/{kind}/{event_id}/check-in", post(handle_check_in))
        .route("/{kind}/{event_id}/check-out", post(handle_check_out))
        .route(
            "/{kind}/{event_id}/attendance/{username}",
            patch(handle_adjust_attendance),
        )
        .route(
            "/{kind}/{event_id}/attendance/{username}/pay",
            patch(handle_mark_paid),
        )
        .with_state(app_state)
}
