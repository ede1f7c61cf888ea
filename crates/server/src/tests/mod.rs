// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use gigdesk_api::ServiceConfig;
use gigdesk_persistence::Persistence;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::routes::{AppState, build_router};

pub const ADMIN: (&str, &str) = ("office", "admin");
pub const ALICE: (&str, &str) = ("alice", "staff");
pub const BOB: (&str, &str) = ("bob", "staff");

/// Helper to create a router over fresh in-memory persistence.
pub fn create_test_app() -> Router {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    build_router(AppState::new(persistence, ServiceConfig::default()))
}

/// Sends one request and returns the status with the decoded JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    actor: Option<(&str, &str)>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((id, role)) = actor {
        builder = builder
            .header("x-actor-id", id)
            .header("x-actor-role", role);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// A gig at the Miami venue that started in the past.
pub fn gig_body(staff_needed: u32, backup_needed: u32) -> Value {
    json!({
        "client": "Rivera Wedding",
        "event_type": "Wedding",
        "date": "2025-06-01",
        "start_time": "14:00",
        "duration_hours": 4.0,
        "address": "100 Biscayne Blvd, Miami, FL",
        "latitude": 25.7617,
        "longitude": -80.1918,
        "staff_needed": staff_needed,
        "backup_needed": backup_needed,
        "hourly_pay_cents": 3000
    })
}

pub fn at_venue() -> Value {
    json!({ "latitude": 25.7617, "longitude": -80.1918 })
}

/// Books a gig as the admin and returns its ID.
pub async fn create_gig(app: &Router, staff_needed: u32, backup_needed: u32) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/gigs",
        Some(ADMIN),
        Some(gig_body(staff_needed, backup_needed)),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["event"]["event_id"].as_i64().unwrap()
}
