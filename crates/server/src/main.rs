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
#![allow(clippy::multiple_crate_versions)]

mod error;
mod routes;

#[cfg(test)]
mod tests;

use axum::Router;
use clap::Parser;
use gigdesk_api::ServiceConfig;
use gigdesk_domain::{AttendancePolicy, Coordinates};
use gigdesk_persistence::Persistence;
use tracing::info;

use crate::routes::{AppState, build_router};

/// gigdesk server - HTTP server for the gigdesk staffing portal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3001)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Latitude of the venue used for appointments without coordinates
    #[arg(long, default_value_t = 25.7617, allow_negative_numbers = true)]
    venue_latitude: f64,

    /// Longitude of the venue used for appointments without coordinates
    #[arg(long, default_value_t = -80.1918, allow_negative_numbers = true)]
    venue_longitude: f64,

    /// Check-in geofence radius in miles
    #[arg(long, default_value_t = 1.0)]
    geofence_miles: f64,

    /// IANA timezone used to interpret local event dates and times
    #[arg(long, default_value = "America/New_York")]
    timezone: String,
}

impl Args {
    fn service_config(&self) -> Result<ServiceConfig, Box<dyn std::error::Error>> {
        if !self.geofence_miles.is_finite() || self.geofence_miles <= 0.0 {
            return Err(format!(
                "Geofence radius must be a positive number of miles, got {}",
                self.geofence_miles
            )
            .into());
        }
        let policy: AttendancePolicy = AttendancePolicy {
            fallback_venue: Coordinates::new(self.venue_latitude, self.venue_longitude)?,
            radius_miles: self.geofence_miles,
        };
        Ok(ServiceConfig::new(policy, &self.timezone)?)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing gigdesk server");

    let config: ServiceConfig = args.service_config()?;
    info!(
        timezone = %config.timezone,
        geofence_miles = config.attendance_policy.radius_miles,
        "Loaded service configuration"
    );

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app: Router = build_router(AppState::new(persistence, config));

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
