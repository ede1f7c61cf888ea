// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Great-circle distance and the attendance geofence.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean Earth radius used for haversine distance, in miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Default geofence radius around an event venue, in miles.
pub const GEOFENCE_RADIUS_MILES: f64 = 1.0;

/// Venue used for appointments, which carry no coordinates of their own (Miami, FL).
pub const DEFAULT_APPOINTMENT_VENUE: Coordinates = Coordinates {
    latitude: 25.7617,
    longitude: -80.1918,
};

/// A validated latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Creates a coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns an error if either value is not finite or is out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite()
            || !longitude.is_finite()
            || !(-90.0..=90.0).contains(&latitude)
            || !(-180.0..=180.0).contains(&longitude)
        {
            return Err(DomainError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Returns the latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Haversine great-circle distance between two points, in miles.
#[must_use]
pub fn distance_miles(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_MILES * c
}

/// A circle around a venue inside which check-in and check-out are allowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geofence {
    center: Coordinates,
    radius_miles: f64,
}

impl Geofence {
    /// Creates a geofence.
    #[must_use]
    pub const fn new(center: Coordinates, radius_miles: f64) -> Self {
        Self {
            center,
            radius_miles,
        }
    }

    /// Returns the venue at the center of the fence.
    #[must_use]
    pub const fn center(&self) -> Coordinates {
        self.center
    }

    /// Returns the radius in miles.
    #[must_use]
    pub const fn radius_miles(&self) -> f64 {
        self.radius_miles
    }

    /// Checks a caller's position against the fence and returns the distance.
    ///
    /// A caller exactly on the boundary is inside.
    ///
    /// # Errors
    ///
    /// Returns `TooFarAway` if the caller is strictly farther than the radius.
    pub fn admit(&self, caller: Coordinates) -> Result<f64, DomainError> {
        let distance = distance_miles(caller, self.center);
        if distance > self.radius_miles {
            return Err(DomainError::TooFarAway {
                distance_miles: distance,
                radius_miles: self.radius_miles,
            });
        }
        Ok(distance)
    }
}

/// Why a caller's position could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The device reported an error instead of a position.
    #[error("{0}")]
    Reported(String),

    /// No position was supplied.
    #[error("no position was supplied")]
    Missing,

    /// Only one of latitude and longitude was supplied.
    #[error("latitude and longitude must be supplied together")]
    Incomplete,

    /// The supplied position is out of range.
    #[error("position ({latitude}, {longitude}) is out of range")]
    OutOfRange {
        /// The reported latitude.
        latitude: String,
        /// The reported longitude.
        longitude: String,
    },
}

/// The caller's position as reported with a check-in or check-out.
#[derive(Debug, Clone, PartialEq)]
pub enum CallerLocation {
    /// A usable position.
    Known(Coordinates),
    /// The position could not be determined.
    Unavailable(LocationError),
}

impl CallerLocation {
    /// Interprets a raw report from a client device.
    ///
    /// A reported error wins over any coordinates sent alongside it.
    #[must_use]
    pub fn from_report(
        latitude: Option<f64>,
        longitude: Option<f64>,
        location_error: Option<&str>,
    ) -> Self {
        if let Some(reason) = location_error {
            return Self::Unavailable(LocationError::Reported(reason.to_string()));
        }
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Coordinates::new(lat, lon).map_or_else(
                |_| {
                    Self::Unavailable(LocationError::OutOfRange {
                        latitude: lat.to_string(),
                        longitude: lon.to_string(),
                    })
                },
                Self::Known,
            ),
            (None, None) => Self::Unavailable(LocationError::Missing),
            _ => Self::Unavailable(LocationError::Incomplete),
        }
    }

    /// Returns the position or the reason it is unavailable.
    ///
    /// # Errors
    ///
    /// Returns `LocationUnavailable` when no usable position exists.
    pub fn require(&self) -> Result<Coordinates, DomainError> {
        match self {
            Self::Known(coordinates) => Ok(*coordinates),
            Self::Unavailable(reason) => Err(DomainError::LocationUnavailable {
                reason: reason.to_string(),
            }),
        }
    }
}
