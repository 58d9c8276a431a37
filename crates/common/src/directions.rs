//! Route lookup between two coordinates.
//!
//! The display only needs an ordered list of coordinates. Providers sit behind
//! [`DirectionsProvider`]; [`GreatCircleDirections`] is the in-process one used
//! by the demo host.

use std::future::Future;
use std::str::FromStr;

use geo::prelude::*;
use geo::Point;
use serde::{Deserialize, Serialize};

use crate::error::{PulseError, Result};
use crate::map::GeoCoordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransportType {
    #[default]
    Automobile,
    Walking,
}

impl FromStr for TransportType {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "automobile" | "car" => Ok(TransportType::Automobile),
            "walking" | "walk" => Ok(TransportType::Walking),
            other => Err(PulseError::Config(format!("unknown transport type '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionsRequest {
    pub source: GeoCoordinate,
    pub destination: GeoCoordinate,
    pub transport: TransportType,
}

impl DirectionsRequest {
    pub fn new(source: GeoCoordinate, destination: GeoCoordinate) -> Self {
        Self {
            source,
            destination,
            transport: TransportType::default(),
        }
    }

    pub fn with_transport(mut self, transport: TransportType) -> Self {
        self.transport = transport;
        self
    }
}

/// An ordered route from source to destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub coordinates: Vec<GeoCoordinate>,
    /// Length in meters (Haversine)
    pub distance_m: f64,
    pub transport: TransportType,
}

impl Route {
    pub fn new(coordinates: Vec<GeoCoordinate>, transport: TransportType) -> Self {
        let distance_m = coordinates
            .windows(2)
            .map(|w| Point::from(w[0]).haversine_distance(&Point::from(w[1])))
            .sum();
        Self {
            coordinates,
            distance_m,
            transport,
        }
    }
}

pub trait DirectionsProvider {
    /// Resolves a route for `request`, or fails with [`PulseError::NoRoute`]
    /// when none exists.
    fn calculate(&self, request: &DirectionsRequest) -> impl Future<Output = Result<Route>> + Send;
}

/// Mean Earth radius used by `geo`'s haversine functions, in meters.
const MEAN_EARTH_RADIUS: f64 = 6_371_008.8;

/// Endpoints closer than this to half the Earth's circumference have no
/// single great circle between them.
const ANTIPODAL_TOLERANCE_M: f64 = 1.0;

/// Follows the great circle between the two endpoints.
#[derive(Debug, Clone, Copy)]
pub struct GreatCircleDirections {
    /// Number of points on the returned route, endpoints included
    pub samples: usize,
}

impl Default for GreatCircleDirections {
    fn default() -> Self {
        Self { samples: 64 }
    }
}

impl GreatCircleDirections {
    pub fn new(samples: usize) -> Self {
        Self { samples }
    }

    fn route_between(&self, request: &DirectionsRequest) -> Result<Route> {
        for c in [request.source, request.destination] {
            if !c.is_valid() {
                return Err(PulseError::InvalidCoordinate {
                    latitude: c.latitude,
                    longitude: c.longitude,
                });
            }
        }
        if request.source == request.destination {
            return Err(PulseError::NoRoute);
        }

        let from: Point = request.source.into();
        let to: Point = request.destination.into();
        // Rounding can push the haversine term past 1 at the antipode, giving NaN
        let distance = from.haversine_distance(&to);
        let half_circumference = std::f64::consts::PI * MEAN_EARTH_RADIUS;
        if distance.is_nan() || half_circumference - distance < ANTIPODAL_TOLERANCE_M {
            return Err(PulseError::NoRoute);
        }
        let samples = self.samples.max(2);

        let mut coordinates = Vec::with_capacity(samples);
        coordinates.push(request.source);
        for i in 1..samples - 1 {
            let f = i as f64 / (samples - 1) as f64;
            coordinates.push(from.haversine_intermediate(&to, f).into());
        }
        coordinates.push(request.destination);

        Ok(Route::new(coordinates, request.transport))
    }
}

impl DirectionsProvider for GreatCircleDirections {
    fn calculate(&self, request: &DirectionsRequest) -> impl Future<Output = Result<Route>> + Send {
        let result = self.route_between(request);
        async move {
            match &result {
                Ok(route) => tracing::info!(
                    points = route.coordinates.len(),
                    distance_km = route.distance_m / 1000.0,
                    "Route calculated"
                ),
                Err(e) => tracing::warn!("Directions lookup failed: {}", e),
            }
            result
        }
    }
}
