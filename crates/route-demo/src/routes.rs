use route_pulse_common::directions::{DirectionsProvider, DirectionsRequest, Route};
use route_pulse_common::{Config, Result};

/// Builds the route request for the configured endpoints and transport.
pub fn request_from(config: &Config) -> Result<DirectionsRequest> {
    Ok(DirectionsRequest::new(config.source(), config.destination()).with_transport(config.transport()?))
}

/// Looks up the route to display.
///
/// A failed lookup or a route too short to draw yields `None`; the caller then
/// never starts the pulse.
pub async fn fetch_route<P: DirectionsProvider>(provider: &P, request: &DirectionsRequest) -> Option<Route> {
    match provider.calculate(request).await {
        Ok(route) if route.coordinates.len() >= 2 => Some(route),
        Ok(route) => {
            tracing::warn!(points = route.coordinates.len(), "Route too short to animate");
            None
        }
        Err(e) => {
            tracing::warn!("No route available: {}", e);
            None
        }
    }
}
