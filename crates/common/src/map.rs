//! Geographic data model and the projection onto the map view.
//!
//! Coordinates and viewports compare by exact field equality. The viewport
//! poll loop relies on that: any change, however small, counts as a change.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A point in view space (x grows right, y grows down).
pub type ScreenPoint = DVec2;

/// Highest latitude spherical Mercator can represent.
const MAX_LATITUDE: f64 = 85.0511287798;

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// `true` when both components are finite and inside their ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<GeoCoordinate> for geo::Point<f64> {
    fn from(c: GeoCoordinate) -> Self {
        geo::Point::new(c.longitude, c.latitude)
    }
}

impl From<geo::Point<f64>> for GeoCoordinate {
    fn from(p: geo::Point<f64>) -> Self {
        GeoCoordinate::new(p.y(), p.x())
    }
}

/// Extent of a region in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSpan {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl CoordinateSpan {
    pub const fn new(latitude_delta: f64, longitude_delta: f64) -> Self {
        Self { latitude_delta, longitude_delta }
    }
}

/// The visible map region: a centre plus a span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: GeoCoordinate,
    pub span: CoordinateSpan,
}

impl Viewport {
    pub const fn new(center: GeoCoordinate, span: CoordinateSpan) -> Self {
        Self { center, span }
    }

    /// Smallest region containing every coordinate, grown by `padding`
    /// (1.0 = tight fit). Returns `None` for an empty route.
    ///
    /// The longitude extent is taken on the shorter side of the globe, so a
    /// route crossing the antimeridian is framed around 180° rather than
    /// across the whole world.
    pub fn fitting(coordinates: &[GeoCoordinate], padding: f64) -> Option<Self> {
        let first = coordinates.first()?;
        let (mut min_lat, mut max_lat) = (first.latitude, first.latitude);
        for c in &coordinates[1..] {
            min_lat = min_lat.min(c.latitude);
            max_lat = max_lat.max(c.latitude);
        }

        let mut lons: Vec<f64> = coordinates
            .iter()
            .map(|c| normalize_longitude(c.longitude))
            .collect();
        lons.sort_by(f64::total_cmp);

        // The widest empty arc between neighbouring longitudes lies outside
        // the route; the route's extent is everything else
        let mut widest_gap = lons[0] + 360.0 - lons[lons.len() - 1];
        let mut west = lons[0];
        for w in lons.windows(2) {
            let gap = w[1] - w[0];
            if gap > widest_gap {
                widest_gap = gap;
                west = w[1];
            }
        }
        let lon_extent = 360.0 - widest_gap;

        Some(Self {
            center: GeoCoordinate::new(
                (min_lat + max_lat) / 2.0,
                normalize_longitude(west + lon_extent / 2.0),
            ),
            span: CoordinateSpan::new((max_lat - min_lat) * padding, lon_extent * padding),
        })
    }

    /// Moves the centre by the given deltas in degrees.
    pub fn panned(&self, d_lat: f64, d_lon: f64) -> Self {
        Self {
            center: GeoCoordinate::new(
                (self.center.latitude + d_lat).clamp(-MAX_LATITUDE, MAX_LATITUDE),
                normalize_longitude(self.center.longitude + d_lon),
            ),
            span: self.span,
        }
    }

    /// Scales the span; a factor above 1.0 zooms out.
    pub fn zoomed(&self, factor: f64) -> Self {
        Self {
            center: self.center,
            span: CoordinateSpan::new(
                self.span.latitude_delta * factor,
                self.span.longitude_delta * factor,
            ),
        }
    }
}

/// Geographic to screen transform supplied by the host surface.
pub trait Projection {
    fn project(&self, coordinate: GeoCoordinate, viewport: &Viewport) -> ScreenPoint;
}

impl<F> Projection for F
where
    F: Fn(GeoCoordinate, &Viewport) -> ScreenPoint,
{
    fn project(&self, coordinate: GeoCoordinate, viewport: &Viewport) -> ScreenPoint {
        self(coordinate, viewport)
    }
}

/// Spherical Mercator projection onto a view of a fixed size.
///
/// Longitude maps linearly across the width. Latitude goes through the
/// Mercator y function and is mapped between the viewport's top and bottom
/// edges, so straight rhumb lines stay straight on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorProjection {
    pub size: DVec2,
}

impl MercatorProjection {
    pub fn new(size: DVec2) -> Self {
        Self { size }
    }
}

/// Wraps a longitude into [-180, 180).
pub fn normalize_longitude(longitude: f64) -> f64 {
    (longitude + 180.0).rem_euclid(360.0) - 180.0
}

fn mercator_y(latitude: f64) -> f64 {
    let sin_lat = latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians().sin();
    ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / 2.0
}

impl Projection for MercatorProjection {
    fn project(&self, coordinate: GeoCoordinate, viewport: &Viewport) -> ScreenPoint {
        let half = self.size / 2.0;

        let x = if viewport.span.longitude_delta == 0.0 {
            half.x
        } else {
            // Offset from the centre on the shorter arc, so points across the
            // antimeridian land next to the centre instead of a world away
            let offset = normalize_longitude(coordinate.longitude - viewport.center.longitude);
            (offset + viewport.span.longitude_delta / 2.0) / viewport.span.longitude_delta * self.size.x
        };

        let top = mercator_y(viewport.center.latitude + viewport.span.latitude_delta / 2.0);
        let bottom = mercator_y(viewport.center.latitude - viewport.span.latitude_delta / 2.0);
        let y = if top == bottom {
            half.y
        } else {
            (top - mercator_y(coordinate.latitude)) / (top - bottom) * self.size.y
        };

        DVec2::new(x, y)
    }
}
