//! Route to screen-path conversion and stroke geometry.
//!
//! A [`Path`] is the projected route: one screen point per route coordinate,
//! joined by straight segments in route order. Stroke edges are expressed as
//! fractions of the path's arc length, the same way the pulse animator drives
//! them.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::map::{GeoCoordinate, Projection, ScreenPoint, Viewport};

/// Projected route geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    points: Vec<ScreenPoint>,
}

impl Path {
    pub fn new(points: Vec<ScreenPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[ScreenPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total arc length in view units.
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| (w[1] - w[0]).length()).sum()
    }

    /// Position at a fraction of the arc length.
    ///
    /// Returns `None` for an empty path. Fractions outside [0, 1] are clamped.
    pub fn point_at(&self, fraction: f64) -> Option<ScreenPoint> {
        let first = *self.points.first()?;
        let total = self.length();
        if total == 0.0 {
            return Some(first);
        }

        let target = fraction.clamp(0.0, 1.0) * total;
        let mut accumulated = 0.0;

        for w in self.points.windows(2) {
            let seg_len = (w[1] - w[0]).length();
            if accumulated + seg_len >= target {
                let t = if seg_len > 0.0 {
                    (target - accumulated) / seg_len
                } else {
                    0.0
                };
                return Some(w[0] + (w[1] - w[0]) * t);
            }
            accumulated += seg_len;
        }

        self.points.last().copied()
    }

    /// The visible part of the stroke between two edge fractions.
    ///
    /// Empty when `start >= end`, or when the path has fewer than two points
    /// (a single point has no length to stroke).
    pub fn trimmed(&self, start: f64, end: f64) -> Vec<ScreenPoint> {
        let start = start.clamp(0.0, 1.0);
        let end = end.clamp(0.0, 1.0);
        if start >= end || self.points.len() < 2 {
            return Vec::new();
        }

        let total = self.length();
        if total == 0.0 {
            return Vec::new();
        }

        let (from, to) = (start * total, end * total);
        let mut visible = Vec::new();
        let mut accumulated = 0.0;

        for w in self.points.windows(2) {
            let seg_len = (w[1] - w[0]).length();
            let seg_start = accumulated;
            let seg_end = accumulated + seg_len;
            accumulated = seg_end;

            if seg_end <= from || seg_len == 0.0 {
                continue;
            }
            if seg_start > to {
                break;
            }

            if visible.is_empty() {
                let t = ((from - seg_start) / seg_len).clamp(0.0, 1.0);
                visible.push(w[0] + (w[1] - w[0]) * t);
            }
            if seg_end <= to {
                visible.push(w[1]);
            } else {
                let t = (to - seg_start) / seg_len;
                visible.push(w[0] + (w[1] - w[0]) * t);
                break;
            }
        }

        visible
    }
}

impl From<Vec<ScreenPoint>> for Path {
    fn from(points: Vec<ScreenPoint>) -> Self {
        Self::new(points)
    }
}

/// Projects every route coordinate through `projection` for the given
/// viewport, keeping route order. Empty input gives an empty path.
pub fn build_path<P>(route: &[GeoCoordinate], viewport: &Viewport, projection: &P) -> Path
where
    P: Projection + ?Sized,
{
    route
        .iter()
        .map(|&coordinate| projection.project(coordinate, viewport))
        .collect::<Vec<_>>()
        .into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineCap {
    Butt,
    Round,
}

/// How a stroke layer is painted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// RGBA, components in [0, 1]
    pub color: [f32; 4],
    pub line_width: f32,
    pub line_cap: LineCap,
    pub alpha: f32,
}

impl StrokeStyle {
    /// The animated pulse drawn on top of the route.
    pub fn pulse() -> Self {
        Self {
            color: [1.0, 0.0, 0.0, 1.0],
            line_width: 4.0,
            line_cap: LineCap::Round,
            alpha: 1.0,
        }
    }

    /// The static route overlay underneath the pulse.
    pub fn overlay() -> Self {
        Self {
            color: [0.0, 0.0, 1.0, 1.0],
            line_width: 8.0,
            line_cap: LineCap::Butt,
            alpha: 0.5,
        }
    }
}

impl StrokeStyle {
    /// Colour with the layer alpha folded into its alpha channel.
    pub fn effective_color(&self) -> [f32; 4] {
        let [r, g, b, a] = self.color;
        [r, g, b, a * self.alpha]
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::pulse()
    }
}

/// Length of a point slice, for callers holding trimmed geometry.
pub fn polyline_length(points: &[DVec2]) -> f64 {
    points.windows(2).map(|w| (w[1] - w[0]).length()).sum()
}
