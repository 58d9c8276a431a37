use std::time::{Duration, Instant};

use bevy_ecs::prelude::*;
use route_pulse_common::directions::Route;
use route_pulse_common::{MercatorProjection, StrokeStyle, Viewport};

// --- Frame timing ---

// Seconds since the previous frame
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DeltaTime(pub f32);

// Host animation clock, advanced once per display refresh
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct FrameClock {
    pub elapsed: Duration,
    pub frame: u64,
}

// Wall-clock anchor for FrameClock
#[derive(Resource, Debug, Clone, Copy)]
pub struct FrameTimer {
    pub started: Instant,
    pub last: Instant,
}

impl FrameTimer {
    pub fn new(now: Instant) -> Self {
        Self { started: now, last: now }
    }
}

// --- Map surface ---

// The visible region plus the transform the surface renders with
#[derive(Resource, Debug, Clone, Copy)]
pub struct MapSurface {
    pub viewport: Viewport,
    pub projection: MercatorProjection,
}

// The route currently on display
#[derive(Resource, Debug, Clone)]
pub struct ActiveRoute(pub Route);

#[derive(Resource, Debug, Clone, Copy)]
pub struct LayerStyles {
    pub overlay: StrokeStyle,
    pub pulse: StrokeStyle,
}

impl Default for LayerStyles {
    fn default() -> Self {
        Self {
            overlay: StrokeStyle::overlay(),
            pulse: StrokeStyle::pulse(),
        }
    }
}

// --- Simulated user input ---

// One pan/zoom gesture: pan speed in spans per second, zoom factor per second
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub pan: glam::DVec2,
    pub zoom_per_sec: f64,
    pub until: Duration,
}

#[derive(Resource, Debug, Clone)]
pub struct CameraDrift {
    pub enabled: bool,
    pub gesture: Option<Gesture>,
    pub next_gesture_at: Duration,
    pub gesture_length: Duration,
    pub idle_length: Duration,
}

impl CameraDrift {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            gesture: None,
            next_gesture_at: Duration::from_secs(2),
            gesture_length: Duration::from_secs(1),
            idle_length: Duration::from_secs(2),
        }
    }
}
