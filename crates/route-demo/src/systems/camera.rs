//! Frame clock and simulated camera gestures.
//!
//! The demo has no touch input, so the camera alternates short pan/zoom
//! gestures with idle periods. Idle frames leave the viewport bit-for-bit
//! unchanged, which lets the poll loop skip them.

use std::time::Instant;

use bevy_ecs::prelude::*;
use glam::DVec2;

use crate::components::*;

/// Advances the host animation clock from wall time.
pub fn clock_system(
    mut timer: ResMut<FrameTimer>,
    mut delta: ResMut<DeltaTime>,
    mut clock: ResMut<FrameClock>,
) {
    let now = Instant::now();
    delta.0 = now.duration_since(timer.last).as_secs_f32();
    timer.last = now;
    clock.elapsed = now.duration_since(timer.started);
    clock.frame += 1;
}

/// Pans and zooms the map while a gesture is active.
///
/// # Behavior
///
/// - Starts a gesture with a random direction once the idle period ends
/// - Applies pan (in spans per second) and zoom each frame of the gesture
/// - Schedules the next gesture when the current one ends
pub fn camera_drift_system(
    time: Res<DeltaTime>,
    clock: Res<FrameClock>,
    mut drift: ResMut<CameraDrift>,
    mut surface: ResMut<MapSurface>,
) {
    if !drift.enabled {
        return;
    }

    if drift.gesture.is_none() && clock.elapsed >= drift.next_gesture_at {
        let gesture = random_gesture(clock.elapsed + drift.gesture_length);
        tracing::debug!(?gesture, "Camera gesture started");
        drift.gesture = Some(gesture);
    }

    let Some(gesture) = drift.gesture else {
        return;
    };

    if clock.elapsed >= gesture.until {
        drift.gesture = None;
        drift.next_gesture_at = clock.elapsed + drift.idle_length;
        tracing::debug!(viewport = ?surface.viewport, "Camera gesture ended");
        return;
    }

    let dt = time.0 as f64;
    let span = surface.viewport.span;
    surface.viewport = surface
        .viewport
        .panned(
            gesture.pan.y * span.latitude_delta * dt,
            gesture.pan.x * span.longitude_delta * dt,
        )
        .zoomed(gesture.zoom_per_sec.powf(dt));
}

// Slow pan in a random direction with a gentle zoom in or out.
fn random_gesture(until: std::time::Duration) -> Gesture {
    let angle = rand::random::<f64>() * std::f64::consts::TAU;
    let speed = 0.05 + rand::random::<f64>() * 0.1;
    let zoom_per_sec = if rand::random::<bool>() { 1.15 } else { 1.0 / 1.15 };

    Gesture {
        pan: DVec2::from_angle(angle) * speed,
        zoom_per_sec,
        until,
    }
}
