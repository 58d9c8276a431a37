//! Keeps the pulse layer in step with the map.
//!
//! Two host duties live here: the per-frame viewport poll that rebuilds the
//! animated path, and the animation system's completion callback that moves
//! the pulse to its next phase.

use bevy_ecs::prelude::*;
use route_pulse_common::viewport::resync;
use route_pulse_common::{PulseAnimator, ViewportObserver};

use crate::components::*;

/// Rebuilds the pulse path whenever the viewport differs from the last frame.
pub fn region_observation_system(
    surface: Res<MapSurface>,
    route: Res<ActiveRoute>,
    mut observer: ResMut<ViewportObserver>,
    mut animator: ResMut<PulseAnimator>,
) {
    if !observer.poll(&surface.viewport) {
        return;
    }

    if resync(&mut animator, &route.0.coordinates, &surface.viewport, &surface.projection) {
        tracing::trace!(viewport = ?surface.viewport, "Pulse path rebuilt");
    }
}

/// Delivers phase completion once the armed phase has run its course.
pub fn phase_completion_system(clock: Res<FrameClock>, mut animator: ResMut<PulseAnimator>) {
    if animator.completion_due(clock.elapsed) {
        animator.on_phase_complete(true, clock.elapsed);
    }
}
