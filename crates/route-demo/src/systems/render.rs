use bevy_ecs::prelude::*;
use route_pulse_common::path::polyline_length;
use route_pulse_common::PulseAnimator;

use crate::components::*;

// Frames between pulse reports
const REPORT_EVERY: u64 = 60;

/// Stands in for the pulse layer's draw pass: reports the stroked segment.
pub fn render_system(clock: Res<FrameClock>, animator: Res<PulseAnimator>, styles: Res<LayerStyles>) {
    if clock.frame % REPORT_EVERY != 0 {
        return;
    }
    let (Some(frame), Some(visible)) = (animator.sample(clock.elapsed), animator.visible_path(clock.elapsed)) else {
        return;
    };

    tracing::debug!(
        frame = clock.frame,
        phase = ?animator.current_phase().map(|p| p.kind),
        phase_ms = animator.phase_duration().as_millis() as u64,
        stroke_start = frame.start,
        stroke_end = frame.end,
        points = visible.len(),
        length = polyline_length(&visible),
        head = ?visible.last(),
        line_width = styles.pulse.line_width,
        color = ?styles.pulse.effective_color(),
        "Pulse frame"
    );
}
