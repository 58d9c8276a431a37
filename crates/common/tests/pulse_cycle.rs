use std::time::Duration;

use glam::DVec2;
use pretty_assertions::assert_eq;
use route_pulse_common::animator::{AnimatorState, PhaseKind, StrokeFrame};
use route_pulse_common::viewport::resync;
use route_pulse_common::{
    build_path, CoordinateSpan, GeoCoordinate, MercatorProjection, Path, PulseAnimator, Viewport,
    ViewportObserver,
};

const D: Duration = Duration::from_secs(3);

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn p1() -> Path {
    Path::new(vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(10.0, 0.0),
        DVec2::new(10.0, 10.0),
    ])
}

fn p2() -> Path {
    Path::new(vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(40.0, 0.0),
        DVec2::new(40.0, 40.0),
        DVec2::new(0.0, 40.0),
    ])
}

/// Delivers completion on the frame the armed phase runs out, the way the
/// host animation system does.
fn run_frames(animator: &mut PulseAnimator, from: u64, to: u64, step: u64) -> Vec<(u64, PhaseKind)> {
    let mut armed = Vec::new();
    let mut now = from;
    while now <= to {
        if animator.completion_due(ms(now)) {
            if let Some(kind) = animator.on_phase_complete(true, ms(now)) {
                armed.push((now, kind));
            }
        }
        now += step;
    }
    armed
}

#[test]
fn phases_alternate_indefinitely() {
    let mut animator = PulseAnimator::new(D);
    animator.start(p1(), ms(0));

    let mut expected = PhaseKind::Shrink;
    for i in 0..101 {
        let kind = animator.on_phase_complete(i % 3 != 0, ms(i * 10)).unwrap();
        assert_eq!(kind, expected);
        assert_eq!(animator.phase_index(), ((i + 1) % 2) as usize);
        expected = match expected {
            PhaseKind::Grow => PhaseKind::Shrink,
            PhaseKind::Shrink => PhaseKind::Grow,
        };
    }
}

#[test]
fn repeated_set_path_keeps_phase_and_timing() {
    let mut animator = PulseAnimator::new(D);
    animator.start(p1(), ms(0));
    animator.on_phase_complete(true, ms(3000));
    let armed = animator.armed();

    for i in 0..25 {
        let path = if i % 2 == 0 { p2() } else { p1() };
        assert!(animator.set_path(path));
        assert_eq!(animator.phase_index(), 1);
        assert_eq!(animator.armed(), armed);
    }
    assert_eq!(animator.path(), Some(&p2()));
}

#[test]
fn restart_after_stop_begins_with_grow() {
    let mut animator = PulseAnimator::new(D);
    animator.start(p1(), ms(0));
    animator.on_phase_complete(true, ms(3000));
    assert_eq!(animator.phase_index(), 1);

    animator.stop();
    assert!(animator.start(p2(), ms(9000)));
    assert_eq!(animator.state(), AnimatorState::Running { phase_index: 0 });
    assert_eq!(animator.armed().map(|a| a.kind), Some(PhaseKind::Grow));
    assert_eq!(animator.armed().map(|a| a.armed_at), Some(ms(9000)));
}

#[test]
fn path_swap_mid_shrink_continues_without_reset() {
    let mut animator = PulseAnimator::new(D);
    animator.start(p1(), ms(0));

    let armed = run_frames(&mut animator, 0, 4500, 16);
    assert_eq!(armed, vec![(3008, PhaseKind::Shrink)]);
    let before = animator.sample(ms(4500)).unwrap();
    let visible_p1 = animator.visible_path(ms(4500)).unwrap();

    assert!(animator.set_path(p2()));
    let after = animator.sample(ms(4500)).unwrap();
    assert_eq!(before, after, "edges are fractions, the swap must not jump them");
    let visible_p2 = animator.visible_path(ms(4500)).unwrap();
    assert_ne!(visible_p1, visible_p2);
    // Trailing edge sits at the same fraction of P2's length
    let expected_start = p2().point_at(after.start).unwrap();
    assert_eq!(visible_p2.first().copied(), Some(expected_start));

    let armed = run_frames(&mut animator, 4500, 6100, 16);
    assert_eq!(armed.len(), 1);
    assert_eq!(armed[0].1, PhaseKind::Grow);
    assert_eq!(animator.path(), Some(&p2()));
}

#[test]
fn recorded_frames_show_a_travelling_pulse() {
    let mut animator = PulseAnimator::new(D);
    animator.start(p1(), ms(0));

    let mut frames: Vec<(u64, StrokeFrame)> = Vec::new();
    let mut now = 0;
    while now <= 12_000 {
        // Sample before delivering completion, as a frame rendered just
        // before the callback would be
        frames.push((now, animator.sample(ms(now)).unwrap()));
        if animator.completion_due(ms(now)) {
            animator.on_phase_complete(true, ms(now));
        }
        now += 20;
    }

    for window in frames.windows(2) {
        let ((t0, a), (t1, b)) = (window[0], window[1]);
        // Phase boundaries sit at multiples of D; a boundary frame still
        // shows the phase that just ran out
        let same_phase = t0 % 3000 != 0 && t1 % 3000 != 0 && t0 / 3000 == t1 / 3000;
        if !same_phase {
            continue;
        }
        if (t0 / 3000) % 2 == 0 {
            // grow: tail pinned at the start, head advancing
            assert_eq!(b.start, 0.0, "at {t1}");
            assert!(b.end >= a.end, "head went backwards at {t1}");
        } else {
            // shrink: head pinned at the end, tail advancing
            assert_eq!(b.end, 1.0, "at {t1}");
            assert!(b.start >= a.start, "tail went backwards at {t1}");
        }
    }

    // The frame where shrink has run out shows nothing, never the full path
    let at_shrink_end = frames.iter().find(|(t, _)| *t == 6000).unwrap().1;
    assert_eq!(at_shrink_end, StrokeFrame { start: 1.0, end: 1.0 });
    assert_eq!(at_shrink_end.visible_fraction(), 0.0);

    // The frame where grow has run out shows the whole path before shrink starts
    let at_grow_end = frames.iter().find(|(t, _)| *t == 3000).unwrap().1;
    assert_eq!(at_grow_end, StrokeFrame::MODEL);

    // Right after re-arming grow the stroke starts from nothing again
    let after_rearm = frames.iter().find(|(t, _)| *t == 6020).unwrap().1;
    assert_eq!(after_rearm.start, 0.0);
    assert!(after_rearm.end < 0.01);
}

#[test]
fn poll_loop_recomputes_only_on_viewport_change() {
    let route = [
        GeoCoordinate::new(48.187651, 16.359166),
        GeoCoordinate::new(50.4, 14.9),
        GeoCoordinate::new(52.522107, 13.413230),
    ];
    let projection = MercatorProjection::new(DVec2::new(390.0, 844.0));
    let v1 = Viewport::new(GeoCoordinate::new(50.35, 14.88), CoordinateSpan::new(5.2, 3.5));
    let v1_again = Viewport::new(GeoCoordinate::new(50.35, 14.88), CoordinateSpan::new(5.2, 3.5));
    let v2 = Viewport::new(GeoCoordinate::new(50.35, 14.88), CoordinateSpan::new(5.2, 3.5 + 1e-12));

    let mut animator = PulseAnimator::new(D);
    animator.start(build_path(&route, &v1, &projection), ms(0));
    let mut observer = ViewportObserver::new();
    observer.start();

    let mut recomputes = 0;
    for view in [v1, v1_again, v1_again, v2, v2, v1] {
        if observer.poll(&view) {
            assert!(resync(&mut animator, &route, &view, &projection));
            recomputes += 1;
        }
    }
    assert_eq!(recomputes, 3);
    assert_eq!(animator.path(), Some(&build_path(&route, &v1, &projection)));
    assert_eq!(animator.phase_index(), 0);
}

#[test]
fn resync_after_stop_is_dropped() {
    let route = [GeoCoordinate::new(1.0, 1.0), GeoCoordinate::new(2.0, 2.0)];
    let view = Viewport::new(GeoCoordinate::new(1.5, 1.5), CoordinateSpan::new(2.0, 2.0));
    let projection = MercatorProjection::new(DVec2::new(100.0, 100.0));

    let mut animator = PulseAnimator::new(D);
    assert!(!resync(&mut animator, &route, &view, &projection));
    assert!(animator.path().is_none());
}
