//! Viewport-change detection by per-frame polling.
//!
//! The host calls [`ViewportObserver::poll`] once per display refresh with the
//! current viewport. Comparison is exact, so floating-point jitter in the
//! reported region triggers a rebuild; rebuilding unchanged geometry is cheap
//! and yields the same path.

use bevy_ecs::prelude::Resource;

use crate::animator::PulseAnimator;
use crate::map::{GeoCoordinate, Projection, Viewport};
use crate::path::build_path;

#[derive(Debug, Default, Resource)]
pub struct ViewportObserver {
    previous: Option<Viewport>,
    active: bool,
}

impl ViewportObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to refresh ticks. Calling it again while active does nothing.
    pub fn start(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        tracing::debug!("Viewport observation started");
    }

    /// Unsubscribes and forgets the recorded viewport.
    pub fn stop(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.previous = None;
        tracing::debug!("Viewport observation stopped");
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn previous(&self) -> Option<&Viewport> {
        self.previous.as_ref()
    }

    /// Records `current` and reports whether it differs from the last tick.
    ///
    /// The first poll after `start` always reports a change. Inactive
    /// observers never do.
    pub fn poll(&mut self, current: &Viewport) -> bool {
        if !self.active {
            return false;
        }
        if self.previous.as_ref() == Some(current) {
            return false;
        }
        self.previous = Some(*current);
        true
    }
}

/// Rebuilds the animated path for `viewport` and hands it to the animator.
///
/// Returns `false` if the animator is stopped and the path was dropped.
pub fn resync<P>(
    animator: &mut PulseAnimator,
    route: &[GeoCoordinate],
    viewport: &Viewport,
    projection: &P,
) -> bool
where
    P: Projection + ?Sized,
{
    animator.set_path(build_path(route, viewport, projection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::CoordinateSpan;

    fn v1() -> Viewport {
        Viewport::new(GeoCoordinate::new(50.3, 14.9), CoordinateSpan::new(5.0, 4.0))
    }

    #[test]
    fn inactive_observer_reports_nothing() {
        let mut observer = ViewportObserver::new();
        assert!(!observer.poll(&v1()));
        assert!(observer.previous().is_none());
    }

    #[test]
    fn first_poll_always_changes() {
        let mut observer = ViewportObserver::new();
        observer.start();
        assert!(observer.poll(&v1()));
        assert_eq!(observer.previous(), Some(&v1()));
    }

    #[test]
    fn identical_viewport_is_not_a_change() {
        let mut observer = ViewportObserver::new();
        observer.start();
        observer.poll(&v1());
        assert!(!observer.poll(&v1()));
        assert!(!observer.poll(&v1()));
    }

    #[test]
    fn any_longitude_delta_difference_is_a_change() {
        let mut observer = ViewportObserver::new();
        observer.start();
        observer.poll(&v1());

        let mut v2 = v1();
        v2.span.longitude_delta = f64::from_bits(v2.span.longitude_delta.to_bits() + 1);
        assert!(observer.poll(&v2));
        assert!(observer.poll(&v1()));
    }

    #[test]
    fn restart_forgets_previous_viewport() {
        let mut observer = ViewportObserver::new();
        observer.start();
        observer.poll(&v1());
        observer.stop();
        assert!(!observer.is_active());
        observer.start();
        assert!(observer.poll(&v1()));
    }
}
