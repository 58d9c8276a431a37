//! Looping two-phase stroke animation over a replaceable path.
//!
//! The animator cycles `grow -> shrink -> grow -> ...` until stopped. Grow
//! reveals the stroke's end edge from 0 to 1 and reverts when it finishes;
//! shrink advances the start edge from 0 to 1 and keeps its final value until
//! the next phase replaces it. Together they read as a highlighted segment
//! travelling along the route, rather than a stroke fading in and out.
//!
//! Time is host time: every operation that arms a phase takes `now`, the
//! elapsed time on the host's animation clock.

use std::time::Duration;

use bevy_ecs::prelude::Resource;

use crate::map::ScreenPoint;
use crate::path::Path;
use crate::timing::TimingCurve;

/// Default duration of each phase.
pub const DEFAULT_PHASE_DURATION: Duration = Duration::from_secs(3);

/// Which edge of the stroke a phase animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeKey {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Grow,
    Shrink,
}

/// Fixed parameters of one phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseSpec {
    pub kind: PhaseKind,
    pub key: StrokeKey,
    pub from: f64,
    pub to: f64,
    pub timing: TimingCurve,
    pub duration: Duration,
    /// Hold the `to` value once the phase finishes instead of reverting
    pub retain_on_completion: bool,
}

impl PhaseSpec {
    pub fn grow(duration: Duration) -> Self {
        Self {
            kind: PhaseKind::Grow,
            key: StrokeKey::End,
            from: 0.0,
            to: 1.0,
            timing: TimingCurve::ease_in(),
            duration,
            retain_on_completion: false,
        }
    }

    pub fn shrink(duration: Duration) -> Self {
        Self {
            kind: PhaseKind::Shrink,
            key: StrokeKey::Start,
            from: 0.0,
            to: 1.0,
            timing: TimingCurve::ease_out(),
            duration,
            retain_on_completion: true,
        }
    }

    /// Value of the animated edge `elapsed` after arming.
    fn value_at(&self, elapsed: Duration) -> f64 {
        let t = if self.duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f64() / self.duration.as_secs_f64()
        };
        self.from + (self.to - self.from) * self.timing.progress(t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    Stopped,
    Running { phase_index: usize },
}

/// The in-flight phase animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmedPhase {
    pub kind: PhaseKind,
    pub armed_at: Duration,
}

/// Presentation values of the stroke edges, as fractions of path length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeFrame {
    pub start: f64,
    pub end: f64,
}

impl StrokeFrame {
    /// The layer's model values when no animation overrides them.
    pub const MODEL: StrokeFrame = StrokeFrame { start: 0.0, end: 1.0 };

    /// Share of the path currently stroked.
    pub fn visible_fraction(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    fn with(mut self, key: StrokeKey, value: f64) -> Self {
        match key {
            StrokeKey::Start => self.start = value,
            StrokeKey::End => self.end = value,
        }
        self
    }
}

#[derive(Debug, Resource)]
pub struct PulseAnimator {
    duration: Duration,
    state: AnimatorState,
    phases: Vec<PhaseSpec>,
    path: Option<Path>,
    armed: Option<ArmedPhase>,
}

impl Default for PulseAnimator {
    fn default() -> Self {
        Self::new(DEFAULT_PHASE_DURATION)
    }
}

impl PulseAnimator {
    /// Creates a stopped animator whose phases will each last `duration`.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            state: AnimatorState::Stopped,
            phases: Vec::new(),
            path: None,
            armed: None,
        }
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, AnimatorState::Running { .. })
    }

    /// Index of the current phase; 0 while stopped.
    pub fn phase_index(&self) -> usize {
        match self.state {
            AnimatorState::Running { phase_index } => phase_index,
            AnimatorState::Stopped => 0,
        }
    }

    pub fn phase_duration(&self) -> Duration {
        self.duration
    }

    pub fn phases(&self) -> &[PhaseSpec] {
        &self.phases
    }

    pub fn current_phase(&self) -> Option<&PhaseSpec> {
        match self.state {
            AnimatorState::Running { phase_index } => self.phases.get(phase_index),
            AnimatorState::Stopped => None,
        }
    }

    pub fn armed(&self) -> Option<ArmedPhase> {
        self.armed
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// Starts the cycle on `path`, arming grow at `now`.
    ///
    /// Returns `false` and changes nothing if the animator is already running.
    pub fn start(&mut self, path: Path, now: Duration) -> bool {
        if self.is_running() {
            tracing::debug!("Pulse animation already running, ignoring start");
            return false;
        }

        self.phases = vec![PhaseSpec::grow(self.duration), PhaseSpec::shrink(self.duration)];
        self.path = Some(path);
        self.state = AnimatorState::Running { phase_index: 0 };
        self.arm(now);
        true
    }

    /// Handles the host's completion callback for the armed phase.
    ///
    /// Interrupted and finished phases advance alike. Returns the newly armed
    /// phase, or `None` while stopped.
    pub fn on_phase_complete(&mut self, finished: bool, now: Duration) -> Option<PhaseKind> {
        let AnimatorState::Running { phase_index } = self.state else {
            return None;
        };

        tracing::trace!(phase_index, finished, "Pulse phase completed");
        let next = (phase_index + 1) % self.phases.len();
        self.state = AnimatorState::Running { phase_index: next };
        self.arm(now)
    }

    /// Swaps the geometry under the running animation.
    ///
    /// The armed phase keeps its timing and the phase index is untouched.
    /// Returns `false` while stopped.
    pub fn set_path(&mut self, path: Path) -> bool {
        if !self.is_running() {
            return false;
        }
        self.path = Some(path);
        true
    }

    /// Cancels the armed phase and discards all phase state.
    ///
    /// Returns `false` if the animator was already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }

        self.armed = None;
        self.phases.clear();
        self.path = None;
        self.state = AnimatorState::Stopped;
        tracing::info!("Pulse animation stopped");
        true
    }

    /// `true` once the armed phase has run for its full duration.
    pub fn completion_due(&self, now: Duration) -> bool {
        match (self.armed, self.current_phase()) {
            (Some(armed), Some(spec)) => now.saturating_sub(armed.armed_at) >= spec.duration,
            _ => false,
        }
    }

    /// Stroke edges as presented at `now`; `None` while stopped.
    pub fn sample(&self, now: Duration) -> Option<StrokeFrame> {
        let armed = self.armed?;
        let spec = self.current_phase()?;
        let elapsed = now.saturating_sub(armed.armed_at);

        if elapsed >= spec.duration && !spec.retain_on_completion {
            return Some(StrokeFrame::MODEL);
        }
        Some(StrokeFrame::MODEL.with(spec.key, spec.value_at(elapsed)))
    }

    /// The part of the current path that is stroked at `now`.
    pub fn visible_path(&self, now: Duration) -> Option<Vec<ScreenPoint>> {
        let frame = self.sample(now)?;
        let path = self.path.as_ref()?;
        Some(path.trimmed(frame.start, frame.end))
    }

    // Arms the phase at the current index, replacing whatever was armed.
    fn arm(&mut self, now: Duration) -> Option<PhaseKind> {
        let spec = self.current_phase().copied()?;
        self.armed = Some(ArmedPhase { kind: spec.kind, armed_at: now });
        tracing::debug!(
            phase = ?spec.kind,
            duration_ms = spec.duration.as_millis() as u64,
            points = self.path.as_ref().map_or(0, Path::len),
            "Armed pulse phase"
        );
        Some(spec.kind)
    }
}
