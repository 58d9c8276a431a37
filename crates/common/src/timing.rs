//! Cubic-bezier timing curves with fixed endpoints (0,0) and (1,1).

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 32;
const EPSILON: f64 = 1e-7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingCurve {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl TimingCurve {
    pub const fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub const fn linear() -> Self {
        Self::cubic_bezier(0.0, 0.0, 1.0, 1.0)
    }

    pub const fn ease_in() -> Self {
        Self::cubic_bezier(0.42, 0.0, 1.0, 1.0)
    }

    pub const fn ease_out() -> Self {
        Self::cubic_bezier(0.0, 0.0, 0.58, 1.0)
    }

    pub const fn ease_in_out() -> Self {
        Self::cubic_bezier(0.42, 0.0, 0.58, 1.0)
    }

    /// Maps a time fraction to a value fraction. Input is clamped to [0, 1].
    pub fn progress(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let s = self.solve_x(t);
        bezier(self.y1, self.y2, s).clamp(0.0, 1.0)
    }

    /// Finds the curve parameter whose x equals `x`.
    fn solve_x(&self, x: f64) -> f64 {
        // Newton first, it converges in a few steps on well-behaved curves
        let mut s = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = bezier(self.x1, self.x2, s) - x;
            if err.abs() < EPSILON {
                return s;
            }
            let slope = bezier_slope(self.x1, self.x2, s);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= err / slope;
            if !(0.0..=1.0).contains(&s) {
                break;
            }
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        s = x;
        for _ in 0..BISECTION_ITERATIONS {
            let value = bezier(self.x1, self.x2, s);
            if (value - x).abs() < EPSILON {
                break;
            }
            if value < x {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        s
    }
}

impl Default for TimingCurve {
    fn default() -> Self {
        Self::linear()
    }
}

// One axis of the cubic with P0 = 0 and P3 = 1.
fn bezier(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for curve in [
            TimingCurve::linear(),
            TimingCurve::ease_in(),
            TimingCurve::ease_out(),
            TimingCurve::ease_in_out(),
        ] {
            assert_eq!(curve.progress(0.0), 0.0);
            assert_eq!(curve.progress(1.0), 1.0);
            assert_eq!(curve.progress(-3.0), 0.0);
            assert_eq!(curve.progress(7.0), 1.0);
        }
    }

    #[test]
    fn linear_is_identity() {
        let curve = TimingCurve::linear();
        for i in 1..10 {
            let t = i as f64 / 10.0;
            assert!((curve.progress(t) - t).abs() < 1e-5);
        }
    }

    #[test]
    fn ease_in_lags_and_ease_out_leads() {
        assert!(TimingCurve::ease_in().progress(0.5) < 0.5);
        assert!(TimingCurve::ease_out().progress(0.5) > 0.5);
        let mid = TimingCurve::ease_in_out().progress(0.5);
        assert!((mid - 0.5).abs() < 1e-4);
    }

    #[test]
    fn curves_are_monotone() {
        for curve in [TimingCurve::ease_in(), TimingCurve::ease_out()] {
            let mut last = 0.0;
            for i in 0..=100 {
                let v = curve.progress(i as f64 / 100.0);
                assert!(v + 1e-9 >= last, "{curve:?} went backwards at step {i}");
                last = v;
            }
        }
    }
}
