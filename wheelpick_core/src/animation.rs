//! What an animation driver needs to render one spin.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// CSS-style `cubic-bezier(x1, y1, x2, y2)`.
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Easing {
    /// Strong ease-out: fast start, long deceleration into the final angle.
    pub const WHEEL: Easing = Easing::CubicBezier {
        x1: 0.23,
        y1: 1.0,
        x2: 0.32,
        y2: 1.0,
    };

    /// Maps linear time progress in `[0, 1]` to motion progress in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicBezier { x1, y1, x2, y2 } => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let u = solve_bezier_param(t, x1, x2);
                bezier(u, y1, y2)
            }
        }
    }

    pub fn css(self) -> String {
        match self {
            Easing::Linear => "linear".to_string(),
            Easing::CubicBezier { x1, y1, x2, y2 } => {
                format!("cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::WHEEL
    }
}

// One axis of a cubic Bézier anchored at 0 and 1.
fn bezier(u: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - u;
    3.0 * inv * inv * u * p1 + 3.0 * inv * u * u * p2 + u * u * u
}

// x(u) is monotone for control points inside [0, 1], so bisection converges.
fn solve_bezier_param(x: f64, x1: f64, x2: f64) -> f64 {
    let (mut lo, mut hi) = (0.0, 1.0);
    for _ in 0..48 {
        let mid = (lo + hi) / 2.0;
        if bezier(mid, x1, x2) < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    (lo + hi) / 2.0
}

/// One accepted spin as seen by the rendering layer: turn from `from_deg` to
/// `target_deg` over `duration` following `easing`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinPlan {
    pub from_deg: f64,
    pub target_deg: f64,
    pub duration: Duration,
    pub easing: Easing,
}

impl SpinPlan {
    pub fn travel_deg(&self) -> f64 {
        self.target_deg - self.from_deg
    }

    /// Linear time progress, clamped to `[0, 1]`.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Wheel rotation to draw `elapsed` after the spin started.
    pub fn angle_at(&self, elapsed: Duration) -> f64 {
        let eased = self.easing.apply(self.progress(elapsed));
        self.from_deg + self.travel_deg() * eased
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> SpinPlan {
        SpinPlan {
            from_deg: 100.0,
            target_deg: 2260.0,
            duration: Duration::from_secs(4),
            easing: Easing::WHEEL,
        }
    }

    #[test]
    fn endpoints_are_exact() {
        let p = plan();
        assert_eq!(p.angle_at(Duration::ZERO), 100.0);
        assert_eq!(p.angle_at(Duration::from_secs(4)), 2260.0);
        assert_eq!(p.angle_at(Duration::from_secs(60)), 2260.0);
        assert!(p.is_finished(Duration::from_secs(4)));
    }

    #[test]
    fn wheel_curve_decelerates() {
        let e = Easing::WHEEL;
        // ease-out: well past halfway at the halfway mark
        assert!(e.apply(0.5) > 0.8);
        let first = e.apply(0.1) - e.apply(0.0);
        let last = e.apply(1.0) - e.apply(0.9);
        assert!(first > last);
    }

    #[test]
    fn angle_is_monotone() {
        let p = plan();
        let mut prev = p.angle_at(Duration::ZERO);
        for ms in (0..=4000).step_by(50) {
            let a = p.angle_at(Duration::from_millis(ms));
            assert!(a >= prev - 1e-9, "went backwards at {ms}ms");
            assert!(a <= p.target_deg + 1e-9);
            prev = a;
        }
    }

    #[test]
    fn linear_is_identity() {
        assert_eq!(Easing::Linear.apply(0.25), 0.25);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn css_matches_transition_syntax() {
        assert_eq!(Easing::WHEEL.css(), "cubic-bezier(0.23, 1, 0.32, 1)");
    }
}
