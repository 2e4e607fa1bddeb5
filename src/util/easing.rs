//! Falloff curves for depth fog and highlight pulsing.
//!
//! Every curve maps `[0, 1]` onto `[0, 1]`, is monotonic non-decreasing, and
//! clamps its input.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Shape of a normalized falloff.
#[derive(
    Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Straight line.
    Linear,
    /// Hermite smoothstep `3t² - 2t³` (soft at both ends).
    #[default]
    SmoothStep,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Square root ease-out (fast start, gradual slow).
    SqrtOut,
}

impl EasingFunction {
    /// Evaluate the curve at `t` (clamped to `[0, 1]`).
    #[inline]
    #[must_use]
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::QuadraticIn => t * t,
            Self::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Self::SqrtOut => t.sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingFunction; 5] = [
        EasingFunction::Linear,
        EasingFunction::SmoothStep,
        EasingFunction::QuadraticIn,
        EasingFunction::QuadraticOut,
        EasingFunction::SqrtOut,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for f in ALL {
            assert_eq!(f.evaluate(0.0), 0.0, "{f:?}");
            assert!((f.evaluate(1.0) - 1.0).abs() < 1e-6, "{f:?}");
        }
    }

    #[test]
    fn input_is_clamped() {
        for f in ALL {
            assert_eq!(f.evaluate(-0.5), 0.0);
            assert!((f.evaluate(1.5) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for f in ALL {
            let mut prev = 0.0;
            for i in 0..=100 {
                let v = f.evaluate(i as f32 / 100.0);
                assert!(v >= prev, "{f:?} not monotonic at {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn smoothstep_midpoint() {
        assert_eq!(EasingFunction::SmoothStep.evaluate(0.5), 0.5);
        assert_eq!(EasingFunction::QuadraticOut.evaluate(0.5), 0.75);
    }
}
