//! Easing functions for tween and scrub interpolation.
//!
//! The variants mirror the named curves of the tweening engine so the same
//! value can be evaluated locally (scroll-scrubbed reveal) and handed to the
//! engine by name (ambient background, entrance).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    #[serde(rename = "none")]
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    #[serde(rename = "power1.in")]
    Power1In,
    /// Quadratic ease-out (fast start, slow end).
    #[serde(rename = "power1.out")]
    Power1Out,
    /// Quadratic ease-in-out, symmetric around t = 0.5.
    #[serde(rename = "power1.inOut")]
    Power1InOut,
    /// Cubic ease-in.
    #[serde(rename = "power2.in")]
    Power2In,
    /// Cubic ease-out.
    #[default]
    #[serde(rename = "power2.out")]
    Power2Out,
    /// Cubic ease-in-out.
    #[serde(rename = "power2.inOut")]
    Power2InOut,
}

impl EasingFunction {
    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    /// Returns the eased value, also in [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::Power1In => t * t,
            Self::Power1Out => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Self::Power1InOut => in_out(t, 2),
            Self::Power2In => t * t * t,
            Self::Power2Out => {
                let omt = 1.0 - t;
                1.0 - omt * omt * omt
            }
            Self::Power2InOut => in_out(t, 3),
        }
    }

    /// The engine's name for this curve (`"power2.out"`, `"none"`, ...).
    #[must_use]
    pub fn engine_name(&self) -> &'static str {
        match self {
            Self::Linear => "none",
            Self::Power1In => "power1.in",
            Self::Power1Out => "power1.out",
            Self::Power1InOut => "power1.inOut",
            Self::Power2In => "power2.in",
            Self::Power2Out => "power2.out",
            Self::Power2InOut => "power2.inOut",
        }
    }
}

/// Symmetric in-out power curve of degree `p`.
fn in_out(t: f32, p: i32) -> f32 {
    if t < 0.5 {
        (2.0 * t).powi(p) / 2.0
    } else {
        1.0 - (2.0 * (1.0 - t)).powi(p) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingFunction; 7] = [
        EasingFunction::Linear,
        EasingFunction::Power1In,
        EasingFunction::Power1Out,
        EasingFunction::Power1InOut,
        EasingFunction::Power2In,
        EasingFunction::Power2Out,
        EasingFunction::Power2InOut,
    ];

    #[test]
    fn test_linear_endpoints() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(0.0), 0.0);
        assert_eq!(linear.evaluate(0.5), 0.5);
        assert_eq!(linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_all_curves_hit_endpoints() {
        for ease in ALL {
            assert!(ease.evaluate(0.0).abs() < 1e-6, "{ease:?} at 0");
            assert!((ease.evaluate(1.0) - 1.0).abs() < 1e-6, "{ease:?} at 1");
        }
    }

    #[test]
    fn test_input_clamping() {
        for ease in ALL {
            assert_eq!(ease.evaluate(-0.5), ease.evaluate(0.0));
            assert_eq!(ease.evaluate(1.5), ease.evaluate(1.0));
        }
    }

    #[test]
    fn test_power2_out_shape() {
        let ease = EasingFunction::Power2Out;
        // 1 - (1 - 0.5)^3
        assert!((ease.evaluate(0.5) - 0.875).abs() < 1e-6);
        assert!(ease.evaluate(0.25) > 0.25);
    }

    #[test]
    fn test_in_out_is_symmetric() {
        let ease = EasingFunction::Power1InOut;
        assert!((ease.evaluate(0.5) - 0.5).abs() < 1e-6);
        let a = ease.evaluate(0.2);
        let b = 1.0 - ease.evaluate(0.8);
        assert!((a - b).abs() < 1e-6);
    }

    #[test]
    fn test_curves_are_monotonic() {
        for ease in ALL {
            let mut prev = 0.0;
            for i in 0..=100 {
                let v = ease.evaluate(i as f32 / 100.0);
                assert!(v + 1e-6 >= prev, "{ease:?} decreased at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn test_engine_names_match_serde() {
        for ease in ALL {
            let json = serde_json::to_value(ease).unwrap();
            assert_eq!(json.as_str(), Some(ease.engine_name()));
        }
    }
}
