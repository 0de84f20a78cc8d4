use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::host::tween::{PropValue, Props};
use crate::util::easing::EasingFunction;

/// One endlessly repeating background tween.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct AmbientTween {
    /// Elements animated by this tween.
    pub selector: String,
    /// Seconds per cycle.
    pub duration: f32,
    /// Play every other cycle backwards.
    #[serde(default)]
    pub yoyo: bool,
    /// Cycle curve.
    pub ease: EasingFunction,
    /// Explicit starting values; omitted means "from the current style".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Props>,
    /// Values reached at the end of each cycle.
    pub to: Props,
}

impl AmbientTween {
    fn looping(
        selector: &str,
        property: &str,
        value: impl Into<PropValue>,
        duration: f32,
        yoyo: bool,
        ease: EasingFunction,
    ) -> Self {
        Self {
            selector: selector.into(),
            duration,
            yoyo,
            ease,
            from: None,
            to: Props::from([(property.into(), value.into())]),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Background", inline)]
#[serde(default)]
/// Ambient background motion started once at install.
pub struct BackgroundOptions {
    /// Looping tweens, started in order.
    pub tweens: Vec<AmbientTween>,
}

impl Default for BackgroundOptions {
    fn default() -> Self {
        let drift = EasingFunction::Power1InOut;
        let spin = EasingFunction::Linear;
        let hue = |deg: u32| {
            PropValue::from(format!(
                "hue-rotate({deg}deg) brightness(.95) contrast(1.05)"
            ))
        };
        Self {
            tweens: vec![
                AmbientTween::looping(".g1", "yPercent", 10.0, 15.0, true, drift),
                AmbientTween::looping(".g4", "xPercent", 10.0, 20.0, true, drift),
                AmbientTween::looping(".g2", "rotation", -360.0, 20.0, false, spin),
                AmbientTween::looping(".g3", "rotation", 360.0, 40.0, false, spin),
                AmbientTween::looping(".g5", "rotation", 360.0, 20.0, false, spin),
                AmbientTween {
                    selector: ".gradient-bg".into(),
                    duration: 24.0,
                    yoyo: false,
                    ease: spin,
                    from: Some(Props::from([("filter".into(), hue(0))])),
                    to: Props::from([("filter".into(), hue(360))]),
                },
            ],
        }
    }
}
