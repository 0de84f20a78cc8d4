//! Tween payloads handed to the animation engine.
//!
//! `TweenVars` serializes to the engine's native vars object: animatable
//! properties flattened next to the timing keys (`duration`, `repeat`,
//! `yoyo`, `ease`, `stagger`).

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize, Serializer};

use crate::util::easing::EasingFunction;

/// An animatable property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum PropValue {
    /// Unitless number (opacity, scale, `yPercent`, rotation degrees).
    Number(f64),
    /// Any CSS value string (colors, filters).
    Text(String),
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<f32> for PropValue {
    fn from(v: f32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for PropValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Property name → value, ordered for stable serialization.
pub type Props = BTreeMap<String, PropValue>;

/// `repeat` value that loops a tween forever.
pub const REPEAT_FOREVER: i32 = -1;

/// Per-item delay when a tween targets several elements. Items start in
/// target order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stagger {
    /// Seconds between consecutive item starts.
    pub each: f32,
}

/// Vars object for one tween.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TweenVars {
    /// Animated properties.
    #[serde(flatten)]
    pub props: Props,
    /// Seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f32>,
    /// Additional plays; [`REPEAT_FOREVER`] loops.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat: Option<i32>,
    /// Alternate direction on each repeat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yoyo: Option<bool>,
    /// Named curve.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_ease"
    )]
    pub ease: Option<EasingFunction>,
    /// Per-target stagger.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stagger: Option<Stagger>,
}

#[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
fn serialize_ease<S: Serializer>(
    ease: &Option<EasingFunction>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match ease {
        Some(e) => serializer.serialize_str(e.engine_name()),
        None => serializer.serialize_none(),
    }
}

impl TweenVars {
    /// Vars with the given properties and no timing keys.
    #[must_use]
    pub fn props(props: Props) -> Self {
        Self {
            props,
            ..Self::default()
        }
    }

    /// Add or replace one property.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<PropValue>) -> Self {
        let _ = self.props.insert(name.to_owned(), value.into());
        self
    }

    /// Set the duration in seconds.
    #[must_use]
    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Set the curve.
    #[must_use]
    pub fn ease(mut self, ease: EasingFunction) -> Self {
        self.ease = Some(ease);
        self
    }

    /// Loop forever, optionally alternating direction.
    #[must_use]
    pub fn forever(mut self, yoyo: bool) -> Self {
        self.repeat = Some(REPEAT_FOREVER);
        self.yoyo = Some(yoyo);
        self
    }

    /// Stagger the start of each target by `each` seconds.
    #[must_use]
    pub fn stagger(mut self, each: f32) -> Self {
        self.stagger = Some(Stagger { each });
        self
    }

    /// Numeric property value, if present.
    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.props.get(name)? {
            PropValue::Number(v) => Some(*v),
            PropValue::Text(_) => None,
        }
    }

    /// Textual property value, if present.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.props.get(name)? {
            PropValue::Text(v) => Some(v),
            PropValue::Number(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_flat_engine_vars() {
        let vars = TweenVars::default()
            .with("rotation", 360.0)
            .duration(20.0)
            .ease(EasingFunction::Linear)
            .forever(false);
        let json = serde_json::to_value(&vars).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "rotation": 360.0,
                "duration": 20.0,
                "repeat": -1,
                "yoyo": false,
                "ease": "none",
            })
        );
    }

    #[test]
    fn omits_unset_timing_keys() {
        let vars = TweenVars::default().with("color", "#ffffff");
        let json = serde_json::to_value(&vars).unwrap();
        assert_eq!(json, serde_json::json!({ "color": "#ffffff" }));
    }

    #[test]
    fn stagger_serializes_as_object() {
        let vars = TweenVars::default().with("opacity", 1.0).stagger(0.5);
        let json = serde_json::to_value(&vars).unwrap();
        assert_eq!(json["stagger"], serde_json::json!({"each": 0.5}));
    }

    #[test]
    fn typed_accessors() {
        let vars = TweenVars::default().with("opacity", 0.5).with("color", "#fff");
        assert_eq!(vars.number("opacity"), Some(0.5));
        assert_eq!(vars.text("color"), Some("#fff"));
        assert_eq!(vars.number("color"), None);
        assert_eq!(vars.text("missing"), None);
    }
}
