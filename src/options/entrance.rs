use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Hotspot Entrance", inline)]
#[serde(default)]
/// One-shot hotspot entrance played when the viewer finishes loading.
pub struct EntranceOptions {
    /// Starting scale of each hotspot.
    pub from_scale: f32,
    /// Starting opacity of each hotspot.
    pub from_opacity: f32,
    /// Duration of each hotspot's tween, in seconds.
    pub duration: f32,
    /// Delay increment between consecutive hotspots, in seconds.
    pub stagger: f32,
    /// Tween curve.
    pub ease: EasingFunction,
}

impl Default for EntranceOptions {
    fn default() -> Self {
        Self {
            from_scale: 0.6,
            from_opacity: 0.0,
            duration: 0.5,
            stagger: 0.12,
            ease: EasingFunction::Power2Out,
        }
    }
}
