use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Text Reveal", inline)]
#[serde(default)]
/// Scroll-scrubbed word reveal.
pub struct RevealOptions {
    /// Class given to each generated unit element.
    pub unit_class: String,
    /// Unit color before reveal (`#rrggbb`).
    pub muted_color: String,
    /// Unit color once revealed (`#rrggbb`).
    pub revealed_color: String,
    /// Unit opacity before reveal.
    #[schemars(range(min = 0.0, max = 1.0))]
    pub initial_opacity: f32,
    /// Vertical offset before reveal, as a percentage of the unit height.
    pub initial_y_percent: f32,
    /// Unit scale before reveal.
    pub initial_scale: f32,
    /// Timeline length of one unit's transition.
    pub duration: f32,
    /// Start offset between consecutive units.
    pub stagger_each: f32,
    /// Gap after the last unit settles before the trailing hold begins.
    /// The hold itself lasts one `duration`.
    pub coast_delay: f32,
    /// Curve applied to each unit's local progress.
    pub ease: EasingFunction,
    /// Scroll position where the scrub starts (`"<element> <viewport>"`).
    pub start: String,
    /// Scroll position where the scrub ends.
    pub end: String,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            unit_class: "word".into(),
            muted_color: "#9aa0a6".into(),
            revealed_color: "#ffffff".into(),
            initial_opacity: 0.35,
            initial_y_percent: 25.0,
            initial_scale: 0.98,
            duration: 0.35,
            stagger_each: 0.01,
            coast_delay: 0.15,
            ease: EasingFunction::Power2Out,
            start: "top 80%".into(),
            end: "bottom top".into(),
        }
    }
}
