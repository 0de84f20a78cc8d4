use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Cursor Follow", inline)]
#[serde(default)]
/// Cursor-follow damping.
pub struct CursorOptions {
    /// Smoothing constant K: each frame closes `1/K` of the remaining
    /// distance. Values below 1 are treated as 1.
    #[schemars(title = "Smoothing", range(min = 1.0, max = 60.0), extend("step" = 1.0))]
    pub smoothing: f32,
}

impl Default for CursorOptions {
    fn default() -> Self {
        Self { smoothing: 20.0 }
    }
}
