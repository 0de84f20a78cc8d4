//! Page-motion options with TOML preset support.
//!
//! Every tweakable setting (selectors, layout token names, cursor damping,
//! drawer timing, reveal styling, entrance and background tweens) lives
//! here. Options serialize to/from TOML so a page can ship a preset next to
//! its markup.

mod background;
mod cursor;
mod drawer;
mod entrance;
mod reveal;
mod selectors;

use std::path::Path;

pub use background::{AmbientTween, BackgroundOptions};
pub use cursor::CursorOptions;
pub use drawer::DrawerOptions;
pub use entrance::EntranceOptions;
pub use reveal::RevealOptions;
use schemars::JsonSchema;
pub use selectors::{LayoutTokenNames, SelectorOptions};
use serde::{Deserialize, Serialize};

use crate::error::MotionError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[drawer]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(default)]
pub struct MotionOptions {
    /// Page hook selectors.
    pub selectors: SelectorOptions,
    /// Style custom properties feeding the drawer placement.
    pub layout_tokens: LayoutTokenNames,
    /// Cursor-follow damping.
    pub cursor: CursorOptions,
    /// Drawer timing and classes.
    pub drawer: DrawerOptions,
    /// Scroll reveal styling and timeline.
    pub reveal: RevealOptions,
    /// Hotspot entrance tween.
    pub entrance: EntranceOptions,
    /// Ambient background loops.
    pub background: BackgroundOptions,
}

impl MotionOptions {
    /// Generate JSON Schema describing the options document.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(MotionOptions)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, MotionError> {
        toml::from_str(content)
            .map_err(|e| MotionError::OptionsParse(e.to_string()))
    }

    /// Serialize to pretty-printed TOML.
    pub fn to_toml_string(&self) -> Result<String, MotionError> {
        toml::to_string_pretty(self)
            .map_err(|e| MotionError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, MotionError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), MotionError> {
        let content = self.to_toml_string()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(MotionError::Io)
    }
}
