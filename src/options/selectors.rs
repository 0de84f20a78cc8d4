use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Selectors", inline)]
#[serde(default)]
/// CSS selectors locating each page hook by its role.
pub struct SelectorOptions {
    /// The first 3-D asset viewer; owns the loader progress bar.
    pub primary_viewer: String,
    /// Viewer carrying the hotspot overlay. Falls back to the primary
    /// viewer when nothing matches.
    pub hotspot_viewer: String,
    /// Progress bar container, scoped to the primary viewer.
    pub progress_bar: String,
    /// Progress bar fill whose width tracks load progress.
    pub progress_fill: String,
    /// Class that hides the progress bar once loading completes.
    pub progress_hidden_class: String,
    /// Element that eases toward the pointer.
    pub cursor_follower: String,
    /// Button that toggles the drawer.
    pub drawer_trigger: String,
    /// Drawer root (carries the hidden flag and the open class).
    pub drawer: String,
    /// Floating panel positioned under the trigger.
    pub drawer_panel: String,
    /// Scrim behind the drawer, scoped to the drawer root.
    pub drawer_scrim: String,
    /// Close controls, scoped to the drawer root.
    pub drawer_close: String,
    /// Text blocks revealed word by word on scroll.
    pub reveal_blocks: String,
    /// Hotspot buttons, scoped to the hotspot viewer.
    pub hotspots: String,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self {
            primary_viewer: "model-viewer".into(),
            hotspot_viewer: "#buds".into(),
            progress_bar: ".progress-bar".into(),
            progress_fill: ".update-bar".into(),
            progress_hidden_class: "hide".into(),
            cursor_follower: ".interactive".into(),
            drawer_trigger: "#menuToggle".into(),
            drawer: "#menuDrawer".into(),
            drawer_panel: ".menu-panel".into(),
            drawer_scrim: ".menu-scrim".into(),
            drawer_close: "[data-close]".into(),
            reveal_blocks: ".reveal-words".into(),
            hotspots: ".Hotspot".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Layout Tokens", inline)]
#[serde(default)]
/// Names of the style custom properties read on every positioning pass.
pub struct LayoutTokenNames {
    /// Vertical gap between trigger and panel.
    pub gap: String,
    /// Minimum distance from the panel to the viewport edge.
    pub gutter: String,
    /// Extra vertical nudge.
    pub top_offset: String,
    /// Extra horizontal nudge.
    pub right_offset: String,
}

impl Default for LayoutTokenNames {
    fn default() -> Self {
        Self {
            gap: "--menu-gap".into(),
            gutter: "--menu-gutter".into(),
            top_offset: "--menu-top-offset".into(),
            right_offset: "--menu-right-offset".into(),
        }
    }
}
