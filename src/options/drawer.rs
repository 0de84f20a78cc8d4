use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Drawer", inline)]
#[serde(default)]
/// Navigation drawer behavior.
pub struct DrawerOptions {
    /// Class toggled to run the open/close CSS transition.
    pub open_class: String,
    /// Delay before the closed drawer is hidden. Matches the CSS close
    /// transition duration.
    #[schemars(title = "Close Delay (ms)", range(min = 0, max = 2000))]
    pub close_delay_ms: u64,
    /// Key that dismisses the drawer.
    pub dismiss_key: String,
}

impl Default for DrawerOptions {
    fn default() -> Self {
        Self {
            open_class: "open".into(),
            close_delay_ms: 380,
            dismiss_key: "Escape".into(),
        }
    }
}
