use screen_clip_core::WidgetVariant;

use serde::{Deserialize, Serialize};

/// Widget layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// `basic` or `full`.
    #[serde(default)]
    pub variant: WidgetVariant,
}
