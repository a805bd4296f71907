use serde::{Deserialize, Serialize};

/// The two shipped widget layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetVariant {
    /// Short labels, no lamp, no shortcut.
    Basic,
    /// Long labels, recording lamp, Alt+Shift+S shortcut.
    #[default]
    Full,
}

/// Cosmetic configuration of one widget instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetOptions {
    /// Pause/Resume control label while recording.
    pub pause_label: String,
    /// Pause/Resume control label while paused.
    pub resume_label: String,
    /// Whether the recording lamp is shown while active.
    pub show_indicator: bool,
    /// Whether the global start/stop shortcut is honoured.
    pub shortcut_enabled: bool,
}

impl WidgetOptions {
    /// Options for `variant`.
    pub fn for_variant(variant: WidgetVariant) -> Self {
        match variant {
            WidgetVariant::Basic => Self {
                pause_label: "Pause".to_string(),
                resume_label: "Resume".to_string(),
                show_indicator: false,
                shortcut_enabled: false,
            },
            WidgetVariant::Full => Self {
                pause_label: "Pause Recording".to_string(),
                resume_label: "Resume Recording".to_string(),
                show_indicator: true,
                shortcut_enabled: true,
            },
        }
    }
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self::for_variant(WidgetVariant::default())
    }
}
