use crate::config::default_frame_rate;

use serde::{Deserialize, Serialize};

/// Screen and audio capture settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Initial state of the audio checkbox.
    #[serde(default)]
    pub include_audio: bool,
    /// Ideal frame rate requested from the grabber.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// Display to grab (None = platform default).
    #[serde(default)]
    pub display: Option<String>,
    /// Audio input to grab (None = platform default).
    #[serde(default)]
    pub audio_device: Option<String>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            include_audio: false,
            frame_rate: default_frame_rate(),
            display: None,
            audio_device: None,
        }
    }
}
