use crate::config::default_ffmpeg_binary;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// External encoder location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FfmpegConfig {
    /// ffmpeg executable, looked up on `PATH` when not absolute.
    #[serde(default = "default_ffmpeg_binary")]
    pub binary: PathBuf,
}

impl Default for FfmpegConfig {
    fn default() -> Self {
        Self {
            binary: default_ffmpeg_binary(),
        }
    }
}
