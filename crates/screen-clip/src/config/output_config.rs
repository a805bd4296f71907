use crate::config::{default_file_name, default_open_preview, default_output_directory};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where finished recordings go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory recordings are saved into.
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
    /// Name offered when the operator is asked for one.
    #[serde(default = "default_file_name")]
    pub default_file_name: String,
    /// Open each finished recording in the system player.
    #[serde(default = "default_open_preview")]
    pub open_preview: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            default_file_name: default_file_name(),
            open_preview: default_open_preview(),
        }
    }
}
