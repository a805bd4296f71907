mod capture_config;
#[allow(clippy::module_inception)]
mod config;
mod ffmpeg_config;
mod output_config;
mod widget_config;

pub(crate) use {
    capture_config::CaptureConfig, config::Config, ffmpeg_config::FfmpegConfig,
    output_config::OutputConfig, widget_config::WidgetConfig,
};

use screen_clip_core::{DEFAULT_FILE_STEM, DEFAULT_FRAME_RATE};

use std::path::PathBuf;

use directories::{ProjectDirs, UserDirs};

pub(crate) const QUALIFIER: &str = "com";
pub(crate) const ORGANIZATION: &str = "screen-clip";
pub(crate) const APPLICATION: &str = "Screen-Clip";

pub(crate) const DEFAULT_FFMPEG_BINARY: &str = "ffmpeg";
pub(crate) const MAX_FRAME_RATE: u32 = 120;

pub(crate) fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

pub(crate) fn default_frame_rate() -> u32 {
    DEFAULT_FRAME_RATE
}

pub(crate) fn default_file_name() -> String {
    DEFAULT_FILE_STEM.to_string()
}

pub(crate) fn default_open_preview() -> bool {
    true
}

pub(crate) fn default_ffmpeg_binary() -> PathBuf {
    PathBuf::from(DEFAULT_FFMPEG_BINARY)
}

/// The user's Videos folder, else `recordings/` under the data dir, else the
/// working directory.
pub(crate) fn default_output_directory() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.video_dir().map(|dir| dir.join("Screen Clip")))
        .or_else(|| project_dirs().map(|dirs| dirs.data_dir().join("recordings")))
        .unwrap_or_else(|| PathBuf::from("recordings"))
}
