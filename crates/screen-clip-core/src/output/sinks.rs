use crate::{CoreResult, OutputSegment};

use std::path::PathBuf;

use async_trait::async_trait;

/// Asks the operator what to call a finished segment.
#[async_trait]
pub trait FileNamePrompt: Send + Sync {
    /// Returns the operator's answer, or `None` if the prompt was cancelled.
    async fn file_name(&self, default: &str) -> Option<String>;
}

/// Persists finished segments.
#[async_trait]
pub trait SegmentSaver: Send + Sync {
    /// Write the segment under its file name; returns where it landed.
    async fn save(&self, segment: &OutputSegment) -> CoreResult<PathBuf>;
}

/// Shows a playable preview of the latest segment.
#[async_trait]
pub trait PreviewSurface: Send + Sync {
    /// Replace any previous preview with `segment`.
    async fn show(&self, segment: &OutputSegment) -> CoreResult<()>;
}
