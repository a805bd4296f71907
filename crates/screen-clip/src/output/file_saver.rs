use screen_clip_core::{ClipError, CoreResult, OutputSegment, SegmentSaver};

use std::{panic::Location, path::PathBuf};

use async_trait::async_trait;
use error_location::ErrorLocation;
use tracing::{info, instrument};

/// Writes finished recordings into one directory.
pub struct FileSaver {
    directory: PathBuf,
}

impl FileSaver {
    /// Saver writing into `directory`, created on first save.
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl SegmentSaver for FileSaver {
    #[instrument(skip(self, segment), fields(file_name = %segment.file_name))]
    async fn save(&self, segment: &OutputSegment) -> CoreResult<PathBuf> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| ClipError::SaveFailed {
                reason: format!("Failed to create {:?}: {}", self.directory, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let path = self.directory.join(&segment.file_name);

        tokio::fs::write(&path, &segment.blob.bytes)
            .await
            .map_err(|e| ClipError::SaveFailed {
                reason: format!("Failed to write {:?}: {}", path, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(
            session_id = %segment.session_id,
            path = ?path,
            bytes = segment.blob.len(),
            "Recording written"
        );

        Ok(path)
    }
}
