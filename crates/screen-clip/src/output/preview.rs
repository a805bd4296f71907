use screen_clip_core::{CoreResult, FILE_EXTENSION, OutputSegment, PreviewSurface};

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, instrument};

/// Stem of the single preview file; each new preview replaces the last.
pub(crate) const PREVIEW_STEM: &str = "preview";

/// Plays the latest recording in the system's default player.
pub struct SystemPreview {
    directory: PathBuf,
    launch: bool,
}

impl SystemPreview {
    /// Preview kept in `directory` and opened with the system player.
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            launch: true,
        }
    }

    /// Whether to launch the player after writing the file.
    pub fn with_player(mut self, launch: bool) -> Self {
        self.launch = launch;
        self
    }

    /// Where the preview file lives.
    pub fn path(&self) -> PathBuf {
        self.directory.join(format!("{}.{}", PREVIEW_STEM, FILE_EXTENSION))
    }
}

#[async_trait]
impl PreviewSurface for SystemPreview {
    #[instrument(skip(self, segment), fields(session_id = %segment.session_id))]
    async fn show(&self, segment: &OutputSegment) -> CoreResult<()> {
        tokio::fs::create_dir_all(&self.directory).await?;

        let path = self.path();
        tokio::fs::write(&path, &segment.blob.bytes).await?;

        if self.launch {
            open::that_detached(&path)?;
        }

        debug!(path = ?path, launched = self.launch, "Preview ready");

        Ok(())
    }
}
