//! VP8/Opus webm encoder backed by ffmpeg processes.
//!
//! ffmpeg cannot suspend a grab, so each run of a session is its own part:
//! pause finishes the running part, resume starts the next one and stop
//! joins all parts with the concat demuxer. A part that exits without being
//! asked to means the capture went away, which is reported through the
//! stream's ended handle.

use crate::ffmpeg::{concat_args, concat_list, is_supported_mime, segment_args};

use screen_clip_core::{
    CaptureStream, ClipError, CoreResult, EncoderFactory, EncoderOptions, MediaBlob, MediaEncoder,
    StreamSource, TrackEndedHandle,
};

use std::{
    panic::Location,
    path::{Path, PathBuf},
    process::{ExitStatus, Stdio},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use error_location::ErrorLocation;
use tempfile::TempDir;
use tokio::{
    io::AsyncWriteExt,
    process::{ChildStdin, Command},
    task::JoinHandle,
};
use tracing::{debug, error, info, instrument, warn};

/// How long a part may take to flush after being asked to quit.
pub(crate) const FINISH_TIMEOUT: Duration = Duration::from_secs(10);

/// Creates [`FfmpegEncoder`]s for granted streams.
pub struct FfmpegEncoders {
    binary: PathBuf,
    finish_timeout: Duration,
}

impl FfmpegEncoders {
    /// Factory spawning `binary`.
    pub fn new(binary: PathBuf) -> Self {
        Self {
            binary,
            finish_timeout: FINISH_TIMEOUT,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_finish_timeout(mut self, finish_timeout: Duration) -> Self {
        self.finish_timeout = finish_timeout;
        self
    }
}

impl EncoderFactory for FfmpegEncoders {
    fn is_type_supported(&self, mime_type: &str) -> bool {
        is_supported_mime(mime_type)
    }

    fn create(
        &self,
        stream: &CaptureStream,
        options: &EncoderOptions,
    ) -> CoreResult<Box<dyn MediaEncoder>> {
        let workdir = tempfile::Builder::new()
            .prefix("screen-clip-")
            .tempdir()?;

        debug!(
            stream_id = %stream.id(),
            workdir = ?workdir.path(),
            "Encoder work directory created"
        );

        Ok(Box::new(FfmpegEncoder {
            binary: self.binary.clone(),
            finish_timeout: self.finish_timeout,
            source: stream.source().clone(),
            mime_type: options.mime_type.clone(),
            ended: stream.ended_handle(),
            workdir,
            parts: Vec::new(),
            running: None,
        }))
    }
}

/// One ffmpeg process writing one part.
struct RunningPart {
    stdin: Option<ChildStdin>,
    requested: Arc<AtomicBool>,
    watcher: JoinHandle<std::io::Result<ExitStatus>>,
}

/// Encoder for one recording session.
pub struct FfmpegEncoder {
    binary: PathBuf,
    finish_timeout: Duration,
    source: StreamSource,
    mime_type: String,
    ended: TrackEndedHandle,
    workdir: TempDir,
    parts: Vec<PathBuf>,
    running: Option<RunningPart>,
}

impl FfmpegEncoder {
    fn next_part_path(&self) -> PathBuf {
        self.workdir
            .path()
            .join(format!("part-{:03}.webm", self.parts.len()))
    }

    #[instrument(skip(self))]
    async fn spawn_part(&mut self) -> CoreResult<()> {
        if self.running.is_some() {
            return Ok(());
        }

        let path = self.next_part_path();

        let mut child = Command::new(&self.binary)
            .args(segment_args(&self.source, &path))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ClipError::EncoderFailed {
                reason: format!("Failed to spawn ffmpeg at {:?}: {}", self.binary, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let stdin = child.stdin.take();
        let requested = Arc::new(AtomicBool::new(false));

        let watcher = {
            let requested = Arc::clone(&requested);
            let ended = self.ended.clone();
            let part = path.clone();
            tokio::spawn(async move {
                let status = child.wait().await;
                if !requested.load(Ordering::SeqCst) {
                    warn!(part = ?part, status = ?status, "ffmpeg exited on its own");
                    ended.notify();
                }
                status
            })
        };

        info!(part = ?path, index = self.parts.len(), "Recording part started");

        self.parts.push(path);
        self.running = Some(RunningPart {
            stdin,
            requested,
            watcher,
        });

        Ok(())
    }

    /// Ask the running part to finish its file and wait for it.
    ///
    /// The part is over once this returns: one that ignores the quit or
    /// cannot be waited on is killed, and whatever it wrote stays in `parts`.
    #[instrument(skip(self))]
    async fn finish_part(&mut self) {
        let Some(mut part) = self.running.take() else {
            return;
        };

        part.requested.store(true, Ordering::SeqCst);

        if let Some(mut stdin) = part.stdin.take() {
            // 'q' is ffmpeg's interactive quit; it may already be gone.
            if let Err(e) = stdin.write_all(b"q").await {
                debug!(error = ?e, "ffmpeg stdin closed before quit");
            }
            drop(stdin);
        }

        match tokio::time::timeout(self.finish_timeout, &mut part.watcher).await {
            Ok(Ok(Ok(status))) => debug!(?status, "Recording part finished"),
            Ok(Ok(Err(e))) => warn!(error = ?e, "Failed to wait for ffmpeg, part closed"),
            Ok(Err(e)) => warn!(error = ?e, "ffmpeg watcher failed, part closed"),
            Err(_) => {
                warn!(
                    timeout = ?self.finish_timeout,
                    "ffmpeg did not finish the part in time, killing it"
                );
                // Dropping the watcher's child kills the process.
                part.watcher.abort();
                match part.watcher.await {
                    Err(e) if !e.is_cancelled() => {
                        error!(error = ?e, "ffmpeg watcher failed while being killed");
                    }
                    _ => debug!("Recording part killed"),
                }
            }
        }
    }

    async fn join_parts(&self, parts: &[PathBuf]) -> CoreResult<Vec<u8>> {
        match parts {
            [] => Err(ClipError::EncoderFailed {
                reason: "No media was recorded".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
            [only] => Ok(tokio::fs::read(only).await?),
            parts => {
                let list = self.workdir.path().join("parts.txt");
                let output = self.workdir.path().join("joined.webm");
                tokio::fs::write(&list, concat_list(parts)).await?;
                self.run_concat(&list, &output).await?;
                Ok(tokio::fs::read(&output).await?)
            }
        }
    }

    async fn run_concat(&self, list: &Path, output: &Path) -> CoreResult<()> {
        let result = Command::new(&self.binary)
            .args(concat_args(list, output))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await?;

        if !result.status.success() {
            return Err(ClipError::EncoderFailed {
                reason: format!(
                    "Failed to join recording parts: {}",
                    String::from_utf8_lossy(&result.stderr).trim()
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl MediaEncoder for FfmpegEncoder {
    async fn start(&mut self) -> CoreResult<()> {
        self.spawn_part().await
    }

    async fn pause(&mut self) -> CoreResult<()> {
        self.finish_part().await;
        Ok(())
    }

    async fn resume(&mut self) -> CoreResult<()> {
        self.spawn_part().await
    }

    #[instrument(skip(self))]
    async fn stop(&mut self) -> CoreResult<MediaBlob> {
        self.finish_part().await;

        let parts: Vec<PathBuf> = self
            .parts
            .iter()
            .filter(|part| part.is_file())
            .cloned()
            .collect();

        let bytes = self.join_parts(&parts).await?;

        info!(
            parts = parts.len(),
            bytes = bytes.len(),
            "Recording encoded"
        );

        Ok(MediaBlob {
            bytes,
            mime_type: self.mime_type.clone(),
        })
    }
}
