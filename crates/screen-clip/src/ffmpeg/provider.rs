use crate::ffmpeg::{GrabPlatform, probe_args};

use screen_clip_core::{
    CaptureProvider, CaptureRequest, CaptureStream, ClipError, CoreResult, StreamSource,
};

use std::{panic::Location, path::PathBuf, process::Stdio, time::Duration};

use async_trait::async_trait;
use error_location::ErrorLocation;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

/// Longest a one-frame probe may take before the devices count as unusable.
pub(crate) const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// stderr fragments ffmpeg prints when the OS refuses screen or audio access.
const PERMISSION_MARKERS: [&str; 4] = [
    "permission denied",
    "operation not permitted",
    "not authorized",
    "access is denied",
];

/// Screen capture through ffmpeg's platform grab devices.
pub struct FfmpegCapture {
    binary: PathBuf,
    platform: Option<GrabPlatform>,
    available: bool,
    display: Option<String>,
    audio_device: Option<String>,
}

impl FfmpegCapture {
    /// Locate ffmpeg and remember which devices to grab.
    #[instrument(skip(display_name), fields(display = ?display_name))]
    pub async fn detect(
        binary: PathBuf,
        display_name: Option<String>,
        audio_device: Option<String>,
    ) -> Self {
        let available = match Command::new(&binary)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
        {
            Ok(status) => status.success(),
            Err(e) => {
                warn!(binary = ?binary, error = ?e, "ffmpeg not runnable");
                false
            }
        };

        let platform = GrabPlatform::current();
        info!(binary = ?binary, available, ?platform, "Capture backend detected");

        Self {
            binary,
            platform,
            available,
            display: display_name,
            audio_device,
        }
    }

    /// Devices and frame rate to open for `request`.
    pub(crate) fn source_for(
        &self,
        platform: GrabPlatform,
        request: &CaptureRequest,
    ) -> StreamSource {
        let display = self
            .display
            .clone()
            .or_else(|| match platform {
                GrabPlatform::Linux => std::env::var("DISPLAY").ok(),
                _ => None,
            })
            .filter(|display| !display.is_empty());

        StreamSource {
            video: platform.video_device(display.as_deref()),
            audio: request
                .audio
                .then(|| platform.audio_device(self.audio_device.as_deref())),
            frame_rate: request.video.ideal_frame_rate,
        }
    }
}

#[async_trait]
impl CaptureProvider for FfmpegCapture {
    fn is_supported(&self) -> bool {
        self.available && self.platform.is_some()
    }

    #[instrument(skip(self))]
    async fn acquire(&self, request: &CaptureRequest) -> CoreResult<CaptureStream> {
        let Some(platform) = self.platform else {
            return Err(ClipError::UnsupportedCapture {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let source = self.source_for(platform, request);
        debug!(?source, "Probing capture devices");

        let probe = Command::new(&self.binary)
            .args(probe_args(&source))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(PROBE_TIMEOUT, probe).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(ClipError::DeviceError {
                    reason: format!("Failed to run ffmpeg: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            Err(_) => {
                return Err(ClipError::DeviceError {
                    reason: "Capture devices did not respond".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_probe_failure(&stderr));
        }

        let stream = CaptureStream::new(source);
        info!(stream_id = %stream.id(), audio = stream.has_audio(), "Capture granted");

        Ok(stream)
    }
}

/// Map probe stderr to a permission or device failure.
#[track_caller]
pub(crate) fn classify_probe_failure(stderr: &str) -> ClipError {
    let reason = stderr
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .unwrap_or("ffmpeg exited without output")
        .to_string();

    let lowered = stderr.to_lowercase();
    if PERMISSION_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        ClipError::PermissionDenied {
            reason,
            location: ErrorLocation::from(Location::caller()),
        }
    } else {
        ClipError::DeviceError {
            reason,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
