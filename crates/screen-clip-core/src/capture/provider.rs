use crate::{CaptureStream, CoreResult};

use async_trait::async_trait;

/// Frame rate requested when the caller has no preference.
pub const DEFAULT_FRAME_RATE: u32 = 30;

/// Video constraints for an acquisition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoConstraints {
    /// Preferred frame rate; the platform may grant another.
    pub ideal_frame_rate: u32,
}

/// What to ask the platform for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureRequest {
    /// Screen constraints.
    pub video: VideoConstraints,
    /// Whether to capture audio alongside the screen.
    pub audio: bool,
}

impl CaptureRequest {
    /// Screen capture at `frame_rate`, with audio when `audio` is set.
    pub fn new(frame_rate: u32, audio: bool) -> Self {
        Self {
            video: VideoConstraints {
                ideal_frame_rate: frame_rate,
            },
            audio,
        }
    }
}

impl Default for CaptureRequest {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_RATE, false)
    }
}

/// Platform screen capture capability.
///
/// Implementations:
/// - Desktop: ffmpeg grab devices (`x11grab`, `avfoundation`, `gdigrab`)
/// - Tests: in-memory fakes
#[async_trait]
pub trait CaptureProvider: Send + Sync {
    /// Whether screen capture exists on this system at all.
    fn is_supported(&self) -> bool;

    /// Ask the platform for a stream.
    ///
    /// This is the single suspend point of a recording attempt; it may
    /// wait on an operator permission decision. Rejection maps to
    /// `PermissionDenied`, device failures to `DeviceError`.
    async fn acquire(&self, request: &CaptureRequest) -> CoreResult<CaptureStream>;
}
