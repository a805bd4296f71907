//! Screen Clip Core Library
//!
//! Screen recording widget logic: capture acquisition, a recorder state
//! machine over a platform encoder, pause-aware elapsed time tracking and
//! the controller that binds them to operator controls. Every platform
//! capability is a trait so hosts supply their own capture, encoding,
//! save and preview backends.
//!
//! # Example
//!
//! ```no_run
//! use screen_clip_core::{ElapsedTracker, format_elapsed};
//!
//! # async fn demo() {
//! let mut tracker = ElapsedTracker::new();
//! tracker.start();
//! tokio::time::sleep(std::time::Duration::from_secs(3)).await;
//! tracker.pause();
//!
//! println!("Recorded {}", format_elapsed(tracker.elapsed()));
//! # }
//! ```

mod capture;
mod error;
mod output;
mod recorder;
mod timer;
mod ui;

pub use {
    capture::{
        CaptureDevice, CaptureProvider, CaptureRequest, CaptureStream, DEFAULT_FRAME_RATE,
        MediaTrack, StreamSource, TrackEndedHandle, TrackKind, VideoConstraints,
    },
    error::{ClipError, Result as CoreResult},
    output::{
        DEFAULT_FILE_STEM, FILE_EXTENSION, FileNamePrompt, OutputSegment, PreviewSurface,
        SegmentSaver, resolve_file_stem,
    },
    recorder::{
        EncoderFactory, EncoderOptions, MediaBlob, MediaEncoder, RecorderAdapter, RecorderEvent,
        RecorderState, WEBM_VP8_OPUS,
    },
    timer::{ElapsedTracker, TICK_INTERVAL, TrackerPhase, ZERO_DISPLAY, format_elapsed},
    ui::{
        ControlSurface, ControlsState, OutputSinks, UiCommand, UiController, WidgetOptions,
        WidgetVariant,
    },
};

#[cfg(test)]
mod tests;
