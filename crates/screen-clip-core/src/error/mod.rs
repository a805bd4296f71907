use crate::RecorderState;

use std::{panic::Location, result::Result as StdResult};

use error_location::ErrorLocation;
use thiserror::Error;

/// Recording errors with source location tracking.
#[derive(Error, Debug)]
pub enum ClipError {
    /// The platform has no screen capture capability at all.
    #[error("Screen capture is not supported on this system {location}")]
    UnsupportedCapture {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The operator or the platform refused access to the screen or audio.
    #[error("Permission denied: {reason} {location}")]
    PermissionDenied {
        /// Description of the refusal.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Capture device could not be opened or the stream is no longer live.
    #[error("Capture device error: {reason} {location}")]
    DeviceError {
        /// Description of the device error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The encoder cannot produce the requested container/codec pair.
    #[error("Unsupported recording format: {mime_type} {location}")]
    UnsupportedFormat {
        /// The rejected mime type, e.g. `video/webm;codecs=vp8,opus`.
        mime_type: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The encoder failed while running or finalizing.
    #[error("Encoder failed: {reason} {location}")]
    EncoderFailed {
        /// Description of the encoder failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// An operation was requested in a state that does not allow it.
    #[error("Cannot {action} while {state} {location}")]
    InvalidTransition {
        /// Recorder state at the time of the request.
        state: RecorderState,
        /// The rejected operation.
        action: &'static str,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The finished segment could not be written out.
    #[error("Failed to save recording: {reason} {location}")]
    SaveFailed {
        /// Description of the save failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// IO error from filesystem or process operations.
    #[error("IO error: {source} {location}")]
    Io {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl ClipError {
    /// Operator-facing text for an alert, without the source location.
    pub fn user_message(&self) -> String {
        match self {
            ClipError::UnsupportedCapture { .. } => {
                "Your system does not support screen recording.".to_string()
            }
            ClipError::PermissionDenied { reason, .. } => format!("Permission denied: {}", reason),
            ClipError::DeviceError { reason, .. } => reason.clone(),
            ClipError::UnsupportedFormat { mime_type, .. } => {
                format!("Recording format {} is not available.", mime_type)
            }
            ClipError::EncoderFailed { reason, .. } => format!("Recording failed: {}", reason),
            ClipError::InvalidTransition { state, action, .. } => {
                format!("Cannot {} while {}.", action, state)
            }
            ClipError::SaveFailed { reason, .. } => format!("Could not save recording: {}", reason),
            ClipError::Io { source, .. } => source.to_string(),
        }
    }
}

impl From<std::io::Error> for ClipError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        ClipError::Io {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Result type alias using [`ClipError`].
pub type Result<T> = StdResult<T, ClipError>;
