use crate::{
    CaptureStream, ClipError, CoreResult, ElapsedTracker, EncoderFactory, EncoderOptions,
    MediaEncoder, RecorderEvent, RecorderState,
};

use std::{panic::Location, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Drives the platform encoder through the recording state machine.
///
/// Owns the capture stream, the encoder and the elapsed-time tracker for
/// the current attempt. Every transition is checked here; requests that
/// do not fit the current state are rejected or ignored centrally.
pub struct RecorderAdapter {
    factory: Arc<dyn EncoderFactory>,
    state: RecorderState,
    session_id: Option<Uuid>,
    stream: Option<CaptureStream>,
    encoder: Option<Box<dyn MediaEncoder>>,
    tracker: ElapsedTracker,
    events: mpsc::UnboundedSender<RecorderEvent>,
}

impl RecorderAdapter {
    /// Create an idle adapter and the receiving end of its event channel.
    pub fn new(
        factory: Arc<dyn EncoderFactory>,
    ) -> (Self, mpsc::UnboundedReceiver<RecorderEvent>) {
        let (events, events_rx) = mpsc::unbounded_channel();

        let adapter = Self {
            factory,
            state: RecorderState::Idle,
            session_id: None,
            stream: None,
            encoder: None,
            tracker: ElapsedTracker::new(),
            events,
        };

        (adapter, events_rx)
    }

    /// Current state.
    pub fn state(&self) -> RecorderState {
        self.state
    }

    /// Recording or paused.
    pub fn is_recording(&self) -> bool {
        self.state.is_active()
    }

    /// Identifier of the current (or last) attempt.
    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    /// Pause-aware elapsed time of the current attempt.
    pub fn elapsed(&self) -> Duration {
        self.tracker.elapsed()
    }

    /// The `MM:SS` display fed by the tracker.
    pub fn subscribe_display(&self) -> watch::Receiver<String> {
        self.tracker.subscribe()
    }

    /// The tracker, for inspection.
    pub fn tracker(&self) -> &ElapsedTracker {
        &self.tracker
    }

    /// Start encoding `stream`.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if a recording is already active
    /// - `UnsupportedFormat` if the encoder cannot produce `options.mime_type`
    /// - `DeviceError` if the stream is no longer live
    ///
    /// On any error the stream's tracks are stopped and the state is unchanged.
    #[instrument(skip(self, stream), fields(stream_id = %stream.id()))]
    pub async fn begin(
        &mut self,
        mut stream: CaptureStream,
        options: EncoderOptions,
    ) -> CoreResult<()> {
        let location = Location::caller();

        if !self.state.can_begin() {
            stream.stop_all_tracks();
            return Err(ClipError::InvalidTransition {
                state: self.state,
                action: "start recording",
                location: ErrorLocation::from(location),
            });
        }

        if !self.factory.is_type_supported(&options.mime_type) {
            stream.stop_all_tracks();
            return Err(ClipError::UnsupportedFormat {
                mime_type: options.mime_type,
                location: ErrorLocation::from(location),
            });
        }

        if !stream.is_active() {
            stream.stop_all_tracks();
            return Err(ClipError::DeviceError {
                reason: "Capture stream is already closed".to_string(),
                location: ErrorLocation::from(location),
            });
        }

        let mut encoder = match self.factory.create(&stream, &options) {
            Ok(encoder) => encoder,
            Err(e) => {
                stream.stop_all_tracks();
                return Err(e);
            }
        };

        if let Err(e) = encoder.start().await {
            stream.stop_all_tracks();
            return Err(e);
        }

        let session_id = Uuid::new_v4();

        self.tracker.reset();
        self.tracker.start();
        self.session_id = Some(session_id);
        self.stream = Some(stream);
        self.encoder = Some(encoder);
        self.state = RecorderState::Recording;

        info!(
            session_id = %session_id,
            mime_type = %options.mime_type,
            "Recording started"
        );

        Ok(())
    }

    /// Toggle between recording and paused.
    ///
    /// Any other state is left untouched. Returns the resulting state.
    #[instrument(skip(self))]
    pub async fn pause_or_resume(&mut self) -> CoreResult<RecorderState> {
        let Some(encoder) = self.encoder.as_mut() else {
            debug!(state = %self.state, "Pause/resume ignored, no encoder");
            return Ok(self.state);
        };

        match self.state {
            RecorderState::Recording => {
                encoder.pause().await?;
                self.tracker.pause();
                self.state = RecorderState::Paused;

                info!(
                    session_id = ?self.session_id,
                    elapsed_ms = self.tracker.elapsed().as_millis(),
                    "Recording paused"
                );
            }
            RecorderState::Paused => {
                encoder.resume().await?;
                // The tracker's start primitive doubles as resume: it
                // re-derives the epoch from the accumulated time.
                self.tracker.start();
                self.state = RecorderState::Recording;

                info!(session_id = ?self.session_id, "Recording resumed");
            }
            RecorderState::Idle | RecorderState::Stopped => {
                debug!(state = %self.state, "Pause/resume ignored");
            }
        }

        Ok(self.state)
    }

    /// Finish the current recording.
    ///
    /// No-op unless recording or paused, so an explicit stop and an
    /// external track end may both call it. On success emits exactly one
    /// [`RecorderEvent::SegmentReady`].
    ///
    /// # Errors
    ///
    /// Returns the encoder's error if finalizing fails. The stream is still
    /// released and the adapter still ends in `Stopped`.
    #[instrument(skip(self))]
    pub async fn end(&mut self) -> CoreResult<()> {
        if !self.state.is_active() {
            debug!(state = %self.state, "End ignored, nothing recording");
            return Ok(());
        }

        let finished = match self.encoder.take() {
            Some(mut encoder) => encoder.stop().await,
            None => Err(ClipError::EncoderFailed {
                reason: "No encoder for active recording".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        };

        if let Some(mut stream) = self.stream.take() {
            stream.stop_all_tracks();
        }

        let elapsed = self.tracker.elapsed();
        self.tracker.reset();
        self.state = RecorderState::Stopped;

        let session_id = self.session_id.unwrap_or_else(Uuid::nil);

        let blob = match finished {
            Ok(blob) => blob,
            Err(e) => {
                error!(session_id = %session_id, error = ?e, "Encoder failed to finalize");
                return Err(e);
            }
        };

        info!(
            session_id = %session_id,
            elapsed_ms = elapsed.as_millis(),
            size_bytes = blob.len(),
            "Recording stopped"
        );

        if self
            .events
            .send(RecorderEvent::SegmentReady {
                session_id,
                blob,
                elapsed,
            })
            .is_err()
        {
            warn!(session_id = %session_id, "No listener for finished segment");
        }

        Ok(())
    }
}
