use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};
use uuid::Uuid;

/// Kind of media carried by a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    /// Screen contents.
    Video,
    /// System or microphone audio.
    Audio,
}

/// A platform input device granted for capture.
///
/// `driver` names the platform grab facility (e.g. `x11grab`, `pulse`)
/// and `name` the device within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureDevice {
    /// Platform capture facility.
    pub driver: String,
    /// Device identifier within the facility.
    pub name: String,
}

/// Everything the platform granted for one capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSource {
    /// Screen input.
    pub video: CaptureDevice,
    /// Audio input, present only when audio was requested and granted.
    pub audio: Option<CaptureDevice>,
    /// Negotiated frame rate.
    pub frame_rate: u32,
}

/// One track of a capture stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaTrack {
    /// Media kind.
    pub kind: TrackKind,
    /// Human readable label for logs.
    pub label: String,
    /// Whether the track is still delivering media.
    pub live: bool,
}

/// Handle the platform keeps to report that capture ended on its own.
#[derive(Debug, Clone)]
pub struct TrackEndedHandle {
    ended: Arc<watch::Sender<bool>>,
}

impl TrackEndedHandle {
    /// Signal that the video track ended outside the widget's control.
    pub fn notify(&self) {
        if !*self.ended.borrow() {
            info!("Capture video track ended externally");
        }
        self.ended.send_replace(true);
    }
}

/// Live video (+ optional audio) stream exclusively owned by a recording.
///
/// Tracks are stopped through [`CaptureStream::stop_all_tracks`]; doing so
/// does not fire the `ended` notification, which is reserved for
/// termination the widget did not ask for.
#[derive(Debug)]
pub struct CaptureStream {
    id: Uuid,
    source: StreamSource,
    tracks: Vec<MediaTrack>,
    ended: Arc<watch::Sender<bool>>,
}

impl CaptureStream {
    /// Build a stream over a granted source.
    pub fn new(source: StreamSource) -> Self {
        let mut tracks = vec![MediaTrack {
            kind: TrackKind::Video,
            label: format!("{}:{}", source.video.driver, source.video.name),
            live: true,
        }];
        if let Some(audio) = &source.audio {
            tracks.push(MediaTrack {
                kind: TrackKind::Audio,
                label: format!("{}:{}", audio.driver, audio.name),
                live: true,
            });
        }

        let (ended, _) = watch::channel(false);

        Self {
            id: Uuid::new_v4(),
            source,
            tracks,
            ended: Arc::new(ended),
        }
    }

    /// Stream identifier for log correlation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The devices this stream reads from.
    pub fn source(&self) -> &StreamSource {
        &self.source
    }

    /// All tracks, live or not.
    pub fn tracks(&self) -> &[MediaTrack] {
        &self.tracks
    }

    /// Whether an audio track was granted.
    pub fn has_audio(&self) -> bool {
        self.tracks.iter().any(|t| t.kind == TrackKind::Audio)
    }

    /// True while the video track is live and has not ended externally.
    pub fn is_active(&self) -> bool {
        !*self.ended.borrow()
            && self
                .tracks
                .iter()
                .any(|t| t.kind == TrackKind::Video && t.live)
    }

    /// Watch the external end notification; flips to `true` once.
    pub fn on_ended(&self) -> watch::Receiver<bool> {
        self.ended.subscribe()
    }

    /// Handle for the platform side to report an external end.
    pub fn ended_handle(&self) -> TrackEndedHandle {
        TrackEndedHandle {
            ended: Arc::clone(&self.ended),
        }
    }

    /// Stop every track, releasing the underlying devices.
    pub fn stop_all_tracks(&mut self) {
        for track in self.tracks.iter_mut().filter(|t| t.live) {
            track.live = false;
            debug!(stream_id = %self.id, track = %track.label, "Track stopped");
        }
    }
}
