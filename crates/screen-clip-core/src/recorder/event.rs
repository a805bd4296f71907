use crate::MediaBlob;

use std::time::Duration;

use uuid::Uuid;

/// Notifications emitted by the recorder.
#[derive(Debug, Clone)]
pub enum RecorderEvent {
    /// Encoding output became available after a recording ended.
    SegmentReady {
        /// Session the segment belongs to.
        session_id: Uuid,
        /// The encoded media.
        blob: MediaBlob,
        /// Pause-aware recorded time.
        elapsed: Duration,
    },
}
