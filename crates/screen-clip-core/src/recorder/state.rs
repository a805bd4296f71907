use std::fmt;

/// Recorder lifecycle.
///
/// `Idle → Recording ⇄ Paused → Stopped`; a new attempt may begin from
/// `Idle` or `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    /// No recording has been attempted yet.
    Idle,
    /// Encoder running, tracker counting.
    Recording,
    /// Encoder paused, tracker frozen.
    Paused,
    /// Last attempt finished; terminal for that attempt.
    Stopped,
}

impl RecorderState {
    /// Recording or Paused.
    pub fn is_active(self) -> bool {
        matches!(self, RecorderState::Recording | RecorderState::Paused)
    }

    /// Whether `begin` is allowed.
    pub fn can_begin(self) -> bool {
        matches!(self, RecorderState::Idle | RecorderState::Stopped)
    }
}

impl fmt::Display for RecorderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecorderState::Idle => "idle",
            RecorderState::Recording => "recording",
            RecorderState::Paused => "paused",
            RecorderState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}
