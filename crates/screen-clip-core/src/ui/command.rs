/// Operator input routed to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    /// Start button.
    Start,
    /// Stop button.
    Stop,
    /// Pause/Resume button.
    PauseResume,
    /// Global shortcut: start when idle, stop when recording.
    ToggleRecording,
    /// Audio checkbox changed.
    SetIncludeAudio(bool),
    /// Host is closing.
    Shutdown,
}
