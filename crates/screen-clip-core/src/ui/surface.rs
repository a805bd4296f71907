use crate::ControlsState;

/// Where the controller reflects its state.
pub trait ControlSurface: Send {
    /// Apply enabled/disabled pattern, labels and lamp.
    fn apply_controls(&mut self, controls: &ControlsState);

    /// Show the `MM:SS` timer text.
    fn set_timer_text(&mut self, text: &str);

    /// Reflect the audio checkbox.
    fn set_include_audio(&mut self, include_audio: bool);

    /// Show a single operator-visible alert.
    fn alert(&mut self, message: &str);
}
