use crate::{RecorderState, WidgetOptions};

/// Enabled/disabled pattern and labels of the widget controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsState {
    /// Start control enabled.
    pub start_enabled: bool,
    /// Stop control enabled.
    pub stop_enabled: bool,
    /// Pause/Resume control enabled.
    pub pause_resume_enabled: bool,
    /// Current Pause/Resume label.
    pub pause_resume_label: String,
    /// Recording lamp lit.
    pub indicator_visible: bool,
    /// Whether the recorder is paused (lamp colour).
    pub paused: bool,
}

impl ControlsState {
    /// Controls for a recorder in `state`.
    pub fn for_state(state: RecorderState, options: &WidgetOptions) -> Self {
        let active = state.is_active();
        let paused = state == RecorderState::Paused;

        Self {
            start_enabled: !active,
            stop_enabled: active,
            pause_resume_enabled: active,
            pause_resume_label: if paused {
                options.resume_label.clone()
            } else {
                options.pause_label.clone()
            },
            indicator_visible: active && options.show_indicator,
            paused,
        }
    }
}
