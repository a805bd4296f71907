use screen_clip_core::ControlsState;

/// Commands sent from the async runtime to the main UI thread.
///
/// The main thread owns `TrayManager` (because `TrayIcon` is `!Send`),
/// so all tray mutations and process lifecycle events flow through this enum.
#[derive(Debug, Clone)]
pub enum TrayCommand {
    /// Enable/disable menu items, relabel pause and switch the lamp.
    ApplyControls(ControlsState),
    /// Show the elapsed time.
    SetTimer(String),
    /// Tick or untick the audio item.
    SetIncludeAudio(bool),
    /// Shut down the application. The main thread will exit the event loop.
    Shutdown,
}
