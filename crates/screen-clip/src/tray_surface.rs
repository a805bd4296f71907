use crate::TrayCommand;

use screen_clip_core::{ControlSurface, ControlsState};

use notify_rust::Notification;
use tao::event_loop::EventLoopProxy;
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{error, warn};

/// Title of every desktop notification.
pub(crate) const ALERT_SUMMARY: &str = "Screen Clip";

/// Control surface that forwards to the tray on the main thread and raises
/// alerts as desktop notifications.
pub struct TraySurface {
    tray_proxy: EventLoopProxy<TrayCommand>,
}

impl TraySurface {
    /// Surface that drives the tray behind `tray_proxy`.
    pub fn new(tray_proxy: EventLoopProxy<TrayCommand>) -> Self {
        Self { tray_proxy }
    }

    fn send(&self, command: TrayCommand) {
        if let Err(e) = self.tray_proxy.send_event(command) {
            warn!(error = ?e, "Tray event loop closed, dropping update");
        }
    }
}

impl ControlSurface for TraySurface {
    fn apply_controls(&mut self, controls: &ControlsState) {
        self.send(TrayCommand::ApplyControls(controls.clone()));
    }

    fn set_timer_text(&mut self, text: &str) {
        self.send(TrayCommand::SetTimer(text.to_string()));
    }

    fn set_include_audio(&mut self, include_audio: bool) {
        self.send(TrayCommand::SetIncludeAudio(include_audio));
    }

    fn alert(&mut self, message: &str) {
        warn!(message, "Alert");
        raise_notification(message);
    }
}

/// Show a desktop notification without blocking the async runtime.
///
/// `show()` is a synchronous round trip to the notification daemon, so
/// inside a runtime it runs on the blocking pool.
pub(crate) fn raise_notification(message: &str) -> Option<JoinHandle<()>> {
    let body = message.to_string();
    match Handle::try_current() {
        Ok(handle) => Some(handle.spawn_blocking(move || show_notification(&body))),
        Err(_) => {
            show_notification(&body);
            None
        }
    }
}

fn show_notification(body: &str) {
    if let Err(e) = Notification::new()
        .summary(ALERT_SUMMARY)
        .body(body)
        .show()
    {
        error!(error = ?e, "Failed to show notification");
    }
}
