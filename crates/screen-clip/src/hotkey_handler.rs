//! Global start/stop shortcut.
//!
//! Registers Alt+Shift+S and forwards each press to the widget controller,
//! which decides between start and stop from its own recorder state.

use crate::{AppError, AppResult};

use screen_clip_core::UiCommand;

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use global_hotkey::{
    GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
    hotkey::{Code, HotKey, Modifiers},
};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

/// Human-readable form of the shortcut, for logs.
pub(crate) const SHORTCUT_LABEL: &str = "Alt+Shift+S";

/// The start/stop shortcut.
pub(crate) fn shortcut() -> HotKey {
    HotKey::new(Some(Modifiers::ALT | Modifiers::SHIFT), Code::KeyS)
}

/// Forwards shortcut presses to the controller.
pub struct HotkeyHandler {
    hotkey_id: u32,
    command_tx: mpsc::Sender<UiCommand>,
}

impl HotkeyHandler {
    /// Register Alt+Shift+S as the global hotkey.
    ///
    /// Must be called on a thread with a message pump (e.g. the main thread
    /// running a `tao` event loop) so that `WM_HOTKEY` messages are
    /// dispatched on Windows. The returned [`GlobalHotKeyManager`] must be
    /// kept alive on that thread for the hotkey to remain registered.
    #[track_caller]
    #[instrument]
    pub fn register_hotkey() -> AppResult<(GlobalHotKeyManager, u32)> {
        let manager =
            GlobalHotKeyManager::new().map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to create manager: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let hotkey = shortcut();

        manager
            .register(hotkey)
            .map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to register {}: {}", SHORTCUT_LABEL, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(hotkey = SHORTCUT_LABEL, "Global hotkey registered");

        Ok((manager, hotkey.id()))
    }

    /// Create a handler for a previously registered hotkey.
    pub fn new(hotkey_id: u32, command_tx: mpsc::Sender<UiCommand>) -> Self {
        Self {
            hotkey_id,
            command_tx,
        }
    }

    /// Forward presses until a shutdown signal is received.
    #[instrument(skip(self))]
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        let receiver = GlobalHotKeyEvent::receiver().clone();
        let (event_tx, mut event_rx) = mpsc::channel(32);

        // Blocking recv() on the crossbeam receiver; the task ends when
        // event_rx is dropped and the next blocking_send() fails.
        let handle = tokio::task::spawn_blocking(move || {
            while let Ok(event) = receiver.recv() {
                if event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Hotkey handler shutting down");
                    break;
                }
                Some(event) = event_rx.recv() => {
                    if let Err(e) = self.handle_event(event).await {
                        warn!(error = ?e, "Shortcut press dropped");
                        break;
                    }
                }
            }
        }

        drop(event_rx);

        // The blocking task may still sit in recv() until the next key event.
        match tokio::time::timeout(Duration::from_secs(1), handle).await {
            Ok(Ok(())) => debug!("Hotkey event forwarder stopped cleanly"),
            Ok(Err(e)) => warn!(error = ?e, "Hotkey event forwarder task panicked"),
            Err(_) => debug!(
                "Hotkey event forwarder did not stop within timeout, \
                   will be cleaned up on exit"
            ),
        }

        Ok(())
    }

    /// Forward a press of our hotkey. Releases and other hotkeys are ignored.
    pub(crate) fn command_for(&self, event: &GlobalHotKeyEvent) -> Option<UiCommand> {
        (event.id == self.hotkey_id && event.state == HotKeyState::Pressed)
            .then_some(UiCommand::ToggleRecording)
    }

    #[instrument(skip(self))]
    async fn handle_event(&self, event: GlobalHotKeyEvent) -> AppResult<()> {
        let Some(command) = self.command_for(&event) else {
            return Ok(());
        };

        self.command_tx
            .send(command)
            .await
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to send {:?}: {}", command, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(hotkey = SHORTCUT_LABEL, "Shortcut forwarded");

        Ok(())
    }
}
