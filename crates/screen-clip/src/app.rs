use crate::{AppError, AppResult, MenuAction, MenuIds, TrayCommand};

use screen_clip_core::{UiCommand, UiController};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use tao::event_loop::EventLoopProxy;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument};
use tray_icon::menu::MenuEvent;

/// Main application state.
///
/// Runs on the async runtime thread. Tray updates go back to the main
/// thread through `tray_proxy` because `TrayIcon` is `!Send` and must stay
/// on the UI thread.
pub struct App {
    pub(crate) tray_proxy: EventLoopProxy<TrayCommand>,
    pub(crate) menu_ids: MenuIds,
    pub(crate) include_audio: bool,
    pub(crate) command_tx: mpsc::Sender<UiCommand>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
}

impl App {
    /// Run until Exit is chosen, then flush the recording and close the tray.
    #[instrument(skip_all)]
    pub(crate) async fn run(
        mut self,
        controller: UiController,
        command_rx: mpsc::Receiver<UiCommand>,
    ) -> AppResult<()> {
        info!("Screen Clip starting");

        let mut controller = tokio::spawn(controller.run(command_rx));

        // One persistent blocking task on the crossbeam receiver; it ends
        // once tray_event_rx is dropped and blocking_send() fails.
        let (tray_event_tx, mut tray_event_rx) = mpsc::channel(32);
        let tray_handle = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if tray_event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        let mut controller_finished = false;

        loop {
            tokio::select! {
                Some(event) = tray_event_rx.recv() => {
                    match self.handle_tray_event(&event).await {
                        Ok(true) => {
                            info!("Exit requested from tray menu");
                            break;
                        }
                        Ok(false) => {}
                        Err(e) => error!(error = ?e, "Failed to handle tray event"),
                    }
                }

                result = &mut controller => {
                    controller_finished = true;
                    if let Err(e) = result {
                        error!(error = ?e, "Widget controller task panicked");
                    }
                    break;
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        if !controller_finished {
            if let Err(e) = self.command_tx.send(UiCommand::Shutdown).await {
                error!(error = ?e, "Failed to send shutdown command");
            }

            // Flushing the active recording can take as long as ffmpeg needs.
            match controller.await {
                Ok(()) => info!("Widget controller stopped"),
                Err(e) => error!(error = ?e, "Widget controller task panicked"),
            }
        }

        drop(tray_event_rx);

        match tokio::time::timeout(Duration::from_secs(1), tray_handle).await {
            Ok(Ok(())) => debug!("Tray event forwarder stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Tray event forwarder task panicked"),
            Err(_) => debug!(
                "Tray event forwarder did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }

        let _ = self.shutdown_tx.send(true);

        if let Err(e) = self.tray_proxy.send_event(TrayCommand::Shutdown) {
            error!(error = ?e, "Failed to stop tray event loop");
        }

        info!("Screen Clip shut down successfully");

        Ok(())
    }

    /// Forward a menu click to the controller. Returns `true` on Exit.
    #[instrument(skip(self))]
    async fn handle_tray_event(&mut self, event: &MenuEvent) -> AppResult<bool> {
        let command = match self.menu_ids.action_for(&event.id) {
            Some(MenuAction::Exit) => return Ok(true),
            Some(MenuAction::Command(command)) => command,
            Some(MenuAction::ToggleAudio) => {
                self.include_audio = !self.include_audio;
                UiCommand::SetIncludeAudio(self.include_audio)
            }
            None => {
                debug!(id = ?event.id, "Menu event without action");
                return Ok(false);
            }
        };

        self.command_tx
            .send(command)
            .await
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to send {:?}: {}", command, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(false)
    }
}
