//! Screen Clip: record the screen from a tray widget with pause/resume and a
//! global start/stop shortcut.

mod app;
mod config;
mod error;
mod ffmpeg;
mod hotkey_handler;
mod menu_action;
mod output;
#[cfg(test)]
mod tests;
mod tray_command;
mod tray_icon_state;
mod tray_manager;
mod tray_surface;

pub(crate) use {
    app::App,
    error::{AppError, Result as AppResult},
    hotkey_handler::HotkeyHandler,
    menu_action::{MenuAction, MenuIds},
    tray_command::TrayCommand,
    tray_icon_state::TrayIconState,
    tray_manager::TrayManager,
    tray_surface::TraySurface,
};

use crate::{
    config::Config,
    ffmpeg::{FfmpegCapture, FfmpegEncoders},
    output::{FileSaver, SystemPreview, TerminalPrompt},
};

use screen_clip_core::{OutputSinks, UiController, WidgetOptions};

use std::sync::Arc;

use global_hotkey::GlobalHotKeyManager;
use tao::{
    event::Event,
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tokio::sync::{mpsc, watch};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "screen_clip=debug,screen_clip_core=debug";

/// File name prefix of the daily rolling log.
const LOG_FILE_PREFIX: &str = "screen-clip.log";

/// Console logging plus a daily rolling file in the data directory.
///
/// The returned guard flushes the file writer when dropped.
fn init_tracing() -> Option<WorkerGuard> {
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    let Some(log_dir) = config::project_dirs().map(|dirs| dirs.data_dir().join("logs")) else {
        tracing_subscriber::fmt().with_env_filter(filter()).init();
        return None;
    };

    let appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter())
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    info!(log_dir = ?log_dir, "File logging enabled");

    Some(guard)
}

/// Application entry point.
fn main() {
    let mut log_guard = init_tracing();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        error!("Config validation failed: {:?}", e);
        std::process::exit(1);
    }

    let options = WidgetOptions::for_variant(config.widget.variant);

    let event_loop = EventLoopBuilder::<TrayCommand>::with_user_event().build();
    let tray_proxy = event_loop.create_proxy();

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let mut tray_manager = match TrayManager::new(&options) {
        Ok(tm) => tm,
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };

    // Dropping it unregisters the hotkey.
    let mut hotkey_manager: Option<GlobalHotKeyManager> = None;
    let mut config = Some(config);

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(cmd) => {
                let result = match cmd {
                    TrayCommand::ApplyControls(controls) => tray_manager.apply_controls(&controls),
                    TrayCommand::SetTimer(text) => tray_manager.set_timer_text(&text),
                    TrayCommand::SetIncludeAudio(include_audio) => {
                        tray_manager.set_include_audio(include_audio);
                        Ok(())
                    }
                    TrayCommand::Shutdown => {
                        drop(log_guard.take());
                        *control_flow = ControlFlow::ExitWithCode(0);
                        Ok(())
                    }
                };
                if let Err(e) = result {
                    error!(error = ?e, "Failed to update tray");
                }
                return;
            }
            Event::NewEvents(tao::event::StartCause::Init) => {
                let Some(config) = config.take() else {
                    return;
                };

                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                let (command_tx, command_rx) = mpsc::channel(32);
                let (shutdown_tx, shutdown_rx) = watch::channel(false);

                // Registered on the main thread: tao's event loop pumps the
                // Windows messages needed for WM_HOTKEY delivery.
                let hotkey_id = if options.shortcut_enabled {
                    match HotkeyHandler::register_hotkey() {
                        Ok((manager, id)) => {
                            hotkey_manager = Some(manager);
                            Some(id)
                        }
                        Err(e) => {
                            error!("Failed to register hotkey: {:?}", e);
                            std::process::exit(1);
                        }
                    }
                } else {
                    info!("Shortcut disabled for the basic widget");
                    None
                };

                let tray_proxy = tray_proxy.clone();
                let menu_ids = tray_manager.menu_ids().clone();
                let options = options.clone();

                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async {
                        let capture = FfmpegCapture::detect(
                            config.ffmpeg.binary.clone(),
                            config.capture.display.clone(),
                            config.capture.audio_device.clone(),
                        )
                        .await;

                        let preview_dir = config::project_dirs()
                            .map(|dirs| dirs.cache_dir().to_path_buf())
                            .unwrap_or_else(std::env::temp_dir);

                        let outputs = OutputSinks {
                            prompt: Arc::new(TerminalPrompt::new(
                                config.output.default_file_name.clone(),
                            )),
                            saver: Arc::new(FileSaver::new(config.output.directory.clone())),
                            preview: Arc::new(
                                SystemPreview::new(preview_dir)
                                    .with_player(config.output.open_preview),
                            ),
                        };

                        let controller = UiController::new(
                            Arc::new(capture),
                            Arc::new(FfmpegEncoders::new(config.ffmpeg.binary.clone())),
                            Box::new(TraySurface::new(tray_proxy.clone())),
                            outputs,
                            options,
                        )
                        .with_include_audio(config.capture.include_audio)
                        .with_frame_rate(config.capture.frame_rate);

                        let app = App {
                            tray_proxy,
                            menu_ids,
                            include_audio: config.capture.include_audio,
                            command_tx: command_tx.clone(),
                            shutdown_tx,
                        };

                        tokio::join!(
                            async {
                                let Some(hotkey_id) = hotkey_id else {
                                    return;
                                };
                                let hotkey_handler = HotkeyHandler::new(hotkey_id, command_tx);
                                if let Err(e) = hotkey_handler.run(shutdown_rx).await {
                                    error!(error = ?e, "Hotkey handler error");
                                }
                            },
                            async {
                                if let Err(e) = app.run(controller, command_rx).await {
                                    error!(error = ?e, "App error");
                                }
                            }
                        );
                    });
                });
            }
            _ => {}
        }

        // Keep hotkey_manager alive in the closure for the app's lifetime.
        let _ = &hotkey_manager;
    });
}
