//! System tray widget.
//!
//! The tray menu carries the recording controls (Start, Stop, Pause/Resume
//! and the audio checkbox); the icon doubles as the recording lamp and the
//! tooltip shows the elapsed time.

use crate::{AppError, AppResult, MenuIds, TrayIconState, tray_icon_state::ICON_SIZE};

use screen_clip_core::{ControlsState, WidgetOptions, ZERO_DISPLAY};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};
use tray_icon::menu::{CheckMenuItem, Menu, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    start_item: MenuItem,
    stop_item: MenuItem,
    pause_resume_item: MenuItem,
    include_audio_item: CheckMenuItem,
    ids: MenuIds,
    state: TrayIconState,
    timer_text: String,
}

impl TrayManager {
    /// Build the tray icon with the idle control pattern.
    #[track_caller]
    #[instrument]
    pub fn new(options: &WidgetOptions) -> AppResult<Self> {
        let menu = Menu::new();

        let start_item = MenuItem::new("Start Recording", true, None);
        let stop_item = MenuItem::new("Stop Recording", false, None);
        let pause_resume_item = MenuItem::new(&options.pause_label, false, None);
        let include_audio_item = CheckMenuItem::new("Include Audio", true, false, None);
        let exit_item = MenuItem::new("Exit", true, None);

        let ids = MenuIds {
            start: start_item.id().clone(),
            stop: stop_item.id().clone(),
            pause_resume: pause_resume_item.id().clone(),
            include_audio: include_audio_item.id().clone(),
            exit: exit_item.id().clone(),
        };

        menu.append_items(&[
            &start_item,
            &stop_item,
            &pause_resume_item,
            &PredefinedMenuItem::separator(),
            &include_audio_item,
            &PredefinedMenuItem::separator(),
            &exit_item,
        ])
        .map_err(|e| AppError::TrayError {
            reason: format!("Failed to build tray menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let state = TrayIconState::Idle;

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(Self::tooltip_for(state, ZERO_DISPLAY))
            .with_menu(Box::new(menu))
            .with_icon(Self::load_icon(state)?)
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("System tray icon initialized");

        Ok(Self {
            tray_icon,
            start_item,
            stop_item,
            pause_resume_item,
            include_audio_item,
            ids,
            state,
            timer_text: ZERO_DISPLAY.to_string(),
        })
    }

    /// Apply the controller's control pattern to menu items and lamp.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn apply_controls(&mut self, controls: &ControlsState) -> AppResult<()> {
        self.start_item.set_enabled(controls.start_enabled);
        self.stop_item.set_enabled(controls.stop_enabled);
        self.pause_resume_item.set_enabled(controls.pause_resume_enabled);
        self.pause_resume_item.set_text(&controls.pause_resume_label);

        let state = TrayIconState::from_controls(controls);
        if state != self.state {
            self.tray_icon
                .set_icon(Some(Self::load_icon(state)?))
                .map_err(|e| AppError::TrayError {
                    reason: format!("Failed to update icon: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
            self.state = state;
            debug!(?state, "Tray lamp updated");
        }

        self.refresh_tooltip()
    }

    /// Show the elapsed time in the tooltip and, where supported, the title.
    #[track_caller]
    pub fn set_timer_text(&mut self, text: &str) -> AppResult<()> {
        text.clone_into(&mut self.timer_text);
        self.tray_icon.set_title(Some(text));
        self.refresh_tooltip()
    }

    /// Tick or untick the audio item.
    pub fn set_include_audio(&mut self, include_audio: bool) {
        self.include_audio_item.set_checked(include_audio);
    }

    /// Ids of the menu items, for matching menu events off the main thread.
    pub fn menu_ids(&self) -> &MenuIds {
        &self.ids
    }

    #[track_caller]
    fn refresh_tooltip(&self) -> AppResult<()> {
        self.tray_icon
            .set_tooltip(Some(Self::tooltip_for(self.state, &self.timer_text)))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    fn tooltip_for(state: TrayIconState, timer_text: &str) -> String {
        format!("{} {}", state.tooltip(), timer_text)
    }

    #[track_caller]
    fn load_icon(state: TrayIconState) -> AppResult<Icon> {
        Icon::from_rgba(state.rgba(), ICON_SIZE, ICON_SIZE).map_err(|e| AppError::TrayError {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
