use screen_clip_core::UiCommand;

use tray_icon::menu::MenuId;

/// What a click on a tray menu item asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Forward to the widget controller.
    Command(UiCommand),
    /// Flip the audio checkbox.
    ToggleAudio,
    /// Quit the application.
    Exit,
}

/// Ids of the tray menu items, cloned off the main thread.
#[derive(Debug, Clone)]
pub struct MenuIds {
    pub(crate) start: MenuId,
    pub(crate) stop: MenuId,
    pub(crate) pause_resume: MenuId,
    pub(crate) include_audio: MenuId,
    pub(crate) exit: MenuId,
}

impl MenuIds {
    /// Map a clicked item to its action. Unknown ids (separators) map to `None`.
    pub fn action_for(&self, id: &MenuId) -> Option<MenuAction> {
        if *id == self.start {
            Some(MenuAction::Command(UiCommand::Start))
        } else if *id == self.stop {
            Some(MenuAction::Command(UiCommand::Stop))
        } else if *id == self.pause_resume {
            Some(MenuAction::Command(UiCommand::PauseResume))
        } else if *id == self.include_audio {
            Some(MenuAction::ToggleAudio)
        } else if *id == self.exit {
            Some(MenuAction::Exit)
        } else {
            None
        }
    }
}
