use crate::{
    MenuAction, MenuIds, TrayIconState, tray_icon_state::ICON_SIZE,
    tray_surface::raise_notification,
};

use screen_clip_core::{ControlsState, RecorderState, UiCommand, WidgetOptions, WidgetVariant};

use tray_icon::menu::MenuId;

fn menu_ids() -> MenuIds {
    MenuIds {
        start: MenuId::new("start"),
        stop: MenuId::new("stop"),
        pause_resume: MenuId::new("pause"),
        include_audio: MenuId::new("audio"),
        exit: MenuId::new("exit"),
    }
}

/// WHAT: Menu items map to controller commands
/// WHY: Tray clicks are the widget's buttons
#[test]
fn given_menu_ids_when_mapping_clicks_then_matching_actions() {
    let ids = menu_ids();

    assert_eq!(
        ids.action_for(&MenuId::new("start")),
        Some(MenuAction::Command(UiCommand::Start))
    );
    assert_eq!(
        ids.action_for(&MenuId::new("stop")),
        Some(MenuAction::Command(UiCommand::Stop))
    );
    assert_eq!(
        ids.action_for(&MenuId::new("pause")),
        Some(MenuAction::Command(UiCommand::PauseResume))
    );
    assert_eq!(
        ids.action_for(&MenuId::new("audio")),
        Some(MenuAction::ToggleAudio)
    );
    assert_eq!(ids.action_for(&MenuId::new("exit")), Some(MenuAction::Exit));
    assert_eq!(ids.action_for(&MenuId::new("separator")), None);
}

/// WHAT: The lamp follows the recorder state on the full widget
/// WHY: Lit while recording, dimmed while paused, off otherwise
#[test]
fn given_full_widget_when_state_changes_then_lamp_follows() {
    let options = WidgetOptions::for_variant(WidgetVariant::Full);
    let lamp = |state| TrayIconState::from_controls(&ControlsState::for_state(state, &options));

    assert_eq!(lamp(RecorderState::Idle), TrayIconState::Idle);
    assert_eq!(lamp(RecorderState::Recording), TrayIconState::Recording);
    assert_eq!(lamp(RecorderState::Paused), TrayIconState::Paused);
    assert_eq!(lamp(RecorderState::Stopped), TrayIconState::Idle);
}

/// WHAT: The basic widget never lights the lamp
/// WHY: Only the full widget has a recording indicator
#[test]
fn given_basic_widget_when_recording_then_lamp_off() {
    let options = WidgetOptions::for_variant(WidgetVariant::Basic);
    let controls = ControlsState::for_state(RecorderState::Recording, &options);

    assert_eq!(TrayIconState::from_controls(&controls), TrayIconState::Idle);
}

/// WHAT: Generated icons are square RGBA in the lamp colour
/// WHY: The tray rejects buffers that do not match the declared size
#[test]
fn given_each_state_when_rendering_icon_then_square_rgba_buffer() {
    for state in [
        TrayIconState::Idle,
        TrayIconState::Recording,
        TrayIconState::Paused,
    ] {
        let rgba = state.rgba();
        assert_eq!(rgba.len(), (ICON_SIZE * ICON_SIZE * 4) as usize);

        // Centre pixel is opaque lamp colour, corner is transparent.
        let centre = ((ICON_SIZE / 2 * ICON_SIZE + ICON_SIZE / 2) * 4) as usize;
        assert_eq!(&rgba[centre..centre + 3], state.color());
        assert_eq!(rgba[centre + 3], 0xff);
        assert_eq!(rgba[3], 0x00);
    }
}

/// WHAT: Alerts raised on the runtime go to the blocking pool
/// WHY: The notification round trip must not stall the widget loop
#[tokio::test]
async fn given_runtime_when_alerting_then_notification_runs_off_the_loop() {
    // Given/When: An alert raised from async code
    let handle = raise_notification("Recording could not be saved");

    // Then: Handed to a blocking task that completes without panicking
    let handle = handle.expect("alert should run on the blocking pool");
    handle.await.unwrap();
}
