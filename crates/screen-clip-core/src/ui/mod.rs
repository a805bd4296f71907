mod command;
mod controller;
mod controls;
mod options;
mod surface;

pub use {
    command::UiCommand,
    controller::{OutputSinks, UiController},
    controls::ControlsState,
    options::{WidgetOptions, WidgetVariant},
    surface::ControlSurface,
};
