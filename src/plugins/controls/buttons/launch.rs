//! Launch button component

use crate::plugins::controls::ButtonWithLabel;
use crate::prelude::*;

/// Compiles and launches the rocket, or ignites it once on the pad
#[derive(Component, Default)]
pub struct LaunchButton;

impl ButtonWithLabel for LaunchButton {
    fn command() -> RocketCommand {
        RocketCommand::Launch
    }

    fn marker() -> Self {
        Self
    }

    fn base_text() -> &'static str {
        "LAUNCH"
    }

    fn shortcut() -> &'static str {
        "Space"
    }
}
