//! Build button component

use crate::plugins::controls::ButtonWithLabel;
use crate::prelude::*;

/// Leaves the title screen for the builder
#[derive(Component, Default)]
pub struct BuildButton;

impl ButtonWithLabel for BuildButton {
    fn command() -> RocketCommand {
        RocketCommand::Build
    }

    fn marker() -> Self {
        Self
    }

    fn base_text() -> &'static str {
        "BUILD"
    }

    fn shortcut() -> &'static str {
        "Enter"
    }
}
