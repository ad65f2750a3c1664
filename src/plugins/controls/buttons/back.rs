//! Back button component

use crate::plugins::controls::ButtonWithLabel;
use crate::prelude::*;

#[derive(Component, Default)]
pub struct BackButton;

impl ButtonWithLabel for BackButton {
    fn command() -> RocketCommand {
        RocketCommand::Back
    }

    fn marker() -> Self {
        Self
    }

    fn base_text() -> &'static str {
        "BACK"
    }

    fn shortcut() -> &'static str {
        "Bksp"
    }
}
