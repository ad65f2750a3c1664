//! Builder pattern utilities for controls UI
//!
//! This module provides a CommandsExt trait to simplify the creation of
//! control buttons in the UI.

use crate::config::UiConfig;
use crate::plugins::controls::constants::*;
use crate::prelude::*;
use bevy::ecs::hierarchy::ChildSpawnerCommands;

/// Width and label size of one button
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonSize {
    pub width: f32,
    pub font_size: f32,
}

impl ButtonSize {
    pub fn regular(ui: &UiConfig) -> Self {
        Self {
            width: ui.button_width,
            font_size: ui.font_size,
        }
    }

    pub fn title(ui: &UiConfig) -> Self {
        Self {
            width: ui.title_button_width,
            font_size: ui.title_font_size,
        }
    }
}

pub trait ControlsCommandsExt {
    fn spawn_control_button<T: ButtonWithLabel>(&mut self, ui: &UiConfig, size: ButtonSize)
    -> Entity;
}

impl ControlsCommandsExt for ChildSpawnerCommands<'_> {
    fn spawn_control_button<T: ButtonWithLabel>(
        &mut self,
        ui: &UiConfig,
        size: ButtonSize,
    ) -> Entity {
        self.spawn((
            Button,
            Node {
                width: Val::Px(size.width),
                height: Val::Auto,
                padding: UiRect::all(Val::Px(ui.button_padding)),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
            BorderRadius::all(Val::Px(ui.button_border_radius)),
            BackgroundColor(BUTTON_COLOR_NORMAL),
            T::marker(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(T::label()),
                TextColor(Color::WHITE),
                TextFont::from_font_size(size.font_size),
            ));
        })
        .id()
    }
}

pub trait ButtonWithLabel: Component + 'static {
    /// The command this button triggers
    fn command() -> RocketCommand;

    /// The marker component instance
    fn marker() -> Self;

    /// The base text for the button (without shortcut)
    fn base_text() -> &'static str;

    /// The keyboard shortcut for this button
    fn shortcut() -> &'static str;

    /// The base text with shortcut appended
    fn label() -> String {
        format!("{} ({})", Self::base_text(), Self::shortcut())
    }
}
