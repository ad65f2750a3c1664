//! Controls plugin - Self-contained plugin pattern
//!
//! This plugin handles all user input (keyboard, UI buttons, mouse and touch)
//! and translates it into RocketCommand and PointerEvent events, so the
//! builder and launch plugins never look at raw input.

use crate::prelude::*;
use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::window::SystemCursorIcon;
use bevy::winit::cursor::CursorIcon;

mod builder;
mod buttons;
mod constants;
mod pointer;

pub use builder::ButtonWithLabel;
use builder::{ButtonSize, ControlsCommandsExt};
pub use buttons::*;
use constants::*;

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<RocketCommand>();
        app.add_event::<PointerEvent>();

        app.add_systems(OnEnter(AppState::Intro), setup_title_controls);
        app.add_systems(OnEnter(AppState::Building), setup_controls_ui);
        app.add_systems(OnEnter(AppState::Launching), setup_controls_ui);

        app.add_systems(
            Update,
            (
                keyboard_input_handler,
                button_interaction_handler::<BuildButton>,
                button_interaction_handler::<LaunchButton>,
                button_interaction_handler::<BackButton>,
                pointer::emit_pointer_events,
                handle_exit_commands,
            ),
        );
    }
}

fn keyboard_input_handler(
    mut keyboard_events: EventReader<KeyboardInput>,
    state: Res<State<AppState>>,
    mut commands: EventWriter<RocketCommand>,
) {
    for event in keyboard_events.read() {
        if event.state != ButtonState::Pressed || event.repeat {
            continue;
        }

        match &event.logical_key {
            Key::Space | Key::Enter => {
                if *state.get() == AppState::Intro {
                    commands.write(RocketCommand::Build);
                } else {
                    commands.write(RocketCommand::Launch);
                }
            }
            Key::Backspace => {
                commands.write(RocketCommand::Back);
            }
            Key::Escape => {
                commands.write(RocketCommand::Quit);
            }
            Key::Character(c) if c.to_lowercase() == "q" => {
                commands.write(RocketCommand::Quit);
            }
            _ => {}
        }
    }
}

#[allow(clippy::type_complexity)]
fn button_interaction_handler<T: ButtonWithLabel>(
    mut commands: Commands,
    window: Single<Entity, With<Window>>,
    mut interaction_query: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<T>),
    >,
    mut command_writer: EventWriter<RocketCommand>,
) {
    for (interaction, mut color) in &mut interaction_query {
        match *interaction {
            Interaction::Pressed => {
                commands
                    .entity(*window)
                    .insert(CursorIcon::System(SystemCursorIcon::Pointer));

                *color = BackgroundColor(BUTTON_COLOR_PRESSED);
                command_writer.write(T::command());
            }
            Interaction::Hovered => {
                commands
                    .entity(*window)
                    .insert(CursorIcon::System(SystemCursorIcon::Pointer));

                *color = BackgroundColor(BUTTON_COLOR_HOVERED);
            }
            Interaction::None => {
                commands
                    .entity(*window)
                    .insert(CursorIcon::System(SystemCursorIcon::Default));

                *color = BackgroundColor(BUTTON_COLOR_NORMAL);
            }
        }
    }
}

/// QUIT always leaves; BACK leaves only from the title screen, the builder
/// and launch plugins handle it on their own screens
fn handle_exit_commands(
    mut commands_reader: EventReader<RocketCommand>,
    state: Res<State<AppState>>,
    mut exit: EventWriter<AppExit>,
) {
    for command in commands_reader.read() {
        let leave = match command {
            RocketCommand::Quit => true,
            RocketCommand::Back => *state.get() == AppState::Intro,
            RocketCommand::Build | RocketCommand::Launch => false,
        };

        if leave {
            info!("Exiting");
            exit.write_default();
        }
    }
}

#[derive(Component)]
pub struct UIRoot;

/// The large BUILD button in the middle of the title screen
fn setup_title_controls(mut commands: Commands, config: Res<LiftoffConfig>) {
    let ui = &config.ui;

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
            UIRoot,
            StateScoped(AppState::Intro),
        ))
        .with_children(|parent| {
            parent.spawn_control_button::<BuildButton>(ui, ButtonSize::title(ui));
        });
}

/// BACK and LAUNCH in the bottom right corner of the builder and the flight
fn setup_controls_ui(
    mut commands: Commands,
    config: Res<LiftoffConfig>,
    state: Res<State<AppState>>,
) {
    let ui = &config.ui;

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(ui.button_margin),
                right: Val::Px(ui.button_margin),
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::FlexEnd,
                column_gap: Val::Px(ui.button_gap),
                ..default()
            },
            UIRoot,
            StateScoped(*state.get()),
        ))
        .with_children(|parent| {
            parent.spawn_control_button::<BackButton>(ui, ButtonSize::regular(ui));
            parent.spawn_control_button::<LaunchButton>(ui, ButtonSize::regular(ui));
        });
}
