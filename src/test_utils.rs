//! Test utilities for plugin testing

use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};

use crate::prelude::*;

/// Creates a minimal test app with core Bevy plugins needed for testing
pub fn create_test_app() -> App {
    let mut app = App::new();

    // Add minimal plugins needed for testing
    app.add_plugins((
        MinimalPlugins,
        bevy::input::InputPlugin,
        bevy::state::app::StatesPlugin,
        bevy::transform::TransformPlugin,
    ));

    // Add events used by plugins
    app.add_event::<RocketCommand>();
    app.add_event::<PointerEvent>();

    // Add states; the builder plugin scopes entities to them
    app.init_state::<AppState>();

    app
}

/// Switches to `state` and runs the frame that applies the transition
pub fn enter_state(app: &mut App, state: AppState) {
    app.world_mut()
        .resource_mut::<NextState<AppState>>()
        .set(state);
    app.update();
}

/// Helper to send the keyboard event the controls plugin listens to
pub fn press_key_event(app: &mut App, key_code: KeyCode, logical_key: Key) {
    app.world_mut().send_event(KeyboardInput {
        key_code,
        logical_key,
        state: ButtonState::Pressed,
        text: None,
        repeat: false,
        window: Entity::PLACEHOLDER,
    });
}
