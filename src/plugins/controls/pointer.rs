//! Mouse and touch input reduced to a single pointer in scene coordinates

use crate::plugins::camera::MainCamera;
use crate::prelude::*;
use bevy::window::PrimaryWindow;

/// Which device owns the current press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) enum ActivePointer {
    #[default]
    None,
    Mouse,
    Touch(u64),
}

#[allow(clippy::too_many_arguments)]
pub(super) fn emit_pointer_events(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut cursor_moved: EventReader<CursorMoved>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    buttons: Query<&Interaction, With<Button>>,
    mut active: Local<ActivePointer>,
    mut writer: EventWriter<PointerEvent>,
) {
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let to_scene = |viewport: Vec2| camera.viewport_to_world_2d(camera_transform, viewport).ok();
    let cursor = windows
        .single()
        .ok()
        .and_then(|window| window.cursor_position())
        .and_then(to_scene);
    let cursor_moved = cursor_moved.read().count() > 0;

    match *active {
        ActivePointer::None => {
            // Presses on buttons belong to the UI
            if buttons.iter().any(|interaction| *interaction != Interaction::None) {
                return;
            }

            if let Some(touch) = touches.iter_just_pressed().next() {
                if let Some(position) = to_scene(touch.position()) {
                    *active = ActivePointer::Touch(touch.id());
                    writer.write(PointerEvent::Down(position));
                }
            } else if mouse.just_pressed(MouseButton::Left) {
                if let Some(position) = cursor {
                    *active = ActivePointer::Mouse;
                    writer.write(PointerEvent::Down(position));
                }
            }
        }
        ActivePointer::Mouse => {
            let Some(position) = cursor else {
                return;
            };
            if mouse.just_released(MouseButton::Left) || !mouse.pressed(MouseButton::Left) {
                *active = ActivePointer::None;
                writer.write(PointerEvent::Up(position));
            } else if cursor_moved {
                writer.write(PointerEvent::Moved(position));
            }
        }
        ActivePointer::Touch(id) => {
            if let Some(touch) = touches.get_released(id) {
                *active = ActivePointer::None;
                if let Some(position) = to_scene(touch.position()) {
                    writer.write(PointerEvent::Up(position));
                }
            } else if let Some(touch) = touches.get_pressed(id) {
                if touch.delta() != Vec2::ZERO {
                    if let Some(position) = to_scene(touch.position()) {
                        writer.write(PointerEvent::Moved(position));
                    }
                }
            } else {
                // Cancelled touches never report a release
                *active = ActivePointer::None;
            }
        }
    }
}
