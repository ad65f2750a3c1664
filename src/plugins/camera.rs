//! Camera plugin - Self-contained plugin pattern
//!
//! This plugin spawns the single 2D camera. It is centered on the scene so
//! world coordinates match builder coordinates, with the origin at the
//! bottom left corner of the screen. The launch plugin moves and zooms it
//! during a flight; entering the title screen or the builder puts it back.

use crate::prelude::*;

#[derive(Component, Debug, Default)]
pub struct MainCamera;

/// Plugin that handles camera setup and reset
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera);
        app.add_systems(OnEnter(AppState::Intro), reset_camera);
        app.add_systems(OnEnter(AppState::Building), reset_camera);
    }
}

fn scene_center(config: &LiftoffConfig) -> Vec3 {
    (config.assembly.scene_size() / 2.0).extend(0.0)
}

fn spawn_camera(mut commands: Commands, config: Res<LiftoffConfig>) {
    commands.spawn((
        Name::new("Main Camera"),
        MainCamera,
        Camera2d,
        Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.05, 0.06, 0.1)),
            ..default()
        },
        Transform::from_translation(scene_center(&config)),
    ));
}

fn reset_camera(config: Res<LiftoffConfig>, mut cameras: Query<&mut Transform, With<MainCamera>>) {
    for mut transform in &mut cameras {
        *transform = Transform::from_translation(scene_center(&config));
    }
}
