//! Sky, stars and the drifting layers the rocket flies past

use super::physics::LaunchedRocket;
use crate::assembly::Aabb2d;
use crate::plugins::scenery::{Drift, SceneryRng, scatter, sky_color};
use crate::prelude::*;
use std::ops::RangeInclusive;

/// Height above which the sky is fully transparent
pub const ATMOSPHERE_HEIGHT: f32 = 12_000.0;
const SKY_BANDS: usize = 48;
const SKY_WIDTH: f32 = 20_000.0;

/// The star field is this many screens wide and tall so it still fills the
/// view when the camera is zoomed out all the way
const STAR_FIELD_SCREENS: f32 = 5.0;
const STAR_COUNT: usize = 400;

const SKY_Z: f32 = -20.0;
const STARS_Z: f32 = -30.0;
const LAYER_Z: f32 = -5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Clouds,
    Planes,
    Aliens,
}

struct LayerSpec {
    kind: LayerKind,
    height: f32,
    color: Color,
    count: usize,
    sizes: RangeInclusive<f32>,
    velocity: f32,
}

const LAYERS: [LayerSpec; 3] = [
    LayerSpec {
        kind: LayerKind::Clouds,
        height: 1300.0,
        color: Color::srgba(1.0, 1.0, 1.0, 0.8),
        count: 24,
        sizes: 40.0..=120.0,
        velocity: 15.0,
    },
    LayerSpec {
        kind: LayerKind::Planes,
        height: 3600.0,
        color: Color::srgb(0.75, 0.75, 0.8),
        count: 6,
        sizes: 20.0..=30.0,
        velocity: 120.0,
    },
    LayerSpec {
        kind: LayerKind::Aliens,
        height: 8000.0,
        color: Color::srgb(0.4, 1.0, 0.4),
        count: 4,
        sizes: 15.0..=25.0,
        velocity: -60.0,
    },
];

/// Half the vertical spread of one layer around its height
const LAYER_SPREAD: f32 = 300.0;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SceneryLayer {
    pub kind: LayerKind,
    pub height: f32,
}

/// Star field parent kept centered on the rocket
#[derive(Component, Debug, Default)]
pub struct StarBackdrop;

#[derive(Component, Debug, Default)]
pub struct SkyBand;

pub(super) fn spawn_launch_scenery(
    mut commands: Commands,
    config: Res<LiftoffConfig>,
    mut rng: ResMut<SceneryRng>,
) {
    let scene = config.assembly.scene_size();
    let center_x = scene.x / 2.0;

    let band_height = ATMOSPHERE_HEIGHT / SKY_BANDS as f32;
    for band in 0..SKY_BANDS {
        let middle = (band as f32 + 0.5) * band_height;
        commands.spawn((
            SkyBand,
            Sprite::from_color(
                sky_color(middle / ATMOSPHERE_HEIGHT),
                Vec2::new(SKY_WIDTH, band_height),
            ),
            Transform::from_xyz(center_x, middle, SKY_Z),
            StateScoped(AppState::Launching),
        ));
    }

    let field = Aabb2d::from_center_size(Vector::ZERO, scene * STAR_FIELD_SCREENS);
    commands
        .spawn((
            Name::new("Star Backdrop"),
            StarBackdrop,
            Transform::from_xyz(center_x, scene.y / 2.0, STARS_Z),
            Visibility::default(),
            StateScoped(AppState::Launching),
        ))
        .with_children(|parent| {
            for star in scatter(&mut rng.0, field, STAR_COUNT, 1.0..=4.0) {
                parent.spawn((
                    Sprite::from_color(
                        Color::WHITE.with_alpha(star.brightness),
                        Vec2::splat(star.size),
                    ),
                    Transform::from_translation(star.position.extend(0.0)),
                ));
            }
        });

    // Layers start two screens left of the scene and wrap three screens right
    let min_x = -scene.x * 2.0;
    let max_x = scene.x * 3.0;
    for layer in &LAYERS {
        let area = Aabb2d::new(
            Vector::new(min_x, -LAYER_SPREAD),
            Vector::new(max_x, LAYER_SPREAD),
        );
        let drift = Drift {
            velocity: layer.velocity,
            min_x,
            max_x,
        };

        commands
            .spawn((
                Name::new(format!("{:?}", layer.kind)),
                SceneryLayer {
                    kind: layer.kind,
                    height: layer.height,
                },
                Transform::from_xyz(0.0, layer.height, LAYER_Z),
                Visibility::default(),
                StateScoped(AppState::Launching),
            ))
            .with_children(|parent| {
                for speck in scatter(&mut rng.0, area, layer.count, layer.sizes.clone()) {
                    parent.spawn((
                        drift,
                        Sprite::from_color(layer.color, Vec2::new(speck.size, speck.size * 0.5)),
                        Transform::from_translation(speck.position.extend(0.0)),
                    ));
                }
            });
    }
    debug!("Launch scenery spawned");
}

pub(super) fn follow_with_stars(
    rockets: Query<&Position, With<LaunchedRocket>>,
    mut backdrops: Query<&mut Transform, With<StarBackdrop>>,
) {
    let Some(position) = rockets.iter().next() else {
        return;
    };

    for mut transform in &mut backdrops {
        transform.translation.x = position.x;
        transform.translation.y = position.y;
    }
}
