//! Rigid body setup and per-tick flight systems

use super::{LaunchCamera, rocket_altitude};
use crate::assembly::{AltitudeTracker, FlightState, Rocket};
use crate::plugins::builder::{CompiledRocket, part_color};
use crate::plugins::camera::MainCamera;
use crate::prelude::*;

/// Ground line height: a resting rocket's bottom edge sits here
const GROUND_TOP: f32 = 31.0;
const GROUND_WIDTH: f32 = 200_000.0;
const GROUND_COLOR: Color = Color::srgb(0.25, 0.45, 0.2);
const FLAME_COLOR: Color = Color::srgb(1.0, 0.6, 0.1);
const FLAME_WIDTH: f32 = 10.0;
/// Flame sprite height per exhaust particle per second
const FLAME_HEIGHT_PER_RATE: f32 = 0.1;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct LaunchedRocket {
    pub half_height: Scalar,
}

#[derive(Component, Debug, Default)]
pub struct Ground;

#[derive(Component, Debug, Default)]
pub struct Flame;

pub(super) fn spawn_launch_scene(
    mut commands: Commands,
    rocket: Option<Res<CompiledRocket>>,
    config: Res<LiftoffConfig>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(rocket) = rocket else {
        warn!("Entered the launch screen without a compiled rocket");
        next_state.set(AppState::Building);
        return;
    };

    let flight = &config.flight;
    commands.insert_resource(Gravity(Vector::new(0.0, flight.gravity * flight.length_unit)));

    let center_x = config.assembly.scene_width / 2.0;
    commands.spawn((
        Name::new("Ground"),
        Ground,
        RigidBody::Static,
        Collider::rectangle(GROUND_WIDTH, GROUND_TOP * 2.0),
        Friction::new(config.assembly.friction),
        Sprite::from_color(GROUND_COLOR, Vec2::new(GROUND_WIDTH, GROUND_TOP * 2.0)),
        Transform::from_xyz(center_x, 0.0, 0.0),
        StateScoped(AppState::Launching),
    ));

    let start = Vector::new(
        center_x,
        rocket.size().y / 2.0 + flight.launch_clearance,
    );
    spawn_rocket(&mut commands, &rocket.0, start, flight.burn_mass_factor);
    debug!("Rocket spawned at {start}");
}

fn spawn_rocket(commands: &mut Commands, rocket: &Rocket, start: Vector, burn_mass_factor: Scalar) {
    let colliders = rocket
        .bodies()
        .iter()
        .map(|body| {
            (
                Position::new(body.offset),
                Rotation::default(),
                Collider::rectangle(body.size.x, body.size.y),
            )
        })
        .collect::<Vec<_>>();

    commands
        .spawn((
            Name::new("Rocket"),
            LaunchedRocket {
                half_height: rocket.size().y / 2.0,
            },
            FlightState::from_rocket(rocket, burn_mass_factor),
            AltitudeTracker::default(),
            RigidBody::Dynamic,
            Collider::compound(colliders),
            Mass(rocket.mass()),
            NoAutoMass,
            Friction::new(rocket.friction()),
            Restitution::new(rocket.restitution()),
            ExternalForce::new(Vector::ZERO).with_persistence(false),
            Transform::from_translation(start.extend(1.0)),
            Visibility::default(),
            StateScoped(AppState::Launching),
        ))
        .with_children(|parent| {
            for part in rocket.parts() {
                parent.spawn((
                    Sprite::from_color(part_color(part.kind().category()), part.kind().size()),
                    Transform::from_translation(part.position().extend(0.0)),
                ));
            }

            for marker in rocket.thrust_markers() {
                let Some(engine) = rocket.parts().get(marker.part) else {
                    continue;
                };
                parent.spawn((
                    Flame,
                    Sprite::from_color(
                        FLAME_COLOR,
                        Vec2::new(
                            FLAME_WIDTH * marker.multiplier,
                            marker.birth_rate * FLAME_HEIGHT_PER_RATE,
                        ),
                    ),
                    Transform::from_translation((engine.position() + marker.offset).extend(-0.1)),
                    Visibility::Hidden,
                ));
            }
        });
}

pub(super) fn apply_thrust(
    config: Res<LiftoffConfig>,
    mut rockets: Query<(&mut FlightState, &mut ExternalForce, &mut Mass)>,
) {
    for (mut state, mut force, mut mass) in &mut rockets {
        let Some(thrust) = state.tick() else {
            continue;
        };

        force.apply_force(thrust * config.flight.length_unit);
        mass.0 = state.mass();

        if !state.is_thrusting() {
            info!("Fuel exhausted");
        }
    }
}

pub(super) fn track_altitude(
    mut rockets: Query<(&Position, &LaunchedRocket, &mut AltitudeTracker)>,
) {
    for (position, rocket, mut tracker) in &mut rockets {
        let altitude = rocket_altitude(position.0, rocket);
        if tracker.record(altitude) {
            trace!("New max altitude {altitude}");
        }
    }
}

pub(super) fn sync_flames(
    rockets: Query<(&FlightState, &Children), Changed<FlightState>>,
    mut flames: Query<&mut Visibility, With<Flame>>,
) {
    for (state, children) in &rockets {
        let visibility = if state.flames_visible() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };

        for child in children {
            if let Ok(mut flame) = flames.get_mut(*child) {
                *flame = visibility;
            }
        }
    }
}

pub(super) fn follow_rocket(
    time: Res<Time>,
    mut launch_camera: ResMut<LaunchCamera>,
    rockets: Query<(&Position, &LaunchedRocket)>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
) {
    let Some((position, rocket)) = rockets.iter().next() else {
        return;
    };

    let altitude = rocket_altitude(position.0, rocket);
    let zoom = launch_camera.zoom.advance(altitude);
    if zoom != launch_camera.zoom {
        info!("Camera zooming out to {}x at {altitude}", zoom.scale());
        launch_camera.zoom = zoom;
    }
    launch_camera.ease(time.delta_secs());

    for mut transform in &mut cameras {
        transform.translation.x = position.x;
        transform.translation.y = position.y;
        transform.scale = Vec3::splat(launch_camera.scale);
    }
}
