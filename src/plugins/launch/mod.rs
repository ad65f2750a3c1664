//! Launch plugin - Self-contained plugin pattern
//!
//! This plugin turns the compiled rocket into an avian rigid body standing on
//! the ground, burns fuel while the engines run and keeps the camera and the
//! flight readouts on the rocket. Behind it the sky fades into a star field
//! that moves along with the rocket. All launch entities are scoped to
//! [`AppState::Launching`] and vanish when going back to the builder.

use crate::assembly::{CameraZoom, FlightState};
use crate::events::clear_stale_commands;
use crate::plugins::builder::CompiledRocket;
use crate::prelude::*;

mod hud;
mod physics;
mod scenery;

pub use physics::{Flame, Ground, LaunchedRocket};
pub use scenery::{ATMOSPHERE_HEIGHT, LayerKind, SceneryLayer, SkyBand, StarBackdrop};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FlightSet {
    Thrust,
    Track,
}

/// Camera zoom stage and the scale currently shown while easing towards it
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct LaunchCamera {
    pub zoom: CameraZoom,
    pub scale: f32,
}

impl LaunchCamera {
    /// The launch opens zoomed out and eases in
    pub const INTRO_SCALE: f32 = 2.0;
    const EASING_RATE: f32 = 3.0;

    pub fn ease(&mut self, delta_secs: f32) {
        let target = self.zoom.scale();
        let t = (delta_secs * Self::EASING_RATE).min(1.0);
        self.scale += (target - self.scale) * t;
    }
}

impl Default for LaunchCamera {
    fn default() -> Self {
        Self {
            zoom: CameraZoom::default(),
            scale: Self::INTRO_SCALE,
        }
    }
}

pub struct LaunchPlugin;

impl Plugin for LaunchPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LaunchCamera>();

        app.configure_sets(FixedUpdate, (FlightSet::Thrust, FlightSet::Track).chain());

        app.add_systems(
            OnEnter(AppState::Launching),
            (
                clear_stale_commands,
                physics::spawn_launch_scene,
                scenery::spawn_launch_scenery,
                hud::spawn_flight_hud,
            ),
        );
        app.add_systems(OnExit(AppState::Launching), leave_launch);

        app.add_systems(
            FixedUpdate,
            (
                physics::apply_thrust.in_set(FlightSet::Thrust),
                physics::track_altitude.in_set(FlightSet::Track),
            )
                .run_if(in_state(AppState::Launching)),
        );

        app.add_systems(
            Update,
            (
                handle_flight_commands,
                physics::sync_flames,
                physics::follow_rocket,
                scenery::follow_with_stars,
                hud::update_flight_hud,
            )
                .run_if(in_state(AppState::Launching)),
        );
    }
}

fn handle_flight_commands(
    mut commands_reader: EventReader<RocketCommand>,
    mut rockets: Query<&mut FlightState>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for command in commands_reader.read() {
        match command {
            RocketCommand::Launch => {
                for mut state in &mut rockets {
                    if state.begin_thrust() {
                        info!("Ignition: thrust {}, fuel {}", state.thrust(), state.fuel());
                    } else {
                        debug!("Engines not started: thrusting already or out of fuel");
                    }
                }
            }
            RocketCommand::Back => {
                info!("Returning to the builder");
                next_state.set(AppState::Building);
            }
            RocketCommand::Build | RocketCommand::Quit => {}
        }
    }
}

fn leave_launch(mut commands: Commands, mut camera: ResMut<LaunchCamera>) {
    commands.remove_resource::<CompiledRocket>();
    *camera = LaunchCamera::default();
}

/// Altitude of a launched rocket whose body sits at `position`
pub fn rocket_altitude(position: Vector, rocket: &LaunchedRocket) -> i64 {
    crate::assembly::altitude(position.y, rocket.half_height)
}
