//! Intro plugin - Self-contained plugin pattern
//!
//! The title screen: a slowly drifting star field on black behind the BUILD
//! button. BUILD opens the builder, BACK on this screen quits (handled by
//! the controls plugin).

use crate::assembly::Aabb2d;
use crate::events::clear_stale_commands;
use crate::plugins::scenery::{Drift, SceneryRng, scatter};
use crate::prelude::*;

const STAR_COUNT: usize = 150;
const STAR_DRIFT: f32 = -8.0;

#[derive(Component, Debug, Default)]
pub struct TitleStar;

pub struct IntroPlugin;

impl Plugin for IntroPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<RocketCommand>();

        app.add_systems(
            OnEnter(AppState::Intro),
            (clear_stale_commands, spawn_star_field),
        );
        app.add_systems(
            Update,
            handle_title_commands.run_if(in_state(AppState::Intro)),
        );
    }
}

fn spawn_star_field(
    mut commands: Commands,
    config: Res<LiftoffConfig>,
    mut rng: ResMut<SceneryRng>,
) {
    let size = config.assembly.scene_size();
    let area = Aabb2d::new(Vector::ZERO, size);

    commands.spawn((
        Name::new("Title Backdrop"),
        Sprite::from_color(Color::BLACK, size),
        Transform::from_translation((size / 2.0).extend(-10.0)),
        StateScoped(AppState::Intro),
    ));

    for star in scatter(&mut rng.0, area, STAR_COUNT, 1.0..=3.0) {
        commands.spawn((
            TitleStar,
            Drift {
                velocity: STAR_DRIFT * star.size,
                min_x: area.min.x,
                max_x: area.max.x,
            },
            Sprite::from_color(
                Color::WHITE.with_alpha(star.brightness),
                Vec2::splat(star.size),
            ),
            Transform::from_translation(star.position.extend(-9.0)),
            StateScoped(AppState::Intro),
        ));
    }
}

fn handle_title_commands(
    mut commands_reader: EventReader<RocketCommand>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for command in commands_reader.read() {
        if *command == RocketCommand::Build {
            info!("Opening the builder");
            next_state.set(AppState::Building);
        }
    }
}
