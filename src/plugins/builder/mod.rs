//! Builder plugin - Self-contained plugin pattern
//!
//! This plugin owns the part registry and everything on the assembly screen:
//! the parts menu, the placed part sprites and pointer driven dragging.
//! LAUNCH compiles the rocket and hands it over to the launch plugin, BACK
//! returns to the title screen with the assembly kept for later.

use crate::assembly::{Aabb2d, PartInstance, Rocket, RocketCompiler};
use crate::config::AssemblyConfig;
use crate::events::clear_stale_commands;
use crate::prelude::*;

mod pointer;
mod scene;

pub use scene::{MenuIcon, PartSprite, part_color};

/// Screen regions of the builder, in scene coordinates
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct BuildLayout {
    /// Parts dropped here are deleted
    pub menu: Aabb2d,
    pub scene: Aabb2d,
}

impl BuildLayout {
    pub fn from_config(config: &AssemblyConfig) -> Self {
        Self {
            menu: Aabb2d::new(Vector::ZERO, Vector::new(config.menu_width, config.scene_height)),
            scene: Aabb2d::new(Vector::ZERO, config.scene_size()),
        }
    }

    /// Where the center of a master part of `size` may go: right of the menu,
    /// inside the scene horizontally and above the floor
    pub fn master_bounds(&self, size: Vector) -> Aabb2d {
        let half = size * 0.5;
        Aabb2d::new(
            Vector::new(self.menu.max.x + half.x, self.scene.min.y + half.y),
            Vector::new(self.scene.max.x - half.x, self.scene.max.y),
        )
    }
}

/// One prototype per menu slot, copied whenever a part is pulled from the
/// menu. The prototypes live in their own registry and never take part in
/// an assembly.
#[derive(Resource, Debug, Clone)]
pub struct MenuParts {
    prototypes: PartRegistry,
    slots: Vec<PartId>,
}

impl MenuParts {
    pub fn from_catalog(catalog: &PartCatalog) -> Self {
        let mut prototypes = PartRegistry::new();
        let slots = catalog
            .menu()
            .iter()
            .map(|slot| prototypes.instantiate(std::sync::Arc::clone(&slot.kind), slot.position))
            .collect();
        Self { prototypes, slots }
    }

    /// The prototype behind the menu icon containing `point`
    pub fn prototype_at(&self, catalog: &PartCatalog, point: Vector) -> Option<&PartInstance> {
        let index = catalog
            .menu()
            .iter()
            .position(|slot| slot.extent().contains(point))?;
        self.slots
            .get(index)
            .and_then(|&id| self.prototypes.get(id))
    }
}

/// The rocket compiled by the last successful launch
#[derive(Resource, Debug, Clone, Deref)]
pub struct CompiledRocket(pub Rocket);

pub struct BuilderPlugin {
    config: Option<LiftoffConfig>,
}

impl BuilderPlugin {
    pub fn new() -> Self {
        Self { config: None }
    }

    pub fn with_config(config: LiftoffConfig) -> Self {
        Self {
            config: Some(config),
        }
    }
}

impl Default for BuilderPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for BuilderPlugin {
    fn build(&self, app: &mut App) {
        let config = self
            .config
            .clone()
            .unwrap_or_else(LiftoffConfig::load_from_user_config);

        match toml::to_string_pretty(&config) {
            Ok(toml_string) => {
                info!("=== Current Configuration (TOML) ===\n{}", toml_string);
                info!("=== End Configuration ===");
            }
            Err(e) => {
                error!("Failed to serialize configuration to TOML: {}", e);
            }
        }

        let catalog = match PartCatalog::standard(config.assembly.block_unit) {
            Ok(catalog) => catalog,
            Err(e) => {
                error!("Failed to build the part catalog: {}", e);
                return;
            }
        };

        let mut registry = PartRegistry::new();
        let capsule = registry.instantiate(
            std::sync::Arc::clone(catalog.capsule()),
            config.assembly.capsule_position(),
        );
        debug!("Placed capsule {capsule} at {}", config.assembly.capsule_position());

        app.insert_resource(BuildLayout::from_config(&config.assembly));
        app.insert_resource(config.resolver());
        app.insert_resource(config.clone());
        app.insert_resource(MenuParts::from_catalog(&catalog));
        app.insert_resource(catalog);
        app.insert_resource(registry);
        app.init_resource::<DragContext>();

        app.add_event::<PointerEvent>();
        app.add_event::<RocketCommand>();

        app.init_state::<AppState>();
        app.enable_state_scoped_entities::<AppState>();

        app.add_systems(
            OnEnter(AppState::Building),
            (clear_stale_commands, scene::spawn_menu),
        );
        app.add_systems(OnExit(AppState::Building), pointer::cancel_drag);
        app.add_systems(
            Update,
            (
                pointer::handle_pointer_events,
                handle_builder_commands,
                scene::sync_part_sprites,
            )
                .chain()
                .run_if(in_state(AppState::Building)),
        );
    }
}

fn handle_builder_commands(
    mut commands_reader: EventReader<RocketCommand>,
    mut commands: Commands,
    registry: Res<PartRegistry>,
    drag: Res<DragContext>,
    config: Res<LiftoffConfig>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for command in commands_reader.read() {
        match command {
            RocketCommand::Launch => {
                if let Some(dragged) = drag.dragged() {
                    warn!("Not launching while part {dragged} is being dragged");
                    continue;
                }

                match RocketCompiler::new(config.rocket_tuning()).compile(&registry) {
                    Ok(rocket) => {
                        info!("Launching rocket with {} parts", rocket.parts().len());
                        commands.insert_resource(CompiledRocket(rocket));
                        next_state.set(AppState::Launching);
                    }
                    Err(e) => warn!("Launch aborted: {}", e),
                }
            }
            RocketCommand::Back => {
                info!("Back to the title screen");
                next_state.set(AppState::Intro);
            }
            RocketCommand::Build | RocketCommand::Quit => {}
        }
    }
}
