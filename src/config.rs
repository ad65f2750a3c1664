use crate::assembly::{AttachmentResolver, RocketTuning, Scalar, Vector};
use bevy::prelude::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix of environment variables overriding the configuration, e.g.
/// `LIFTOFF__FLIGHT__GRAVITY=-2`
const ENV_PREFIX: &str = "LIFTOFF";
const ENV_SEPARATOR: &str = "__";

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct LiftoffConfig {
    pub assembly: AssemblyConfig,
    pub flight: FlightConfig,
    pub ui: UiConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AssemblyConfig {
    /// Side length of one part block in scene units
    pub block_unit: Scalar,
    /// Distance at which points snap together and bonds break
    pub snap_distance: Scalar,
    pub menu_width: Scalar,
    pub scene_width: Scalar,
    pub scene_height: Scalar,
    pub capsule_x: Scalar,
    pub capsule_y: Scalar,
    pub friction: Scalar,
    pub restitution: Scalar,
    /// Sprite alpha of a part while it is being dragged
    pub drag_alpha: f32,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            block_unit: 40.0,
            snap_distance: crate::assembly::DEFAULT_SNAP_DISTANCE,
            menu_width: 200.0,
            scene_width: 640.0,
            scene_height: 480.0,
            capsule_x: 400.0,
            capsule_y: 200.0,
            friction: 0.5,
            restitution: 0.3,
            drag_alpha: 0.5,
        }
    }
}

impl AssemblyConfig {
    pub fn scene_size(&self) -> Vector {
        Vector::new(self.scene_width, self.scene_height)
    }

    pub fn capsule_position(&self) -> Vector {
        Vector::new(self.capsule_x, self.capsule_y)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FlightConfig {
    pub base_thrust: Scalar,
    pub base_fuel_consumption: Scalar,
    pub big_engine_multiplier: Scalar,
    /// Mass lost per unit of burnt fuel
    pub burn_mass_factor: Scalar,
    /// Vertical gravity in meters per second squared
    pub gravity: Scalar,
    /// Scene units per meter
    pub length_unit: Scalar,
    /// Height of the rocket's bottom edge above the ground line at launch
    pub launch_clearance: Scalar,
    pub flame_offset: Scalar,
    pub flame_birth_rate: Scalar,
}

impl Default for FlightConfig {
    fn default() -> Self {
        let tuning = RocketTuning::default();
        Self {
            base_thrust: tuning.base_thrust,
            base_fuel_consumption: tuning.base_fuel_consumption,
            big_engine_multiplier: tuning.big_engine_multiplier,
            burn_mass_factor: crate::assembly::flight::DEFAULT_BURN_MASS_FACTOR,
            gravity: -1.0,
            length_unit: 150.0,
            launch_clearance: 35.0,
            flame_offset: tuning.flame_offset,
            flame_birth_rate: tuning.flame_birth_rate,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub button_width: f32,
    pub button_padding: f32,
    pub button_gap: f32,
    pub button_margin: f32,
    pub button_border_radius: f32,
    pub font_size: f32,
    /// Width of the BUILD button on the title screen
    pub title_button_width: f32,
    pub title_font_size: f32,
    pub show_snap_points: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            button_width: 100.0,
            button_padding: 4.0,
            button_gap: 4.0,
            button_margin: 8.0,
            button_border_radius: 4.0,
            font_size: 16.0,
            title_button_width: 300.0,
            title_font_size: 50.0,
            show_snap_points: true,
        }
    }
}

impl LiftoffConfig {
    /// Load configuration from a file, falling back to defaults if the file doesn't exist
    pub fn load_or_default(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse config file {}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(_) => {
                info!("Config file {} not found. Using defaults.", path);
                Self::default()
            }
        }
    }

    /// Per-user configuration file, e.g. `~/.config/liftoff/config.toml`
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "liftoff").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Defaults, overlaid by the per-user config file and then by
    /// `LIFTOFF__SECTION__KEY` environment variables
    pub fn load_from_user_config() -> Self {
        match Self::layered(Self::user_config_path()) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load user configuration: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    fn layered(user_file: Option<PathBuf>) -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder()
            .add_source(::config::Config::try_from(&Self::default())?);

        if let Some(path) = user_file {
            debug!("Looking for user configuration at {}", path.display());
            builder = builder.add_source(
                ::config::File::from(path)
                    .format(::config::FileFormat::Toml)
                    .required(false),
            );
        }

        builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn resolver(&self) -> AttachmentResolver {
        AttachmentResolver::new(self.assembly.snap_distance)
    }

    pub fn rocket_tuning(&self) -> RocketTuning {
        RocketTuning {
            base_thrust: self.flight.base_thrust,
            base_fuel_consumption: self.flight.base_fuel_consumption,
            big_engine_multiplier: self.flight.big_engine_multiplier,
            friction: self.assembly.friction,
            restitution: self.assembly.restitution,
            flame_offset: self.flight.flame_offset,
            flame_birth_rate: self.flight.flame_birth_rate,
        }
    }
}
