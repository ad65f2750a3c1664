//! Liftoff library
//!
//! This provides the core functionality of liftoff as a library
//! to enable integration testing.

pub mod assembly;
pub mod cli;
pub mod config;
pub mod events;
pub mod plugins;
pub mod prelude;
pub mod states;

// Test utilities are public for integration tests
pub mod test_utils;

// Re-export commonly used items
pub use config::LiftoffConfig;
pub use events::*;
pub use plugins::{
    builder::BuilderPlugin, camera::CameraPlugin, controls::ControlsPlugin, intro::IntroPlugin,
    launch::LaunchPlugin, scenery::SceneryPlugin, visualization::VisualizationPlugin,
};
pub use states::AppState;
