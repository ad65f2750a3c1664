use bevy::log::{Level, LogPlugin};
use bevy::window::WindowResolution;
use clap::Parser;
use liftoff::cli::{self, Args};
use liftoff::prelude::*;
use liftoff::{
    BuilderPlugin, CameraPlugin, ControlsPlugin, IntroPlugin, LaunchPlugin, SceneryPlugin,
    VisualizationPlugin,
};

fn main() -> AppExit {
    let args = Args::parse();

    let config = match cli::load_and_apply_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return AppExit::error();
        }
    };

    if args.print_config {
        return match cli::render_config(&config) {
            Ok(rendered) => {
                println!("{rendered}");
                AppExit::Success
            }
            Err(e) => {
                eprintln!("{e}");
                AppExit::error()
            }
        };
    }

    let log_plugin = if args.verbose {
        LogPlugin {
            level: Level::DEBUG,
            filter: "wgpu=error,naga=warn,liftoff=debug".to_string(),
            ..default()
        }
    } else {
        LogPlugin::default()
    };

    let scene_size = config.assembly.scene_size();
    let mut app = App::new();

    app.add_plugins((
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Liftoff".to_string(),
                    resolution: WindowResolution::new(scene_size.x, scene_size.y),
                    ..default()
                }),
                ..default()
            })
            .set(log_plugin),
        PhysicsPlugins::default().with_length_unit(config.flight.length_unit),
        BuilderPlugin::with_config(config),
        CameraPlugin,
        ControlsPlugin,
        IntroPlugin,
        LaunchPlugin,
        SceneryPlugin::new(),
        VisualizationPlugin,
    ));

    app.run()
}
