use bevy::prelude::*;
use playground_simulation::{log_warning, set_logger, PlaygroundConfig, SimulationPlugin};

mod audio;
mod camera;
mod control_panel;
mod logger;
mod scene;
mod viewport;

use audio::HitSoundPlugin;
use camera::CameraPlugin;
use control_panel::ControlPanelPlugin;
use scene::ScenePlugin;
use viewport::ViewportPlugin;

const DEFAULT_CONFIG_PATH: &str = "assets/config/playground.ron";

fn main() -> anyhow::Result<()> {
    set_logger(Box::new(logger::BevyLogger));

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let (config, error) = PlaygroundConfig::load_or_default(&config_path);
    if let Some(error) = error {
        log_warning(&format!("{}; using default config", error));
    }

    let window = Window {
        title: config.window.title.clone(),
        resolution: (config.window.width, config.window.height).into(),
        ..default()
    };

    let exit = App::new()
        // Конфиг до SimulationPlugin: plugin не перезаписывает resource
        .insert_resource(config)
        // Bevy defaults (rendering, input, audio, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(window),
            ..default()
        }))
        // Simulation (registry, physics, sync, impacts)
        .add_plugins(SimulationPlugin)
        // Рендер-сторона: меши, свет, environment map
        .add_plugins(ScenePlugin)
        .add_plugins(CameraPlugin)
        .add_plugins(ViewportPlugin)
        .add_plugins(ControlPanelPlugin)
        .add_plugins(HitSoundPlugin)
        .run();

    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => Err(anyhow::anyhow!("playground exited with code {}", code)),
    }
}
