//! Общие helpers для интеграционных тестов (headless App с ручным временем)

#![allow(dead_code)]

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use playground_simulation::{create_headless_app, PlaygroundConfig, SimulationPlugin};

pub const FRAME: f64 = 1.0 / 60.0;

/// Helper: полный playground App, каждый update = ровно 1/60 c
pub fn create_playground_app(config: PlaygroundConfig) -> App {
    let mut app = create_headless_app(config.seed);
    app.insert_resource(config)
        .add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(FRAME)));
    app
}

/// Конфиг без начальной сферы: сцена пуста до первого spawn
pub fn empty_scene_config() -> PlaygroundConfig {
    let mut config = PlaygroundConfig::default();
    config.spawn.initial_sphere = None;
    config
}

pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

pub fn entity_exists(app: &App, entity: Entity) -> bool {
    app.world().get_entity(entity).is_ok()
}
