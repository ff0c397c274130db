//! Headless симуляция playground
//!
//! Без рендера: каждые 30 кадров случайный spawn, на половине прогона reset.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use playground_simulation::{
    create_headless_app, log_info, ObjectRegistry, SceneCommand, SimulationPlugin, StopFrameDriver,
};

const FRAMES: u32 = 600;
const SPAWN_EVERY: u32 = 30;

fn main() {
    let seed = 42;
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)));

    log_info(&format!("Starting headless playground (seed: {})", seed));

    for frame in 0..FRAMES {
        if frame % SPAWN_EVERY == 0 {
            let command = if (frame / SPAWN_EVERY) % 2 == 0 {
                SceneCommand::SpawnRandomSphere
            } else {
                SceneCommand::SpawnRandomBox
            };
            app.world_mut().send_event(command);
        }
        if frame == FRAMES / 2 {
            app.world_mut().send_event(SceneCommand::Reset);
        }

        app.update();

        if frame % 100 == 0 {
            let objects = app.world().resource::<ObjectRegistry>().len();
            log_info(&format!("Frame {}: {} objects", frame, objects));
        }
    }

    app.world_mut().send_event(StopFrameDriver);
    app.update();

    log_info("Simulation complete!");
}
