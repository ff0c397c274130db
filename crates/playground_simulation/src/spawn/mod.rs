//! Spawn domain: GUI/input команды сцены → Spawners / Reset
//!
//! Команды приходят одним упорядоченным потоком (SceneCommand), поэтому
//! "spawn, reset, spawn" в одном кадре применяются ровно в этом порядке.

use bevy::prelude::*;

use crate::config::PlaygroundConfig;
use crate::registry::ObjectRegistry;
use crate::reset::reset_scene;
use crate::DeterministicRng;

pub mod request;
pub mod spawner;

pub use request::{random_spawn_position, SpawnRequest};
pub use spawner::{spawn_box, spawn_object, spawn_sphere};

/// Команда сцены (GUI кнопки, хоткеи, headless-сценарии)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum SceneCommand {
    /// Явный spawn request (размеры + позиция заданы вызывающим)
    Spawn(SpawnRequest),
    /// GUI "create sphere": параметры выбирает DeterministicRng
    SpawnRandomSphere,
    /// GUI "create box"
    SpawnRandomBox,
    /// GUI "reset"
    Reset,
}

/// Система: применить все команды сцены этого кадра по порядку
pub fn process_scene_commands(
    mut commands: Commands,
    mut scene_commands: EventReader<SceneCommand>,
    mut registry: ResMut<ObjectRegistry>,
    mut rng: ResMut<DeterministicRng>,
    config: Res<PlaygroundConfig>,
) {
    for command in scene_commands.read() {
        let request = match command {
            SceneCommand::Spawn(request) => *request,
            SceneCommand::SpawnRandomSphere => SpawnRequest::random_sphere(&mut rng.rng, &config.spawn),
            SceneCommand::SpawnRandomBox => SpawnRequest::random_box(&mut rng.rng, &config.spawn),
            SceneCommand::Reset => {
                reset_scene(&mut commands, &mut registry);
                continue;
            }
        };

        spawn_object(&mut commands, &mut registry, &config.physics, &request);
    }
}

/// Startup: начальная сфера (если включена в конфиге)
pub fn spawn_initial_objects(
    mut commands: Commands,
    mut registry: ResMut<ObjectRegistry>,
    config: Res<PlaygroundConfig>,
) {
    if let Some(initial) = &config.spawn.initial_sphere {
        spawn_sphere(
            &mut commands,
            &mut registry,
            &config.physics,
            initial.radius,
            Vec3::from_array(initial.position),
        );
    }
}
