//! Physics Playground Simulation Core
//!
//! Headless ECS-симуляция на Bevy 0.16 + Rapier 3D.
//!
//! Разделение ответственности:
//! - Simulation = registry пар visual ↔ body, spawn/reset, physics step,
//!   sync, impacts → hit sound cues, viewport/camera state
//! - Client = meshes, materials, lights, environment map, GUI, audio
//!
//! Вся мутабельная state живёт в World (resources + entities): новый App =
//! независимая сессия, тесты гоняют её без окна и GPU.

use bevy::prelude::*;
use bevy::time::TimeSystem;
use bevy::transform::{TransformPlugin, TransformSystem};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod camera;
pub mod components;
pub mod config;
pub mod driver;
pub mod logger;
pub mod physics;
pub mod registry;
pub mod reset;
pub mod sound;
pub mod spawn;
pub mod sync;
pub mod viewport;

// Re-export базовых типов для удобства
pub use camera::{update_orbit_cameras, OrbitCamera};
pub use components::*;
pub use config::{ConfigError, PlaygroundConfig};
pub use driver::{DriverPhase, FrameDriver, SimulationClock, StopFrameDriver};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter};
pub use physics::{ImpactEvent, PlaygroundPhysicsPlugin};
pub use registry::{ObjectRegistry, RegistryEntry};
pub use reset::reset_scene;
pub use sound::{HitSoundCue, HitSoundPolicy, HIT_SOUND_THRESHOLD};
pub use spawn::{spawn_box, spawn_object, spawn_sphere, SceneCommand, SpawnRequest};
pub use sync::sync_visuals_to_bodies;
pub use viewport::{CameraLens, Viewport, ViewportResized};

/// Порядок Update-систем внутри кадра
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaygroundSet {
    /// Stop signal, затем команды сцены (spawn/reset, только в Running) + resize
    Commands,
    /// ImpactEvent → HitSoundCue (после Reset: снятые слушатели уже не звучат)
    Sound,
    /// Orbit camera damping
    Camera,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// PlaygroundConfig и DeterministicRng, вставленные до plugin'а,
/// не перезаписываются.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        init_logger();

        app.init_resource::<PlaygroundConfig>();
        let config = app.world().resource::<PlaygroundConfig>().clone();

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(config.seed));
        }

        app.init_resource::<ObjectRegistry>()
            .init_resource::<FrameDriver>()
            .init_resource::<SimulationClock>()
            .insert_resource(HitSoundPolicy {
                threshold: config.sound.impact_threshold,
            })
            .insert_resource(Viewport::new(config.window.width, config.window.height))
            .insert_resource(CameraLens::from_config(&config))
            .add_event::<SceneCommand>()
            .add_event::<StopFrameDriver>()
            .add_event::<ViewportResized>()
            .add_event::<HitSoundCue>()
            // Physics world (Rapier в FixedUpdate)
            .add_plugins(PlaygroundPhysicsPlugin)
            .configure_sets(
                Update,
                (PlaygroundSet::Commands, PlaygroundSet::Sound, PlaygroundSet::Camera).chain(),
            )
            .add_systems(Startup, spawn::spawn_initial_objects)
            .add_systems(First, driver::advance_frame_driver.after(TimeSystem))
            .add_systems(
                Update,
                (
                    (
                        driver::handle_stop_requests,
                        // Остановленная сцена заморожена: команды после stop отбрасываются
                        spawn::process_scene_commands
                            .after(driver::handle_stop_requests)
                            .run_if(driver::frame_driver_running),
                        viewport::apply_viewport_resize,
                    )
                        .in_set(PlaygroundSet::Commands),
                    sound::emit_hit_sound_cues.in_set(PlaygroundSet::Sound),
                    update_orbit_cameras
                        .in_set(PlaygroundSet::Camera)
                        .run_if(driver::frame_driver_running),
                ),
            )
            // Sync Step: после всех physics sub-steps, до propagation/рендера
            .add_systems(
                PostUpdate,
                sync_visuals_to_bodies
                    .run_if(driver::frame_driver_running)
                    .before(TransformSystem::TransformPropagate),
            );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// SimulationPlugin добавляет вызывающий (после своего конфига, если нужен).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins((MinimalPlugins, TransformPlugin))
        .insert_resource(DeterministicRng::new(seed));

    app
}
