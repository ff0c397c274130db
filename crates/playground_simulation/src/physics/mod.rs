//! Physics world: Rapier в FixedUpdate, пол, default contact material
//!
//! Шаг: fixed 1/60 c, catch-up ограничен `max_substeps` шагами за кадр
//! (Time<Virtual>::max_delta = timestep × max_substeps).

use bevy::prelude::*;
use bevy_rapier3d::plugin::PhysicsSet;
use bevy_rapier3d::prelude::*;
use std::time::Duration;

use crate::components::Floor;
use crate::config::PlaygroundConfig;
use crate::driver::FrameDriver;

pub mod impact;

pub use impact::{approach_speed, capture_pre_step_velocities, collect_impacts, ImpactEvent};

/// Plugin physics world
///
/// Ожидает PlaygroundConfig в World (SimulationPlugin делает init_resource).
pub struct PlaygroundPhysicsPlugin;

impl Plugin for PlaygroundPhysicsPlugin {
    fn build(&self, app: &mut App) {
        let timestep = app
            .world()
            .get_resource::<PlaygroundConfig>()
            .map(|cfg| cfg.physics.timestep)
            .unwrap_or(1.0 / 60.0);

        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
            // Один Rapier step на каждый FixedUpdate
            .insert_resource(TimestepMode::Fixed {
                dt: timestep as f32,
                substeps: 1,
            })
            .insert_resource(Time::<Fixed>::from_seconds(timestep))
            .add_event::<ImpactEvent>()
            .add_systems(Startup, (bound_catch_up_steps, spawn_floor))
            .add_systems(First, apply_physics_configuration.after(crate::driver::advance_frame_driver))
            .add_systems(
                FixedUpdate,
                (
                    capture_pre_step_velocities.before(PhysicsSet::SyncBackend),
                    collect_impacts.after(PhysicsSet::Writeback),
                ),
            );
    }
}

/// Startup: ограничить catch-up работу при длинных кадрах
pub fn bound_catch_up_steps(mut time: ResMut<Time<Virtual>>, config: Res<PlaygroundConfig>) {
    let max_delta = config.physics.timestep * config.physics.max_substeps.max(1) as f64;
    time.set_max_delta(Duration::from_secs_f64(max_delta));
}

/// Startup: статический пол, верхняя грань на y = 0
///
/// Плоскость моделируется широким тонким cuboid'ом (половина стороны 50 м).
pub fn spawn_floor(mut commands: Commands, config: Res<PlaygroundConfig>) {
    let half_thickness = config.physics.floor_half_thickness;

    commands.spawn((
        Floor,
        Transform::from_xyz(0.0, -half_thickness, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(50.0, half_thickness, 50.0),
        Friction::coefficient(config.physics.friction),
        Restitution::coefficient(config.physics.restitution),
    ));
}

/// Система: gravity из конфига + physics pipeline активен только в Running
///
/// Пишем в RapierConfiguration только при расхождении, чтобы не
/// дёргать change detection каждый кадр.
pub fn apply_physics_configuration(
    mut rapier_config: Query<&mut RapierConfiguration>,
    config: Res<PlaygroundConfig>,
    driver: Res<FrameDriver>,
) {
    let gravity = config.physics.gravity_vec();
    let active = driver.is_running();

    for mut rapier in rapier_config.iter_mut() {
        if rapier.gravity != gravity {
            rapier.gravity = gravity;
        }
        if rapier.physics_pipeline_active != active {
            rapier.physics_pipeline_active = active;
        }
    }
}
