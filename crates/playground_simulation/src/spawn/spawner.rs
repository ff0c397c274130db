//! Sphere/Box spawners: пара visual + dynamic body → ObjectRegistry

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::components::{HitSoundListener, PreStepVelocity, SceneBody, SceneVisual, ShapeKind, VisualOf};
use crate::config::PhysicsConfig;
use crate::registry::{ObjectRegistry, RegistryEntry};

use super::SpawnRequest;

/// Spawn helper: создаёт тело в physics world, визуал в сцене, регистрирует пару
///
/// Тело позиционируется один раз, сразу в `request.position`.
/// Entity ids доступны немедленно, сами компоненты применятся на
/// ближайшем sync point (apply_deferred).
pub fn spawn_object(
    commands: &mut Commands,
    registry: &mut ObjectRegistry,
    physics: &PhysicsConfig,
    request: &SpawnRequest,
) -> RegistryEntry {
    let shape = request.shape;

    let body = commands
        .spawn((
            SceneBody { shape },
            Transform::from_translation(request.position),

            // Rapier physics (mass ≠ 0 → dynamic)
            RigidBody::Dynamic,
            shape.collider(),
            ColliderMassProperties::Mass(physics.body_mass),
            Friction::coefficient(physics.friction),
            Restitution::coefficient(physics.restitution),
            Velocity::zero(),

            // Collision → ImpactEvent → hit sound
            ActiveEvents::COLLISION_EVENTS,
            PreStepVelocity::default(),
            HitSoundListener,
        ))
        .id();

    if !physics.allow_sleep {
        commands.entity(body).insert(Sleeping::disabled());
    }

    let visual = commands
        .spawn((
            SceneVisual { shape },
            VisualOf(body),
            Transform::from_translation(request.position).with_scale(shape.visual_scale()),
        ))
        .id();

    let entry = RegistryEntry { visual, body, shape };
    registry.add(entry);

    crate::logger::log(&format!(
        "Spawned {} at ({:.2}, {:.2}, {:.2}), registry size {}",
        shape.label(),
        request.position.x,
        request.position.y,
        request.position.z,
        registry.len()
    ));

    entry
}

pub fn spawn_sphere(
    commands: &mut Commands,
    registry: &mut ObjectRegistry,
    physics: &PhysicsConfig,
    radius: f32,
    position: Vec3,
) -> RegistryEntry {
    spawn_object(commands, registry, physics, &SpawnRequest::sphere(radius, position))
}

pub fn spawn_box(
    commands: &mut Commands,
    registry: &mut ObjectRegistry,
    physics: &PhysicsConfig,
    size: Vec3,
    position: Vec3,
) -> RegistryEntry {
    spawn_object(
        commands,
        registry,
        physics,
        &SpawnRequest {
            shape: ShapeKind::Box {
                width: size.x,
                height: size.y,
                depth: size.z,
            },
            position,
        },
    )
}
