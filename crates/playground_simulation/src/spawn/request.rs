//! Spawn Request: эфемерные параметры спавна

use bevy::prelude::*;
use rand::Rng;

use crate::components::ShapeKind;
use crate::config::SpawnConfig;

/// Что и где спавнить. Потребляется Spawner'ом в том же кадре.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub shape: ShapeKind,
    pub position: Vec3,
}

impl SpawnRequest {
    pub fn sphere(radius: f32, position: Vec3) -> Self {
        Self {
            shape: ShapeKind::Sphere { radius },
            position,
        }
    }

    pub fn cuboid(width: f32, height: f32, depth: f32, position: Vec3) -> Self {
        Self {
            shape: ShapeKind::Box { width, height, depth },
            position,
        }
    }

    /// GUI "create sphere": radius ∈ (0, max_sphere_radius]
    pub fn random_sphere(rng: &mut impl Rng, spawn: &SpawnConfig) -> Self {
        let radius = unit_half_open_above(rng) * spawn.max_sphere_radius;
        Self::sphere(radius, random_spawn_position(rng, spawn))
    }

    /// GUI "create box": каждая сторона ∈ (0, max_box_extent]
    pub fn random_box(rng: &mut impl Rng, spawn: &SpawnConfig) -> Self {
        let width = unit_half_open_above(rng) * spawn.max_box_extent;
        let height = unit_half_open_above(rng) * spawn.max_box_extent;
        let depth = unit_half_open_above(rng) * spawn.max_box_extent;
        Self::cuboid(width, height, depth, random_spawn_position(rng, spawn))
    }
}

/// Точка в квадрате `area × area` вокруг начала координат, y = height
pub fn random_spawn_position(rng: &mut impl Rng, spawn: &SpawnConfig) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * spawn.area,
        spawn.height,
        (rng.gen::<f32>() - 0.5) * spawn.area,
    )
}

/// (0, 1]: ноль дал бы вырожденную форму
fn unit_half_open_above(rng: &mut impl Rng) -> f32 {
    1.0 - rng.gen::<f32>()
}
