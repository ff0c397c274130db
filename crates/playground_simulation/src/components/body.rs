//! Физическая сторона registry entry: форма, тело, слушатель ударов

use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;

/// Форма заспавненного объекта
///
/// Инвариант (контракт вызывающего): все размеры > 0.
/// Не валидируется: вырожденная форма уходит в Rapier как есть.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum ShapeKind {
    Sphere { radius: f32 },
    Box { width: f32, height: f32, depth: f32 },
}

impl ShapeKind {
    /// Rapier collider (cuboid принимает half-extents)
    pub fn collider(&self) -> Collider {
        match *self {
            ShapeKind::Sphere { radius } => Collider::ball(radius),
            ShapeKind::Box { width, height, depth } => {
                Collider::cuboid(width * 0.5, height * 0.5, depth * 0.5)
            }
        }
    }

    /// Scale визуала: меши общие (единичная сфера, единичный куб)
    pub fn visual_scale(&self) -> Vec3 {
        match *self {
            ShapeKind::Sphere { radius } => Vec3::splat(radius),
            ShapeKind::Box { width, height, depth } => Vec3::new(width, height, depth),
        }
    }

    pub fn is_sphere(&self) -> bool {
        matches!(self, ShapeKind::Sphere { .. })
    }

    pub fn is_box(&self) -> bool {
        matches!(self, ShapeKind::Box { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Sphere { .. } => "sphere",
            ShapeKind::Box { .. } => "box",
        }
    }
}

/// Динамическое тело playground-объекта (physics world side)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct SceneBody {
    pub shape: ShapeKind,
}

/// Статический пол (mass = 0)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Floor;

/// Маркер: удары этого тела озвучиваются
///
/// Снимается Reset Operation до despawn тела: ImpactEvent'ы
/// от тел без маркера игнорируются.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct HitSoundListener;

/// Движение тела непосредственно перед physics step
///
/// После step Rapier уже разрешил контакт, поэтому impact speed
/// считается по скоростям до шага. `center`: центр масс (у сферы и
/// бокса совпадает с origin тела).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PreStepVelocity {
    pub linear: Vec3,
    pub angular: Vec3,
    pub center: Vec3,
}

impl PreStepVelocity {
    /// Скорость материальной точки тела: v + ω × r
    pub fn at_point(&self, point: Vec3) -> Vec3 {
        self.linear + self.angular.cross(point - self.center)
    }
}
