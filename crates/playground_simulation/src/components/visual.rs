//! Визуальная сторона registry entry
//!
//! Симуляция не знает про Mesh/Material: клиент навешивает Mesh3d на
//! каждый новый SceneVisual. Headless-режим работает только с Transform.

use bevy::prelude::*;

use super::body::ShapeKind;

/// Визуал playground-объекта (render scene side)
///
/// Transform пассивно зеркалит тело (Sync Step), scale = размеры формы.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct SceneVisual {
    pub shape: ShapeKind,
}

/// Link: visual entity → body entity
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct VisualOf(pub Entity);
