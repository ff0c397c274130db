//! Sync Step: body transform → visual transform
//!
//! Physics владеет движением, визуал: пассивное зеркало. Копируются
//! translation + rotation как есть (без интерполяции), scale визуала
//! не трогаем: в нём размеры формы.

use bevy::prelude::*;

use crate::components::{SceneBody, SceneVisual};
use crate::registry::ObjectRegistry;

/// Система: для каждой пары registry скопировать позу тела в визуал
///
/// Запускается в PostUpdate: после всех physics sub-steps кадра и до
/// transform propagation / рендера.
pub fn sync_visuals_to_bodies(
    registry: Res<ObjectRegistry>,
    bodies: Query<&Transform, (With<SceneBody>, Without<SceneVisual>)>,
    mut visuals: Query<&mut Transform, (With<SceneVisual>, Without<SceneBody>)>,
) {
    for entry in registry.iter() {
        let Ok(body_transform) = bodies.get(entry.body) else {
            continue;
        };
        let Ok(mut visual_transform) = visuals.get_mut(entry.visual) else {
            continue;
        };

        mirror_pose(body_transform, &mut visual_transform);
    }
}

/// Точная копия позы (translation + unit quaternion)
pub fn mirror_pose(body: &Transform, visual: &mut Transform) {
    visual.translation = body.translation;
    visual.rotation = body.rotation;
}
