//! Reset Operation: полный teardown всех заспавненных пар
//!
//! Единственный путь удаления объектов: per-object removal не существует.

use bevy::prelude::*;
use bevy_rapier3d::prelude::ActiveEvents;

use crate::components::HitSoundListener;
use crate::registry::ObjectRegistry;

/// Для каждой пары: снять слушателя ударов, убрать тело из physics world,
/// убрать визуал из сцены. Затем registry пуст.
///
/// На пустом registry: no-op. Возвращает число удалённых пар.
pub fn reset_scene(commands: &mut Commands, registry: &mut ObjectRegistry) -> usize {
    let entries = registry.drain();

    for entry in &entries {
        commands
            .entity(entry.body)
            .remove::<(HitSoundListener, ActiveEvents)>()
            .despawn();
        commands.entity(entry.visual).despawn();
    }

    if !entries.is_empty() {
        crate::logger::log_info(&format!("Reset: removed {} objects", entries.len()));
    }

    entries.len()
}
