//! Object Registry: упорядоченный список пар (visual, body)
//!
//! Единственный владелец связки mesh ↔ body. Сами entity принадлежат
//! scene/physics world; registry только помнит, что удалять на Reset.

use bevy::prelude::*;

use crate::components::ShapeKind;

/// Одна пара visual ↔ body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegistryEntry {
    pub visual: Entity,
    pub body: Entity,
    pub shape: ShapeKind,
}

/// Порядок = порядок спавна. Lookup-by-id не нужен: registry целиком
/// итерируется каждым Sync Step и Reset.
#[derive(Resource, Debug, Default)]
pub struct ObjectRegistry {
    entries: Vec<RegistryEntry>,
}

impl ObjectRegistry {
    pub fn add(&mut self, entry: RegistryEntry) {
        self.entries.push(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Извлечь все entries (registry остаётся пустым)
    pub fn drain(&mut self) -> Vec<RegistryEntry> {
        std::mem::take(&mut self.entries)
    }

    /// Забыть все пары без удаления entity (их владелец: вызывающий)
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
