//! ECS Components playground-сцены
//!
//! Организация по доменам:
//! - body: физическая сторона пары (ShapeKind, SceneBody, HitSoundListener, PreStepVelocity)
//! - visual: визуальная сторона пары (SceneVisual, VisualOf)

pub mod body;
pub mod visual;

pub use body::*;
pub use visual::*;
