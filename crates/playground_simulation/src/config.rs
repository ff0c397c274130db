//! Конфигурация playground (RON, `assets/config/playground.ron`)
//!
//! Все секции `#[serde(default)]`: в файле достаточно указать только
//! отличающиеся от дефолта поля.

use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse RON {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Seed для DeterministicRng (spawn requests, громкость удара)
    pub seed: u64,
    pub window: WindowConfig,
    pub physics: PhysicsConfig,
    pub spawn: SpawnConfig,
    pub sound: SoundConfig,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            window: WindowConfig::default(),
            physics: PhysicsConfig::default(),
            spawn: SpawnConfig::default(),
            sound: SoundConfig::default(),
            camera: CameraConfig::default(),
            scene: SceneConfig::default(),
        }
    }
}

impl PlaygroundConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let display = path.as_ref().display().to_string();
        let data = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_ron(&data).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    pub fn from_ron(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(data)
    }

    /// Дефолтный конфиг + ошибка загрузки (если была) для логирования
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<ConfigError>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Physics Playground".to_string(),
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Параметры physics world + default contact material
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: [f32; 3],
    /// Fixed sub-step (секунды)
    pub timestep: f64,
    /// Максимум catch-up sub-steps за один кадр
    pub max_substeps: u32,
    pub friction: f32,
    pub restitution: f32,
    /// Масса каждого заспавненного тела (кг)
    pub body_mass: f32,
    pub allow_sleep: bool,
    /// Половина толщины коллайдера пола (верхняя грань на y = 0)
    pub floor_half_thickness: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.02, 0.0],
            timestep: 1.0 / 60.0,
            max_substeps: 3,
            friction: 0.1,
            restitution: 0.7,
            body_mass: 1.0,
            allow_sleep: true,
            floor_half_thickness: 0.5,
        }
    }
}

impl PhysicsConfig {
    pub fn gravity_vec(&self) -> Vec3 {
        Vec3::from_array(self.gravity)
    }
}

/// Политика GUI-спавна: случайная точка в квадрате `area × area` на высоте `height`
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    pub height: f32,
    pub area: f32,
    pub max_sphere_radius: f32,
    pub max_box_extent: f32,
    /// Сфера, появляющаяся при старте (None = пустая сцена)
    pub initial_sphere: Option<InitialSphere>,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            height: 3.0,
            area: 3.0,
            max_sphere_radius: 0.5,
            max_box_extent: 1.0,
            initial_sphere: Some(InitialSphere::default()),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct InitialSphere {
    pub radius: f32,
    pub position: [f32; 3],
}

impl Default for InitialSphere {
    fn default() -> Self {
        Self {
            radius: 0.5,
            position: [0.0, 1.0, 0.0],
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SoundConfig {
    /// Звук только если impact speed строго больше
    pub impact_threshold: f32,
    pub hit_clip: String,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            impact_threshold: 1.5,
            hit_clip: "sounds/hit.ogg".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub focus: [f32; 3],
    /// Доля оставшегося пути к target за кадр при 60 FPS
    pub damping_factor: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            position: [-3.0, 3.0, 3.0],
            focus: [0.0, 0.0, 0.0],
            damping_factor: 0.05,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Сторона видимого пола (метры)
    pub floor_size: f32,
    /// Грани cube map в порядке px, nx, py, ny, pz, nz
    pub environment_map: [String; 6],
    pub environment_intensity: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let face = |name: &str| format!("textures/environmentMaps/0/{name}.png");
        Self {
            floor_size: 10.0,
            environment_map: [
                face("px"),
                face("nx"),
                face("py"),
                face("ny"),
                face("pz"),
                face("nz"),
            ],
            environment_intensity: 500.0,
        }
    }
}
