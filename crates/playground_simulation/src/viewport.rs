//! Viewport + camera lens (window resize)
//!
//! Resize меняет только размеры/pixel ratio и aspect камеры.
//! Registry и объекты сцены не затрагиваются.

use bevy::prelude::*;

use crate::config::PlaygroundConfig;

/// Верхняя граница pixel density
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Размер области вывода в логических пикселях
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Размеры в физических пикселях (то, что реально рендерится)
    pub fn physical_size(&self) -> UVec2 {
        UVec2::new(
            (self.width * self.pixel_ratio).round() as u32,
            (self.height * self.pixel_ratio).round() as u32,
        )
    }
}

/// Параметры перспективной проекции
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraLens {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub aspect_ratio: f32,
}

impl CameraLens {
    pub fn from_config(config: &PlaygroundConfig) -> Self {
        let viewport = Viewport::new(config.window.width, config.window.height);
        Self {
            fov_degrees: config.camera.fov_degrees,
            near: config.camera.near,
            far: config.camera.far,
            aspect_ratio: viewport.aspect_ratio(),
        }
    }
}

/// Event: внешнее окно изменило размер
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ViewportResized {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32,
}

/// Система: применить resize к Viewport и CameraLens
///
/// Нулевая высота (свёрнутое окно): aspect не трогаем.
pub fn apply_viewport_resize(
    mut resizes: EventReader<ViewportResized>,
    mut viewport: ResMut<Viewport>,
    mut lens: ResMut<CameraLens>,
) {
    let Some(resize) = resizes.read().last().copied() else {
        return;
    };

    viewport.width = resize.width;
    viewport.height = resize.height;
    viewport.pixel_ratio = resize.device_pixel_ratio.min(MAX_PIXEL_RATIO);

    if resize.height > 0.0 {
        lens.aspect_ratio = viewport.aspect_ratio();
    }

    crate::logger::log(&format!(
        "Viewport resized to {}x{} (pixel ratio {})",
        viewport.width, viewport.height, viewport.pixel_ratio
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(Viewport::new(1600.0, 800.0).aspect_ratio(), 2.0);
        assert_eq!(Viewport::new(100.0, 0.0).aspect_ratio(), 1.0);
    }

    #[test]
    fn test_physical_size_uses_pixel_ratio() {
        let viewport = Viewport {
            width: 800.0,
            height: 600.0,
            pixel_ratio: 2.0,
        };
        assert_eq!(viewport.physical_size(), UVec2::new(1600, 1200));
    }

    #[test]
    fn test_lens_from_config() {
        let lens = CameraLens::from_config(&PlaygroundConfig::default());
        assert_eq!(lens.fov_degrees, 75.0);
        assert_eq!(lens.near, 0.1);
        assert_eq!(lens.far, 100.0);
        assert_eq!(lens.aspect_ratio, 1280.0 / 720.0);
    }
}
