//! Orbit camera с damping
//!
//! Input (клиент) меняет только target_*; каждый кадр текущие
//! yaw/pitch/distance догоняют target на долю `damping_factor`
//! (нормировано на 60 FPS, чтобы не зависеть от частоты кадров).

use bevy::prelude::*;

use crate::config::CameraConfig;

const MIN_PITCH: f32 = -std::f32::consts::FRAC_PI_2 + 0.1;
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.1;

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub distance: f32,
    pub yaw: f32,   // Horizontal rotation (radians)
    pub pitch: f32, // Vertical rotation (radians)
    pub target_distance: f32,
    pub target_yaw: f32,
    pub target_pitch: f32,
    pub damping_factor: f32,
    pub sensitivity: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_eye(Vec3::new(-3.0, 3.0, 3.0), Vec3::ZERO, 0.05)
    }
}

impl OrbitCamera {
    /// Orbit параметры из позиции глаза и точки фокуса
    pub fn from_eye(eye: Vec3, focus: Vec3, damping_factor: f32) -> Self {
        let offset = eye - focus;
        let distance = offset.length().max(f32::EPSILON);
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin().clamp(MIN_PITCH, MAX_PITCH);
        let yaw = offset.x.atan2(offset.z);

        Self {
            focus,
            distance,
            yaw,
            pitch,
            target_distance: distance,
            target_yaw: yaw,
            target_pitch: pitch,
            damping_factor: damping_factor.clamp(0.0, 1.0),
            sensitivity: 0.005,
            zoom_speed: 0.5,
            min_distance: 1.0,
            max_distance: 50.0,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::from_eye(
            Vec3::from_array(config.position),
            Vec3::from_array(config.focus),
            config.damping_factor,
        )
    }

    /// Mouse drag (пиксели) → target yaw/pitch
    pub fn rotate(&mut self, delta: Vec2) {
        self.target_yaw -= delta.x * self.sensitivity;
        self.target_pitch = (self.target_pitch + delta.y * self.sensitivity).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Mouse wheel → target distance
    pub fn zoom(&mut self, scroll: f32) {
        self.target_distance =
            (self.target_distance - scroll * self.zoom_speed).clamp(self.min_distance, self.max_distance);
    }

    /// Damped interpolation к target
    pub fn damp(&mut self, delta_secs: f32) {
        let alpha = damping_alpha(self.damping_factor, delta_secs);
        self.yaw += (self.target_yaw - self.yaw) * alpha;
        self.pitch += (self.target_pitch - self.pitch) * alpha;
        self.distance += (self.target_distance - self.distance) * alpha;
    }

    pub fn eye_position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.focus + Vec3::new(x, y, z)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye_position()).looking_at(self.focus, Vec3::Y)
    }
}

/// 1 − (1 − f)^(dt·60): при 60 FPS ровно f за кадр
fn damping_alpha(factor: f32, delta_secs: f32) -> f32 {
    if factor >= 1.0 {
        return 1.0;
    }
    1.0 - (1.0 - factor).powf(delta_secs.max(0.0) * 60.0)
}

/// Система: damping + запись Transform камеры
pub fn update_orbit_cameras(time: Res<Time>, mut query: Query<(&mut OrbitCamera, &mut Transform)>) {
    let delta = time.delta_secs();

    for (mut camera, mut transform) in query.iter_mut() {
        camera.damp(delta);
        *transform = camera.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_eye_round_trips_position() {
        let eye = Vec3::new(-3.0, 3.0, 3.0);
        let camera = OrbitCamera::from_eye(eye, Vec3::ZERO, 0.05);

        assert!((camera.eye_position() - eye).length() < 1e-4);
        assert!((camera.distance - 27.0_f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_damping_converges_without_overshoot() {
        let mut camera = OrbitCamera::from_eye(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 0.05);
        camera.rotate(Vec2::new(-200.0, 0.0)); // target_yaw = +1.0

        let mut previous = camera.yaw;
        for _ in 0..600 {
            camera.damp(1.0 / 60.0);
            assert!(camera.yaw >= previous);
            assert!(camera.yaw <= camera.target_yaw);
            previous = camera.yaw;
        }
        assert!((camera.yaw - camera.target_yaw).abs() < 1e-3);
    }

    #[test]
    fn test_damping_factor_per_frame_at_60fps() {
        let mut camera = OrbitCamera::from_eye(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 0.1);
        camera.target_distance = 20.0;

        camera.damp(1.0 / 60.0);
        assert!((camera.distance - 11.0).abs() < 1e-4, "distance = {}", camera.distance);
    }

    #[test]
    fn test_pitch_and_zoom_are_clamped() {
        let mut camera = OrbitCamera::default();
        camera.rotate(Vec2::new(0.0, 10_000.0));
        assert_eq!(camera.target_pitch, MAX_PITCH);

        camera.zoom(1_000.0);
        assert_eq!(camera.target_distance, camera.min_distance);
        camera.zoom(-1_000.0);
        assert_eq!(camera.target_distance, camera.max_distance);
    }
}
