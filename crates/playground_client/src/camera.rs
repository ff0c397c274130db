use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use playground_simulation::{CameraLens, OrbitCamera, PlaygroundConfig, PlaygroundSet};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera).add_systems(
            Update,
            (
                // Input меняет только target, damping делает симуляция
                orbit_camera_controls.before(PlaygroundSet::Camera),
                apply_camera_lens.after(PlaygroundSet::Commands),
            ),
        );
    }
}

/// Marker: главная камера сцены
#[derive(Component)]
pub struct PlaygroundCamera;

fn spawn_camera(mut commands: Commands, config: Res<PlaygroundConfig>, lens: Res<CameraLens>) {
    let orbit = OrbitCamera::from_config(&config.camera);

    commands.spawn((
        PlaygroundCamera,
        Camera3d::default(),
        Projection::Perspective(perspective(&lens)),
        orbit.transform(),
        orbit,
    ));
}

fn perspective(lens: &CameraLens) -> PerspectiveProjection {
    PerspectiveProjection {
        fov: lens.fov_degrees.to_radians(),
        near: lens.near,
        far: lens.far,
        aspect_ratio: lens.aspect_ratio,
    }
}

/// Right mouse drag: orbit, wheel: zoom
fn orbit_camera_controls(
    mut query: Query<&mut OrbitCamera, With<PlaygroundCamera>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut mouse_wheel: EventReader<MouseWheel>,
) {
    let Ok(mut camera) = query.single_mut() else {
        return;
    };

    if mouse_buttons.pressed(MouseButton::Right) {
        for motion in mouse_motion.read() {
            camera.rotate(motion.delta);
        }
    } else {
        // Consume motion events even when not orbiting
        mouse_motion.clear();
    }

    for wheel in mouse_wheel.read() {
        camera.zoom(wheel.y);
    }
}

/// CameraLens (после resize) → Projection
fn apply_camera_lens(
    lens: Res<CameraLens>,
    mut query: Query<&mut Projection, With<PlaygroundCamera>>,
) {
    if !lens.is_changed() {
        return;
    }

    for mut projection in query.iter_mut() {
        *projection = Projection::Perspective(perspective(&lens));
    }
}
