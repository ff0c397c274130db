use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use playground_simulation::{PlaygroundSet, Viewport, ViewportResized};

/// Окно → ViewportResized (симуляция пересчитывает aspect),
/// Viewport::pixel_ratio → scale factor окна
pub struct ViewportPlugin;

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                forward_window_resizes.before(PlaygroundSet::Commands),
                apply_pixel_ratio.after(PlaygroundSet::Commands),
            ),
        );
    }
}

fn forward_window_resizes(
    mut window_resized: EventReader<WindowResized>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut resized: EventWriter<ViewportResized>,
) {
    for event in window_resized.read() {
        let Ok(window) = windows.get(event.window) else {
            continue;
        };

        resized.write(ViewportResized {
            width: event.width,
            height: event.height,
            device_pixel_ratio: window.resolution.base_scale_factor(),
        });
    }
}

/// Ограниченный pixel ratio как override scale factor
fn apply_pixel_ratio(viewport: Res<Viewport>, mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    // Начальный Viewport (до первого resize) окно не трогает
    if !viewport.is_changed() || viewport.is_added() {
        return;
    }

    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    let ratio = viewport.pixel_ratio;
    if window.resolution.base_scale_factor() == ratio {
        if window.resolution.scale_factor_override().is_some() {
            window.resolution.set_scale_factor_override(None);
        }
    } else if window.resolution.scale_factor_override() != Some(ratio) {
        window.resolution.set_scale_factor_override(Some(ratio));
    }
}
