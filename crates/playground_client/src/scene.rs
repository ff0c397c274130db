use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{
    Extent3d, TextureDimension, TextureViewDescriptor, TextureViewDimension,
};
use playground_simulation::{log_error, log_info, PlaygroundConfig, SceneVisual, ShapeKind};

use crate::camera::PlaygroundCamera;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_visual_assets, setup_scene, load_environment_faces))
            .add_systems(Update, (attach_meshes_to_new_visuals, assemble_environment_map));
    }
}

/// Общие mesh'и единичного размера + материал всех тел
///
/// Размер формы задаёт Transform::scale визуала.
#[derive(Resource)]
pub struct VisualAssets {
    pub sphere: Handle<Mesh>,
    pub cuboid: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// Шесть граней cube map, ждут загрузки
#[derive(Resource)]
pub struct EnvironmentFaces {
    pub faces: Vec<Handle<Image>>,
    pub intensity: f32,
}

fn setup_visual_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(VisualAssets {
        sphere: meshes.add(Sphere::new(1.0).mesh().uv(20, 20)),
        cuboid: meshes.add(Cuboid::new(1.0, 1.0, 1.0)),
        material: materials.add(StandardMaterial {
            metallic: 0.3,
            perceptual_roughness: 0.4,
            ..default()
        }),
    });
}

/// Пол (визуал), свет
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<PlaygroundConfig>,
) {
    let half_size = config.scene.floor_size * 0.5;

    // Floor plane (коллайдер спавнит симуляция)
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(half_size)))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(0x77, 0x77, 0x77),
            metallic: 0.3,
            perceptual_roughness: 0.4,
            ..default()
        })),
        Transform::default(),
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 700.0,
        affects_lightmapped_meshes: false,
    });

    // Directional light (sun) с тенями
    commands.spawn((
        DirectionalLight {
            illuminance: 2000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(5.0, 5.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn load_environment_faces(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<PlaygroundConfig>,
) {
    let faces = config
        .scene
        .environment_map
        .iter()
        .map(|path| asset_server.load(path.clone()))
        .collect();

    commands.insert_resource(EnvironmentFaces {
        faces,
        intensity: config.scene.environment_intensity,
    });
}

/// Mesh + material для визуалов, заспавненных симуляцией в этом кадре
fn attach_meshes_to_new_visuals(
    mut commands: Commands,
    assets: Res<VisualAssets>,
    query: Query<(Entity, &SceneVisual), Added<SceneVisual>>,
) {
    for (entity, visual) in query.iter() {
        let mesh = match visual.shape {
            ShapeKind::Sphere { .. } => assets.sphere.clone(),
            ShapeKind::Box { .. } => assets.cuboid.clone(),
        };

        commands
            .entity(entity)
            .insert((Mesh3d(mesh), MeshMaterial3d(assets.material.clone())));
    }
}

/// Когда все грани загружены: собрать cube Image и повесить на камеру
fn assemble_environment_map(
    mut commands: Commands,
    faces: Option<Res<EnvironmentFaces>>,
    asset_server: Res<AssetServer>,
    mut images: ResMut<Assets<Image>>,
    cameras: Query<Entity, With<PlaygroundCamera>>,
) {
    let Some(faces) = faces else {
        return;
    };

    if faces
        .faces
        .iter()
        .any(|face| asset_server.load_state(face.id()).is_failed())
    {
        log_error("Environment map face failed to load, scene stays without it");
        commands.remove_resource::<EnvironmentFaces>();
        return;
    }

    if !faces.faces.iter().all(|face| asset_server.is_loaded_with_dependencies(face.id())) {
        return;
    }

    let Ok(camera) = cameras.single() else {
        return;
    };

    let cube = match build_cube_image(&faces.faces, &images) {
        Ok(cube) => cube,
        Err(reason) => {
            log_error(&format!("Environment map not assembled: {}", reason));
            commands.remove_resource::<EnvironmentFaces>();
            return;
        }
    };

    let handle = images.add(cube);
    commands.entity(camera).insert(EnvironmentMapLight {
        diffuse_map: handle.clone(),
        specular_map: handle,
        intensity: faces.intensity,
        ..default()
    });
    commands.remove_resource::<EnvironmentFaces>();

    log_info("Environment map applied");
}

/// Склеить грани (px, nx, py, ny, pz, nz) в один Image с 6 слоями
fn build_cube_image(faces: &[Handle<Image>], images: &Assets<Image>) -> Result<Image, String> {
    let first = faces
        .first()
        .and_then(|handle| images.get(handle))
        .ok_or("no faces loaded")?;
    let size = first.texture_descriptor.size;
    let format = first.texture_descriptor.format;

    let mut data = Vec::new();
    for handle in faces {
        let face = images.get(handle).ok_or("face missing from assets")?;
        if face.texture_descriptor.size != size || face.texture_descriptor.format != format {
            return Err("faces differ in size or format".to_string());
        }
        let bytes = face.data.as_ref().ok_or("face has no CPU data")?;
        data.extend_from_slice(bytes);
    }

    let mut cube = Image::new(
        Extent3d {
            width: size.width,
            height: size.height,
            depth_or_array_layers: faces.len() as u32,
        },
        TextureDimension::D2,
        data,
        format,
        RenderAssetUsages::RENDER_WORLD,
    );
    cube.texture_view_descriptor = Some(TextureViewDescriptor {
        dimension: Some(TextureViewDimension::Cube),
        ..default()
    });

    Ok(cube)
}
