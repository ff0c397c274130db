//! Physics integration test: Rapier step → Sync Step → impacts
//!
//! Проверяем:
//! - Тела падают под gravity и останавливаются на полу
//! - После каждого Sync Step поза визуала = поза тела (точное равенство)
//! - Падение на пол даёт HitSoundCue
//! - Stop signal замораживает physics
//! - Resize меняет только viewport/lens
//! - Детерминизм: одинаковый seed → идентичный результат

mod common;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::Velocity;
use common::*;
use playground_simulation::*;
use std::time::Duration;

fn entries(app: &App) -> Vec<RegistryEntry> {
    app.world().resource::<ObjectRegistry>().iter().copied().collect()
}

fn body_translation(app: &App, body: Entity) -> Vec3 {
    app.world().get::<Transform>(body).unwrap().translation
}

fn assert_visuals_mirror_bodies(app: &App) {
    for entry in entries(app) {
        let body = app.world().get::<Transform>(entry.body).unwrap();
        let visual = app.world().get::<Transform>(entry.visual).unwrap();
        assert_eq!(visual.translation, body.translation, "translation of {:?}", entry);
        assert_eq!(visual.rotation, body.rotation, "rotation of {:?}", entry);
    }
}

/// Собирает все HitSoundCue (events живут только два кадра)
#[derive(Resource, Default)]
struct CollectedCues(Vec<HitSoundCue>);

fn collect_cues(mut cues: EventReader<HitSoundCue>, mut collected: ResMut<CollectedCues>) {
    collected.0.extend(cues.read().copied());
}

fn with_cue_collector(mut app: App) -> App {
    app.init_resource::<CollectedCues>()
        .add_systems(Update, collect_cues.after(PlaygroundSet::Sound));
    app
}

/// Счётчик FixedUpdate прогонов (physics sub-steps)
#[derive(Resource, Default)]
struct FixedSteps(u32);

fn count_fixed_step(mut steps: ResMut<FixedSteps>) {
    steps.0 += 1;
}

/// Test: frame driver переходит в Running на первом кадре
#[test]
fn test_frame_driver_starts_running() {
    let mut app = create_playground_app(empty_scene_config());
    assert_eq!(app.world().resource::<FrameDriver>().phase(), DriverPhase::Idle);

    run_frames(&mut app, 3);

    let driver = app.world().resource::<FrameDriver>();
    assert_eq!(driver.phase(), DriverPhase::Running);
    assert_eq!(driver.frames(), 3);

    let clock = app.world().resource::<SimulationClock>();
    assert!(clock.elapsed > 0.0);
    assert!((clock.delta - FRAME).abs() < 1e-6, "delta = {}", clock.delta);
}

/// Test: сфера падает под gravity и ложится на пол
#[test]
fn test_sphere_falls_and_rests_on_floor() {
    let mut app = create_playground_app(empty_scene_config());
    app.update();

    app.world_mut()
        .send_event(SceneCommand::Spawn(SpawnRequest::sphere(0.5, Vec3::new(0.0, 3.0, 0.0))));
    app.update();
    let body = entries(&app)[0].body;

    run_frames(&mut app, 20);
    let falling = body_translation(&app, body);
    assert!(falling.y < 3.0, "sphere did not fall: y = {}", falling.y);

    // 10 секунд: restitution 0.7 гасит отскоки
    run_frames(&mut app, 600);
    let resting = body_translation(&app, body);
    assert!(
        (resting.y - 0.5).abs() < 0.1,
        "sphere should rest on the floor, y = {}",
        resting.y
    );
}

/// Test: визуалы точно зеркалят тела каждый кадр
#[test]
fn test_sync_step_mirrors_bodies_exactly() {
    let mut app = create_playground_app(PlaygroundConfig::default());
    app.update();

    for _ in 0..6 {
        app.world_mut().send_event(SceneCommand::SpawnRandomBox);
        app.world_mut().send_event(SceneCommand::SpawnRandomSphere);
    }

    for _ in 0..180 {
        app.update();
        assert_visuals_mirror_bodies(&app);
    }

    // Все тела реально упали с высоты спавна
    for entry in entries(&app) {
        assert!(body_translation(&app, entry.body).y < 3.0);
    }
}

/// Test: удар о пол выше порога озвучивается
#[test]
fn test_floor_impact_emits_hit_sound_cue() {
    let mut app = with_cue_collector(create_playground_app(empty_scene_config()));
    app.update();

    app.world_mut()
        .send_event(SceneCommand::Spawn(SpawnRequest::sphere(0.3, Vec3::new(0.0, 3.0, 0.0))));
    app.update();
    let body = entries(&app)[0].body;

    run_frames(&mut app, 120);

    let cues = &app.world().resource::<CollectedCues>().0;
    assert!(!cues.is_empty(), "falling from 3m must produce a hit sound");
    for cue in cues {
        assert_eq!(cue.body, body);
        assert!(cue.impact_speed > HIT_SOUND_THRESHOLD);
        assert!((0.0..1.0).contains(&cue.volume));
    }
}

/// Test: медленный контакт ниже порога не звучит
#[test]
fn test_gentle_contact_is_silent() {
    let mut app = with_cue_collector(create_playground_app(empty_scene_config()));
    app.update();

    // Нижняя точка сферы в 2 см над полом: v ≈ sqrt(2·9.02·0.02) ≈ 0.6 м/с
    app.world_mut()
        .send_event(SceneCommand::Spawn(SpawnRequest::sphere(0.3, Vec3::new(0.0, 0.32, 0.0))));
    run_frames(&mut app, 120);

    assert!(app.world().resource::<CollectedCues>().0.is_empty());
}

/// Test: stop signal замораживает тела
#[test]
fn test_stop_signal_freezes_physics() {
    let mut app = create_playground_app(empty_scene_config());
    app.update();

    app.world_mut()
        .send_event(SceneCommand::Spawn(SpawnRequest::sphere(0.3, Vec3::new(0.0, 4.0, 0.0))));
    run_frames(&mut app, 5);
    let body = entries(&app)[0].body;

    app.world_mut().send_event(StopFrameDriver);
    app.update();
    assert_eq!(app.world().resource::<FrameDriver>().phase(), DriverPhase::Stopped);

    // Кадр остановки ещё мог сделать step: фиксируем позицию после него
    app.update();
    let frozen = body_translation(&app, body);
    run_frames(&mut app, 30);

    assert_eq!(body_translation(&app, body), frozen);
    assert_eq!(app.world().resource::<FrameDriver>().phase(), DriverPhase::Stopped);
}

/// Test: resize меняет aspect и размер вывода, registry не трогает
#[test]
fn test_resize_updates_lens_only() {
    let mut app = create_playground_app(PlaygroundConfig::default());
    app.update();
    app.world_mut().send_event(SceneCommand::SpawnRandomBox);
    app.update();

    let before = entries(&app);

    app.world_mut().send_event(ViewportResized {
        width: 1000.0,
        height: 500.0,
        device_pixel_ratio: 3.0,
    });
    app.update();

    let lens = *app.world().resource::<CameraLens>();
    assert_eq!(lens.aspect_ratio, 2.0);
    assert_eq!(lens.fov_degrees, 75.0);

    let viewport = *app.world().resource::<Viewport>();
    assert_eq!(viewport.width, 1000.0);
    assert_eq!(viewport.height, 500.0);
    assert_eq!(viewport.pixel_ratio, 2.0);
    assert_eq!(viewport.physical_size(), UVec2::new(2000, 1000));

    assert_eq!(entries(&app), before);
    for entry in before {
        assert!(entity_exists(&app, entry.body));
        assert!(entity_exists(&app, entry.visual));
    }
}

/// Test: детерминизм: одинаковый seed даёт идентичные позиции
#[test]
fn test_same_seed_same_outcome() {
    fn run(seed: u64) -> Vec<(ShapeKind, Vec3)> {
        let mut config = empty_scene_config();
        config.seed = seed;
        let mut app = create_playground_app(config);
        app.update();

        for frame in 0..120 {
            if frame % 10 == 0 {
                app.world_mut().send_event(SceneCommand::SpawnRandomSphere);
            }
            app.update();
        }

        entries(&app)
            .into_iter()
            .map(|entry| (entry.shape, body_translation(&app, entry.body)))
            .collect()
    }

    let first = run(42);
    let second = run(42);
    assert_eq!(first.len(), 12);
    assert_eq!(first, second, "same seed produced different results");
}

/// Test: длинный кадр догоняется не больше чем max_substeps шагами
#[test]
fn test_long_frame_catch_up_is_bounded() {
    let mut app = create_playground_app(empty_scene_config());
    app.init_resource::<FixedSteps>()
        .add_systems(FixedUpdate, count_fixed_step)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs(1)));
    let max_substeps = app.world().resource::<PlaygroundConfig>().physics.max_substeps;

    let mut total = 0;
    for frame in 0..5 {
        app.update();
        let steps = std::mem::take(&mut app.world_mut().resource_mut::<FixedSteps>().0);
        assert!(steps <= max_substeps, "frame {}: {} steps", frame, steps);
        total += steps;
    }

    // Секундные кадры реально догоняются, а не идут по одному шагу
    assert!(total > 5, "only {} steps in 5 long frames", total);
}

/// Test: кувыркающаяся плита бьёт ребром о пол, не отрываясь от него
#[test]
fn test_spinning_slab_edge_impact_is_heard() {
    let mut app = with_cue_collector(create_playground_app(empty_scene_config()));
    app.update();

    app.world_mut().send_event(SceneCommand::Spawn(SpawnRequest::cuboid(
        1.0,
        0.1,
        1.0,
        Vec3::new(0.0, 0.05, 0.0),
    )));
    run_frames(&mut app, 30);
    let body = entries(&app)[0].body;
    app.world_mut().resource_mut::<CollectedCues>().0.clear();

    // ~6 м/с на ребре, линейная скорость нулевая
    app.world_mut().get_mut::<Velocity>(body).unwrap().angvel = Vec3::new(0.0, 0.0, 12.0);
    run_frames(&mut app, 60);

    let cues = &app.world().resource::<CollectedCues>().0;
    assert!(!cues.is_empty(), "edge slamming into the floor must be heard");
    assert!(cues.iter().all(|cue| cue.body == body && cue.impact_speed > HIT_SOUND_THRESHOLD));
}

/// Test: после stop команды сцены не применяются
#[test]
fn test_scene_commands_ignored_after_stop() {
    let mut app = create_playground_app(empty_scene_config());
    app.update();
    app.world_mut().send_event(SceneCommand::SpawnRandomSphere);
    app.update();
    let before = entries(&app);
    assert_eq!(before.len(), 1);

    app.world_mut().send_event(StopFrameDriver);
    app.world_mut().send_event(SceneCommand::SpawnRandomBox);
    app.update();
    app.world_mut().send_event(SceneCommand::Reset);
    app.world_mut().send_event(SceneCommand::SpawnRandomSphere);
    run_frames(&mut app, 3);

    assert_eq!(entries(&app), before);
    assert!(entity_exists(&app, before[0].body));
    assert_eq!(
        app.world_mut().query::<&SceneBody>().iter(app.world()).count(),
        1
    );
}

/// Test: удар, пришедший в кадре Reset, не озвучивается
#[test]
fn test_impact_in_reset_frame_is_silent() {
    fn run(reset: bool) -> usize {
        let mut app = with_cue_collector(create_playground_app(empty_scene_config()));
        app.update();
        app.world_mut()
            .send_event(SceneCommand::Spawn(SpawnRequest::sphere(0.3, Vec3::new(0.0, 3.0, 0.0))));
        app.update();
        let body = entries(&app)[0].body;

        // Удар уже в очереди, когда кадр применяет Reset
        app.world_mut().send_event(ImpactEvent {
            body,
            other: Entity::PLACEHOLDER,
            impact_speed: 5.0,
        });
        if reset {
            app.world_mut().send_event(SceneCommand::Reset);
        }
        app.update();

        app.world().resource::<CollectedCues>().0.len()
    }

    assert_eq!(run(false), 1);
    assert_eq!(run(true), 0);
}


/// Собирает все ImpactEvent физического шага
#[derive(Resource, Default)]
struct CollectedImpacts(Vec<ImpactEvent>);

fn collect_impact_events(mut impacts: EventReader<ImpactEvent>, mut collected: ResMut<CollectedImpacts>) {
    collected.0.extend(impacts.read().copied());
}

/// Test: удар о пол связывает тело со слушателем и entity пола
#[test]
fn test_floor_impact_names_both_participants() {
    let mut app = create_playground_app(empty_scene_config());
    app.init_resource::<CollectedImpacts>()
        .add_systems(Update, collect_impact_events.before(PlaygroundSet::Sound));
    app.update();

    app.world_mut()
        .send_event(SceneCommand::Spawn(SpawnRequest::sphere(0.3, Vec3::new(0.0, 3.0, 0.0))));
    app.update();
    let body = entries(&app)[0].body;

    run_frames(&mut app, 120);

    let floor = app
        .world_mut()
        .query_filtered::<Entity, With<Floor>>()
        .single(app.world())
        .unwrap();
    let impacts = &app.world().resource::<CollectedImpacts>().0;
    assert!(!impacts.is_empty(), "falling sphere must hit the floor");
    for impact in impacts {
        assert_eq!(impact.body, body);
        assert_eq!(impact.other, floor);
        assert!(impact.impact_speed > 0.0);
    }
}
