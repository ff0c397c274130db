use bevy::audio::Volume;
use bevy::prelude::*;
use playground_simulation::{HitSoundCue, PlaygroundConfig, PlaygroundSet};

/// Воспроизведение hit sound по HitSoundCue
///
/// Один клип на всю сцену: новый удар перезапускает звук с начала.
pub struct HitSoundPlugin;

impl Plugin for HitSoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_hit_sound)
            .add_systems(Update, play_hit_sounds.after(PlaygroundSet::Sound));
    }
}

#[derive(Resource)]
pub struct HitSoundClip(pub Handle<AudioSource>);

/// Marker: текущий playback клипа
#[derive(Component)]
pub struct HitSoundPlayback;

fn load_hit_sound(mut commands: Commands, asset_server: Res<AssetServer>, config: Res<PlaygroundConfig>) {
    commands.insert_resource(HitSoundClip(asset_server.load(config.sound.hit_clip.clone())));
}

fn play_hit_sounds(
    mut commands: Commands,
    mut cues: EventReader<HitSoundCue>,
    clip: Res<HitSoundClip>,
    playing: Query<Entity, With<HitSoundPlayback>>,
) {
    // Несколько ударов за кадр = один перезапуск, громкость последнего
    let Some(cue) = cues.read().last().copied() else {
        return;
    };

    for entity in playing.iter() {
        commands.entity(entity).despawn();
    }

    commands.spawn((
        HitSoundPlayback,
        AudioPlayer::new(clip.0.clone()),
        PlaybackSettings::DESPAWN.with_volume(Volume::Linear(cue.volume)),
    ));
}
