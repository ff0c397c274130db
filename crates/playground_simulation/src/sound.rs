//! Hit sound: ImpactEvent → HitSoundCue
//!
//! Симуляция решает *когда* и *насколько громко*; воспроизведение
//! (рестарт клипа с нуля): забота клиента.

use bevy::prelude::*;
use rand::Rng;

use crate::components::HitSoundListener;
use crate::physics::ImpactEvent;
use crate::DeterministicRng;

/// Порог по умолчанию (м/с), строгое сравнение
pub const HIT_SOUND_THRESHOLD: f32 = 1.5;

/// Фильтр скользящих контактов: звук только при impact speed > threshold
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct HitSoundPolicy {
    pub threshold: f32,
}

impl Default for HitSoundPolicy {
    fn default() -> Self {
        Self {
            threshold: HIT_SOUND_THRESHOLD,
        }
    }
}

impl HitSoundPolicy {
    pub fn should_play(&self, impact_speed: f32) -> bool {
        impact_speed > self.threshold
    }
}

/// Event: проиграть клип удара с начала
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HitSoundCue {
    pub body: Entity,
    /// Громкость ∈ [0, 1)
    pub volume: f32,
    pub impact_speed: f32,
}

/// Система: раз в кадр разобрать очередь ударов
///
/// Тела без HitSoundListener (уже снятого Reset'ом) игнорируются.
pub fn emit_hit_sound_cues(
    mut impacts: EventReader<ImpactEvent>,
    listeners: Query<(), With<HitSoundListener>>,
    policy: Res<HitSoundPolicy>,
    mut rng: ResMut<DeterministicRng>,
    mut cues: EventWriter<HitSoundCue>,
) {
    for impact in impacts.read() {
        if listeners.get(impact.body).is_err() {
            continue;
        }
        if !policy.should_play(impact.impact_speed) {
            continue;
        }

        cues.write(HitSoundCue {
            body: impact.body,
            volume: rng.rng.gen::<f32>(),
            impact_speed: impact.impact_speed,
        });
    }
}
