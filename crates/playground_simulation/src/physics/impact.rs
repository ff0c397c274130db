//! Collision impacts: контакты Rapier → ImpactEvent
//!
//! Вместо callback'а, стреляющего посреди step, после каждого physics step
//! обходим контакты тел со слушателем и пишем очередь ImpactEvent'ов,
//! которую раз в кадр разбирает hit sound handler.
//!
//! Контакты сканируются каждый step, а не только на CollisionEvent::Started:
//! кувыркающийся бокс, который бьёт гранью о пол, пока его ребро
//! ещё касается пола, тоже даёт удар.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::components::{HitSoundListener, PreStepVelocity};

/// Event: тело со слушателем налетает на другой коллайдер
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ImpactEvent {
    /// Тело, чей слушатель получает удар
    pub body: Entity,
    /// Второй участник контакта (другое тело или пол)
    pub other: Entity,
    /// Максимальная скорость сближения по точкам контакта (м/с), > 0
    pub impact_speed: f32,
}

/// Скорость сближения в точке контакта вдоль нормали
///
/// `normal` направлена от первого тела ко второму (как manifold normal
/// в Rapier). > 0: точки сближаются, ≤ 0: расходятся или скользят.
pub fn approach_speed(first: &PreStepVelocity, second: &PreStepVelocity, point: Vec3, normal: Vec3) -> f32 {
    (first.at_point(point) - second.at_point(point)).dot(normal)
}

/// Система: запомнить скорости и центр масс перед physics step
pub fn capture_pre_step_velocities(mut query: Query<(&Velocity, &Transform, &mut PreStepVelocity)>) {
    for (velocity, transform, mut pre_step) in query.iter_mut() {
        *pre_step = PreStepVelocity {
            linear: velocity.linvel,
            angular: velocity.angvel,
            center: transform.translation,
        };
    }
}

/// Система: контакты тел со слушателем → ImpactEvent
///
/// Manifold'ы после step посчитаны narrow phase'ом по позициям до
/// интегрирования, то есть согласованы с PreStepVelocity. Для каждой пары
/// берётся максимальная скорость сближения по её solver contacts; пары
/// без сближения событий не дают.
pub fn collect_impacts(
    rapier_context: ReadRapierContext,
    listeners: Query<(Entity, &ActiveEvents), With<HitSoundListener>>,
    motions: Query<&PreStepVelocity>,
    mut impacts: EventWriter<ImpactEvent>,
) {
    let Ok(context) = rapier_context.single() else {
        return;
    };

    for (body, active_events) in listeners.iter() {
        if !active_events.contains(ActiveEvents::COLLISION_EVENTS) {
            continue;
        }
        let own = motion_of(&motions, body);

        for pair in context.contact_pairs_with(body) {
            if !pair.has_any_active_contact() {
                continue;
            }

            // Коллайдер без entity (уже despawn'нут) пропускаем
            let (Some(first), Some(second)) = (pair.collider1(), pair.collider2()) else {
                continue;
            };
            let other = if first == body { second } else { first };
            let (first_motion, second_motion) = if first == body {
                (own, motion_of(&motions, other))
            } else {
                (motion_of(&motions, other), own)
            };

            let mut impact_speed = 0.0_f32;
            for manifold in pair.manifolds() {
                let normal = manifold.normal();
                for contact in manifold.solver_contacts() {
                    let speed = approach_speed(&first_motion, &second_motion, contact.point(), normal);
                    impact_speed = impact_speed.max(speed);
                }
            }

            if impact_speed > 0.0 {
                impacts.write(ImpactEvent { body, other, impact_speed });
            }
        }
    }
}

/// Пол и посторонние коллайдеры без PreStepVelocity неподвижны
fn motion_of(motions: &Query<&PreStepVelocity>, entity: Entity) -> PreStepVelocity {
    motions.get(entity).copied().unwrap_or_default()
}
