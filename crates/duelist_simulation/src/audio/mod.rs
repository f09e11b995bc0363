//! Locomotion audio: animation events → звуковые cues
//!
//! Animation backend шлёт `AnimationEvent` (footstep / land) с весом клипа
//! в blend tree. Cue испускается только если клип реально доминирует
//! (weight > threshold): при blend walk↔run иначе шаги дублируются.
//!
//! Воспроизведение (mixer, spatialization) вне crate: слушает `LocomotionSound`.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::DeterministicRng;

/// Audio tuning
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Количество вариантов footstep клипа (0 → шаги молчат)
    pub footstep_clip_count: u32,
    pub volume: f32,
    /// Event с весом клипа <= threshold игнорируется
    pub weight_threshold: f32,
    /// Высота точки звука над ногами (центр капсулы)
    pub emitter_height: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            footstep_clip_count: 10,
            volume: 0.5,
            weight_threshold: 0.5,
            emitter_height: 0.93,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum LocomotionSoundKind {
    Footstep,
    Land,
}

/// Event: animation clip дошёл до звуковой метки (backend → ECS)
#[derive(Event, Debug, Clone, Copy)]
pub struct AnimationEvent {
    pub entity: Entity,
    pub kind: LocomotionSoundKind,
    /// Вес клипа в текущем blend (0..1)
    pub clip_weight: f32,
}

/// Event: сыграть звук в точке (ECS → audio backend)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LocomotionSound {
    pub entity: Entity,
    pub kind: LocomotionSoundKind,
    /// Индекс варианта footstep клипа; для Land всегда 0
    pub clip_index: u32,
    pub position: Vec3,
    pub volume: f32,
}

/// System: AnimationEvent → LocomotionSound
///
/// Footstep клип выбирается через `DeterministicRng` (одинаковый seed →
/// одинаковая последовательность шагов).
pub fn emit_locomotion_sounds(
    mut animation_events: EventReader<AnimationEvent>,
    mut sounds: EventWriter<LocomotionSound>,
    config: Res<AudioConfig>,
    mut rng: ResMut<DeterministicRng>,
    transforms: Query<&Transform>,
) {
    for event in animation_events.read() {
        if event.clip_weight <= config.weight_threshold {
            continue;
        }

        let Ok(transform) = transforms.get(event.entity) else {
            continue;
        };

        let clip_index = match event.kind {
            LocomotionSoundKind::Footstep => {
                if config.footstep_clip_count == 0 {
                    continue;
                }
                rng.rng.gen_range(0..config.footstep_clip_count)
            }
            LocomotionSoundKind::Land => 0,
        };

        sounds.write(LocomotionSound {
            entity: event.entity,
            kind: event.kind,
            clip_index,
            position: transform.translation + Vec3::Y * config.emitter_height,
            volume: config.volume,
        });
    }
}

/// Audio plugin
pub struct AudioPlugin;

impl Plugin for AudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AudioConfig>()
            .init_resource::<DeterministicRng>()
            .add_event::<AnimationEvent>()
            .add_event::<LocomotionSound>()
            .add_systems(Update, emit_locomotion_sounds);
    }
}
