//! Duelist Simulation Core
//!
//! Player character controller для third-person action игры на Bevy 0.16 ECS:
//! input → locomotion (jump/gravity + horizontal easing) → animation params,
//! плюс guard/attack/dodge и combat mode toggle.
//!
//! Рендер, animation graph и audio mixer вне crate: они читают `Animator`,
//! `CameraRig`, `WeaponRig` и события (`CombatModeChanged`, `LocomotionSound`).

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod animation;
pub mod audio;
pub mod camera;
pub mod combat;
pub mod config;
pub mod controller;
pub mod input;
pub mod logger;
pub mod movement;
pub mod physics;
pub mod session;

// Re-export основных типов для удобства
pub use animation::{AnimParam, AnimState, AnimStateExited, Animator, AnimatorPlugin};
pub use audio::{AnimationEvent, AudioConfig, AudioPlugin, LocomotionSound, LocomotionSoundKind};
pub use camera::{CameraPlugin, CameraRig};
pub use combat::{
    AttackState, CombatMode, CombatModeChanged, CombatPlugin, DodgeState, GuardState, WeaponRig,
};
pub use config::{CameraConfig, ConfigError, ControllerConfig};
pub use controller::{spawn_player_character, ControllerPlugin, ControllerSet, PlayerCharacter};
pub use input::PlayerInput;
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use movement::{HorizontalMotion, VerticalMotion};
pub use physics::{CharacterMotor, GroundPlane, GroundProbe, PhysicsBackend, PhysicsPlugin};
pub use session::{InputScript, InputScriptPlugin, ScriptAction};

/// Simulation tick rate (Hz)
pub const TICK_HZ: f64 = 60.0;

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// `physics` выбирает backend: `Headless` (по умолчанию, плоский пол) или
/// `Rapier` (добавляет `RapierPhysicsPlugin` в fixed schedule).
#[derive(Default)]
pub struct SimulationPlugin {
    pub physics: PhysicsBackend,
}

impl SimulationPlugin {
    pub fn rapier() -> Self {
        Self {
            physics: PhysicsBackend::Rapier,
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для controller tick
            .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            // Детерминистичный RNG (seed по умолчанию, если app не задал свой)
            .init_resource::<DeterministicRng>()
            .add_plugins((
                AnimatorPlugin,
                ControllerPlugin,
                PhysicsPlugin {
                    with_rapier: self.physics == PhysicsBackend::Rapier,
                },
                CombatPlugin,
                CameraPlugin,
                AudioPlugin,
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub const DEFAULT_SEED: u64 = 42;

    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время шагает вручную: каждый `app.update()` = ровно один fixed tick.
/// Первый update только инициализирует часы (delta = 0, fixed tick не идёт).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / TICK_HZ,
        )));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
