//! Spawn helper: полный набор компонентов персонажа

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::PlayerCharacter;
use crate::animation::Animator;
use crate::camera::CameraRig;
use crate::combat::{AttackState, CombatMode, DodgeState, GuardState, WeaponRig};
use crate::config::{CameraConfig, ConfigError, ControllerConfig};
use crate::input::PlayerInput;
use crate::logger;
use crate::movement::{HorizontalMotion, VerticalMotion};
use crate::physics::{actor_groups, CharacterMotor, GroundProbe, PhysicsBackend};

/// Capsule персонажа (высота 1.8m)
const CAPSULE_RADIUS: f32 = 0.28;
const CAPSULE_HALF_HEIGHT: f32 = 0.62;

/// Создать player character.
///
/// Config валидируется ДО спавна: невалидный config → `Err`, entity не
/// создаётся.
///
/// Состав entity:
/// - Transform + PlayerCharacter + PlayerInput
/// - VerticalMotion / HorizontalMotion (tuning из config)
/// - GroundProbe + CharacterMotor
/// - Animator, action states, CombatMode, WeaponRig
/// - CameraRig + CameraConfig
/// - Rapier backend: RigidBody + Collider (capsule) + KinematicCharacterController.
///   Transform тогда = центр капсулы, а не подошва.
pub fn spawn_player_character(
    commands: &mut Commands,
    position: Vec3,
    config: ControllerConfig,
    camera: CameraConfig,
    backend: PhysicsBackend,
) -> Result<Entity, ConfigError> {
    let config = config.validated()?;
    camera.validate()?;

    let mut entity = commands.spawn((
        (
            PlayerCharacter,
            Transform::from_translation(position),
            PlayerInput::default(),
            VerticalMotion::new(config.jump_tuning()),
            HorizontalMotion::new(config.locomotion_tuning()),
            GroundProbe::default(),
            CharacterMotor::default(),
            config,
        ),
        (
            Animator::default(),
            GuardState::default(),
            AttackState::default(),
            DodgeState::default(),
            CombatMode::default(),
            WeaponRig::default(),
            CameraRig::default(),
            camera,
        ),
    ));

    if backend == PhysicsBackend::Rapier {
        entity.insert((
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(CAPSULE_HALF_HEIGHT, CAPSULE_RADIUS),
            KinematicCharacterController::default(),
            actor_groups(),
        ));
    }

    let id = entity.id();
    logger::log_info(&format!(
        "Spawned player character {:?} at {:?} ({:?})",
        id, position, backend
    ));

    Ok(id)
}
