//! Physics collaborators контроллера
//!
//! - ground probe (headless плоскость / rapier output)
//! - character motor (displacement → тело, реальная скорость обратно)
//!
//! Controller не знает, какой backend активен: он пишет
//! `CharacterMotor::displacement` и читает `GroundProbe` + `CharacterMotor::velocity`.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

pub mod ground;
pub mod motor;

// Re-export основных типов
pub use ground::{
    probe_ground_plane, probe_rapier_output, sphere_touches_plane, GroundPlane, GroundProbe,
};
pub use motor::{
    actor_groups, apply_motor_headless, apply_motor_rapier, sample_rapier_velocity, CharacterMotor,
    PhysicsBackend,
};

use crate::controller::ControllerSet;

/// Physics plugin (оба backend'а; каждый матчит только свои entities)
///
/// Rapier backend дополнительно требует `RapierPhysicsPlugin` в fixed
/// schedule: см. `PhysicsPlugin::with_rapier`.
#[derive(Default)]
pub struct PhysicsPlugin {
    pub with_rapier: bool,
}

impl PhysicsPlugin {
    pub fn with_rapier() -> Self {
        Self { with_rapier: true }
    }
}

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GroundPlane>();

        app.add_systems(
            FixedUpdate,
            (
                (probe_ground_plane, probe_rapier_output, sample_rapier_velocity)
                    .in_set(ControllerSet::GroundProbe),
                (apply_motor_headless, apply_motor_rapier).in_set(ControllerSet::Motor),
            ),
        );

        if self.with_rapier {
            app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule());
        }
    }
}
