//! Character frame update: порядок систем контроллера за один fixed tick
//!
//! ```text
//! FixedUpdate (ControllerSet, chain):
//!   Vertical    : jump/gravity integrator
//!   GroundProbe : сырой probe + реальная скорость прошлого шага
//!   Horizontal  : speed easing, sprint, facing
//!   Displacement: direction * speed * dt + vertical * dt
//!   Motor       : displacement → тело (headless / rapier)
//!   Actions     : guard, attack, dodge
//!   CombatMode  : combat toggle → CombatModeChanged → WeaponRig
//! PostUpdate:
//!   camera rig (late update)
//! ```
//!
//! Порядок фиксирован: edge-флаги input'а потребляет первый handler в цепочке.

use bevy::prelude::*;

pub mod spawn;
pub mod systems;

pub use spawn::spawn_player_character;
pub use systems::{compose_displacement, integrate_horizontal, integrate_vertical};

/// Фазы controller tick'а (выполняются строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerSet {
    Vertical,
    GroundProbe,
    Horizontal,
    Displacement,
    Motor,
    Actions,
    CombatMode,
}

/// Marker: персонаж под управлением игрока
///
/// Controller systems фильтруют по нему (`With<PlayerCharacter>`).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PlayerCharacter;

/// Controller Plugin: порядок фаз + integrator systems
pub struct ControllerPlugin;

impl Plugin for ControllerPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (
                ControllerSet::Vertical,
                ControllerSet::GroundProbe,
                ControllerSet::Horizontal,
                ControllerSet::Displacement,
                ControllerSet::Motor,
                ControllerSet::Actions,
                ControllerSet::CombatMode,
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                integrate_vertical.in_set(ControllerSet::Vertical),
                integrate_horizontal.in_set(ControllerSet::Horizontal),
                compose_displacement.in_set(ControllerSet::Displacement),
            ),
        );
    }
}
