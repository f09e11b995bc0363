//! Combat layer контроллера: action states + combat mode
//!
//! ECS ответственность:
//! - Guard / Attack / Dodge → animation params и triggers
//! - Combat mode toggle → `CombatModeChanged` broadcast
//! - WeaponRig listener (меч и щит: рука ↔ спина)
//!
//! Hit detection, damage и stamina здесь нет: controller только выставляет
//! triggers, остальное делает animation graph.

use bevy::prelude::*;

pub mod components;
pub mod systems;

// Re-export основных типов
pub use components::{
    AttachmentWeights, AttackState, CombatMode, CombatModeChanged, DodgeState, GuardState,
    WeaponRig,
};
pub use systems::{sync_weapon_rig, update_action_states, update_combat_mode};

use crate::controller::ControllerSet;

/// Combat Plugin
///
/// Порядок выполнения (FixedUpdate, внутри цепочки `ControllerSet`):
/// 1. update_action_states: guard, attack (gate = CombatMode), dodge
/// 2. update_combat_mode: edges → CombatModeChanged
/// 3. sync_weapon_rig: listener, тот же тик
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CombatModeChanged>();

        app.add_systems(
            FixedUpdate,
            (
                update_action_states.in_set(ControllerSet::Actions),
                (update_combat_mode, sync_weapon_rig)
                    .chain()
                    .in_set(ControllerSet::CombatMode),
            ),
        );
    }
}
