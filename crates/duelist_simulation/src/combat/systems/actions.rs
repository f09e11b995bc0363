//! Action updaters system (guard, attack, dodge)

use bevy::prelude::*;

use crate::animation::Animator;
use crate::combat::components::{AttackState, CombatMode, DodgeState, GuardState};
use crate::input::PlayerInput;

/// System: guard → attack → dodge для каждого персонажа
///
/// Attack gate читает `CombatMode` на момент этого тика (mode controller
/// бежит ПОСЛЕ actions: переход применяется со следующего тика).
pub fn update_action_states(
    mut query: Query<(
        &mut PlayerInput,
        &mut GuardState,
        &mut AttackState,
        &mut DodgeState,
        Option<&CombatMode>,
        Option<&mut Animator>,
    )>,
) {
    for (mut input, mut guard, mut attack, mut dodge, mode, mut animator) in query.iter_mut() {
        let in_combat = mode.is_some_and(|mode| mode.active);

        guard.update(&input, animator.as_deref_mut());
        attack.update(&mut input, in_combat, animator.as_deref_mut());
        dodge.update(&mut input, animator.as_deref_mut());
    }
}
