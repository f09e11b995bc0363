//! Action state components: guard, attack, dodge.
//!
//! Guard: level-triggered (зеркало удерживаемой кнопки).
//! Attack / Dodge: edge-triggered: один animation trigger на один input edge.

use bevy::prelude::*;

use crate::animation::{AnimParam, Animator};
use crate::input::PlayerInput;

/// Guard: `active` повторяет `input.guard` каждый тик
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct GuardState {
    pub active: bool,
}

impl GuardState {
    /// Idempotent: повторный вызов с тем же input даёт тот же результат
    pub fn update(&mut self, input: &PlayerInput, animator: Option<&mut Animator>) -> bool {
        self.active = input.guard;

        if let Some(animator) = animator {
            animator.set_bool(AnimParam::Guard, self.active);
        }

        self.active
    }
}

/// Attack: trigger только в combat mode
///
/// Edge потребляется всегда, даже когда gate закрыт: атака, нажатая вне
/// combat mode, не должна выстрелить позже.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AttackState {
    /// Trigger выставлен на этом тике
    pub fired: bool,
}

impl AttackState {
    pub fn update(
        &mut self,
        input: &mut PlayerInput,
        in_combat: bool,
        animator: Option<&mut Animator>,
    ) -> bool {
        let edge = input.take_attack();
        self.fired = fire_trigger(edge && in_combat, AnimParam::Attack, animator);
        self.fired
    }
}

/// Dodge: trigger без gate
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct DodgeState {
    /// Trigger выставлен на этом тике
    pub fired: bool,
}

impl DodgeState {
    pub fn update(&mut self, input: &mut PlayerInput, animator: Option<&mut Animator>) -> bool {
        let edge = input.take_dodge();
        self.fired = fire_trigger(edge, AnimParam::Dodge, animator);
        self.fired
    }
}

fn fire_trigger(fire: bool, trigger: AnimParam, animator: Option<&mut Animator>) -> bool {
    if fire {
        if let Some(animator) = animator {
            animator.set_trigger(trigger);
        }
    }
    fire
}
