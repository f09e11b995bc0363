//! Combat mode component and its broadcast event.

use bevy::prelude::*;

use crate::animation::{AnimParam, Animator};
use crate::input::PlayerInput;

/// Combat / non-combat режим персонажа
///
/// В combat mode разрешены атаки, оружие в руках (см. `WeaponRig`).
/// `Animator` Combat bool: зеркало `active`, источник истины здесь.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct CombatMode {
    pub active: bool,
}

impl CombatMode {
    /// Обработать combat/noncombat edges.
    ///
    /// Оба edge потребляются при наблюдении. Вход в combat сбрасывает
    /// pending attack (input edge + animation trigger) и noncombat edge
    /// этого же тика.
    ///
    /// Возвращает `Some(new_mode)` если режим сменился.
    pub fn update(
        &mut self,
        input: &mut PlayerInput,
        mut animator: Option<&mut Animator>,
    ) -> Option<bool> {
        let mut transition = None;

        if std::mem::take(&mut input.combat) && !self.active {
            self.active = true;
            input.attack = false;
            input.noncombat = false;

            if let Some(animator) = animator.as_deref_mut() {
                animator.set_bool(AnimParam::Combat, true);
                animator.reset_trigger(AnimParam::Attack);
            }
            transition = Some(true);
        }

        if std::mem::take(&mut input.noncombat) && self.active {
            self.active = false;
            input.combat = false;

            if let Some(animator) = animator.as_deref_mut() {
                animator.set_bool(AnimParam::Combat, false);
            }
            transition = Some(false);
        }

        transition
    }
}

/// Event: режим сменился (fire-and-forget, один на переход)
///
/// Listeners: `WeaponRig` (оружие рука ↔ спина), UI, audio.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatModeChanged {
    pub entity: Entity,
    pub in_combat: bool,
}

impl CombatModeChanged {
    /// 1 = combat, 0 = non-combat
    pub fn signal(&self) -> u8 {
        self.in_combat as u8
    }
}
