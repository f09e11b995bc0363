//! Tests for action states and combat mode.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::animation::{AnimParam, Animator};
    use crate::combat::components::{AttackState, CombatMode, DodgeState, GuardState, WeaponRig};
    use crate::input::PlayerInput;

    #[test]
    fn test_guard_mirrors_held_input() {
        let mut guard = GuardState::default();
        let mut animator = Animator::default();
        let mut input = PlayerInput {
            guard: true,
            ..default()
        };

        assert!(guard.update(&input, Some(&mut animator)));
        assert!(animator.bool(AnimParam::Guard));

        input.guard = false;
        assert!(!guard.update(&input, Some(&mut animator)));
        assert!(!animator.bool(AnimParam::Guard));
    }

    #[test]
    fn test_guard_is_idempotent() {
        let mut guard = GuardState::default();
        let mut animator = Animator::default();
        let input = PlayerInput {
            guard: true,
            ..default()
        };

        let first = guard.update(&input, Some(&mut animator));
        let snapshot = animator.clone();
        let second = guard.update(&input, Some(&mut animator));

        assert_eq!(first, second);
        assert_eq!(animator.bool(AnimParam::Guard), snapshot.bool(AnimParam::Guard));
        for param in AnimParam::ALL {
            assert_eq!(animator.fire_count(param), snapshot.fire_count(param));
        }
    }

    #[test]
    fn test_guard_without_animator() {
        let mut guard = GuardState::default();
        let input = PlayerInput {
            guard: true,
            ..default()
        };
        assert!(guard.update(&input, None));
        assert!(guard.active);
    }

    #[test]
    fn test_attack_fires_in_combat_and_consumes_edge() {
        let mut attack = AttackState::default();
        let mut animator = Animator::default();
        let mut input = PlayerInput {
            attack: true,
            ..default()
        };

        assert!(attack.update(&mut input, true, Some(&mut animator)));
        assert!(!input.attack);
        assert!(animator.is_trigger_set(AnimParam::Attack));
        assert_eq!(animator.fire_count(AnimParam::Attack), 1);

        // Нет нового edge: нет повторного trigger
        assert!(!attack.update(&mut input, true, Some(&mut animator)));
        assert_eq!(animator.fire_count(AnimParam::Attack), 1);
    }

    #[test]
    fn test_attack_gated_outside_combat_still_consumes_edge() {
        let mut attack = AttackState::default();
        let mut animator = Animator::default();
        let mut input = PlayerInput {
            attack: true,
            ..default()
        };

        assert!(!attack.update(&mut input, false, Some(&mut animator)));
        assert!(!input.attack);
        assert_eq!(animator.fire_count(AnimParam::Attack), 0);

        // Вошли в combat позже: старое нажатие не стреляет
        assert!(!attack.update(&mut input, true, Some(&mut animator)));
        assert_eq!(animator.fire_count(AnimParam::Attack), 0);
    }

    #[test]
    fn test_dodge_fires_once_per_edge() {
        let mut dodge = DodgeState::default();
        let mut animator = Animator::default();
        let mut input = PlayerInput {
            dodge: true,
            ..default()
        };

        assert!(dodge.update(&mut input, Some(&mut animator)));
        assert!(!input.dodge);
        assert!(!dodge.update(&mut input, Some(&mut animator)));
        assert_eq!(animator.fire_count(AnimParam::Dodge), 1);
    }

    #[test]
    fn test_dodge_without_animator_consumes_edge() {
        let mut dodge = DodgeState::default();
        let mut input = PlayerInput {
            dodge: true,
            ..default()
        };
        assert!(dodge.update(&mut input, None));
        assert!(!input.dodge);
    }

    #[test]
    fn test_enter_combat_clears_pending_attack() {
        let mut mode = CombatMode::default();
        let mut animator = Animator::default();
        // Trigger выставлен ранее и ещё не съеден графом
        animator.set_trigger(AnimParam::Attack);
        let mut input = PlayerInput {
            combat: true,
            attack: true,
            noncombat: true,
            ..default()
        };

        assert_eq!(mode.update(&mut input, Some(&mut animator)), Some(true));

        assert!(mode.active);
        assert!(animator.bool(AnimParam::Combat));
        assert!(!animator.is_trigger_set(AnimParam::Attack));
        assert!(!input.attack);
        assert!(!input.noncombat);
        assert!(!input.combat);
    }

    #[test]
    fn test_exit_combat() {
        let mut mode = CombatMode { active: true };
        let mut animator = Animator::default();
        animator.set_bool(AnimParam::Combat, true);
        let mut input = PlayerInput {
            noncombat: true,
            ..default()
        };

        assert_eq!(mode.update(&mut input, Some(&mut animator)), Some(false));
        assert!(!mode.active);
        assert!(!animator.bool(AnimParam::Combat));
        assert!(!input.noncombat);
    }

    #[test]
    fn test_redundant_edges_do_not_transition() {
        let mut mode = CombatMode { active: true };
        let mut input = PlayerInput {
            combat: true,
            ..default()
        };
        assert_eq!(mode.update(&mut input, None), None);
        assert!(!input.combat);

        let mut mode = CombatMode::default();
        input.noncombat = true;
        assert_eq!(mode.update(&mut input, None), None);
        assert!(!mode.active);
    }

    #[test]
    fn test_weapon_rig_for_mode() {
        let drawn = WeaponRig::for_mode(true);
        assert_eq!(drawn.sword.source(0), Some(1.0));
        assert_eq!(drawn.sword.source(1), Some(0.0));

        let sheathed = WeaponRig::for_mode(false);
        assert_eq!(sheathed, WeaponRig::default());
        assert_eq!(sheathed.shield.source(1), Some(1.0));
        assert_eq!(sheathed.shield.source(2), None);
    }
}
