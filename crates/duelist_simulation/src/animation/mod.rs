//! Animation domain: sink для параметров анимации
//!
//! Содержит:
//! - AnimParam (compile-time таблица параметров вместо string hash)
//! - Animator (component: значения параметров + triggers + exit hooks)
//! - AnimStateExited (event от animation backend'а → сброс triggers)
//!
//! Controller только ПИШЕТ параметры. Граф анимации, blend trees и clips
//! живут в backend'е.

use bevy::prelude::*;

pub mod params;

pub use params::{AnimParam, AnimState, Animator, ParamKind, StateExitHook};

/// Event: animation graph покинул state (backend → ECS)
#[derive(Event, Debug, Clone, Copy)]
pub struct AnimStateExited {
    pub entity: Entity,
    pub state: AnimState,
}

/// System: применить exit hooks для всех вышедших states
pub fn apply_state_exit_hooks(
    mut exits: EventReader<AnimStateExited>,
    mut animators: Query<&mut Animator>,
) {
    for exit in exits.read() {
        if let Ok(mut animator) = animators.get_mut(exit.entity) {
            animator.on_state_exit(exit.state);
        }
    }
}

/// Animator Plugin: state-exit events от backend'а
pub struct AnimatorPlugin;

impl Plugin for AnimatorPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnimStateExited>()
            .add_systems(Update, apply_state_exit_hooks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_event_resets_trigger() {
        let mut app = App::new();
        app.add_plugins(AnimatorPlugin);

        let mut animator = Animator::default();
        animator.set_trigger(AnimParam::Attack);
        animator.set_trigger(AnimParam::Dodge);
        let entity = app.world_mut().spawn(animator).id();

        app.world_mut().send_event(AnimStateExited {
            entity,
            state: AnimState::Attack,
        });
        app.update();

        let animator = app.world().get::<Animator>(entity).unwrap();
        assert!(!animator.is_trigger_set(AnimParam::Attack));
        assert!(animator.is_trigger_set(AnimParam::Dodge));
    }
}
