//! Combat mode controller system

use bevy::prelude::*;

use crate::animation::Animator;
use crate::combat::components::{CombatMode, CombatModeChanged};
use crate::input::PlayerInput;
use crate::logger;

/// System: обработать combat/noncombat edges и разослать `CombatModeChanged`
///
/// Один event на переход; повторные edges в том же режиме: no-op.
pub fn update_combat_mode(
    mut query: Query<(Entity, &mut PlayerInput, &mut CombatMode, Option<&mut Animator>)>,
    mut mode_events: EventWriter<CombatModeChanged>,
) {
    for (entity, mut input, mut mode, mut animator) in query.iter_mut() {
        let Some(in_combat) = mode.update(&mut input, animator.as_deref_mut()) else {
            continue;
        };

        logger::log_info(&format!(
            "{:?} combat mode → {}",
            entity,
            if in_combat { "combat" } else { "non-combat" }
        ));

        mode_events.write(CombatModeChanged { entity, in_combat });
    }
}
