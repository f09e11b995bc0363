//! Weapon rig listener

use bevy::prelude::*;

use crate::combat::components::{CombatModeChanged, WeaponRig};

/// System: CombatModeChanged → веса attachment sources меча и щита
pub fn sync_weapon_rig(
    mut mode_events: EventReader<CombatModeChanged>,
    mut rigs: Query<&mut WeaponRig>,
) {
    for event in mode_events.read() {
        let Ok(mut rig) = rigs.get_mut(event.entity) else {
            continue;
        };

        *rig = WeaponRig::for_mode(event.in_combat);
    }
}
