//! Weapon rig: веса parent-constraint sources для меча и щита
//!
//! У каждого предмета два attachment point'а:
//! - source 0: рука (RightHand / LeftHand)
//! - source 1: спина (ножны, крепление щита)
//!
//! Рендер-слой (вне crate) читает веса и смешивает позицию предмета.

use bevy::prelude::*;

/// Веса двух attachment sources одного предмета
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct AttachmentWeights {
    /// Source 0
    pub hand: f32,
    /// Source 1
    pub back: f32,
}

impl AttachmentWeights {
    pub const IN_HAND: Self = Self { hand: 1.0, back: 0.0 };
    pub const ON_BACK: Self = Self { hand: 0.0, back: 1.0 };

    /// Вес по индексу source (0 = рука, 1 = спина)
    pub fn source(&self, index: usize) -> Option<f32> {
        match index {
            0 => Some(self.hand),
            1 => Some(self.back),
            _ => None,
        }
    }
}

/// Sword + shield attachment state
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct WeaponRig {
    pub sword: AttachmentWeights,
    pub shield: AttachmentWeights,
}

impl Default for WeaponRig {
    fn default() -> Self {
        Self::sheathed()
    }
}

impl WeaponRig {
    pub fn sheathed() -> Self {
        Self {
            sword: AttachmentWeights::ON_BACK,
            shield: AttachmentWeights::ON_BACK,
        }
    }

    pub fn drawn() -> Self {
        Self {
            sword: AttachmentWeights::IN_HAND,
            shield: AttachmentWeights::IN_HAND,
        }
    }

    pub fn for_mode(in_combat: bool) -> Self {
        if in_combat {
            Self::drawn()
        } else {
            Self::sheathed()
        }
    }
}
