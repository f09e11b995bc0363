//! Player input state
//!
//! ```text
//! Device layer (keyboard/gamepad, вне crate)
//!     ↓ пишет раз в тик, ДО controller systems
//! PlayerInput (component)
//!     ↓ читают/очищают
//! VerticalMotion (jump) → HorizontalMotion (sprint, move) → actions → CombatMode
//! ```
//!
//! Edge-флаги (jump, sprint, attack, dodge, combat, noncombat) очищает ТОЛЬКО
//! тот handler, который на них среагировал. Level-флаги (guard, move, look)
//! device layer перезаписывает каждый тик.

use bevy::prelude::*;

/// Flat input record для одного персонажа
///
/// # Coordinate System
/// - `move_axis.x`: -1.0 (left) → +1.0 (right)
/// - `move_axis.y`: -1.0 (backward) → +1.0 (forward)
/// - `look.x`: yaw delta (градусы), `look.y`: pitch delta (градусы)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerInput {
    pub move_axis: Vec2,
    pub look: Vec2,

    /// Edge: начать прыжок
    pub jump: bool,
    /// Edge: переключить sprint toggle
    pub sprint: bool,
    /// Level: guard удерживается
    pub guard: bool,
    /// Edge: атака
    pub attack: bool,
    /// Edge: уклонение
    pub dodge: bool,
    /// Edge: войти в combat mode
    pub combat: bool,
    /// Edge: выйти из combat mode
    pub noncombat: bool,

    /// Analog stick: использовать длину move_axis как input magnitude
    pub analog_movement: bool,
    /// Look input пришёл с мыши (не масштабируется на dt)
    pub look_from_mouse: bool,
}

impl PlayerInput {
    pub fn has_move(&self) -> bool {
        self.move_axis != Vec2::ZERO
    }

    /// Input magnitude для speed smoothing (digital input всегда 1.0)
    pub fn move_magnitude(&self) -> f32 {
        if self.analog_movement {
            self.move_axis.length()
        } else {
            1.0
        }
    }

    /// Consume jump edge (true если edge был выставлен)
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump)
    }

    pub fn take_sprint(&mut self) -> bool {
        std::mem::take(&mut self.sprint)
    }

    pub fn take_attack(&mut self) -> bool {
        std::mem::take(&mut self.attack)
    }

    pub fn take_dodge(&mut self) -> bool {
        std::mem::take(&mut self.dodge)
    }
}
