//! Vertical motion integrator: jump windup, grace window, gravity, free-fall.
//!
//! Timeline одного прыжка:
//!
//! ```text
//! jump edge ──► Windup (velocity = 0, без гравитации, jump_delay)
//!           ──► Launch (velocity = sqrt(h * -2 * g))
//!           ──► Grace (ground probe игнорируется, jump_grace_time)
//!           ──► Airborne (gravity, fall timer → FreeFall)
//!           ──► Grounded (ground bias, cooldown jump_timeout)
//! ```
//!
//! Windup и grace не пересекаются: windup начинается только при
//! effective grounded, а effective grounded требует grace_timer <= 0.

use bevy::prelude::*;

use crate::animation::{AnimParam, Animator};
use crate::config::JumpTuning;
use crate::input::PlayerInput;
use crate::logger;

/// Vertical state персонажа (создаётся при спавне, живёт всю сессию)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct VerticalMotion {
    pub tuning: JumpTuning,

    /// Текущая вертикальная скорость (m/s, вверх > 0)
    pub vertical_velocity: f32,
    /// Grace после отрыва: пока > 0, probe "grounded" игнорируется
    pub grace_timer: f32,
    /// Windup в процессе (прыжок принят, импульс ещё не дан)
    pub jump_triggered: bool,
    /// Остаток windup (секунды)
    pub windup_timer: f32,
    /// Cooldown до следующего прыжка (секунды)
    pub jump_timeout_timer: f32,
    /// Остаток времени в воздухе до FreeFall
    pub fall_timeout_timer: f32,
    /// FreeFall уже просигнализирован в этом падении
    pub free_falling: bool,
    /// Результат последнего тика: probe && grace истёк
    pub effective_grounded: bool,
}

impl VerticalMotion {
    pub fn new(tuning: JumpTuning) -> Self {
        Self {
            tuning,
            vertical_velocity: 0.0,
            grace_timer: 0.0,
            jump_triggered: false,
            windup_timer: 0.0,
            jump_timeout_timer: tuning.jump_timeout,
            fall_timeout_timer: tuning.fall_timeout,
            free_falling: false,
            effective_grounded: false,
        }
    }

    /// Один тик вертикальной интеграции.
    ///
    /// Consumes `input.jump` когда прыжок принят (windup стартовал) или когда
    /// персонаж в воздухе (прыжки не буферизуются в полёте). Пока cooldown не
    /// истёк, jump edge на земле остаётся pending.
    ///
    /// Детерминирован: результат зависит только от (self, input.jump,
    /// grounded_probe, dt).
    pub fn advance(
        &mut self,
        input: &mut PlayerInput,
        grounded_probe: bool,
        dt: f32,
        mut animator: Option<&mut Animator>,
    ) -> f32 {
        let tuning = self.tuning;
        let effective_grounded = grounded_probe && self.grace_timer <= 0.0;
        self.effective_grounded = effective_grounded;

        let mut launched = false;

        if effective_grounded {
            self.fall_timeout_timer = tuning.fall_timeout;
            self.free_falling = false;

            if let Some(animator) = animator.as_deref_mut() {
                animator.set_bool(AnimParam::FreeFall, false);
                if !self.jump_triggered {
                    animator.set_bool(AnimParam::Jump, false);
                }
            }

            if !self.jump_triggered {
                // Прижимаем к земле (не парим на 0.0)
                self.vertical_velocity = tuning.ground_bias;
            }

            // take_jump последним: пока cooldown не истёк, edge остаётся pending
            if self.jump_timeout_timer <= 0.0 && !self.jump_triggered && input.take_jump() {
                self.jump_triggered = true;
                self.windup_timer = tuning.jump_delay;

                if let Some(animator) = animator.as_deref_mut() {
                    animator.set_bool(AnimParam::Jump, true);
                }
            }

            if self.jump_triggered {
                self.windup_timer -= dt;
                self.vertical_velocity = 0.0;

                if self.windup_timer <= 0.0 {
                    self.windup_timer = 0.0;
                    self.jump_triggered = false;
                    self.vertical_velocity = tuning.launch_velocity();
                    self.grace_timer = tuning.jump_grace_time;
                    launched = true;

                    logger::log(&format!(
                        "Jump launch: velocity {:.3} m/s (grace {:.3}s)",
                        self.vertical_velocity, self.grace_timer
                    ));
                }
            }

            if self.jump_timeout_timer > 0.0 {
                self.jump_timeout_timer = (self.jump_timeout_timer - dt).max(0.0);
            }
        } else {
            self.jump_timeout_timer = tuning.jump_timeout;

            if !self.free_falling {
                self.fall_timeout_timer -= dt;
                if self.fall_timeout_timer < 0.0 {
                    self.free_falling = true;
                    if let Some(animator) = animator.as_deref_mut() {
                        animator.set_bool(AnimParam::FreeFall, true);
                    }
                    logger::log("Entered free-fall");
                }
            }

            // В воздухе прыжок не ставится в очередь
            input.take_jump();
            self.jump_triggered = false;
            self.windup_timer = 0.0;
        }

        debug_assert!(!(self.jump_triggered && self.grace_timer > 0.0));

        // На тике импульса grace и гравитация не трогаются: launch tick
        // возвращает ровно launch_velocity
        if !launched && self.grace_timer > 0.0 {
            self.grace_timer = (self.grace_timer - dt).max(0.0);
        }

        if !launched && !self.jump_triggered && self.vertical_velocity > tuning.terminal_velocity {
            self.vertical_velocity =
                (self.vertical_velocity + tuning.gravity * dt).max(tuning.terminal_velocity);
        }

        self.vertical_velocity
    }

    pub fn is_winding_up(&self) -> bool {
        self.jump_triggered
    }

    pub fn in_grace_window(&self) -> bool {
        self.grace_timer > 0.0
    }
}

impl Default for VerticalMotion {
    fn default() -> Self {
        Self::new(JumpTuning::default())
    }
}
