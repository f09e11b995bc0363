//! Horizontal motion integrator: speed easing, sprint toggle, facing rotation.

use bevy::prelude::*;

use super::smoothing::{lerp_clamped, round_to_millis, smooth_damp_angle, wrap_angle};
use crate::animation::{AnimParam, Animator};
use crate::config::LocomotionTuning;
use crate::input::PlayerInput;

/// Planar locomotion state персонажа
///
/// Yaw в радианах, convention Bevy: yaw 0 = смотрим в -Z, положительный
/// yaw поворачивает против часовой стрелки (вид сверху).
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HorizontalMotion {
    pub tuning: LocomotionTuning,

    /// Планарная скорость этого тика (m/s)
    pub speed: f32,
    /// Значение для blend tree (Speed)
    pub animation_blend: f32,
    /// Куда хотим смотреть (input + camera yaw)
    pub target_yaw: f32,
    /// Состояние critically damped поворота
    pub rotation_velocity: f32,
    /// Текущий facing yaw (пишется в Transform.rotation)
    pub facing_yaw: f32,
    /// Sprint toggle (переключается edge'ем)
    pub sprinting: bool,
}

impl HorizontalMotion {
    pub fn new(tuning: LocomotionTuning) -> Self {
        Self {
            tuning,
            speed: 0.0,
            animation_blend: 0.0,
            target_yaw: 0.0,
            rotation_velocity: 0.0,
            facing_yaw: 0.0,
            sprinting: false,
        }
    }

    /// Один тик горизонтальной интеграции.
    ///
    /// - `current_speed`: планарная скорость, которую физика реально дала на
    ///   прошлом тике (а не наша `speed`): упёрлись в стену = разгон заново
    /// - `camera_yaw`: yaw камеры (радианы)
    ///
    /// Возвращает единичное направление движения; величина: в `self.speed`.
    pub fn advance(
        &mut self,
        input: &mut PlayerInput,
        current_speed: f32,
        camera_yaw: f32,
        dt: f32,
        animator: Option<&mut Animator>,
    ) -> Vec3 {
        let tuning = self.tuning;

        if input.take_sprint() {
            self.sprinting = !self.sprinting;
        }

        let has_move = input.has_move();
        let target_speed = match (has_move, self.sprinting) {
            (false, _) => 0.0,
            (true, true) => tuning.sprint_speed,
            (true, false) => tuning.move_speed,
        };
        let input_magnitude = input.move_magnitude();
        let rate = dt * tuning.speed_change_rate;

        let outside_band = current_speed < target_speed - tuning.speed_offset
            || current_speed > target_speed + tuning.speed_offset;
        self.speed = if outside_band {
            round_to_millis(lerp_clamped(current_speed, target_speed * input_magnitude, rate))
        } else {
            target_speed
        };

        self.animation_blend = lerp_clamped(self.animation_blend, target_speed, rate);
        if self.animation_blend < tuning.blend_epsilon {
            self.animation_blend = 0.0;
        }

        if has_move {
            // Input (x вправо, y вперёд) → heading относительно камеры
            let heading = (-input.move_axis.x).atan2(input.move_axis.y);
            self.target_yaw = wrap_angle(heading + camera_yaw);
            self.facing_yaw = smooth_damp_angle(
                self.facing_yaw,
                self.target_yaw,
                &mut self.rotation_velocity,
                tuning.rotation_smooth_time,
                dt,
            );
        }

        if let Some(animator) = animator {
            animator.set_float(AnimParam::Speed, self.animation_blend);
            animator.set_float(AnimParam::MotionSpeed, input_magnitude);
        }

        self.move_direction()
    }

    /// Направление движения (единичный вектор в XZ) по последнему target yaw
    pub fn move_direction(&self) -> Vec3 {
        Quat::from_rotation_y(self.target_yaw) * Vec3::NEG_Z
    }

    pub fn facing_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.facing_yaw)
    }
}

impl Default for HorizontalMotion {
    fn default() -> Self {
        Self::new(LocomotionTuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const DT: f32 = 1.0 / 60.0;

    fn forward() -> PlayerInput {
        PlayerInput {
            move_axis: Vec2::Y,
            ..default()
        }
    }

    #[test]
    fn test_dead_band_snaps_to_target() {
        let mut motion = HorizontalMotion::default();
        let mut input = forward();

        // move_speed 2.0, текущая 1.95: внутри ±0.1
        motion.advance(&mut input, 1.95, 0.0, DT, None);
        assert_eq!(motion.speed, 2.0);

        motion.advance(&mut input, 2.09, 0.0, DT, None);
        assert_eq!(motion.speed, 2.0);
    }

    #[test]
    fn test_outside_band_eases_and_rounds() {
        let mut motion = HorizontalMotion::default();
        let mut input = forward();

        motion.advance(&mut input, 0.0, 0.0, DT, None);

        // lerp(0, 2, 10/60) = 0.3333.. → 0.333
        assert_eq!(motion.speed, 0.333);
    }

    #[test]
    fn test_no_input_decelerates_to_zero() {
        let mut motion = HorizontalMotion::default();
        let mut input = PlayerInput::default();

        motion.advance(&mut input, 2.0, 0.0, DT, None);
        assert!(motion.speed < 2.0 && motion.speed > 0.0);

        motion.advance(&mut input, 0.05, 0.0, DT, None);
        assert_eq!(motion.speed, 0.0);
    }

    #[test]
    fn test_sprint_toggle_consumes_edge() {
        let mut motion = HorizontalMotion::default();
        let mut input = PlayerInput {
            sprint: true,
            ..forward()
        };

        motion.advance(&mut input, 5.3, 0.0, DT, None);
        assert!(motion.sprinting);
        assert!(!input.sprint);
        assert_eq!(motion.speed, motion.tuning.sprint_speed);

        // Без нового edge toggle держится
        motion.advance(&mut input, 5.3, 0.0, DT, None);
        assert!(motion.sprinting);

        input.sprint = true;
        motion.advance(&mut input, 5.3, 0.0, DT, None);
        assert!(!motion.sprinting);
    }

    #[test]
    fn test_analog_magnitude_scales_eased_speed() {
        let mut motion = HorizontalMotion::default();
        let mut input = PlayerInput {
            move_axis: Vec2::new(0.0, 0.5),
            analog_movement: true,
            ..default()
        };
        let mut animator = Animator::default();

        motion.advance(&mut input, 0.0, 0.0, 1.0, Some(&mut animator));

        // rate = 10 → t clamp 1.0 → target 2.0 * 0.5
        assert_eq!(motion.speed, 1.0);
        assert_eq!(animator.float(AnimParam::MotionSpeed), 0.5);
        assert_eq!(animator.float(AnimParam::Speed), 2.0);
    }

    #[test]
    fn test_animation_blend_snaps_below_epsilon() {
        let mut motion = HorizontalMotion::default();
        motion.animation_blend = 0.011;
        let mut input = PlayerInput::default();

        motion.advance(&mut input, 0.0, 0.0, DT, None);
        assert_eq!(motion.animation_blend, 0.0);
    }

    #[test]
    fn test_direction_relative_to_camera() {
        let mut motion = HorizontalMotion::default();
        let mut input = forward();

        let direction = motion.advance(&mut input, 0.0, 0.0, DT, None);
        assert!((direction - Vec3::NEG_Z).length() < 1e-5);

        // Камера повёрнута на +90° (смотрит в -X): "вперёд" = -X
        let direction = motion.advance(&mut input, 0.0, FRAC_PI_2, DT, None);
        assert!((direction - Vec3::NEG_X).length() < 1e-5);

        // Вправо при камере 0 → +X
        input.move_axis = Vec2::X;
        let direction = motion.advance(&mut input, 0.0, 0.0, DT, None);
        assert!((direction - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_rotation_freezes_without_input() {
        let mut motion = HorizontalMotion::default();
        let mut input = PlayerInput {
            move_axis: Vec2::X,
            ..default()
        };

        for _ in 0..5 {
            motion.advance(&mut input, 0.0, 0.0, DT, None);
        }
        let facing = motion.facing_yaw;
        assert!(facing < 0.0, "turning right = negative yaw, got {}", facing);

        input.move_axis = Vec2::ZERO;
        let direction = motion.advance(&mut input, 0.0, 1.0, DT, None);

        assert_eq!(motion.facing_yaw, facing);
        // Направление = последний target yaw, камера без input не влияет
        assert!((direction - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_facing_converges_to_target() {
        let mut motion = HorizontalMotion::default();
        let mut input = PlayerInput {
            move_axis: Vec2::new(-1.0, 0.0),
            ..default()
        };

        for _ in 0..120 {
            motion.advance(&mut input, 0.0, 0.0, DT, None);
        }

        assert!((motion.facing_yaw - FRAC_PI_2).abs() < 1e-3);
        let facing_forward = motion.facing_rotation() * Vec3::NEG_Z;
        assert!((facing_forward - Vec3::NEG_X).length() < 1e-3);
    }
}
