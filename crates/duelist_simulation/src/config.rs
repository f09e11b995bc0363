//! Per-character tuning: locomotion, jump, ground probe, camera.
//!
//! Конфиг неизменяем после спавна. Все проверки: один раз в `validate()`;
//! интеграторы считают значения валидными и не проверяют их на каждом тике.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::logger;

/// Ошибка конструирования персонажа (невалидный конфиг)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("{field} must be >= 0, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be > 0, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be < 0, got {value}")]
    NotNegative { field: &'static str, value: f32 },

    #[error("{field} must be <= 0, got {value}")]
    Positive { field: &'static str, value: f32 },

    #[error("bottom_clamp ({bottom}) must not exceed top_clamp ({top})")]
    InvertedPitchClamp { bottom: f32, top: f32 },

    #[error("failed to parse RON config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Character tuning (значения по умолчанию = third-person starter rig)
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Walk speed (m/s)
    pub move_speed: f32,
    /// Sprint speed (m/s)
    pub sprint_speed: f32,
    /// Время сглаживания поворота к направлению движения (секунды)
    pub rotation_smooth_time: f32,
    /// Acceleration/deceleration rate (1/s)
    pub speed_change_rate: f32,
    /// Dead-band вокруг target speed, внутри которого скорость snap'ается
    pub speed_offset: f32,
    /// Animation blend ниже этого значения обнуляется
    pub blend_epsilon: f32,

    /// Высота прыжка (метры)
    pub jump_height: f32,
    /// Гравитация (m/s², отрицательная)
    pub gravity: f32,
    /// Cooldown между прыжками после приземления (секунды)
    pub jump_timeout: f32,
    /// Время в воздухе до сигнала FreeFall (секунды)
    pub fall_timeout: f32,
    /// Windup: задержка от нажатия до импульса (8 кадров анимации ≈ 0.133s)
    pub jump_delay: f32,
    /// Grace: сколько игнорируем ground probe после отрыва
    pub jump_grace_time: f32,
    /// Пол вертикальной скорости (самое отрицательное допустимое значение)
    pub terminal_velocity: f32,
    /// Прижимающая скорость на земле (чтобы не парить на нуле)
    pub ground_bias: f32,

    /// Смещение центра probe-сферы от позиции персонажа (для неровной земли)
    pub grounded_offset: f32,
    /// Радиус probe-сферы
    pub grounded_radius: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            sprint_speed: 5.335,
            rotation_smooth_time: 0.12,
            speed_change_rate: 10.0,
            speed_offset: 0.1,
            blend_epsilon: 0.01,

            jump_height: 1.2,
            gravity: -15.0,
            jump_timeout: 0.5,
            fall_timeout: 0.15,
            jump_delay: 0.133,
            jump_grace_time: 0.2,
            terminal_velocity: -53.0,
            ground_bias: -2.0,

            grounded_offset: -0.14,
            grounded_radius: 0.28,
        }
    }
}

impl ControllerConfig {
    /// Parse RON и сразу validate (отсутствующие поля берутся из Default)
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validated()
    }

    /// Consuming вариант `validate()` для builder-цепочек
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let result = self.check_fields();
        if let Err(err) = &result {
            logger::log_error(&format!("ControllerConfig rejected: {}", err));
        }
        result
    }

    fn check_fields(&self) -> Result<(), ConfigError> {
        non_negative("move_speed", self.move_speed)?;
        non_negative("sprint_speed", self.sprint_speed)?;
        non_negative("rotation_smooth_time", self.rotation_smooth_time)?;
        positive("speed_change_rate", self.speed_change_rate)?;
        non_negative("speed_offset", self.speed_offset)?;
        non_negative("blend_epsilon", self.blend_epsilon)?;

        non_negative("jump_height", self.jump_height)?;
        negative("gravity", self.gravity)?;
        non_negative("jump_timeout", self.jump_timeout)?;
        non_negative("fall_timeout", self.fall_timeout)?;
        non_negative("jump_delay", self.jump_delay)?;
        non_negative("jump_grace_time", self.jump_grace_time)?;
        negative("terminal_velocity", self.terminal_velocity)?;
        non_positive("ground_bias", self.ground_bias)?;

        finite("grounded_offset", self.grounded_offset)?;
        positive("grounded_radius", self.grounded_radius)?;
        Ok(())
    }

    /// Параметры вертикального интегратора
    pub fn jump_tuning(&self) -> JumpTuning {
        JumpTuning {
            jump_height: self.jump_height,
            gravity: self.gravity,
            jump_timeout: self.jump_timeout,
            fall_timeout: self.fall_timeout,
            jump_delay: self.jump_delay,
            jump_grace_time: self.jump_grace_time,
            terminal_velocity: self.terminal_velocity,
            ground_bias: self.ground_bias,
        }
    }

    /// Параметры горизонтального интегратора
    pub fn locomotion_tuning(&self) -> LocomotionTuning {
        LocomotionTuning {
            move_speed: self.move_speed,
            sprint_speed: self.sprint_speed,
            rotation_smooth_time: self.rotation_smooth_time,
            speed_change_rate: self.speed_change_rate,
            speed_offset: self.speed_offset,
            blend_epsilon: self.blend_epsilon,
        }
    }
}

/// Jump/gravity constants, копия в `VerticalMotion`
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct JumpTuning {
    pub jump_height: f32,
    pub gravity: f32,
    pub jump_timeout: f32,
    pub fall_timeout: f32,
    pub jump_delay: f32,
    pub jump_grace_time: f32,
    pub terminal_velocity: f32,
    pub ground_bias: f32,
}

impl JumpTuning {
    /// Начальная скорость, при которой пик траектории = jump_height
    pub fn launch_velocity(&self) -> f32 {
        (self.jump_height * -2.0 * self.gravity).sqrt()
    }
}

impl Default for JumpTuning {
    fn default() -> Self {
        ControllerConfig::default().jump_tuning()
    }
}

/// Speed/rotation constants, копия в `HorizontalMotion`
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct LocomotionTuning {
    pub move_speed: f32,
    pub sprint_speed: f32,
    pub rotation_smooth_time: f32,
    pub speed_change_rate: f32,
    pub speed_offset: f32,
    pub blend_epsilon: f32,
}

impl Default for LocomotionTuning {
    fn default() -> Self {
        ControllerConfig::default().locomotion_tuning()
    }
}

/// Camera rig tuning (углы в градусах)
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Максимальный pitch вверх
    pub top_clamp: f32,
    /// Максимальный pitch вниз
    pub bottom_clamp: f32,
    /// Дополнительный pitch (для тонкой подстройки в locked режиме)
    pub angle_override: f32,
    /// Заморозить камеру по всем осям
    pub locked: bool,
    /// Look input с sqr-длиной ниже порога игнорируется
    pub look_threshold: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            top_clamp: 70.0,
            bottom_clamp: -30.0,
            angle_override: 0.0,
            locked: false,
            look_threshold: 0.01,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("top_clamp", self.top_clamp)?;
        finite("bottom_clamp", self.bottom_clamp)?;
        finite("angle_override", self.angle_override)?;
        non_negative("look_threshold", self.look_threshold)?;
        if self.bottom_clamp > self.top_clamp {
            return Err(ConfigError::InvertedPitchClamp {
                bottom: self.bottom_clamp,
                top: self.top_clamp,
            });
        }
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(ConfigError::NotPositive { field, value });
    }
    Ok(())
}

fn negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        return Err(ConfigError::NotNegative { field, value });
    }
    Ok(())
}

fn non_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        return Err(ConfigError::Positive { field, value });
    }
    Ok(())
}
