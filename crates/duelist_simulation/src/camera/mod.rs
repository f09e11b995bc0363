//! Camera rig: yaw/pitch follow-target для third-person камеры
//!
//! Rig только считает углы. Сама камера (проекция, рендер, collision
//! avoidance) живёт вне crate и читает `CameraRig::rotation()`.
//!
//! # Углы
//! - Градусы, как в look input
//! - `look.x > 0` → поворот вправо, `look.y > 0` → pitch вниз
//! - Yaw не ограничен (только wrap ±360), pitch зажат в [bottom, top]

use bevy::prelude::*;

use crate::config::CameraConfig;
use crate::input::PlayerInput;

/// Накопленные углы камеры (градусы)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CameraRig {
    pub yaw: f32,
    pub pitch: f32,
}

impl CameraRig {
    /// Применить look input одного кадра.
    ///
    /// Mouse delta уже "за кадр" и на dt не умножается; stick: скорость,
    /// умножается.
    pub fn apply_look(&mut self, look: Vec2, from_mouse: bool, config: &CameraConfig, dt: f32) {
        if look.length_squared() >= config.look_threshold && !config.locked {
            let multiplier = if from_mouse { 1.0 } else { dt };
            self.yaw += look.x * multiplier;
            self.pitch += look.y * multiplier;
        }

        self.yaw = clamp_angle(self.yaw, f32::MIN, f32::MAX);
        self.pitch = clamp_angle(self.pitch, config.bottom_clamp, config.top_clamp);
    }

    /// Yaw в конвенции movement (радианы, против часовой вокруг +Y)
    pub fn yaw_radians(&self) -> f32 {
        -self.yaw.to_radians()
    }

    /// Ориентация follow-target'а (pitch + override, yaw)
    pub fn rotation(&self, config: &CameraConfig) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw_radians(),
            -(self.pitch + config.angle_override).to_radians(),
            0.0,
        )
    }
}

/// Один wrap на ±360, затем clamp
pub fn clamp_angle(mut angle: f32, min: f32, max: f32) -> f32 {
    if angle < -360.0 {
        angle += 360.0;
    }
    if angle > 360.0 {
        angle -= 360.0;
    }
    angle.clamp(min, max)
}

/// System: look input → CameraRig (late update, после движения)
pub fn update_camera_rig(
    mut query: Query<(&PlayerInput, &CameraConfig, &mut CameraRig)>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (input, config, mut rig) in query.iter_mut() {
        rig.apply_look(input.look, input.look_from_mouse, config, delta);
    }
}

/// Camera plugin (PostUpdate: камера догоняет персонажа)
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PostUpdate, update_camera_rig);
    }
}
