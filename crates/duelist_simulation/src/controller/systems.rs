//! Integrator systems (ECS wiring поверх `movement`)

use bevy::prelude::*;

use super::PlayerCharacter;
use crate::animation::Animator;
use crate::camera::CameraRig;
use crate::input::PlayerInput;
use crate::movement::{HorizontalMotion, VerticalMotion};
use crate::physics::{CharacterMotor, GroundProbe};

/// System: vertical integrator (probe с прошлого тика)
pub fn integrate_vertical(
    mut query: Query<
        (&mut PlayerInput, &mut VerticalMotion, &GroundProbe, Option<&mut Animator>),
        With<PlayerCharacter>,
    >,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut input, mut vertical, probe, mut animator) in query.iter_mut() {
        vertical.advance(&mut input, probe.grounded, delta, animator.as_deref_mut());
    }
}

/// System: horizontal integrator + поворот тела
///
/// Speed easing стартует от РЕАЛЬНОЙ планарной скорости прошлого шага
/// (`CharacterMotor::velocity`), yaw камеры: из `CameraRig` (если есть).
pub fn integrate_horizontal(
    mut query: Query<
        (
            &mut PlayerInput,
            &mut HorizontalMotion,
            &CharacterMotor,
            Option<&CameraRig>,
            &mut Transform,
            Option<&mut Animator>,
        ),
        With<PlayerCharacter>,
    >,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut input, mut horizontal, motor, rig, mut transform, mut animator) in query.iter_mut() {
        let camera_yaw = rig.map_or(0.0, CameraRig::yaw_radians);

        horizontal.advance(
            &mut input,
            motor.planar_speed(),
            camera_yaw,
            delta,
            animator.as_deref_mut(),
        );

        transform.rotation = horizontal.facing_rotation();
    }
}

/// System: displacement этого тика → `CharacterMotor`
pub fn compose_displacement(
    mut query: Query<
        (&HorizontalMotion, &VerticalMotion, &mut CharacterMotor),
        With<PlayerCharacter>,
    >,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (horizontal, vertical, mut motor) in query.iter_mut() {
        motor.displacement = displacement(horizontal, vertical, delta);
    }
}

/// `direction * speed * dt + (0, vertical_velocity * dt, 0)`
pub fn displacement(horizontal: &HorizontalMotion, vertical: &VerticalMotion, dt: f32) -> Vec3 {
    horizontal.move_direction() * (horizontal.speed * dt)
        + Vec3::new(0.0, vertical.vertical_velocity * dt, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_displacement_composition() {
        let horizontal = HorizontalMotion {
            speed: 2.0,
            ..default()
        };
        let vertical = VerticalMotion {
            vertical_velocity: -2.0,
            ..default()
        };

        // target_yaw 0 → вперёд = -Z
        let result = displacement(&horizontal, &vertical, 0.5);
        assert!((result - Vec3::new(0.0, -1.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_zero_dt_no_displacement() {
        let horizontal = HorizontalMotion {
            speed: 5.0,
            ..default()
        };
        let vertical = VerticalMotion {
            vertical_velocity: 6.0,
            ..default()
        };
        assert_eq!(displacement(&horizontal, &vertical, 0.0), Vec3::ZERO);
    }
}
