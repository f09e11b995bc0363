//! Character motor: применение displacement'а к телу
//!
//! Controller считает displacement за тик, motor двигает тело и сохраняет
//! скорость, которую физика РЕАЛЬНО дала (для speed smoothing на следующем
//! тике).
//!
//! Backends:
//! - Headless: `Transform += displacement`, пол = `GroundPlane`
//! - Rapier: `KinematicCharacterController::translation`, коллизии и
//!   grounded считает rapier

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::GroundPlane;

/// Displacement этого тика + последняя реальная скорость тела
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CharacterMotor {
    /// Запрошенное смещение (метры за тик)
    pub displacement: Vec3,
    /// Скорость после коллизий (m/s)
    pub velocity: Vec3,
}

impl CharacterMotor {
    /// Планарная скорость (XZ): вход для horizontal integrator
    pub fn planar_speed(&self) -> f32 {
        Vec2::new(self.velocity.x, self.velocity.z).length()
    }
}

/// Backend применения движения
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub enum PhysicsBackend {
    /// Transform напрямую + плоский пол
    #[default]
    Headless,
    /// bevy_rapier3d kinematic character controller
    Rapier,
}

/// Collision groups для персонажей (коллайдят со всем)
pub fn actor_groups() -> CollisionGroups {
    CollisionGroups::new(Group::GROUP_1, Group::ALL)
}

/// System: headless интеграция displacement → Transform
pub fn apply_motor_headless(
    plane: Res<GroundPlane>,
    mut query: Query<(&mut CharacterMotor, &mut Transform), Without<KinematicCharacterController>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut motor, mut transform) in query.iter_mut() {
        let before = transform.translation;
        let mut after = before + motor.displacement;

        // Пол не проходим насквозь (ground bias тянет вниз каждый тик)
        if after.y < plane.height {
            after.y = plane.height;
        }

        transform.translation = after;

        if delta > 0.0 {
            motor.velocity = (after - before) / delta;
        }
    }
}

/// System: передать displacement rapier character controller'у
pub fn apply_motor_rapier(mut query: Query<(&CharacterMotor, &mut KinematicCharacterController)>) {
    for (motor, mut controller) in query.iter_mut() {
        controller.translation = Some(motor.displacement);
    }
}

/// System: реальная скорость из output прошлого rapier шага
pub fn sample_rapier_velocity(
    mut query: Query<(&KinematicCharacterControllerOutput, &mut CharacterMotor)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    if delta <= 0.0 {
        return;
    }

    for (output, mut motor) in query.iter_mut() {
        motor.velocity = output.effective_translation / delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_planar_speed_ignores_vertical() {
        let motor = CharacterMotor {
            displacement: Vec3::ZERO,
            velocity: Vec3::new(3.0, -10.0, 4.0),
        };
        assert!((motor.planar_speed() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_headless_motor_stops_at_plane() {
        let mut app = App::new();
        app.insert_resource(GroundPlane::default())
            .init_resource::<Time<Fixed>>()
            .add_systems(Update, apply_motor_headless);

        app.world_mut()
            .resource_mut::<Time<Fixed>>()
            .advance_by(Duration::from_millis(100));

        let entity = app
            .world_mut()
            .spawn((
                Transform::from_xyz(0.0, 0.05, 0.0),
                CharacterMotor {
                    displacement: Vec3::new(0.2, -0.2, 0.0),
                    velocity: Vec3::ZERO,
                },
            ))
            .id();

        app.update();

        let world = app.world();
        let transform = world.get::<Transform>(entity).unwrap();
        let motor = world.get::<CharacterMotor>(entity).unwrap();

        assert_eq!(transform.translation.y, 0.0);
        assert!((transform.translation.x - 0.2).abs() < 1e-6);
        // Скорость = реальное смещение / dt
        assert!((motor.velocity.x - 2.0).abs() < 1e-4);
        assert!((motor.velocity.y + 0.5).abs() < 1e-4);
    }
}
