//! Rapier backend integration test
//!
//! Тот же controller tick, но движение применяет bevy_rapier3d
//! `KinematicCharacterController`, а grounded приходит из его output.
//!
//! Проверяем:
//! - капсула садится на fixed cuboid пол и стоит на нём (высота центра ~0.9)
//! - ходьба: реальная скорость из output ≈ move_speed, высота не уплывает
//! - прыжок: grace window перекрывает output.grounded, подъём ≈ jump_height

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use duelist_simulation::*;

/// Центр капсулы над полом в покое (half height + radius)
const REST_HEIGHT: f32 = 0.9;
/// Допуск на skin offset / ground bias контроллера
const REST_TOLERANCE: f32 = 0.05;

/// Helper: headless App + rapier SimulationPlugin + пол + персонаж
fn create_rapier_app(seed: u64) -> (App, Entity) {
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin::rapier());

    // Пол: верхняя грань на y = 0
    app.world_mut().spawn((
        Transform::from_xyz(0.0, -0.5, 0.0),
        Collider::cuboid(50.0, 0.5, 50.0),
        RigidBody::Fixed,
    ));

    let player = spawn_player_character(
        &mut app.world_mut().commands(),
        Vec3::new(0.0, REST_HEIGHT + 0.05, 0.0),
        ControllerConfig::default(),
        CameraConfig::default(),
        PhysicsBackend::Rapier,
    )
    .expect("default config is valid");

    // Первый update: commands применяются, часы стартуют
    app.update();

    (app, player)
}

fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

fn get<T: Component>(app: &App, player: Entity) -> &T {
    app.world().get::<T>(player).expect("player component")
}

fn height(app: &App, player: Entity) -> f32 {
    get::<Transform>(app, player).translation.y
}

fn assert_resting_height(app: &App, player: Entity, phase: &str) {
    let y = height(app, player);
    assert!(
        (y - REST_HEIGHT).abs() <= REST_TOLERANCE,
        "{}: capsule center at {:.4}, expected {:.2} ± {:.2}",
        phase,
        y,
        REST_HEIGHT,
        REST_TOLERANCE
    );
}

#[test]
fn test_capsule_settles_on_collider_floor() {
    let (mut app, player) = create_rapier_app(42);
    run_ticks(&mut app, 60);

    assert!(get::<GroundProbe>(&app, player).grounded);
    assert!(get::<VerticalMotion>(&app, player).effective_grounded);
    assert!(get::<Animator>(&app, player).bool(AnimParam::Grounded));
    assert!(!get::<VerticalMotion>(&app, player).free_falling);
    assert_resting_height(&app, player, "settle");
}

#[test]
fn test_walk_velocity_matches_move_speed() {
    let (mut app, player) = create_rapier_app(42);
    run_ticks(&mut app, 60);

    app.world_mut()
        .get_mut::<PlayerInput>(player)
        .expect("player has input")
        .move_axis = Vec2::Y;
    run_ticks(&mut app, 60);

    let move_speed = ControllerConfig::default().move_speed;
    let planar_speed = get::<CharacterMotor>(&app, player).planar_speed();
    assert!(
        (planar_speed - move_speed).abs() < 0.2,
        "motor planar speed {:.3}, move_speed {:.3}",
        planar_speed,
        move_speed
    );
    assert!((get::<HorizontalMotion>(&app, player).speed - move_speed).abs() < 0.01);

    // Forward = -Z при нулевом yaw камеры
    let position = get::<Transform>(&app, player).translation;
    assert!(position.z < -1.0, "walked to {:?}", position);
    assert!(position.x.abs() < 0.1);

    assert!(get::<GroundProbe>(&app, player).grounded);
    assert_resting_height(&app, player, "walk");
}

#[test]
fn test_jump_rise_close_to_jump_height() {
    let (mut app, player) = create_rapier_app(42);
    run_ticks(&mut app, 60);

    let start = height(&app, player);
    app.world_mut()
        .get_mut::<PlayerInput>(player)
        .expect("player has input")
        .jump = true;

    let mut peak = start;
    let mut saw_grace = false;
    for _ in 0..120 {
        app.update();
        peak = peak.max(height(&app, player));
        saw_grace |= get::<VerticalMotion>(&app, player).in_grace_window();
    }

    // Grace window перекрывает output.grounded на отрыве
    let jump_height = ControllerConfig::default().jump_height;
    let rise = peak - start;
    assert!(saw_grace);
    assert!(
        rise > jump_height - 0.1 && rise < jump_height + 0.15,
        "rise {:.3}, jump_height {:.3}",
        rise,
        jump_height
    );

    // Приземлился и снова стоит
    assert!(get::<VerticalMotion>(&app, player).effective_grounded);
    assert!(!get::<PlayerInput>(&app, player).jump);
    assert_resting_height(&app, player, "landing");
}
