//! Headless дуэльная сессия
//!
//! Один персонаж на плоском полу, scripted input на 600 тиков (10 секунд).
//! Печатает состояние контроллера каждые 100 тиков.
//!
//! `--rapier`: тот же сценарий на bevy_rapier3d (fixed cuboid пол + капсула).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use duelist_simulation::{
    create_headless_app, spawn_player_character, CameraConfig, CombatMode, ControllerConfig,
    HorizontalMotion, InputScript, InputScriptPlugin, PhysicsBackend, SimulationPlugin,
    VerticalMotion,
};

const TICKS: u32 = 600;

fn main() {
    let seed = 42;
    let backend = if std::env::args().any(|arg| arg == "--rapier") {
        PhysicsBackend::Rapier
    } else {
        PhysicsBackend::Headless
    };
    println!(
        "Starting duelist headless session (seed: {}, backend: {:?})",
        seed, backend
    );

    let mut app = create_headless_app(seed);
    app.add_plugins((
        SimulationPlugin { physics: backend },
        InputScriptPlugin {
            script: InputScript::duel_session(),
        },
    ));

    // Rapier: Transform = центр капсулы, ставим её чуть над полом
    let position = match backend {
        PhysicsBackend::Headless => Vec3::ZERO,
        PhysicsBackend::Rapier => Vec3::new(0.0, 0.95, 0.0),
    };

    let player = {
        let world = app.world_mut();
        if backend == PhysicsBackend::Rapier {
            world.spawn((
                Transform::from_xyz(0.0, -0.5, 0.0),
                Collider::cuboid(200.0, 0.5, 200.0),
                RigidBody::Fixed,
            ));
        }
        let spawned = spawn_player_character(
            &mut world.commands(),
            position,
            ControllerConfig::default(),
            CameraConfig::default(),
            backend,
        );
        world.flush();
        spawned
    };

    let player = match player {
        Ok(entity) => entity,
        Err(err) => {
            eprintln!("Failed to spawn player: {}", err);
            std::process::exit(1);
        }
    };

    // Первый update только запускает часы (fixed tick не идёт)
    app.update();

    for tick in 1..=TICKS {
        app.update();

        if tick % 100 == 0 {
            let world = app.world();
            let (Some(transform), Some(horizontal), Some(vertical), Some(mode)) = (
                world.get::<Transform>(player),
                world.get::<HorizontalMotion>(player),
                world.get::<VerticalMotion>(player),
                world.get::<CombatMode>(player),
            ) else {
                eprintln!("Tick {}: player entity missing", tick);
                break;
            };

            println!(
                "Tick {}: pos ({:.2}, {:.2}, {:.2}) speed {:.3} vy {:.3} grounded {} combat {}",
                tick,
                transform.translation.x,
                transform.translation.y,
                transform.translation.z,
                horizontal.speed,
                vertical.vertical_velocity,
                vertical.effective_grounded,
                mode.active,
            );
        }
    }

    println!("Session complete!");
}
