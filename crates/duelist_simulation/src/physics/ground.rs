//! Ground probe: grounded ли персонаж на этом тике
//!
//! Два источника:
//! - headless: сфера под ногами против плоскости `GroundPlane`
//! - rapier: `KinematicCharacterControllerOutput::grounded` прошлого шага
//!
//! Результат: сырой probe. Grace window поверх него применяет
//! `VerticalMotion` (effective grounded).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::animation::{AnimParam, Animator};
use crate::config::ControllerConfig;

/// Сырой результат ground probe
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct GroundProbe {
    pub grounded: bool,
}

/// Плоский пол для headless backend'а (высота по Y)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct GroundPlane {
    pub height: f32,
}

/// Сфера probe касается плоскости?
///
/// Центр сферы: `feet_y - grounded_offset` (offset отрицательный → сфера
/// чуть выше подошвы).
pub fn sphere_touches_plane(
    feet_y: f32,
    grounded_offset: f32,
    radius: f32,
    plane_height: f32,
) -> bool {
    let center = feet_y - grounded_offset;
    center - radius <= plane_height
}

/// System: headless probe против `GroundPlane`
pub fn probe_ground_plane(
    plane: Res<GroundPlane>,
    mut query: Query<
        (&Transform, &ControllerConfig, &mut GroundProbe, Option<&mut Animator>),
        Without<KinematicCharacterController>,
    >,
) {
    for (transform, config, mut probe, animator) in query.iter_mut() {
        probe.grounded = sphere_touches_plane(
            transform.translation.y,
            config.grounded_offset,
            config.grounded_radius,
            plane.height,
        );

        if let Some(mut animator) = animator {
            animator.set_bool(AnimParam::Grounded, probe.grounded);
        }
    }
}

/// System: rapier probe (результат character controller'а прошлого шага)
///
/// Output появляется только после первого physics step: до этого probe
/// остаётся false.
pub fn probe_rapier_output(
    mut query: Query<(
        &KinematicCharacterControllerOutput,
        &mut GroundProbe,
        Option<&mut Animator>,
    )>,
) {
    for (output, mut probe, animator) in query.iter_mut() {
        probe.grounded = output.grounded;

        if let Some(mut animator) = animator {
            animator.set_bool(AnimParam::Grounded, probe.grounded);
        }
    }
}
