//! Scalar easing helpers (углы в радианах).

use std::f32::consts::{PI, TAU};

/// Linear interpolation с clamp'ом t в [0, 1]
pub fn lerp_clamped(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

/// Округление до 3 знаков (гасит float jitter перед animation blend)
pub fn round_to_millis(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

/// Приводит угол к (-PI, PI]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Кратчайшая разница `to - from` с учётом wrap
pub fn delta_angle(from: f32, to: f32) -> f32 {
    wrap_angle(to - from)
}

/// Critically damped spring к `target`.
///
/// `velocity`: состояние между вызовами. Не перелетает target: при
/// overshoot возвращает target и обнуляет velocity. dt <= 0 = no-op.
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    // Padé-аппроксимация exp(-x)
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;

    let output = target + (change + temp) * decay;
    if (target - current > 0.0) == (output > target) {
        *velocity = 0.0;
        return target;
    }
    output
}

/// `smooth_damp` по кратчайшей дуге; результат в (-PI, PI]
pub fn smooth_damp_angle(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
) -> f32 {
    let unwrapped_target = current + delta_angle(current, target);
    wrap_angle(smooth_damp(current, unwrapped_target, velocity, smooth_time, dt))
}
