//! Movement domain: locomotion integrators
//!
//! Содержит:
//! - VerticalMotion (jump windup/grace, gravity, free-fall)
//! - HorizontalMotion (speed easing, sprint toggle, facing rotation)
//! - smoothing (lerp, critically damped angle smoothing)
//!
//! Интеграторы: чистые методы на компонентах; ECS wiring в `controller`.

pub mod horizontal;
pub mod smoothing;
pub mod vertical;


pub use horizontal::HorizontalMotion;
pub use vertical::VerticalMotion;
