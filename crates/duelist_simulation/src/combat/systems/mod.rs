//! Combat systems

pub mod actions;
pub mod mode;
pub mod weapon_rig;

// Re-export all systems
pub use actions::*;
pub use mode::*;
pub use weapon_rig::*;
