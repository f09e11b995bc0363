//! Combat components

pub mod actions;
pub mod mode;
pub mod weapon_rig;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod actions_tests;

// Re-export all components
pub use actions::*;
pub use mode::*;
pub use weapon_rig::*;
