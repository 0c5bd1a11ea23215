//! AI systems (guard tick, player intent, objectives, capture)

pub mod guards;
pub mod player;

// Re-export all systems
pub use guards::*;
pub use player::*;
