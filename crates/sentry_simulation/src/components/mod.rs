//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - kinematic: движение и коллизии акторов (Kinematic, wrap_angle)
//! - world: цели, игрок, арена (Objective, Player, PlayerIntent, PlayField)

pub mod kinematic;
pub mod world;


// Re-exports для удобного импорта
pub use kinematic::*;
pub use world::*;
