//! Steering primitives: seek + wander + containment
//!
//! Все возвращают turn delta (радианы), не новый heading.
//! Применение — через `Kinematic::turn` в guard tick системе.

pub mod containment;
pub mod seek;
pub mod wander;


pub use containment::{clears_walls, inward_clearance, inward_heading, must_hold, wall_normals};
pub use seek::{face_heading, seek};
pub use wander::{random_waypoint, Wander};
