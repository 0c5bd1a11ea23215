//! Containment — охранник у стены, смотрящий наружу, стоит и разворачивается внутрь
//!
//! Стена "прижата", если центр актора ближе radius к краю арены.
//! Двигаться у прижатой стены можно только с heading, уводящим от неё с запасом
//! больше максимального поворота за тик: тогда и после `turn()` шаг идёт внутрь.

use bevy::prelude::*;
use std::f32::consts::PI;

use crate::components::{Kinematic, PlayField};

/// Минимальная проекция facing на внутреннюю нормаль сверх поворота за тик
pub const MIN_INWARD_CLEARANCE: f32 = 0.1;

/// Внутренние нормали прижатых стен: left, right, top, bottom
pub fn wall_normals(body: &Kinematic, field: &PlayField) -> [Option<Vec2>; 4] {
    let rect = field.rect();
    let position = body.position;
    let radius = body.radius;

    [
        (position.x - radius <= rect.min.x).then_some(Vec2::X),
        (position.x + radius >= rect.max.x).then_some(Vec2::NEG_X),
        (position.y - radius <= rect.min.y).then_some(Vec2::Y),
        (position.y + radius >= rect.max.y).then_some(Vec2::NEG_Y),
    ]
}

/// Запас, который переживает один поворот на `turn_rate * dt`
pub fn inward_clearance(body: &Kinematic, dt: f32) -> f32 {
    body.turn_rate.abs() * dt + MIN_INWARD_CLEARANCE
}

/// heading уводит от всех прижатых стен с запасом clearance (нет стен → true)
pub fn clears_walls(body: &Kinematic, field: &PlayField, heading: f32, clearance: f32) -> bool {
    let facing = Vec2::from_angle(heading);
    wall_normals(body, field)
        .into_iter()
        .flatten()
        .all(|normal| facing.dot(normal) > clearance)
}

/// Охранник должен стоять на месте и разворачиваться
pub fn must_hold(body: &Kinematic, field: &PlayField, dt: f32) -> bool {
    !clears_walls(body, field, body.heading(), inward_clearance(body, dt))
}

/// Heading к центру арены (в центре — разворот назад)
pub fn inward_heading(body: &Kinematic, field: &PlayField) -> f32 {
    let offset = field.rect().center() - body.position;
    if offset.length_squared() <= f32::EPSILON {
        return body.heading() + PI;
    }
    offset.y.atan2(offset.x)
}
