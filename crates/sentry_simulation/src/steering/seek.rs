//! Seek — ограниченный поворот к цели

use bevy::prelude::*;

use crate::components::{wrap_angle, Kinematic};

/// Знаковая разница heading → направление на цель, клампнутая в ±max_turn
///
/// Возвращает delta (не новый heading), вызывающий применяет её через `turn()`.
/// Цель в позиции актора → 0.0 (нулевой вектор не нормализуем).
pub fn seek(body: &Kinematic, target: Vec2, max_turn: f32) -> f32 {
    let offset = target - body.position;
    if offset.length_squared() <= f32::EPSILON {
        return 0.0;
    }

    let desired = offset.y.atan2(offset.x);
    let max_turn = max_turn.abs();
    wrap_angle(desired - body.heading()).clamp(-max_turn, max_turn)
}

/// Поворот к абсолютному heading (без clamp, `turn()` сам ограничит)
pub fn face_heading(body: &Kinematic, heading: f32) -> f32 {
    wrap_angle(heading - body.heading())
}
