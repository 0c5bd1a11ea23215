//! Kinematic компонент: позиция, heading, радиус, скорость, turn rate
//!
//! Общий для игрока и охранников. Интеграция движения, circle-collision,
//! bounds-проверка. Clamping к арене здесь НЕ делается — охранник сам
//! уворачивается от стен через свою state machine.

use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

use crate::config::BodyConfig;

/// Нормализует угол в (-π, π]
pub fn wrap_angle(angle: f32) -> f32 {
    let mut wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped += TAU;
    }
    // rem_euclid может вернуть TAU из-за округления
    wrapped.min(PI)
}

/// Актор на плоскости
///
/// Инвариант: heading ∈ (-π, π] (поле приватное, меняется только через turn/set_heading)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Kinematic {
    pub position: Vec2,
    heading: f32,
    pub radius: f32,
    /// Единиц в секунду
    pub base_speed: f32,
    /// Максимальная угловая скорость (рад/сек)
    pub turn_rate: f32,
}

impl Kinematic {
    pub fn new(position: Vec2, heading: f32, body: &BodyConfig) -> Self {
        Self {
            position,
            heading: wrap_angle(heading),
            radius: body.radius,
            base_speed: body.base_speed,
            turn_rate: body.turn_rate,
        }
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn set_heading(&mut self, heading: f32) {
        self.heading = wrap_angle(heading);
    }

    /// Единичный вектор направления взгляда
    pub fn facing(&self) -> Vec2 {
        Vec2::from_angle(self.heading)
    }

    /// Сдвиг вдоль heading на `direction * base_speed * dt`
    ///
    /// `direction` обычно +1, отрицательный — движение задом,
    /// охранники передают сюда свой speed_scale.
    pub fn advance(&mut self, dt: f32, direction: f32) {
        self.position += self.facing() * (direction * self.base_speed * dt);
    }

    /// Поворот на `direction * turn_rate * dt`
    ///
    /// `direction` клампится в [-1, 1]: за тик heading не меняется больше чем на turn_rate * dt.
    pub fn turn(&mut self, dt: f32, direction: f32) {
        let applied = direction.clamp(-1.0, 1.0) * self.turn_rate * dt;
        self.heading = wrap_angle(self.heading + applied);
    }

    /// Circle collision (строгое `<`)
    pub fn overlaps(&self, other: &Kinematic) -> bool {
        self.overlaps_circle(other.position, other.radius)
    }

    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        self.position.distance(center) < self.radius + radius
    }

    /// Хотя бы часть круга внутри rect (границы включительно)
    pub fn within_bounds(&self, rect: Rect) -> bool {
        self.position.x + self.radius >= rect.min.x
            && self.position.x - self.radius <= rect.max.x
            && self.position.y + self.radius >= rect.min.y
            && self.position.y - self.radius <= rect.max.y
    }
}
