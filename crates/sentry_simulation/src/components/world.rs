//! World компоненты: Objective, Player, PlayerIntent, PlayField

use bevy::prelude::*;

/// Цель (goal), которую игрок должен посетить
///
/// Инвариант: completed меняется ровно один раз false → true, назад не откатывается.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Objective {
    pub position: Vec2,
    pub radius: f32,
    completed: bool,
}

impl Objective {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            radius,
            completed: false,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Возвращает true только при первом переходе
    pub fn complete(&mut self) -> bool {
        let first_time = !self.completed;
        self.completed = true;
        first_time
    }
}

/// Marker: актор под управлением игрока (без сенсора и поведения)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Намерение игрока на текущий тик
///
/// Заполняется input collaborator'ом (клавиатура, скрипт в headless).
/// turn ∈ [-1, 1] — доля turn_rate, throttle — знак/множитель скорости.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerIntent {
    pub turn: f32,
    pub throttle: f32,
}

/// Арена (axis-aligned rect)
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PlayField(pub Rect);

impl PlayField {
    pub fn rect(&self) -> Rect {
        self.0
    }

    /// Rect сжатый на margin со всех сторон (None если ничего не осталось)
    pub fn inset(&self, margin: f32) -> Option<Rect> {
        let min = self.0.min + Vec2::splat(margin);
        let max = self.0.max - Vec2::splat(margin);
        if min.x > max.x || min.y > max.y {
            return None;
        }
        Some(Rect::from_corners(min, max))
    }
}

impl Default for PlayField {
    fn default() -> Self {
        Self(Rect::new(0.0, 0.0, 800.0, 600.0))
    }
}
