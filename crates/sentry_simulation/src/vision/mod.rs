//! Vision System — конус обзора охранника → Percept
//!
//! Конус = равнобедренный треугольник: apex в позиции охранника, два луча
//! под `heading ± half_angle` длиной `radius + view_distance`.
//! Пересчитывается каждый тик из текущего heading, Percept нигде не хранится.

use bevy::prelude::*;

use crate::components::Kinematic;
use crate::config::VisionConfig;


/// Параметры конуса обзора охранника
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct VisionCone {
    pub half_angle: f32,
    pub view_distance: f32,
}

impl From<VisionConfig> for VisionCone {
    fn from(config: VisionConfig) -> Self {
        Self {
            half_angle: config.half_angle,
            view_distance: config.view_distance,
        }
    }
}

impl VisionCone {
    /// Вершины треугольника в порядке apex → left → right
    ///
    /// left = `heading - half_angle`, right = `heading + half_angle`. Для этого
    /// порядка обхода внутренняя точка даёт положительный cross product на всех рёбрах.
    pub fn vertices(&self, body: &Kinematic) -> [Vec2; 3] {
        let reach = body.radius + self.view_distance;
        let apex = body.position;
        let left = apex + Vec2::from_angle(body.heading() - self.half_angle) * reach;
        let right = apex + Vec2::from_angle(body.heading() + self.half_angle) * reach;
        [apex, left, right]
    }

    /// Point-in-cone тест + Percept
    ///
    /// Точка на ребре (cross == 0) считается снаружи.
    pub fn perceive(&self, body: &Kinematic, target: Vec2) -> Percept {
        let cone = self.vertices(body);

        for i in 0..cone.len() {
            let start = cone[i];
            let end = cone[(i + 1) % cone.len()];
            if (end - start).perp_dot(target - start) <= 0.0 {
                return Percept::Hidden;
            }
        }

        let offset = target - body.position;
        let distance = offset.length();
        // Вырожденный случай: цель в центре охранника
        if distance <= f32::EPSILON {
            return Percept::Hidden;
        }

        Percept::Visible {
            direction: offset / distance,
            distance,
        }
    }
}

/// Результат проверки видимости цели за один тик
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Percept {
    #[default]
    Hidden,
    Visible {
        /// Единичный вектор от охранника к цели
        direction: Vec2,
        distance: f32,
    },
}

impl Percept {
    pub fn is_visible(&self) -> bool {
        matches!(self, Percept::Visible { .. })
    }

    pub fn direction(&self) -> Option<Vec2> {
        match self {
            Percept::Visible { direction, .. } => Some(*direction),
            Percept::Hidden => None,
        }
    }

    pub fn distance(&self) -> Option<f32> {
        match self {
            Percept::Visible { distance, .. } => Some(*distance),
            Percept::Hidden => None,
        }
    }

    /// Мировая позиция цели: `origin + direction * distance`
    pub fn target_position(&self, origin: Vec2) -> Option<Vec2> {
        match self {
            Percept::Visible { direction, distance } => Some(origin + *direction * *distance),
            Percept::Hidden => None,
        }
    }
}
