//! Environment modifier — глобальный множитель скорости охранников
//!
//! Каждая выполненная цель ускоряет всех охранников на 10%, без верхней границы.

use crate::components::Objective;

/// Прирост за одну выполненную цель
pub const SPEED_BONUS_PER_OBJECTIVE: f32 = 0.1;

pub fn completed_count(objectives: &[Objective]) -> usize {
    objectives.iter().filter(|goal| goal.is_completed()).count()
}

/// `base * (1 + 0.1 * completed)`
pub fn current_speed_scale(base: f32, objectives: &[Objective]) -> f32 {
    speed_scale_for(base, completed_count(objectives))
}

pub fn speed_scale_for(base: f32, completed: usize) -> f32 {
    base * (1.0 + SPEED_BONUS_PER_OBJECTIVE * completed as f32)
}
