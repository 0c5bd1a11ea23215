//! AI Events — выход симуляции для внешних collaborators (UI, скрипты, тесты)
//!
//! ECS → UI: сигналы охранников (текст + длительность), выполнение целей, поимка игрока.
//! Blackboard — внутренний канал между охранниками, сюда не попадает.

use bevy::prelude::*;

use crate::ai::archetypes::Archetype;

/// Охранник выдал сообщение (taunt / acknowledgement / alert)
///
/// Уже прошло через throttle: два события одного охранника не пересекаются по времени.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct GuardSignalEmitted {
    pub guard: Entity,
    pub archetype: Archetype,
    pub text: &'static str,
    pub duration_ms: u32,
    /// Номер тика симуляции
    pub tick: u64,
}

/// Игрок впервые коснулся цели
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ObjectiveCompleted {
    pub objective: Entity,
    /// Сколько целей выполнено после этого события
    pub completed_total: usize,
}

/// Охранник пересёкся с игроком
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerCaught {
    pub guard: Entity,
    pub archetype: Archetype,
    pub tick: u64,
}
