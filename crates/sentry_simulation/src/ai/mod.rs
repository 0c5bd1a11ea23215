//! AI decision-making module
//!
//! Три архетипа охранников (Scout, Responder, Patroller) с общим автоматом
//! Idle/Alert/Cooldown и координацией через Blackboard.

use bevy::prelude::*;

pub mod archetypes;
pub mod blackboard;
pub mod components;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use archetypes::{Archetype, DecisionContext, GuardBrain};
pub use blackboard::{Blackboard, BlackboardValue, SignalToken};
pub use components::{AlertMachine, AlertPhase, GuardDecision, GuardSignal, MessageThrottle};
pub use events::{GuardSignalEmitted, ObjectiveCompleted, PlayerCaught};
pub use systems::*;

/// AI Plugin
///
/// Регистрирует события и системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. advance_simulation_tick — номер тика
/// 2. apply_player_intent — игрок двигается первым
/// 3. tick_guards — perceive/decide/turn/advance в фиксированном порядке архетипов
/// 4. complete_objectives — игрок ↔ цели
/// 5. detect_capture — охранник ↔ игрок
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<GuardSignalEmitted>()
            .add_event::<ObjectiveCompleted>()
            .add_event::<PlayerCaught>()
            .add_systems(
                FixedUpdate,
                (
                    systems::advance_simulation_tick,
                    systems::apply_player_intent,
                    systems::tick_guards,
                    systems::complete_objectives,
                    systems::detect_capture,
                )
                    .chain(), // Последовательное выполнение для детерминизма
            );
    }
}
