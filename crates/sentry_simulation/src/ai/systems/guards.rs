//! Guard tick: perceive → decide → turn → advance для всех охранников.

use bevy::prelude::*;

use crate::ai::archetypes::{Archetype, DecisionContext, GuardBrain};
use crate::ai::events::GuardSignalEmitted;
use crate::ai::Blackboard;
use crate::components::{Kinematic, Objective, PlayField, Player};
use crate::config::SimulationConfig;
use crate::vision::{Percept, VisionCone};
use crate::{DeterministicRng, SimulationTick};

/// Система: счётчик тиков (первой в цепочке)
pub fn advance_simulation_tick(mut tick: ResMut<SimulationTick>) {
    tick.0 += 1;
}

/// Порядок обработки охранников в тике
///
/// Scout → Responder → Patroller, внутри архетипа — по индексу entity.
/// Записи в Blackboard от раньше обработанных видны позже обработанным в том же тике.
pub fn processing_order(guards: impl IntoIterator<Item = (Archetype, Entity)>) -> Vec<Entity> {
    let mut order: Vec<(Archetype, Entity)> = guards.into_iter().collect();
    order.sort_by_key(|(archetype, entity)| (*archetype, entity.index()));
    order.into_iter().map(|(_, entity)| entity).collect()
}

/// Система: один тик всех охранников
///
/// Percept считается заново на каждом тике и никуда не сохраняется.
/// Нет игрока → Percept::Hidden (охранники просто патрулируют).
pub fn tick_guards(
    config: Res<SimulationConfig>,
    field: Res<PlayField>,
    tick: Res<SimulationTick>,
    mut blackboard: ResMut<Blackboard>,
    mut rng: ResMut<DeterministicRng>,
    players: Query<&Kinematic, With<Player>>,
    objectives: Query<&Objective>,
    mut guards: Query<(Entity, &mut GuardBrain, &mut Kinematic, &mut VisionCone), Without<Player>>,
    mut signals: EventWriter<GuardSignalEmitted>,
) {
    let dt = config.tick_dt();
    let target = players.iter().next().map(|body| body.position);
    let goals: Vec<Objective> = objectives.iter().copied().collect();

    let order = processing_order(guards.iter().map(|(entity, brain, _, _)| (brain.archetype(), entity)));

    for entity in order {
        let Ok((_, mut brain, mut body, mut cone)) = guards.get_mut(entity) else {
            continue;
        };

        let percept = target
            .map(|position| cone.perceive(&body, position))
            .unwrap_or(Percept::Hidden);

        let mut ctx = DecisionContext {
            percept,
            objectives: &goals,
            blackboard: &mut *blackboard,
            field: &*field,
            dt,
            tick_hz: config.tick_hz,
            rng: &mut rng.rng,
        };
        let decision = brain.decide(&body, &mut cone, &mut ctx);

        body.turn(dt, decision.turn_delta);
        body.advance(dt, decision.speed_scale);

        if let Some(signal) = decision.signal {
            crate::logger::log_info(&format!(
                "{} {:?}: \"{}\" ({} ms)",
                brain.archetype().name(),
                entity,
                signal.text,
                signal.duration_ms
            ));
            signals.write(GuardSignalEmitted {
                guard: entity,
                archetype: brain.archetype(),
                text: signal.text,
                duration_ms: signal.duration_ms,
                tick: tick.0,
            });
        }
    }
}
