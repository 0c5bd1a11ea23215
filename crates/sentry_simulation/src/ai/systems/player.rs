//! Player-side systems: движение по intent, выполнение целей, поимка.

use bevy::prelude::*;
use std::collections::HashSet;

use crate::ai::archetypes::GuardBrain;
use crate::ai::events::{ObjectiveCompleted, PlayerCaught};
use crate::components::{Kinematic, Objective, PlayField, Player, PlayerIntent};
use crate::config::SimulationConfig;
use crate::environment::completed_count;
use crate::SimulationTick;

/// Система: PlayerIntent → turn/advance
///
/// Те же примитивы, что у охранников. Если шаг выводит игрока целиком за арену,
/// позиция откатывается (heading при этом уже повёрнут).
pub fn apply_player_intent(
    config: Res<SimulationConfig>,
    field: Res<PlayField>,
    mut players: Query<(&PlayerIntent, &mut Kinematic), With<Player>>,
) {
    let dt = config.tick_dt();
    for (intent, mut body) in players.iter_mut() {
        body.turn(dt, intent.turn);

        let previous = body.position;
        body.advance(dt, intent.throttle);
        if !body.within_bounds(field.rect()) {
            body.position = previous;
        }
    }
}

/// Система: игрок коснулся цели → complete (один раз)
pub fn complete_objectives(
    players: Query<&Kinematic, With<Player>>,
    mut objectives: Query<(Entity, &mut Objective)>,
    mut completed: EventWriter<ObjectiveCompleted>,
) {
    let Some(player) = players.iter().next() else {
        return;
    };

    let mut newly_completed = Vec::new();
    for (entity, mut objective) in objectives.iter_mut() {
        if objective.is_completed() || !player.overlaps_circle(objective.position, objective.radius) {
            continue;
        }
        if objective.complete() {
            newly_completed.push(entity);
        }
    }

    if newly_completed.is_empty() {
        return;
    }

    let snapshot: Vec<Objective> = objectives.iter().map(|(_, objective)| *objective).collect();
    let completed_total = completed_count(&snapshot);
    for objective in newly_completed {
        crate::logger::log_info(&format!(
            "Objective {:?} completed ({} total)",
            objective, completed_total
        ));
        completed.write(ObjectiveCompleted {
            objective,
            completed_total,
        });
    }
}

/// Система: охранник пересёкся с игроком → PlayerCaught
///
/// Событие — только в начале контакта, пока круги пересекаются повторно не шлём.
pub fn detect_capture(
    tick: Res<SimulationTick>,
    players: Query<&Kinematic, With<Player>>,
    guards: Query<(Entity, &GuardBrain, &Kinematic), Without<Player>>,
    mut in_contact: Local<HashSet<Entity>>,
    mut caught: EventWriter<PlayerCaught>,
) {
    let Some(player) = players.iter().next() else {
        in_contact.clear();
        return;
    };

    let mut touching: Vec<(Entity, &GuardBrain)> = guards
        .iter()
        .filter(|(_, _, body)| body.overlaps(player))
        .map(|(entity, brain, _)| (entity, brain))
        .collect();
    touching.sort_by_key(|(entity, _)| entity.index());

    for (entity, brain) in &touching {
        if in_contact.contains(entity) {
            continue;
        }
        crate::logger::log_warning(&format!(
            "Player caught by {} {:?} (tick {})",
            brain.archetype().name(),
            entity,
            tick.0
        ));
        caught.write(PlayerCaught {
            guard: *entity,
            archetype: brain.archetype(),
            tick: tick.0,
        });
    }

    *in_contact = touching.into_iter().map(|(entity, _)| entity).collect();
}
