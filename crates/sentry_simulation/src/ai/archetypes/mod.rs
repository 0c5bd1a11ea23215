//! Архетипы охранников: Scout, Responder, Patroller
//!
//! Закрытый набор вариантов (`GuardBrain`), у каждого свой state struct,
//! общие примитивы (AlertMachine, MessageThrottle, seek/wander) и своя policy.
//! Dispatch — один `decide` на тик.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::components::{AlertPhase, GuardDecision};
use crate::ai::Blackboard;
use crate::components::{Kinematic, Objective, PlayField};
use crate::config::SimulationConfig;
use crate::steering::{clears_walls, face_heading, inward_clearance, inward_heading};
use crate::vision::{Percept, VisionCone};

pub mod patroller;
pub mod responder;
pub mod scout;


pub use patroller::{reflect_heading, PatrollerBrain};
pub use responder::ResponderBrain;
pub use scout::ScoutBrain;

/// Архетип охранника (он же ключ Blackboard)
///
/// Порядок вариантов = порядок обработки в тике: Scout, Responder, Patroller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Reflect)]
pub enum Archetype {
    Scout,
    Responder,
    Patroller,
}

impl Archetype {
    pub const COUNT: usize = 3;
    pub const ALL: [Archetype; Self::COUNT] = [Archetype::Scout, Archetype::Responder, Archetype::Patroller];

    pub fn index(self) -> usize {
        match self {
            Archetype::Scout => 0,
            Archetype::Responder => 1,
            Archetype::Patroller => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Archetype::Scout => "Scout",
            Archetype::Responder => "Responder",
            Archetype::Patroller => "Patroller",
        }
    }
}

/// Входы decide за один тик
pub struct DecisionContext<'a, R: Rng + ?Sized> {
    pub percept: Percept,
    pub objectives: &'a [Objective],
    pub blackboard: &'a mut Blackboard,
    pub field: &'a PlayField,
    pub dt: f32,
    pub tick_hz: f32,
    pub rng: &'a mut R,
}

/// Поведение охранника (FSM + policy архетипа)
#[derive(Component, Debug, Clone)]
pub enum GuardBrain {
    Scout(ScoutBrain),
    Responder(ResponderBrain),
    Patroller(PatrollerBrain),
}

impl GuardBrain {
    pub fn for_archetype(archetype: Archetype, config: &SimulationConfig) -> Self {
        match archetype {
            Archetype::Scout => GuardBrain::Scout(ScoutBrain::new(config.scout)),
            Archetype::Responder => GuardBrain::Responder(ResponderBrain::new(config.responder)),
            Archetype::Patroller => GuardBrain::Patroller(PatrollerBrain::new(config.patroller)),
        }
    }

    pub fn archetype(&self) -> Archetype {
        match self {
            GuardBrain::Scout(_) => Archetype::Scout,
            GuardBrain::Responder(_) => Archetype::Responder,
            GuardBrain::Patroller(_) => Archetype::Patroller,
        }
    }

    pub fn phase(&self) -> AlertPhase {
        match self {
            GuardBrain::Scout(brain) => brain.alert().phase(),
            GuardBrain::Responder(brain) => brain.alert().phase(),
            GuardBrain::Patroller(brain) => brain.alert().phase(),
        }
    }

    pub fn cooldown_ticks(&self) -> u32 {
        match self {
            GuardBrain::Scout(brain) => brain.alert().cooldown_ticks(),
            GuardBrain::Responder(brain) => brain.alert().cooldown_ticks(),
            GuardBrain::Patroller(brain) => brain.alert().cooldown_ticks(),
        }
    }

    /// Последняя известная/предполагаемая позиция цели
    pub fn target(&self) -> Option<Vec2> {
        match self {
            GuardBrain::Scout(brain) => brain.target(),
            GuardBrain::Responder(brain) => brain.target(),
            GuardBrain::Patroller(brain) => brain.target(),
        }
    }

    /// Решение на тик
    ///
    /// Меняет только собственное состояние охранника (cooldown, target, throttle,
    /// у Responder — ещё конус) и Blackboard. Поверх policy архетипа — удержание в арене.
    pub fn decide<R: Rng + ?Sized>(
        &mut self,
        body: &Kinematic,
        cone: &mut VisionCone,
        ctx: &mut DecisionContext<'_, R>,
    ) -> GuardDecision {
        let decision = match self {
            GuardBrain::Scout(brain) => brain.decide(body, ctx),
            GuardBrain::Responder(brain) => brain.decide(body, cone, ctx),
            GuardBrain::Patroller(brain) => brain.decide(body, ctx),
        };

        let preferred = match self {
            GuardBrain::Patroller(brain) => brain.bounce_heading(),
            _ => None,
        };
        hold_inside(body, ctx.field, ctx.dt, decision, preferred)
    }
}

/// У прижатой стены с heading наружу: скорость 0, разворот внутрь
///
/// Разворачиваемся к `preferred` (отражённый heading Patroller), если он уводит
/// от стен, иначе к центру арены. Сигнал решения сохраняется.
pub fn hold_inside(
    body: &Kinematic,
    field: &PlayField,
    dt: f32,
    decision: GuardDecision,
    preferred: Option<f32>,
) -> GuardDecision {
    let clearance = inward_clearance(body, dt);
    if clears_walls(body, field, body.heading(), clearance) {
        return decision;
    }

    let heading = preferred
        .filter(|heading| clears_walls(body, field, *heading, clearance))
        .unwrap_or_else(|| inward_heading(body, field));
    GuardDecision::steer(face_heading(body, heading), 0.0).with_signal(decision.signal)
}
