//! Scout — лёгкий патрульный
//!
//! Idle: wander. Alert: seek позиции цели + taunt (throttled), отчёт в Blackboard.
//! Cooldown: seek последней известной позиции, скорость растёт с выполненными целями.
//! Если Responder сообщает о погоне — бросаем текущий wander waypoint.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::archetypes::{Archetype, DecisionContext};
use crate::ai::blackboard::{BlackboardValue, SignalToken};
use crate::ai::components::{AlertMachine, AlertStep, GuardDecision, MessageThrottle};
use crate::components::Kinematic;
use crate::config::ScoutConfig;
use crate::environment::current_speed_scale;
use crate::steering::{seek, Wander};

pub const SCOUT_TAUNT: &str = "Don't make me chase you!";

#[derive(Debug, Clone)]
pub struct ScoutBrain {
    config: ScoutConfig,
    alert: AlertMachine,
    throttle: MessageThrottle,
    wander: Wander,
    target: Option<Vec2>,
}

impl ScoutBrain {
    pub fn new(config: ScoutConfig) -> Self {
        Self {
            alert: AlertMachine::new(config.cooldown_window),
            throttle: MessageThrottle::default(),
            wander: Wander::new(config.wander_timeout_secs),
            target: None,
            config,
        }
    }

    pub fn alert(&self) -> &AlertMachine {
        &self.alert
    }

    pub fn throttle(&self) -> &MessageThrottle {
        &self.throttle
    }

    pub fn wander(&self) -> &Wander {
        &self.wander
    }

    pub fn target(&self) -> Option<Vec2> {
        self.target
    }

    pub fn decide<R: Rng + ?Sized>(&mut self, body: &Kinematic, ctx: &mut DecisionContext<'_, R>) -> GuardDecision {
        self.throttle.tick();
        let speed = current_speed_scale(1.0, ctx.objectives);

        if ctx.blackboard.take_signal(Archetype::Responder, SignalToken::Pursuit) {
            self.wander.abandon();
            crate::logger::log("Scout: teammate reports pursuit → dropping wander waypoint");
        }

        let sighted = ctx.percept.target_position(body.position);

        match self.alert.step(sighted.is_some()) {
            AlertStep::Triggered => {
                self.target = sighted;
                if let Some(position) = sighted {
                    ctx.blackboard.post(Archetype::Scout, BlackboardValue::Position(position));
                }
                crate::logger::log(&format!("Scout: Idle → Alert (target at {:?})", sighted));

                let signal = self
                    .throttle
                    .try_emit(SCOUT_TAUNT, self.config.signal_duration_ms, ctx.tick_hz);
                GuardDecision::steer(self.seek_target(body), speed).with_signal(signal)
            }

            AlertStep::Decaying => {
                if let Some(position) = sighted {
                    self.target = Some(position);
                    ctx.blackboard.post(Archetype::Scout, BlackboardValue::Position(position));
                }
                GuardDecision::steer(self.seek_target(body), speed)
            }

            AlertStep::Expired => {
                self.target = None;
                ctx.blackboard.clear(Archetype::Scout);
                crate::logger::log("Scout: Cooldown → Idle");
                self.wander_step(body, ctx, speed)
            }

            AlertStep::Idle => self.wander_step(body, ctx, speed),
        }
    }

    fn seek_target(&self, body: &Kinematic) -> f32 {
        self.target
            .map(|target| seek(body, target, self.config.max_turn_per_tick))
            .unwrap_or(0.0)
    }

    fn wander_step<R: Rng + ?Sized>(
        &mut self,
        body: &Kinematic,
        ctx: &mut DecisionContext<'_, R>,
        speed: f32,
    ) -> GuardDecision {
        let turn = self
            .wander
            .steer(body, ctx.field, ctx.dt, self.config.max_turn_per_tick, &mut *ctx.rng);
        GuardDecision::steer(turn, speed)
    }
}
