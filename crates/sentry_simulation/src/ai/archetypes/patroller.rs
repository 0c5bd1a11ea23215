//! Patroller — быстрый преследователь, знающий границы арены
//!
//! Idle: едет прямо на высокой скорости, отражается от стен
//! (пока смотрит наружу — стоит на месте, см. `hold_inside`).
//! Alert: lock-on на короткое окно, seek каждый тик, одно alert-сообщение,
//! последняя известная позиция цели уходит в Blackboard.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::PI;

use crate::ai::archetypes::{Archetype, DecisionContext};
use crate::ai::blackboard::BlackboardValue;
use crate::ai::components::{AlertMachine, AlertStep, GuardDecision, MessageThrottle};
use crate::components::{wrap_angle, Kinematic, PlayField};
use crate::config::PatrollerConfig;
use crate::environment::current_speed_scale;
use crate::steering::{face_heading, seek};

pub const PATROLLER_ALERT: &str = "Enemy!";

/// Отражённый heading, если актор в пределах радиуса от стены и едет наружу
///
/// Вертикальная стена: `π - h`, горизонтальная: `-h`, угол: обе сразу (`h + π`).
/// Каждый квадрант обрабатывается явно, по знаку компоненты facing.
pub fn reflect_heading(body: &Kinematic, field: &PlayField) -> Option<f32> {
    let rect = field.rect();
    let position = body.position;
    let facing = body.facing();
    let heading = body.heading();

    let near_left = position.x - body.radius <= rect.min.x;
    let near_right = position.x + body.radius >= rect.max.x;
    let near_top = position.y - body.radius <= rect.min.y;
    let near_bottom = position.y + body.radius >= rect.max.y;

    let flip_x = (near_left && facing.x < 0.0) || (near_right && facing.x > 0.0);
    let flip_y = (near_top && facing.y < 0.0) || (near_bottom && facing.y > 0.0);

    match (flip_x, flip_y) {
        (false, false) => None,
        (true, false) => Some(wrap_angle(PI - heading)),
        (false, true) => Some(wrap_angle(-heading)),
        (true, true) => Some(wrap_angle(heading + PI)),
    }
}

#[derive(Debug, Clone)]
pub struct PatrollerBrain {
    config: PatrollerConfig,
    alert: AlertMachine,
    throttle: MessageThrottle,
    target: Option<Vec2>,
    /// Heading, к которому разворачиваемся после касания стены
    bounce: Option<f32>,
}

impl PatrollerBrain {
    pub fn new(config: PatrollerConfig) -> Self {
        Self {
            alert: AlertMachine::new(config.cooldown_window),
            throttle: MessageThrottle::default(),
            target: None,
            bounce: None,
            config,
        }
    }

    pub fn alert(&self) -> &AlertMachine {
        &self.alert
    }

    pub fn throttle(&self) -> &MessageThrottle {
        &self.throttle
    }

    pub fn target(&self) -> Option<Vec2> {
        self.target
    }

    pub fn bounce_heading(&self) -> Option<f32> {
        self.bounce
    }

    pub fn decide<R: Rng + ?Sized>(&mut self, body: &Kinematic, ctx: &mut DecisionContext<'_, R>) -> GuardDecision {
        self.throttle.tick();
        let speed = current_speed_scale(1.0, ctx.objectives);

        let sighted = ctx.percept.target_position(body.position);
        if let Some(position) = sighted {
            ctx.blackboard.post(Archetype::Patroller, BlackboardValue::Position(position));
        }

        let mut signal = None;
        match self.alert.step(sighted.is_some()) {
            AlertStep::Triggered => {
                self.target = sighted;
                crate::logger::log(&format!("Patroller: Idle → Alert (target at {:?})", sighted));
                signal = self
                    .throttle
                    .try_emit(PATROLLER_ALERT, self.config.signal_duration_ms, ctx.tick_hz);
            }
            AlertStep::Decaying => {
                if sighted.is_some() {
                    self.target = sighted;
                }
            }
            AlertStep::Expired => {
                self.target = None;
                ctx.blackboard.take_position(Archetype::Patroller);
                crate::logger::log("Patroller: Cooldown → Idle");
            }
            AlertStep::Idle => {}
        }

        // Во время lock-on seek каждый тик, от стен держит только containment
        if self.alert.is_engaged() {
            self.bounce = None;
        } else if self.bounce.is_none() {
            // Отражение фиксируется один раз и держится до разворота
            self.bounce = reflect_heading(body, ctx.field);
        }

        if let Some(bounce) = self.bounce {
            let delta = face_heading(body, bounce);
            if delta.abs() > self.config.bounce_tolerance {
                return GuardDecision::steer(delta, speed * self.config.bounce_speed_factor)
                    .with_signal(signal);
            }
            self.bounce = None;
        }

        let turn = match (self.alert.is_engaged(), self.target) {
            (true, Some(target)) => seek(body, target, self.config.max_turn_per_tick),
            _ => 0.0,
        };
        GuardDecision::steer(turn, speed).with_signal(signal)
    }
}
