//! Responder — быстрый реактивный chaser
//!
//! Конус сжат в узкую щель, wander почти нулевой. Три независимых триггера
//! в порядке приоритета: прямой Percept → отчёт Scout → отчёт Patroller.
//! Погоня даёт burst скорости (пик → 0 линейно за окно cooldown),
//! view_distance сжимается во время погони и восстанавливается после.
//! Каждая выполненная цель навсегда добавляет обзора.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::archetypes::{Archetype, DecisionContext};
use crate::ai::blackboard::{Blackboard, BlackboardValue, SignalToken};
use crate::ai::components::{AlertMachine, AlertStep, GuardDecision, MessageThrottle};
use crate::components::Kinematic;
use crate::config::ResponderConfig;
use crate::environment::{completed_count, speed_scale_for};
use crate::steering::{seek, Wander};
use crate::vision::VisionCone;

pub const RESPONDER_SIGHTED: &str = "I see you!";
pub const RESPONDER_ON_IT: &str = "On it!";
pub const RESPONDER_ON_MY_WAY: &str = "On my way!";

/// Откуда Responder узнал о цели
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lead {
    /// Сам увидел
    Sighted,
    /// Отчёт Scout из Blackboard
    ScoutReport,
    /// Отчёт Patroller из Blackboard
    PatrollerReport,
}

impl Lead {
    pub fn acknowledgement(self) -> &'static str {
        match self {
            Lead::Sighted => RESPONDER_SIGHTED,
            Lead::ScoutReport => RESPONDER_ON_IT,
            Lead::PatrollerReport => RESPONDER_ON_MY_WAY,
        }
    }
}

/// Позиция из слота Blackboard без потребления
fn reported_position(board: &Blackboard, key: Archetype) -> Option<Vec2> {
    match board.get(key) {
        Some(BlackboardValue::Position(position)) => Some(position),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct ResponderBrain {
    config: ResponderConfig,
    alert: AlertMachine,
    throttle: MessageThrottle,
    wander: Wander,
    target: Option<Vec2>,
    view_distance: f32,
}

impl ResponderBrain {
    pub fn new(config: ResponderConfig) -> Self {
        Self {
            alert: AlertMachine::new(config.cooldown_window),
            throttle: MessageThrottle::default(),
            wander: Wander::new(config.wander_timeout_secs),
            target: None,
            view_distance: config.vision.view_distance,
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

    pub fn view_distance(&self) -> f32 {
        self.view_distance
    }

    /// Burst: `peak * cooldown_ticks / window` (4.5 в первом тике погони, 0 на выходе)
    pub fn burst_multiplier(&self) -> f32 {
        self.config.burst_peak * self.alert.fraction_remaining()
    }

    /// Базовый обзор с учётом постоянного бонуса за выполненные цели
    pub fn baseline_view(&self, completed: usize) -> f32 {
        self.config.vision.view_distance + self.config.view_growth_per_objective * completed as f32
    }

    pub fn decide<R: Rng + ?Sized>(
        &mut self,
        body: &Kinematic,
        cone: &mut VisionCone,
        ctx: &mut DecisionContext<'_, R>,
    ) -> GuardDecision {
        self.throttle.tick();

        let completed = completed_count(ctx.objectives);
        let environment = speed_scale_for(1.0, completed);
        let baseline = self.baseline_view(completed);

        // Используется самый приоритетный источник, потребляется только его отчёт
        let sighted = ctx.percept.target_position(body.position);
        let scout_report = reported_position(ctx.blackboard, Archetype::Scout);
        let patroller_report = reported_position(ctx.blackboard, Archetype::Patroller);

        let lead = sighted
            .map(|position| (position, Lead::Sighted))
            .or_else(|| scout_report.map(|position| (position, Lead::ScoutReport)))
            .or_else(|| patroller_report.map(|position| (position, Lead::PatrollerReport)));

        match lead {
            Some((_, Lead::ScoutReport)) => {
                ctx.blackboard.take_position(Archetype::Scout);
            }
            Some((_, Lead::PatrollerReport)) => {
                ctx.blackboard.take_position(Archetype::Patroller);
            }
            Some((_, Lead::Sighted)) | None => {}
        }

        let decision = match self.alert.step(lead.is_some()) {
            AlertStep::Triggered => {
                let mut signal = None;
                if let Some((position, source)) = lead {
                    self.target = Some(position);
                    crate::logger::log(&format!(
                        "Responder: Idle → Alert ({:?}, target at {:?})",
                        source, position
                    ));
                    signal = self.throttle.try_emit(
                        source.acknowledgement(),
                        self.config.signal_duration_ms,
                        ctx.tick_hz,
                    );
                }
                ctx.blackboard
                    .post(Archetype::Responder, BlackboardValue::Signal(SignalToken::Pursuit));

                self.chase_step(body, baseline, environment).with_signal(signal)
            }

            AlertStep::Decaying => {
                if let Some((position, _)) = lead {
                    self.target = Some(position);
                }
                self.chase_step(body, baseline, environment)
            }

            AlertStep::Expired => {
                self.target = None;
                ctx.blackboard.take_signal(Archetype::Responder, SignalToken::Pursuit);
                crate::logger::log("Responder: Cooldown → Idle");
                self.idle_step(body, baseline, environment, ctx)
            }

            AlertStep::Idle => self.idle_step(body, baseline, environment, ctx),
        };

        cone.half_angle = self.config.vision.half_angle;
        cone.view_distance = self.view_distance;
        decision
    }

    fn chase_step(&mut self, body: &Kinematic, baseline: f32, environment: f32) -> GuardDecision {
        let floor = baseline * self.config.min_view_fraction;
        self.view_distance = (self.view_distance - self.config.view_contract_per_tick).max(floor);

        let turn = self
            .target
            .map(|target| seek(body, target, self.config.chase_max_turn))
            .unwrap_or(0.0);
        GuardDecision::steer(turn, environment * self.burst_multiplier().max(1.0))
    }

    fn idle_step<R: Rng + ?Sized>(
        &mut self,
        body: &Kinematic,
        baseline: f32,
        environment: f32,
        ctx: &mut DecisionContext<'_, R>,
    ) -> GuardDecision {
        self.view_distance = (self.view_distance + self.config.view_regen_per_tick).min(baseline);

        let turn = self
            .wander
            .steer(body, ctx.field, ctx.dt, self.config.wander_max_turn, &mut *ctx.rng);
        GuardDecision::steer(turn, environment)
    }
}
