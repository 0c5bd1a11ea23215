//! FSM AI components (alert machine, cooldown, message throttle, decision).

use bevy::prelude::*;

/// Фаза автомата охранника
///
/// Idle → Alert (cooldown == 0 && цель видна) → Cooldown (decay) → Idle.
/// Терминального состояния нет.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum AlertPhase {
    /// Idle/Patrol — wander или патруль
    #[default]
    Idle,
    /// Тик срабатывания (cooldown только что взведён)
    Alert,
    /// Cooldown-decay — преследуем последнюю известную позицию
    Cooldown,
}

/// Что произошло с автоматом на этом тике
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStep {
    /// Idle → Alert, cooldown взведён
    Triggered,
    /// cooldown > 0, уменьшен на 1
    Decaying,
    /// cooldown был 0 и новой детекции нет → вернулись в Idle
    Expired,
    /// Остаёмся в Idle
    Idle,
}

/// Общий автомат Idle/Alert/Cooldown всех архетипов
///
/// Инвариант: после срабатывания `cooldown_ticks` уменьшается ровно на 1 за тик;
/// возврат в Idle — ровно через один тик после достижения 0 (если нет новой детекции).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct AlertMachine {
    phase: AlertPhase,
    cooldown_ticks: u32,
    window: u32,
}

impl AlertMachine {
    pub fn new(window: u32) -> Self {
        debug_assert!(window > 0, "cooldown window must be at least one tick");
        Self {
            phase: AlertPhase::Idle,
            cooldown_ticks: 0,
            window,
        }
    }

    pub fn phase(&self) -> AlertPhase {
        self.phase
    }

    pub fn cooldown_ticks(&self) -> u32 {
        self.cooldown_ticks
    }

    pub fn window(&self) -> u32 {
        self.window
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_ticks == 0
    }

    /// Alert или Cooldown
    pub fn is_engaged(&self) -> bool {
        self.phase != AlertPhase::Idle
    }

    /// Доля оставшегося cooldown (1.0 в тике срабатывания, 0.0 на выходе)
    pub fn fraction_remaining(&self) -> f32 {
        self.cooldown_ticks as f32 / self.window as f32
    }

    /// Один тик автомата
    pub fn step(&mut self, detected: bool) -> AlertStep {
        if self.cooldown_ticks > 0 {
            self.cooldown_ticks -= 1;
            self.phase = AlertPhase::Cooldown;
            return AlertStep::Decaying;
        }

        if detected {
            self.cooldown_ticks = self.window;
            self.phase = AlertPhase::Alert;
            return AlertStep::Triggered;
        }

        let was_engaged = self.is_engaged();
        self.phase = AlertPhase::Idle;
        if was_engaged {
            AlertStep::Expired
        } else {
            AlertStep::Idle
        }
    }
}

/// Сообщение охранника для UI (текст + длительность показа)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardSignal {
    pub text: &'static str,
    pub duration_ms: u32,
}

/// Throttle сообщений: новое только после полного истечения предыдущего
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub struct MessageThrottle {
    message_active: bool,
    remaining_ticks: u32,
}

impl MessageThrottle {
    pub fn is_active(&self) -> bool {
        self.message_active
    }

    pub fn remaining_ticks(&self) -> u32 {
        self.remaining_ticks
    }

    /// Decay на тик (вызывается в начале каждого decide)
    pub fn tick(&mut self) {
        if !self.message_active {
            return;
        }
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        if self.remaining_ticks == 0 {
            self.message_active = false;
        }
    }

    /// Эмитит сигнал если предыдущий уже погас
    pub fn try_emit(&mut self, text: &'static str, duration_ms: u32, tick_hz: f32) -> Option<GuardSignal> {
        if self.message_active {
            return None;
        }

        self.message_active = true;
        self.remaining_ticks = ticks_for_duration(duration_ms, tick_hz);
        Some(GuardSignal { text, duration_ms })
    }
}

/// Длительность в мс → тики (минимум 1)
pub fn ticks_for_duration(duration_ms: u32, tick_hz: f32) -> u32 {
    let ticks = (duration_ms as f32 * tick_hz / 1000.0).ceil();
    (ticks as u32).max(1)
}

/// Выход decide за один тик
///
/// turn_delta → `Kinematic::turn`, speed_scale умножает base_speed в `Kinematic::advance`,
/// signal уходит в UI и не связан с записями в Blackboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuardDecision {
    pub turn_delta: f32,
    pub speed_scale: f32,
    pub signal: Option<GuardSignal>,
}

impl GuardDecision {
    pub fn steer(turn_delta: f32, speed_scale: f32) -> Self {
        Self {
            turn_delta,
            speed_scale: speed_scale.max(0.0),
            signal: None,
        }
    }

    pub fn with_signal(mut self, signal: Option<GuardSignal>) -> Self {
        self.signal = signal;
        self
    }
}
