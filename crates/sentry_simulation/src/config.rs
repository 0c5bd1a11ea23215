//! Конфигурация симуляции: tick rate, арена, тюнинг архетипов
//!
//! Все значения по умолчанию — игровые константы (60 тиков/сек, арена 800×600).
//! Outer collaborator может сериализовать/загрузить конфиг через serde,
//! `validate()` ловит нарушения контрактов до старта сессии.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_6};
use thiserror::Error;

/// Длительность сообщения охранника по умолчанию (мс)
pub const DEFAULT_SIGNAL_DURATION_MS: u32 = 2000;

/// Ошибки конфигурации (programming-contract violations)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("tick rate must be positive, got {0}")]
    NonPositiveTickRate(f32),

    #[error("play field must have positive size, got {width}x{height}")]
    EmptyPlayField { width: f32, height: f32 },

    #[error("{actor}: radius must be positive, got {radius}")]
    NonPositiveRadius { actor: &'static str, radius: f32 },

    #[error("{actor}: base speed must be non-negative, got {speed}")]
    NegativeSpeed { actor: &'static str, speed: f32 },

    #[error("{actor}: turn rate must be non-negative, got {turn_rate}")]
    NegativeTurnRate { actor: &'static str, turn_rate: f32 },

    #[error("{actor}: cone half-angle must be in (0, pi/2), got {half_angle}")]
    HalfAngleOutOfRange { actor: &'static str, half_angle: f32 },

    #[error("{actor}: view distance must be positive, got {view_distance}")]
    NonPositiveViewDistance { actor: &'static str, view_distance: f32 },

    #[error("{actor}: cooldown window must be at least one tick")]
    ZeroCooldownWindow { actor: &'static str },

    #[error("{actor}: max turn per tick must be positive, got {max_turn}")]
    NonPositiveMaxTurn { actor: &'static str, max_turn: f32 },
}

/// Кинематические параметры актора (radius, speed, turn rate)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub radius: f32,
    /// Единиц в секунду
    pub base_speed: f32,
    /// Радиан в секунду
    pub turn_rate: f32,
}

impl BodyConfig {
    fn validate(&self, actor: &'static str) -> Result<(), ConfigError> {
        if self.radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius { actor, radius: self.radius });
        }
        if self.base_speed < 0.0 {
            return Err(ConfigError::NegativeSpeed { actor, speed: self.base_speed });
        }
        if self.turn_rate < 0.0 {
            return Err(ConfigError::NegativeTurnRate { actor, turn_rate: self.turn_rate });
        }
        Ok(())
    }
}

/// Параметры конуса обзора
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisionConfig {
    pub half_angle: f32,
    pub view_distance: f32,
}

impl VisionConfig {
    fn validate(&self, actor: &'static str) -> Result<(), ConfigError> {
        if !(self.half_angle > 0.0 && self.half_angle < FRAC_PI_2) {
            return Err(ConfigError::HalfAngleOutOfRange { actor, half_angle: self.half_angle });
        }
        if self.view_distance <= 0.0 {
            return Err(ConfigError::NonPositiveViewDistance {
                actor,
                view_distance: self.view_distance,
            });
        }
        Ok(())
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            half_angle: FRAC_PI_6,
            view_distance: 120.0,
        }
    }
}

fn guard_body() -> BodyConfig {
    BodyConfig {
        radius: 10.0,
        base_speed: 90.0,
        turn_rate: 3.0,
    }
}

fn check_cooldown(actor: &'static str, window: u32) -> Result<(), ConfigError> {
    if window == 0 {
        return Err(ConfigError::ZeroCooldownWindow { actor });
    }
    Ok(())
}

fn check_max_turn(actor: &'static str, max_turn: f32) -> Result<(), ConfigError> {
    if max_turn <= 0.0 {
        return Err(ConfigError::NonPositiveMaxTurn { actor, max_turn });
    }
    Ok(())
}

/// Игрок: управляется input collaborator'ом, без сенсора
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub body: BodyConfig,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            body: BodyConfig {
                radius: 10.0,
                base_speed: 100.0,
                turn_rate: 5.0,
            },
        }
    }
}

/// Scout — лёгкий патрульный: wander + taunt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoutConfig {
    pub body: BodyConfig,
    pub vision: VisionConfig,
    pub max_turn_per_tick: f32,
    /// Окно cooldown в тиках (≈4 сек при 60Hz)
    pub cooldown_window: u32,
    /// Wander: смена waypoint через N секунд
    pub wander_timeout_secs: f32,
    pub signal_duration_ms: u32,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            body: guard_body(),
            vision: VisionConfig::default(),
            max_turn_per_tick: 0.3,
            cooldown_window: 60 * 4,
            wander_timeout_secs: 0.3,
            signal_duration_ms: DEFAULT_SIGNAL_DURATION_MS,
        }
    }
}

/// Responder — быстрый реактивный chaser с burst-скоростью
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResponderConfig {
    pub body: BodyConfig,
    /// Узкая щель обзора (half_angle близок к нулю)
    pub vision: VisionConfig,
    pub chase_max_turn: f32,
    /// Почти нулевой wander rate
    pub wander_max_turn: f32,
    pub cooldown_window: u32,
    /// Пиковый множитель скорости в первом тике погони
    pub burst_peak: f32,
    /// Сжатие view_distance за тик погони
    pub view_contract_per_tick: f32,
    /// Восстановление view_distance за тик после погони
    pub view_regen_per_tick: f32,
    /// Нижняя граница сжатия (доля от baseline)
    pub min_view_fraction: f32,
    /// Постоянный прирост обзора за каждую выполненную цель
    pub view_growth_per_objective: f32,
    pub wander_timeout_secs: f32,
    pub signal_duration_ms: u32,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            body: guard_body(),
            vision: VisionConfig {
                half_angle: 0.05,
                view_distance: 120.0,
            },
            chase_max_turn: 0.4,
            wander_max_turn: 0.02,
            cooldown_window: 60,
            burst_peak: 4.5,
            view_contract_per_tick: 0.5,
            view_regen_per_tick: 0.25,
            min_view_fraction: 0.5,
            view_growth_per_objective: 1.0,
            wander_timeout_secs: 0.3,
            signal_duration_ms: DEFAULT_SIGNAL_DURATION_MS,
        }
    }
}

/// Patroller — быстрый преследователь, отражается от границ арены
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatrollerConfig {
    pub body: BodyConfig,
    pub vision: VisionConfig,
    pub max_turn_per_tick: f32,
    /// Короткий lock-on (1.5 сек)
    pub cooldown_window: u32,
    /// Множитель скорости пока разворачивается от стены
    pub bounce_speed_factor: f32,
    /// Разворот считается завершённым при |Δheading| меньше этого
    pub bounce_tolerance: f32,
    pub signal_duration_ms: u32,
}

impl Default for PatrollerConfig {
    fn default() -> Self {
        Self {
            body: BodyConfig {
                radius: 10.0,
                base_speed: 160.0,
                turn_rate: 6.0,
            },
            vision: VisionConfig::default(),
            max_turn_per_tick: 0.4,
            cooldown_window: 90,
            bounce_speed_factor: 0.25,
            bounce_tolerance: 0.05,
            signal_duration_ms: DEFAULT_SIGNAL_DURATION_MS,
        }
    }
}

/// Конфигурация сессии
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub tick_hz: f32,
    pub field_width: f32,
    pub field_height: f32,
    pub objective_radius: f32,
    pub player: PlayerConfig,
    pub scout: ScoutConfig,
    pub responder: ResponderConfig,
    pub patroller: PatrollerConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            field_width: 800.0,
            field_height: 600.0,
            objective_radius: 20.0,
            player: PlayerConfig::default(),
            scout: ScoutConfig::default(),
            responder: ResponderConfig::default(),
            patroller: PatrollerConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Фиксированный шаг симуляции (секунды)
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_hz
    }

    /// Арена в мировых координатах (origin в левом верхнем углу)
    pub fn play_field(&self) -> Rect {
        Rect::new(0.0, 0.0, self.field_width, self.field_height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_hz <= 0.0 {
            return Err(ConfigError::NonPositiveTickRate(self.tick_hz));
        }
        if self.field_width <= 0.0 || self.field_height <= 0.0 {
            return Err(ConfigError::EmptyPlayField {
                width: self.field_width,
                height: self.field_height,
            });
        }
        if self.objective_radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius {
                actor: "objective",
                radius: self.objective_radius,
            });
        }

        self.player.body.validate("player")?;

        self.scout.body.validate("scout")?;
        self.scout.vision.validate("scout")?;
        check_max_turn("scout", self.scout.max_turn_per_tick)?;
        check_cooldown("scout", self.scout.cooldown_window)?;

        self.responder.body.validate("responder")?;
        self.responder.vision.validate("responder")?;
        check_max_turn("responder", self.responder.chase_max_turn)?;
        check_max_turn("responder", self.responder.wander_max_turn)?;
        check_cooldown("responder", self.responder.cooldown_window)?;

        self.patroller.body.validate("patroller")?;
        self.patroller.vision.validate("patroller")?;
        check_max_turn("patroller", self.patroller.max_turn_per_tick)?;
        check_cooldown("patroller", self.patroller.cooldown_window)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.scout.cooldown_window, 240);
        assert_eq!(config.responder.burst_peak, 4.5);
    }

    #[test]
    fn test_tick_dt() {
        let config = SimulationConfig::default();
        assert!((config.tick_dt() - 1.0 / 60.0).abs() < 1e-7);
    }

    #[test]
    fn test_negative_radius_rejected() {
        let mut config = SimulationConfig::default();
        config.patroller.body.radius = -1.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveRadius { actor: "patroller", radius: -1.0 })
        );
    }

    #[test]
    fn test_zero_cooldown_rejected() {
        let mut config = SimulationConfig::default();
        config.responder.cooldown_window = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroCooldownWindow { actor: "responder" })
        );
    }

    #[test]
    fn test_wide_cone_rejected() {
        let mut config = SimulationConfig::default();
        config.scout.vision.half_angle = 2.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::HalfAngleOutOfRange { actor: "scout", .. })
        ));
    }
}
