//! SENTRY Simulation Core
//!
//! Охранники в top-down pursuit игре на Bevy 0.16 ECS (headless):
//! конус обзора → Percept, seek/wander steering, FSM по архетипам,
//! координация через Blackboard. Рендер, input и звук — внешние collaborators.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod actor;
pub mod ai;
pub mod components;
pub mod config;
pub mod environment;
pub mod logger;
pub mod steering;
pub mod vision;

// Re-export базовых типов для удобства
pub use actor::{spawn_default_scene, spawn_guard, spawn_objective, spawn_player, DefaultScene};
pub use ai::{
    AIPlugin, AlertPhase, Archetype, Blackboard, BlackboardValue, GuardBrain, GuardSignalEmitted, ObjectiveCompleted,
    PlayerCaught, SignalToken,
};
pub use components::*;
pub use config::{ConfigError, SimulationConfig};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use vision::{Percept, VisionCone};

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Берёт SimulationConfig из мира, если он уже вставлен, иначе — Default.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<SimulationConfig>()
            .cloned()
            .unwrap_or_default();

        if !app.world().contains_resource::<DeterministicRng>() {
            // Детерминистичный RNG (seed по умолчанию)
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep из конфигурации (60Hz по умолчанию)
            .insert_resource(Time::<Fixed>::from_hz(config.tick_hz as f64))
            .insert_resource(PlayField(config.play_field()))
            // Blackboard сбрасывается на старте сессии
            .insert_resource(Blackboard::default())
            .insert_resource(SimulationTick::default())
            .insert_resource(config)
            .add_plugins(AIPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Номер текущего тика симуляции (FixedUpdate)
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimulationTick(pub u64);

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время двигается ровно на один fixed step за `app.update()`,
/// так что один update = один тик, независимо от wall-clock.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    let config = SimulationConfig::default();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / config.tick_hz as f64,
        )))
        .insert_resource(Time::<Fixed>::from_hz(config.tick_hz as f64)); // 60Hz FixedUpdate

    app
}

/// Прогоняет ровно `ticks` тиков FixedUpdate, минуя wall-clock
pub fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.world_mut().run_schedule(FixedUpdate);
    }
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
