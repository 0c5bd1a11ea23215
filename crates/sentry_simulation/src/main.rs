//! Headless симуляция SENTRY
//!
//! Запускает Bevy App без рендера: игрок едет по скрипту, охранники патрулируют и преследуют.

use sentry_simulation::{
    create_headless_app, log_error, spawn_default_scene, GuardBrain, PlayerIntent, SimulationConfig,
    SimulationPlugin, SimulationTick,
};

/// Скриптовый input: змейка по арене с периодическими разворотами
fn scripted_intent(tick: usize) -> PlayerIntent {
    let phase = (tick / 90) % 4;
    let turn = match phase {
        0 => 0.0,
        1 => 0.6,
        2 => 0.0,
        _ => -0.6,
    };
    PlayerIntent { turn, throttle: 1.0 }
}

fn main() {
    let seed = 42;
    println!("Starting SENTRY headless simulation (seed: {})", seed);

    let config = SimulationConfig::default();
    if let Err(error) = config.validate() {
        log_error(&format!("Invalid simulation config: {}", error));
        std::process::exit(1);
    }

    let mut app = create_headless_app(seed);
    app.insert_resource(config).add_plugins(SimulationPlugin);
    let scene = spawn_default_scene(app.world_mut());

    // Запускаем 1000 тиков симуляции
    for tick in 0..1000 {
        if let Some(mut intent) = app.world_mut().get_mut::<PlayerIntent>(scene.player) {
            *intent = scripted_intent(tick);
        }

        app.update();

        if tick % 100 == 0 {
            let world = app.world_mut();
            let sim_tick = world.resource::<SimulationTick>().0;
            let phases: Vec<String> = world
                .query::<&GuardBrain>()
                .iter(world)
                .map(|brain| format!("{}={:?}", brain.archetype().name(), brain.phase()))
                .collect();
            println!("Tick {} (fixed {}): {}", tick, sim_tick, phases.join(", "));
        }
    }

    println!("Simulation complete!");
}
