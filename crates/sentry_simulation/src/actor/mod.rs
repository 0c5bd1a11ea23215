//! Actor domain — спавн игрока, целей и охранников
//!
//! Начальный heading охранника случайный (через DeterministicRng),
//! параметры тела и конуса берутся из SimulationConfig.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::PI;

use crate::ai::archetypes::{Archetype, GuardBrain};
use crate::components::{wrap_angle, Kinematic, Objective, Player, PlayerIntent};
use crate::config::{BodyConfig, SimulationConfig};
use crate::vision::VisionCone;
use crate::DeterministicRng;

/// Равномерно случайный heading в (-π, π]
pub fn random_heading<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    wrap_angle(rng.gen_range(-PI..PI))
}

/// Тело архетипа из конфигурации
pub fn body_config(archetype: Archetype, config: &SimulationConfig) -> BodyConfig {
    match archetype {
        Archetype::Scout => config.scout.body,
        Archetype::Responder => config.responder.body,
        Archetype::Patroller => config.patroller.body,
    }
}

/// Компоненты охранника: поведение + тело + конус
pub fn guard_bundle(
    archetype: Archetype,
    position: Vec2,
    heading: f32,
    config: &SimulationConfig,
) -> (GuardBrain, Kinematic, VisionCone, Name) {
    let vision = match archetype {
        Archetype::Scout => config.scout.vision,
        Archetype::Responder => config.responder.vision,
        Archetype::Patroller => config.patroller.vision,
    };

    (
        GuardBrain::for_archetype(archetype, config),
        Kinematic::new(position, heading, &body_config(archetype, config)),
        VisionCone::from(vision),
        Name::new(archetype.name()),
    )
}

fn session_config(world: &World) -> SimulationConfig {
    world.get_resource::<SimulationConfig>().cloned().unwrap_or_default()
}

/// Спавн охранника со случайным начальным heading
///
/// Без DeterministicRng в мире heading = 0.
pub fn spawn_guard(world: &mut World, archetype: Archetype, position: Vec2) -> Entity {
    let config = session_config(world);
    let heading = world
        .get_resource_mut::<DeterministicRng>()
        .map(|mut rng| random_heading(&mut rng.rng))
        .unwrap_or(0.0);

    let entity = world.spawn(guard_bundle(archetype, position, heading, &config)).id();
    crate::logger::log(&format!(
        "Spawned {} {:?} at {:?} (heading {:.3})",
        archetype.name(),
        entity,
        position,
        heading
    ));
    entity
}

pub fn spawn_player(world: &mut World, position: Vec2, heading: f32) -> Entity {
    let config = session_config(world);
    world
        .spawn((
            Player,
            PlayerIntent::default(),
            Kinematic::new(position, heading, &config.player.body),
            Name::new("Player"),
        ))
        .id()
}

pub fn spawn_objective(world: &mut World, position: Vec2) -> Entity {
    let config = session_config(world);
    world
        .spawn((Objective::new(position, config.objective_radius), Name::new("Objective")))
        .id()
}

/// Сцена по умолчанию: игрок, три цели, по одному охраннику каждого архетипа
pub struct DefaultScene {
    pub player: Entity,
    pub objectives: Vec<Entity>,
    pub guards: Vec<Entity>,
}

pub fn spawn_default_scene(world: &mut World) -> DefaultScene {
    let config = session_config(world);
    let width = config.field_width;
    let height = config.field_height;

    let player = spawn_player(world, Vec2::new(width * 0.5, height * 0.9), -PI / 2.0);

    let objectives = [
        Vec2::new(width * 0.15, height * 0.2),
        Vec2::new(width * 0.5, height * 0.15),
        Vec2::new(width * 0.85, height * 0.2),
    ]
    .into_iter()
    .map(|position| spawn_objective(world, position))
    .collect();

    let guards = [
        (Archetype::Scout, Vec2::new(width * 0.25, height * 0.5)),
        (Archetype::Responder, Vec2::new(width * 0.5, height * 0.4)),
        (Archetype::Patroller, Vec2::new(width * 0.75, height * 0.5)),
    ]
    .into_iter()
    .map(|(archetype, position)| spawn_guard(world, archetype, position))
    .collect();

    DefaultScene {
        player,
        objectives,
        guards,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_heading_is_wrapped() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let heading = random_heading(&mut rng);
            assert!(heading > -PI && heading <= PI);
        }
    }

    #[test]
    fn test_spawn_guard_uses_archetype_config() {
        let mut world = World::new();
        world.insert_resource(SimulationConfig::default());
        world.insert_resource(DeterministicRng::new(1));

        let patroller = spawn_guard(&mut world, Archetype::Patroller, Vec2::new(10.0, 20.0));
        let body = world.get::<Kinematic>(patroller).unwrap();
        assert_eq!(body.position, Vec2::new(10.0, 20.0));
        assert_eq!(body.base_speed, 160.0);
        assert_eq!(world.get::<GuardBrain>(patroller).unwrap().archetype(), Archetype::Patroller);

        let responder = spawn_guard(&mut world, Archetype::Responder, Vec2::ZERO);
        assert_eq!(world.get::<VisionCone>(responder).unwrap().half_angle, 0.05);
    }

    #[test]
    fn test_same_seed_same_spawn_headings() {
        let headings = |seed| {
            let mut world = World::new();
            world.insert_resource(DeterministicRng::new(seed));
            let scene = spawn_default_scene(&mut world);
            scene
                .guards
                .iter()
                .map(|guard| world.get::<Kinematic>(*guard).unwrap().heading())
                .collect::<Vec<_>>()
        };
        assert_eq!(headings(99), headings(99));
    }

    #[test]
    fn test_default_scene_layout() {
        let mut world = World::new();
        let scene = spawn_default_scene(&mut world);

        assert_eq!(scene.objectives.len(), 3);
        assert_eq!(scene.guards.len(), 3);
        assert!(world.get::<Player>(scene.player).is_some());
        // Без RNG heading = 0
        for guard in &scene.guards {
            assert_eq!(world.get::<Kinematic>(*guard).unwrap().heading(), 0.0);
        }
    }
}
