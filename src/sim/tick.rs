//! Per-tick world update
//!
//! Core game loop step. Everything scales by the time factor `dt`, so a
//! factor of 0 leaves the world untouched.

use super::collision::resolve_collisions;
use super::entities::{EnemyEnv, EnemyKind, purge, sweep};
use super::spawner;
use super::state::{GameEvent, World};
use crate::input::InputState;

/// Advance the world by one host frame
pub fn tick(world: &mut World, input: &InputState, dt: f32) {
    if dt.is_nan() || dt <= 0.0 {
        return;
    }
    world.time_ticks += 1;

    spawner::spawn(world, dt);
    advance_entities(world, dt);

    world
        .player
        .update(input, &world.platforms, &world.tuning, dt, &mut world.events);

    resolve_collisions(world);
    ramp_speed(world);
    purge_marked(world);

    if !world.player_dead
        && world
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::PlayerDied(_)))
    {
        world.player_dead = true;
        log::info!("Player died at tick {} with score {}", world.time_ticks, world.score);
    }
}

/// Scroll and animate everything except the player
fn advance_entities(world: &mut World, dt: f32) {
    let speed = world.speed;

    sweep(&mut world.platforms, |p| p.advance(speed, dt));

    let env = EnemyEnv {
        platforms: &world.platforms,
        speed,
        gravity: world.tuning.world.gravity,
        floor: world.tuning.world.height,
    };
    let rng = &mut world.rng;
    sweep(&mut world.enemies, |e| e.advance(&env, dt, rng));

    sweep(&mut world.collectibles, |c| c.advance(speed, dt));
    sweep(&mut world.clouds, |c| c.advance(dt));
}

/// At most one level per tick, each `speed_threshold` points
fn ramp_speed(world: &mut World) {
    let w = &world.tuning.world;
    let next = w
        .speed_threshold
        .saturating_mul(u64::from(world.speed_level) + 1);
    if world.score < next {
        return;
    }

    world.speed_level += 1;
    world.speed = w.base_speed + world.speed_level as f32 * w.speed_step;
    world.events.push(GameEvent::SpeedIncreased {
        level: world.speed_level,
    });
    log::info!("Speed increased to: {:.1}", world.speed);
}

fn purge_marked(world: &mut World) {
    purge(&mut world.platforms);
    purge(&mut world.enemies);
    purge(&mut world.collectibles);
    purge(&mut world.clouds);
    purge(&mut world.player.projectiles);
}

/// Demo-mode driver: hops gaps and enemies, never steers
pub fn autopilot(world: &World) -> InputState {
    let player = &world.player.rect;
    let mut input = InputState::default();

    let edge_ahead = world
        .supporting_platform()
        .is_some_and(|p| p.rect.right() - player.right() < 30.0);

    let threat_ahead = world.enemies.iter().any(|e| {
        let dx = e.rect.left() - player.right();
        let grounded_threat = e.kind() != EnemyKind::Bird || e.rect.bottom() > player.top();
        (0.0..90.0).contains(&dx) && grounded_threat && e.rect.top() < player.bottom()
    });

    // Keep holding while rising for full height
    let rising = !world.player.on_ground && world.player.vy < 0.0;
    input.jump = edge_ahead || threat_ahead || rising;
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Action;
    use crate::sim::entities::Entity;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn snapshot(world: &World) -> String {
        serde_json::to_string(world).expect("world serializes")
    }

    #[test]
    fn test_zero_factor_is_a_no_op() {
        let mut world = World::new(Tuning::default(), 5);
        let before = snapshot(&world);
        tick(&mut world, &InputState::default().with(Action::Right), 0.0);
        assert_eq!(snapshot(&world), before);
    }

    #[test]
    fn test_idle_player_rests_on_starting_ground() {
        let mut world = World::new(Tuning::default(), 5);
        for _ in 0..300 {
            tick(&mut world, &InputState::default(), 1.0);
            assert!(world.player.on_ground);
            assert_eq!(world.player.vy, 0.0);
            assert!(!world.player_dead);
        }
        assert_eq!(world.score, 0);
        assert_eq!(world.time_ticks, 300);
    }

    #[test]
    fn test_ground_scrolls_at_world_speed() {
        let mut world = World::new(Tuning::default(), 5);
        tick(&mut world, &InputState::default(), 1.5);
        assert!((world.platforms[0].rect.left() + 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = || {
            let mut world = World::new(Tuning::default(), 77);
            for i in 0..2000 {
                let input = autopilot(&world);
                let dt = if i % 3 == 0 { 1.5 } else { 1.0 };
                tick(&mut world, &input, dt);
                if world.player_dead {
                    break;
                }
            }
            snapshot(&world)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_speed_ramps_one_level_per_tick() {
        let mut world = World::new(Tuning::default(), 5);
        world.score = 49;
        tick(&mut world, &InputState::default(), 1.0);
        assert_eq!(world.speed_level, 0);
        assert_eq!(world.speed, 2.0);

        world.score = 120;
        tick(&mut world, &InputState::default(), 1.0);
        assert_eq!(world.speed_level, 1);
        assert!((world.speed - 2.2).abs() < 1e-5);
        assert!(world.events.contains(&GameEvent::SpeedIncreased { level: 1 }));

        tick(&mut world, &InputState::default(), 1.0);
        assert_eq!(world.speed_level, 2);
        tick(&mut world, &InputState::default(), 1.0);
        assert_eq!(world.speed_level, 2);
        assert!((world.speed - 2.4).abs() < 1e-5);
    }

    #[test]
    fn test_falling_into_gap_ends_run() {
        let mut world = World::new(Tuning::default(), 5);
        world.platforms.clear();
        world.player.current_platform = None;
        for _ in 0..300 {
            tick(&mut world, &InputState::default(), 1.0);
        }
        assert!(world.player_dead);
    }

    proptest! {
        #[test]
        fn tick_invariants_hold(
            seed in any::<u64>(),
            steps in proptest::collection::vec((0u8..32, 0.0f32..=3.0), 1..300),
        ) {
            let mut world = World::new(Tuning::default(), seed);
            let mut last_score = 0;
            for (bits, dt) in steps {
                let input = InputState {
                    left: bits & 1 != 0,
                    right: bits & 2 != 0,
                    up: bits & 4 != 0,
                    down: bits & 8 != 0,
                    jump: bits & 16 != 0,
                    ..Default::default()
                };
                tick(&mut world, &input, dt);
                world.events.clear();

                prop_assert!(world.score >= last_score);
                last_score = world.score;
                prop_assert!(world.speed >= world.tuning.world.base_speed);
                prop_assert!(world.platforms.iter().all(|p| !p.is_marked()));
                prop_assert!(world.enemies.iter().all(|e| !e.is_marked()));
                prop_assert!(world.collectibles.iter().all(|c| !c.is_marked()));
                prop_assert!(world.player.projectiles.iter().all(|p| !p.is_marked()));
                prop_assert!(world.player.current_platform.is_none() || world.player.on_ground);
                prop_assert!(world.clouds.len() <= world.tuning.spawn.max_clouds);
            }
        }
    }
}
