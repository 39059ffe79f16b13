//! Procedural generation
//!
//! Three accumulators advance by the time factor. Platform and bird intervals
//! shrink as the world speeds up so terrain density stays roughly constant;
//! clouds are purely decorative and ignore speed. When an accumulator crosses
//! its interval the interval is subtracted and the remainder carried, so at
//! most one spawn per kind happens per tick.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entities::{Cloud, Collectible, CollectibleKind, Enemy, EnemyKind, Platform};
use super::geometry::Rect;
use super::state::World;

/// Frame units accumulated toward the next spawn of each kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub platform: f32,
    pub bird: f32,
    pub cloud: f32,
}

/// Subtract `interval` once if the accumulator has reached it
#[inline]
fn take_interval(acc: &mut f32, interval: f32) -> bool {
    if *acc >= interval {
        *acc -= interval;
        true
    } else {
        false
    }
}

/// Run every spawner for one tick
pub fn spawn(world: &mut World, dt: f32) {
    let ratio = world.tuning.speed_ratio(world.speed);
    let platform_interval = world.tuning.spawn.platform_interval * ratio;
    let bird_interval = world.tuning.spawn.bird_interval * ratio;

    world.spawn_timers.platform += dt;
    world.spawn_timers.bird += dt;
    world.spawn_timers.cloud += dt;

    if take_interval(&mut world.spawn_timers.platform, platform_interval) {
        spawn_platform_chain(world);
    }

    if take_interval(&mut world.spawn_timers.bird, bird_interval) {
        spawn_bird(world);
    }

    // The cloud timer only pays out while there is room
    if world.clouds.len() < world.tuning.spawn.max_clouds {
        let interval = world.tuning.spawn.cloud_interval;
        if take_interval(&mut world.spawn_timers.cloud, interval) {
            let x = world.tuning.world.width;
            spawn_cloud(world, x);
        }
    }
}

/// Scatter the starting clouds across the screen
pub fn seed_clouds(world: &mut World) {
    for _ in 0..world.tuning.spawn.initial_clouds {
        let x = world.rng.random::<f32>() * world.tuning.world.width;
        spawn_cloud(world, x);
    }
}

/// Right edge of the ground chain, ignoring elevated platforms
fn chain_tail(world: &World) -> f32 {
    let threshold = world.tuning.spawn.thin_threshold;
    world
        .platforms
        .iter()
        .filter(|p| !p.is_thin(threshold))
        .map(|p| p.rect.right())
        .reduce(f32::max)
        .unwrap_or(world.tuning.world.width)
}

fn spawn_platform_chain(world: &mut World) {
    let s = world.tuning.spawn.clone();
    let floor = world.tuning.world.height;

    let tail = chain_tail(world);
    let gap = s.gap_width.lerp(world.rng.random());
    let new_x = tail + gap;
    let thickness = s.ground_thickness.lerp(world.rng.random()).round();

    let (x, width) = if world.rng.random::<f32>() < s.gap_chance {
        (new_x + s.gap_platform_offset, s.gap_platform_width)
    } else {
        (new_x, s.ground_width.lerp(world.rng.random()))
    };

    let id = world.next_entity_id();
    let ground = Platform::new(id, x, floor - thickness, width, thickness);
    log::debug!(
        "spawned platform {} at x={:.0} w={:.0} h={:.0}",
        id,
        x,
        width,
        thickness
    );
    let ground_rect = ground.rect;
    world.platforms.push(ground);
    spawn_on_platform(world, &ground_rect);

    if world.rng.random::<f32>() < s.air_chance {
        let air_width = s.air_width.lerp(world.rng.random());
        let air_top = s.air_top.lerp(world.rng.random()).round();
        let space_start = tail + s.air_margin;
        let space_end = ground_rect.left() - air_width - s.air_margin;

        let air_x = if space_end > space_start {
            space_start + world.rng.random::<f32>() * (space_end - space_start)
        } else {
            ground_rect.center().x - air_width / 2.0
        };

        let id = world.next_entity_id();
        let air = Platform::new(id, air_x, air_top, air_width, s.air_thickness);
        log::debug!("spawned elevated platform {} at x={:.0} y={:.0}", id, air_x, air_top);
        let air_rect = air.rect;
        world.platforms.push(air);

        if world.rng.random::<f32>() < s.air_entity_chance {
            spawn_on_platform(world, &air_rect);
        }
    }
}

/// What a single entity roll produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Occupant {
    Enemy(EnemyKind),
    Item(CollectibleKind),
}

/// Map a uniform roll onto the cumulative spawn bands
fn pick_occupant(world: &World, roll: f32) -> Option<Occupant> {
    let s = &world.tuning.spawn;
    let bands = [
        (s.slime_chance, Occupant::Enemy(EnemyKind::Slime)),
        (s.mushroom_chance, Occupant::Enemy(EnemyKind::Mushroom)),
        (s.coin_chance, Occupant::Item(CollectibleKind::Coin)),
        (s.chest_chance, Occupant::Item(CollectibleKind::Chest)),
    ];
    let mut cumulative = 0.0;
    for (chance, occupant) in bands {
        cumulative += chance;
        if roll < cumulative {
            return Some(occupant);
        }
    }
    None
}

fn spawn_on_platform(world: &mut World, platform: &Rect) {
    let roll: f32 = world.rng.random();
    let Some(occupant) = pick_occupant(world, roll) else {
        return;
    };

    let x = platform.center().x;
    let y = platform.top() - world.tuning.spawn.entity_lift;
    match occupant {
        Occupant::Enemy(kind) => {
            let id = world.next_entity_id();
            let enemy = Enemy::spawn(id, kind, x, y, &mut world.rng);
            log::debug!("spawned {:?} {} at x={:.0}", kind, id, x);
            world.enemies.push(enemy);
        }
        Occupant::Item(CollectibleKind::Coin) => {
            let y = y + world.tuning.spawn.coin_drop;
            world.collectibles.push(Collectible::new(CollectibleKind::Coin, x, y));
        }
        Occupant::Item(kind) => {
            world.collectibles.push(Collectible::new(kind, x, y));
        }
    }
}

fn spawn_bird(world: &mut World) {
    let x = world.tuning.world.width + 50.0;
    let y = world.tuning.spawn.bird_height.lerp(world.rng.random()).round();
    let id = world.next_entity_id();
    let bird = Enemy::spawn(id, EnemyKind::Bird, x, y, &mut world.rng);
    log::debug!("spawned Bird {} at y={:.0}", id, y);
    world.enemies.push(bird);
}

fn spawn_cloud(world: &mut World, x: f32) {
    let y = world.tuning.spawn.cloud_height.lerp(world.rng.random());
    let cloud = Cloud::spawn(&mut world.rng, x, y, world.speed);
    world.clouds.push(cloud);
}
