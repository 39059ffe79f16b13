//! Contact rules between the player, enemies, pickups and shots
//!
//! Runs once per tick after everything has moved. Hits only mark entities;
//! the tick purges them afterwards, and rules evaluated later skip anything
//! already marked.

use rand::Rng;

use super::entities::{CollectibleKind, Entity};
use super::geometry::{Hitbox, is_colliding};
use super::player::PowerUp;
use super::state::{DeathCause, GameEvent, World};

/// Apply stomp, death, pickup and projectile rules in that order
pub fn resolve_collisions(world: &mut World) {
    player_vs_enemies(world);
    player_vs_collectibles(world);
    projectiles_vs_enemies(world);
}

fn player_vs_enemies(world: &mut World) {
    let combat = &world.tuning.combat;
    let wide = Hitbox::widened(combat.wide_expand);
    let tight = Hitbox::inset(combat.tight_inset);
    let player = &mut world.player;
    let mut died = false;
    let mut points = 0;

    for enemy in world.enemies.iter_mut().filter(|e| !e.is_marked()) {
        let stomped = player.vy > 0.0
            && player.rect.bottom() < enemy.rect.top() + combat.stomp_margin
            && is_colliding(&player.rect, &enemy.rect, wide);

        if stomped {
            enemy.mark();
            player.vy = -combat.stomp_bounce;
            points += combat.kill_score;
            world.events.push(GameEvent::EnemyStomped);
            log::debug!("stomped {:?} {}", enemy.kind(), enemy.id);
        } else if !died && is_colliding(&player.rect, &enemy.rect, tight) {
            died = true;
            world.events.push(GameEvent::PlayerDied(DeathCause::Enemy));
            log::debug!("killed by {:?} {}", enemy.kind(), enemy.id);
        }
    }
    world.add_score(points);
}

fn player_vs_collectibles(world: &mut World) {
    let wide = Hitbox::widened(world.tuning.combat.wide_expand);
    let mut points = 0;

    for item in world.collectibles.iter_mut().filter(|c| !c.is_marked()) {
        if !is_colliding(&world.player.rect, &item.rect, wide) {
            continue;
        }
        item.mark();
        match item.kind {
            CollectibleKind::Coin => {
                points += world.tuning.combat.coin_score;
                world.events.push(GameEvent::CoinCollected);
            }
            CollectibleKind::Chest => {
                let kind = PowerUp::ALL[world.rng.random_range(0..PowerUp::ALL.len())];
                world.player.grant_power_up(kind, &world.tuning.player);
                world.events.push(GameEvent::PowerUpGranted(kind));
                log::info!("Power-up granted: {}", kind.label());
            }
        }
    }
    world.add_score(points);
}

fn projectiles_vs_enemies(world: &mut World) {
    let kill_score = world.tuning.combat.kill_score;
    let mut points = 0;

    for shot in world.player.live_projectiles() {
        let target = world
            .enemies
            .iter_mut()
            .filter(|e| !e.is_marked())
            .find(|e| is_colliding(&shot.rect, &e.rect, Hitbox::EXACT));

        if let Some(enemy) = target {
            enemy.mark();
            shot.mark();
            points += kill_score;
            world.events.push(GameEvent::EnemyShot);
        }
    }
    world.add_score(points);
}
