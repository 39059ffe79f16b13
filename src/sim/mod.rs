//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time enters only as a per-tick factor
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or storage dependencies

pub mod clock;
pub mod collision;
pub mod entities;
pub mod geometry;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use clock::SimClock;
pub use collision::resolve_collisions;
pub use entities::{
    Cloud, Collectible, CollectibleKind, Enemy, EnemyKind, EnemyMotion, Entity, EntityId,
    EntityKind, Platform, Projectile,
};
pub use geometry::{Hitbox, Rect, is_colliding};
pub use player::{GroundState, Player, PowerUp, PowerUps};
pub use spawner::SpawnTimers;
pub use state::{DeathCause, GameEvent, GamePhase, World};
pub use tick::{autopilot, tick};
