//! World entities and their per-tick behaviour
//!
//! Every kind carries a box and a deletion flag. Collections are swept
//! newest-first so removing the current element never disturbs the ones
//! still to be visited.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{Hitbox, Rect, is_colliding};

/// Stable identifier handed out by the world
pub type EntityId = u32;

/// Tag for every entity kind in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Platform,
    Collectible,
    Projectile,
    Cloud,
    Enemy,
    Player,
}

/// Common surface of everything that lives in a world collection
pub trait Entity {
    const KIND: EntityKind;

    fn rect(&self) -> &Rect;
    fn is_marked(&self) -> bool;
    fn mark(&mut self);
}

/// Advance each item newest-first, dropping those marked for deletion
///
/// Returns the number of removed items.
pub fn sweep<T: Entity>(items: &mut Vec<T>, mut advance: impl FnMut(&mut T)) -> usize {
    let before = items.len();
    for i in (0..items.len()).rev() {
        advance(&mut items[i]);
        if items[i].is_marked() {
            items.remove(i);
        }
    }
    let removed = before - items.len();
    if removed > 0 {
        log::trace!("swept {} {:?}", removed, T::KIND);
    }
    removed
}

/// Drop marked items without advancing anything
pub fn purge<T: Entity>(items: &mut Vec<T>) -> usize {
    sweep(items, |_| {})
}

macro_rules! impl_entity {
    ($ty:ty, $kind:expr) => {
        impl Entity for $ty {
            const KIND: EntityKind = $kind;

            #[inline]
            fn rect(&self) -> &Rect {
                &self.rect
            }

            #[inline]
            fn is_marked(&self) -> bool {
                self.marked
            }

            #[inline]
            fn mark(&mut self) {
                self.marked = true;
            }
        }
    };
}

/// Solid ledge scrolling left at world speed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: EntityId,
    pub rect: Rect,
    pub marked: bool,
}

impl Platform {
    pub fn new(id: EntityId, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id,
            rect: Rect::new(x, y, width, height),
            marked: false,
        }
    }

    /// Thin platforms can be dropped through
    #[inline]
    pub fn is_thin(&self, threshold: f32) -> bool {
        self.rect.height() <= threshold
    }

    pub fn advance(&mut self, speed: f32, dt: f32) {
        self.rect.pos.x -= speed * dt;
        if self.rect.is_off_left() {
            self.marked = true;
        }
    }
}

impl_entity!(Platform, EntityKind::Platform);

/// Pickup type; fixes size and reward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Coin,
    Chest,
}

impl CollectibleKind {
    pub fn size(self) -> (f32, f32) {
        match self {
            CollectibleKind::Coin => (15.0, 15.0),
            CollectibleKind::Chest => (25.0, 20.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub rect: Rect,
    pub marked: bool,
}

impl Collectible {
    pub fn new(kind: CollectibleKind, x: f32, y: f32) -> Self {
        let (w, h) = kind.size();
        Self {
            kind,
            rect: Rect::new(x, y, w, h),
            marked: false,
        }
    }

    pub fn advance(&mut self, speed: f32, dt: f32) {
        self.rect.pos.x -= speed * dt;
        if self.rect.is_off_left() {
            self.marked = true;
        }
    }
}

impl_entity!(Collectible, EntityKind::Collectible);

pub const PROJECTILE_WIDTH: f32 = 10.0;
pub const PROJECTILE_HEIGHT: f32 = 5.0;

/// Blaster shot travelling right
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub rect: Rect,
    pub speed: f32,
    pub marked: bool,
}

impl Projectile {
    pub fn new(x: f32, y: f32, speed: f32) -> Self {
        Self {
            rect: Rect::new(x, y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
            speed,
            marked: false,
        }
    }

    /// Discarded once its left edge passes `right_edge`
    pub fn advance(&mut self, dt: f32, right_edge: f32) {
        self.rect.pos.x += self.speed * dt;
        if self.rect.left() > right_edge {
            self.marked = true;
        }
    }
}

impl_entity!(Projectile, EntityKind::Projectile);

/// Background decoration with its own parallax speed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub rect: Rect,
    pub speed: f32,
    pub marked: bool,
}

impl Cloud {
    /// Random size, drifting at a fraction of the world speed
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, x: f32, y: f32, world_speed: f32) -> Self {
        let width = rng.random_range(100.0..180.0);
        let height = rng.random_range(30.0..60.0);
        let speed = world_speed / rng.random_range(2.0..6.0);
        Self {
            rect: Rect::new(x, y, width, height),
            speed,
            marked: false,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.rect.pos.x -= self.speed * dt;
        if self.rect.is_off_left() {
            self.marked = true;
        }
    }
}

impl_entity!(Cloud, EntityKind::Cloud);

/// Enemy species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Slime,
    Mushroom,
    Bird,
}

const SLIME_SIZE: f32 = 30.0;
const SLIME_JUMP_POWER: f32 = 5.0;
const MUSHROOM_SIZE: f32 = 37.5;
const MUSHROOM_WALK_SPEED: f32 = 0.2;
const MUSHROOM_FALL_DELAY: f32 = 30.0;
const BIRD_WIDTH: f32 = 40.0;
const BIRD_HEIGHT: f32 = 20.0;
const BIRD_FLY_SPEED: f32 = 0.8;

/// Variant-specific motion state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyMotion {
    /// Hops in place on a random timer
    Slime {
        vy: f32,
        jump_timer: f32,
        on_ground: bool,
    },
    /// Walks slowly left; gravity kicks in after a short delay
    Mushroom { vy: f32, fall_delay: f32 },
    /// Flies straight left, ignores platforms
    Bird,
}

/// Shared environment an enemy reacts to during one tick
pub struct EnemyEnv<'a> {
    pub platforms: &'a [Platform],
    pub speed: f32,
    pub gravity: f32,
    pub floor: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub rect: Rect,
    pub motion: EnemyMotion,
    pub marked: bool,
}

fn slime_jump_delay<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(60.0..180.0)
}

impl Enemy {
    pub fn spawn<R: Rng + ?Sized>(id: EntityId, kind: EnemyKind, x: f32, y: f32, rng: &mut R) -> Self {
        let (rect, motion) = match kind {
            EnemyKind::Slime => (
                Rect::new(x, y, SLIME_SIZE, SLIME_SIZE),
                EnemyMotion::Slime {
                    vy: 0.0,
                    jump_timer: slime_jump_delay(rng),
                    on_ground: false,
                },
            ),
            EnemyKind::Mushroom => (
                Rect::new(x, y, MUSHROOM_SIZE, MUSHROOM_SIZE),
                EnemyMotion::Mushroom {
                    vy: 0.0,
                    fall_delay: MUSHROOM_FALL_DELAY,
                },
            ),
            EnemyKind::Bird => (Rect::new(x, y, BIRD_WIDTH, BIRD_HEIGHT), EnemyMotion::Bird),
        };
        Self {
            id,
            rect,
            motion,
            marked: false,
        }
    }

    pub fn kind(&self) -> EnemyKind {
        match self.motion {
            EnemyMotion::Slime { .. } => EnemyKind::Slime,
            EnemyMotion::Mushroom { .. } => EnemyKind::Mushroom,
            EnemyMotion::Bird => EnemyKind::Bird,
        }
    }

    pub fn advance<R: Rng + ?Sized>(&mut self, env: &EnemyEnv<'_>, dt: f32, rng: &mut R) {
        self.rect.pos.x -= env.speed * dt;

        match &mut self.motion {
            EnemyMotion::Slime {
                vy,
                jump_timer,
                on_ground,
            } => {
                *vy += env.gravity * dt;
                self.rect.pos.y += *vy * dt;
                *on_ground = settle_on_platforms(&mut self.rect, vy, env.platforms, dt);
                if *on_ground {
                    *jump_timer -= dt;
                    if *jump_timer <= 0.0 {
                        *vy = -SLIME_JUMP_POWER;
                        *on_ground = false;
                        *jump_timer = slime_jump_delay(rng);
                    }
                }
            }
            EnemyMotion::Mushroom { vy, fall_delay } => {
                self.rect.pos.x -= MUSHROOM_WALK_SPEED * dt;
                if *fall_delay > 0.0 {
                    *fall_delay = (*fall_delay - dt).max(0.0);
                } else {
                    *vy += env.gravity * dt;
                }
                self.rect.pos.y += *vy * dt;
                settle_on_platforms(&mut self.rect, vy, env.platforms, dt);
                if self.rect.top() > env.floor {
                    self.marked = true;
                }
            }
            EnemyMotion::Bird => {
                self.rect.pos.x -= BIRD_FLY_SPEED * dt;
            }
        }

        if self.rect.is_off_left() {
            self.marked = true;
        }
    }
}

impl_entity!(Enemy, EntityKind::Enemy);

/// Snap a falling box onto the first platform its feet passed this tick
///
/// Returns true when the box ends up standing on a platform.
fn settle_on_platforms(rect: &mut Rect, vy: &mut f32, platforms: &[Platform], dt: f32) -> bool {
    let mut landed = false;
    for platform in platforms {
        if *vy > 0.0
            && is_colliding(rect, &platform.rect, Hitbox::EXACT)
            && rect.bottom() < platform.rect.top() + *vy * dt + 1.0
        {
            rect.pos.y = platform.rect.top() - rect.height();
            *vy = 0.0;
            landed = true;
        }
    }
    landed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn env(platforms: &[Platform]) -> EnemyEnv<'_> {
        EnemyEnv {
            platforms,
            speed: 2.0,
            gravity: 0.15,
            floor: 720.0,
        }
    }

    #[test]
    fn test_sweep_removes_marked_and_keeps_order() {
        let mut platforms: Vec<Platform> = (0..5)
            .map(|i| Platform::new(i, i as f32 * 100.0, 600.0, 50.0, 50.0))
            .collect();
        // Platform 1 ends with its right edge at -10, platform 2 at 90
        let removed = sweep(&mut platforms, |p| p.advance(160.0, 1.0));
        assert_eq!(removed, 2);
        let ids: Vec<_> = platforms.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[test]
    fn test_purge_only_drops_marked() {
        let mut items = vec![
            Collectible::new(CollectibleKind::Coin, 0.0, 0.0),
            Collectible::new(CollectibleKind::Chest, 50.0, 0.0),
        ];
        items[0].mark();
        assert_eq!(purge(&mut items), 1);
        assert_eq!(items[0].kind, CollectibleKind::Chest);
    }

    #[test]
    fn test_collectible_sizes() {
        let coin = Collectible::new(CollectibleKind::Coin, 0.0, 0.0);
        let chest = Collectible::new(CollectibleKind::Chest, 0.0, 0.0);
        assert_eq!((coin.rect.width(), coin.rect.height()), (15.0, 15.0));
        assert_eq!((chest.rect.width(), chest.rect.height()), (25.0, 20.0));
    }

    #[test]
    fn test_projectile_discarded_past_right_edge() {
        let mut shot = Projectile::new(1275.0, 100.0, 7.0);
        shot.advance(1.0, 1280.0);
        assert!(shot.is_marked());
    }

    #[test]
    fn test_slime_lands_then_hops() {
        let mut rng = Pcg32::seed_from_u64(7);
        let platforms = vec![Platform::new(1, 0.0, 670.0, 2000.0, 50.0)];
        let mut slime = Enemy::spawn(2, EnemyKind::Slime, 600.0, 630.0, &mut rng);

        let mut landed = false;
        let mut hopped = false;
        for _ in 0..400 {
            slime.advance(&env(&platforms), 1.0, &mut rng);
            if let EnemyMotion::Slime { vy, on_ground, .. } = slime.motion {
                if on_ground {
                    landed = true;
                    assert!((slime.rect.bottom() - 670.0).abs() < 1e-3);
                }
                if landed && vy < 0.0 {
                    hopped = true;
                }
            }
        }
        assert!(landed);
        assert!(hopped);
    }

    #[test]
    fn test_mushroom_waits_before_falling() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut mushroom = Enemy::spawn(3, EnemyKind::Mushroom, 600.0, 100.0, &mut rng);
        for _ in 0..29 {
            mushroom.advance(&env(&[]), 1.0, &mut rng);
        }
        assert_eq!(mushroom.rect.top(), 100.0);
        for _ in 0..200 {
            mushroom.advance(&env(&[]), 1.0, &mut rng);
        }
        assert!(mushroom.rect.top() > 100.0);
    }

    #[test]
    fn test_mushroom_removed_below_floor() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut mushroom = Enemy::spawn(3, EnemyKind::Mushroom, 600.0, 700.0, &mut rng);
        for _ in 0..200 {
            mushroom.advance(&env(&[]), 1.0, &mut rng);
        }
        assert!(mushroom.is_marked());
    }

    #[test]
    fn test_bird_flies_faster_than_scroll() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut bird = Enemy::spawn(4, EnemyKind::Bird, 1330.0, 300.0, &mut rng);
        bird.advance(&env(&[]), 1.0, &mut rng);
        assert!((bird.rect.left() - (1330.0 - 2.8)).abs() < 1e-3);
        assert_eq!(bird.rect.top(), 300.0);
        assert_eq!(bird.kind(), EnemyKind::Bird);
    }
}
