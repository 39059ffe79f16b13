//! Run state and the events the simulation reports
//!
//! A `World` holds everything one run needs. It is rebuilt from scratch on
//! every start, so nothing leaks between runs.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{Cloud, Collectible, Enemy, EntityId, Platform};
use super::player::{Player, PowerUp};
use super::spawner::SpawnTimers;
use crate::tuning::Tuning;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, no run in progress
    Menu,
    /// Active gameplay
    Playing,
    /// Run frozen, still drawn
    Paused,
    /// Run ended
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Dropped below the bottom of the world
    Fell,
    /// Touched an enemy without stomping it
    Enemy,
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    EnemyStomped,
    EnemyShot,
    CoinCollected,
    PowerUpGranted(PowerUp),
    PowerUpsExpired,
    SpeedIncreased { level: u32 },
    PlayerDied(DeathCause),
}

/// RNG seed wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Everything a single run owns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub tuning: Tuning,
    pub rng_state: RngState,
    #[serde(skip, default = "default_rng")]
    pub rng: Pcg32,
    /// Points this run (never decreases)
    pub score: u64,
    /// Number of speed increases so far
    pub speed_level: u32,
    /// Current scroll speed, derived from `speed_level`
    pub speed: f32,
    pub spawn_timers: SpawnTimers,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Ordered by spawn
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub collectibles: Vec<Collectible>,
    pub clouds: Vec<Cloud>,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Set once the player dies; the session ends the run
    pub player_dead: bool,
    next_id: EntityId,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl World {
    /// New run: one long starting ground, the player on it, a few clouds
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        let rng = rng_state.to_rng();

        let start_thickness = tuning.spawn.ground_thickness.min;
        let ground = Platform::new(
            1,
            0.0,
            tuning.world.height - start_thickness,
            tuning.world.width + 200.0,
            start_thickness,
        );
        let player = Player::new(&tuning.player, &ground);
        let speed = tuning.world.base_speed;

        let mut world = Self {
            tuning,
            rng_state,
            rng,
            score: 0,
            speed_level: 0,
            speed,
            spawn_timers: SpawnTimers::default(),
            time_ticks: 0,
            player,
            platforms: vec![ground],
            enemies: Vec::new(),
            collectibles: Vec::new(),
            clouds: Vec::new(),
            events: Vec::new(),
            player_dead: false,
            next_id: 2,
        };
        super::spawner::seed_clouds(&mut world);
        world
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add points; the speed ramp reads the total at the end of the tick
    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Take all events raised so far
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Platform the player is standing on, if any
    pub fn supporting_platform(&self) -> Option<&Platform> {
        let id = self.player.current_platform?;
        self.platforms.iter().find(|p| p.id == id)
    }
}
