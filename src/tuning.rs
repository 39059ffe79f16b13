//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be re-tuned from a JSON
//! file without recompiling. Sections use `#[serde(default)]`, so a partial
//! file only overrides what it names.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts;

/// Rejected tuning value
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// A size, speed or interval that must be strictly positive was not
    NotPositive { field: &'static str, value: f32 },
    /// A `[min, max]` range with `min > max`
    InvertedRange { field: &'static str, min: f32, max: f32 },
    /// A probability outside `[0, 1]`
    BadProbability { field: &'static str, value: f32 },
    /// Entity spawn bands add up to more than 1
    SpawnBandsOverflow { total: f32 },
    /// Elevated platforms must be thin and ground platforms must not be
    ThicknessOverlap { air: f32, thin: f32, ground_min: f32 },
    /// Tuning JSON failed to parse
    Parse(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::NotPositive { field, value } => {
                write!(f, "{field} must be > 0 (got {value})")
            }
            TuningError::InvertedRange { field, min, max } => {
                write!(f, "{field} range is inverted ({min} > {max})")
            }
            TuningError::BadProbability { field, value } => {
                write!(f, "{field} must be within [0, 1] (got {value})")
            }
            TuningError::SpawnBandsOverflow { total } => {
                write!(f, "entity spawn chances sum to {total}, above 1")
            }
            TuningError::ThicknessOverlap { air, thin, ground_min } => write!(
                f,
                "platform thickness must satisfy air ({air}) <= thin threshold ({thin}) < ground min ({ground_min})"
            ),
            TuningError::Parse(msg) => write!(f, "invalid tuning JSON: {msg}"),
        }
    }
}

impl std::error::Error for TuningError {}

/// Inclusive-exclusive `[min, max)` range for uniform rolls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Map a unit roll in `[0, 1)` onto the range
    #[inline]
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + t * (self.max - self.min)
    }
}

/// Screen, clock and scroll speed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    pub width: f32,
    pub height: f32,
    /// Wall-clock milliseconds that count as one frame unit
    pub ideal_frame_ms: f32,
    /// Upper bound for the time factor after a stall
    pub max_time_factor: f32,
    pub gravity: f32,
    pub base_speed: f32,
    /// Score needed per speed level
    pub speed_threshold: u64,
    pub speed_step: f32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            width: consts::SCREEN_WIDTH,
            height: consts::SCREEN_HEIGHT,
            ideal_frame_ms: consts::IDEAL_FRAME_MS,
            max_time_factor: consts::MAX_TIME_FACTOR,
            gravity: 0.15,
            base_speed: 2.0,
            speed_threshold: 50,
            speed_step: 0.2,
        }
    }
}

/// Player movement, jetpack and weapon
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    pub start_x: f32,
    pub move_speed: f32,
    /// Rightward movement is slower than leftward
    pub right_speed_factor: f32,
    /// Distance kept from the left/right screen edges
    pub screen_margin: f32,
    pub jump_power: f32,
    pub high_jump_factor: f32,
    /// Gravity multiplier while rising with jump held
    pub held_jump_gravity: f32,
    /// Gravity multiplier while descending with slow-fall
    pub slow_fall_gravity: f32,
    pub coyote_frames: f32,
    pub step_height: f32,
    pub ceiling: f32,
    /// Downward nudge when dropping through a thin platform
    pub drop_nudge: f32,
    /// Horizontal widening of the hitbox used for landing
    pub landing_expand: f32,
    pub thrust_accel: f32,
    pub max_thrust_speed: f32,
    pub max_fuel: f32,
    pub fuel_drain: f32,
    pub fuel_regen: f32,
    pub power_up_frames: f32,
    pub shoot_cooldown: f32,
    pub max_projectiles: usize,
    pub projectile_speed: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 30.0,
            height: 50.0,
            start_x: 100.0,
            move_speed: 3.0,
            right_speed_factor: 0.8,
            screen_margin: 10.0,
            jump_power: 6.0,
            high_jump_factor: 1.2,
            held_jump_gravity: 0.6,
            slow_fall_gravity: 0.3,
            coyote_frames: 8.0,
            step_height: 15.0,
            ceiling: -20.0,
            drop_nudge: 2.0,
            landing_expand: 20.0,
            thrust_accel: 0.35,
            max_thrust_speed: 3.0,
            max_fuel: 100.0,
            fuel_drain: 0.5,
            fuel_regen: 0.1,
            power_up_frames: 600.0,
            shoot_cooldown: 15.0,
            max_projectiles: 5,
            projectile_speed: 7.0,
        }
    }
}

/// Procedural generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub platform_interval: f32,
    pub bird_interval: f32,
    pub cloud_interval: f32,
    pub max_clouds: usize,
    pub initial_clouds: usize,
    pub gap_width: Range,
    pub ground_width: Range,
    pub ground_thickness: Range,
    /// Platforms at or below this thickness can be dropped through
    pub thin_threshold: f32,
    pub gap_chance: f32,
    pub gap_platform_width: f32,
    pub gap_platform_offset: f32,
    pub air_chance: f32,
    pub air_width: Range,
    pub air_top: Range,
    pub air_thickness: f32,
    pub air_margin: f32,
    /// Extra gate before an elevated platform rolls for an entity
    pub air_entity_chance: f32,
    pub slime_chance: f32,
    pub mushroom_chance: f32,
    pub coin_chance: f32,
    pub chest_chance: f32,
    /// Height above the platform top at which entities appear
    pub entity_lift: f32,
    pub coin_drop: f32,
    pub bird_height: Range,
    pub cloud_height: Range,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            platform_interval: 100.0,
            bird_interval: 1000.0,
            cloud_interval: 300.0,
            max_clouds: 10,
            initial_clouds: 5,
            gap_width: Range::new(40.0, 140.0),
            ground_width: Range::new(80.0, 200.0),
            ground_thickness: Range::new(50.0, 200.0),
            thin_threshold: 40.0,
            gap_chance: 0.10,
            gap_platform_width: 300.0,
            gap_platform_offset: 200.0,
            air_chance: 0.60,
            air_width: Range::new(60.0, 160.0),
            air_top: Range::new(200.0, 500.0),
            air_thickness: 20.0,
            air_margin: 50.0,
            air_entity_chance: 0.5,
            slime_chance: 0.12,
            mushroom_chance: 0.12,
            coin_chance: 0.26,
            chest_chance: 0.10,
            entity_lift: 40.0,
            coin_drop: 10.0,
            bird_height: Range::new(100.0, 500.0),
            cloud_height: Range::new(50.0, 250.0),
        }
    }
}

/// Hitbox adjustments and rewards
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    /// Widening used for stomps and pickups
    pub wide_expand: f32,
    /// Narrowing used for the lethal contact test
    pub tight_inset: f32,
    /// Feet must be above `enemy.top + stomp_margin` to stomp
    pub stomp_margin: f32,
    pub stomp_bounce: f32,
    pub kill_score: u64,
    pub coin_score: u64,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            wide_expand: 20.0,
            tight_inset: 10.0,
            stomp_margin: 20.0,
            stomp_bounce: 5.0,
            kill_score: 10,
            coin_score: 5,
        }
    }
}

/// Complete tuning set for one run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world: WorldTuning,
    pub player: PlayerTuning,
    pub spawn: SpawnTuning,
    pub combat: CombatTuning,
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NotPositive { field, value })
    }
}

fn range(field: &'static str, r: Range) -> Result<(), TuningError> {
    if r.min > r.max {
        return Err(TuningError::InvertedRange {
            field,
            min: r.min,
            max: r.max,
        });
    }
    Ok(())
}

fn probability(field: &'static str, value: f32) -> Result<(), TuningError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TuningError::BadProbability { field, value })
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let w = &self.world;
        positive("world.width", w.width)?;
        positive("world.height", w.height)?;
        positive("world.ideal_frame_ms", w.ideal_frame_ms)?;
        positive("world.max_time_factor", w.max_time_factor)?;
        positive("world.gravity", w.gravity)?;
        positive("world.base_speed", w.base_speed)?;
        positive("world.speed_threshold", w.speed_threshold as f32)?;
        positive("world.speed_step", w.speed_step)?;

        let p = &self.player;
        positive("player.width", p.width)?;
        positive("player.height", p.height)?;
        positive("player.move_speed", p.move_speed)?;
        positive("player.jump_power", p.jump_power)?;
        positive("player.coyote_frames", p.coyote_frames)?;
        positive("player.max_fuel", p.max_fuel)?;
        positive("player.power_up_frames", p.power_up_frames)?;
        positive("player.shoot_cooldown", p.shoot_cooldown)?;
        positive("player.projectile_speed", p.projectile_speed)?;
        positive("player.max_projectiles", p.max_projectiles as f32)?;

        let s = &self.spawn;
        positive("spawn.platform_interval", s.platform_interval)?;
        positive("spawn.bird_interval", s.bird_interval)?;
        positive("spawn.cloud_interval", s.cloud_interval)?;
        positive("spawn.air_thickness", s.air_thickness)?;
        positive("spawn.gap_platform_width", s.gap_platform_width)?;
        range("spawn.gap_width", s.gap_width)?;
        range("spawn.ground_width", s.ground_width)?;
        range("spawn.ground_thickness", s.ground_thickness)?;
        range("spawn.air_width", s.air_width)?;
        range("spawn.air_top", s.air_top)?;
        range("spawn.bird_height", s.bird_height)?;
        range("spawn.cloud_height", s.cloud_height)?;
        positive("spawn.ground_width.min", s.ground_width.min)?;
        positive("spawn.ground_thickness.min", s.ground_thickness.min)?;
        positive("spawn.air_width.min", s.air_width.min)?;
        probability("spawn.gap_chance", s.gap_chance)?;
        probability("spawn.air_chance", s.air_chance)?;
        probability("spawn.air_entity_chance", s.air_entity_chance)?;
        probability("spawn.slime_chance", s.slime_chance)?;
        probability("spawn.mushroom_chance", s.mushroom_chance)?;
        probability("spawn.coin_chance", s.coin_chance)?;
        probability("spawn.chest_chance", s.chest_chance)?;
        let total = s.slime_chance + s.mushroom_chance + s.coin_chance + s.chest_chance;
        if total > 1.0 + f32::EPSILON {
            return Err(TuningError::SpawnBandsOverflow { total });
        }
        if !(s.air_thickness <= s.thin_threshold && s.thin_threshold < s.ground_thickness.min) {
            return Err(TuningError::ThicknessOverlap {
                air: s.air_thickness,
                thin: s.thin_threshold,
                ground_min: s.ground_thickness.min,
            });
        }

        let c = &self.combat;
        if c.tight_inset >= p.width {
            return Err(TuningError::InvertedRange {
                field: "combat.tight_inset",
                min: c.tight_inset,
                max: p.width,
            });
        }
        Ok(())
    }

    /// Time-factor scale applied to spawn intervals at the given speed
    #[inline]
    pub fn speed_ratio(&self, speed: f32) -> f32 {
        self.world.base_speed / speed
    }
}
