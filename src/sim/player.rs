//! Player controller
//!
//! Kinematic movement with no horizontal velocity: the body is translated
//! directly by input, while the vertical axis integrates gravity. Landing is
//! resolved against every live platform after integration.

use serde::{Deserialize, Serialize};

use super::entities::{Entity, EntityId, Platform, Projectile, sweep};
use super::geometry::{Hitbox, Rect, is_colliding};
use super::state::{DeathCause, GameEvent};
use crate::input::InputState;
use crate::tuning::{PlayerTuning, Tuning};

/// Chest rewards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUp {
    HighJump,
    SlowFall,
    Blaster,
    Jetpack,
}

impl PowerUp {
    pub const ALL: [PowerUp; 4] = [
        PowerUp::HighJump,
        PowerUp::SlowFall,
        PowerUp::Blaster,
        PowerUp::Jetpack,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PowerUp::HighJump => "Jump Power",
            PowerUp::SlowFall => "Slow Fall",
            PowerUp::Blaster => "Blaster",
            PowerUp::Jetpack => "Jetpack",
        }
    }
}

/// Active buffs; they share one countdown and expire together
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUps {
    pub high_jump: bool,
    pub slow_fall: bool,
    pub blaster: bool,
    pub jetpack: bool,
}

impl PowerUps {
    pub fn set(&mut self, kind: PowerUp) {
        match kind {
            PowerUp::HighJump => self.high_jump = true,
            PowerUp::SlowFall => self.slow_fall = true,
            PowerUp::Blaster => self.blaster = true,
            PowerUp::Jetpack => self.jetpack = true,
        }
    }

    pub fn is_active(&self, kind: PowerUp) -> bool {
        match kind {
            PowerUp::HighJump => self.high_jump,
            PowerUp::SlowFall => self.slow_fall,
            PowerUp::Blaster => self.blaster,
            PowerUp::Jetpack => self.jetpack,
        }
    }

    pub fn any(&self) -> bool {
        PowerUp::ALL.iter().any(|&k| self.is_active(k))
    }

    pub fn active(&self) -> impl Iterator<Item = PowerUp> + '_ {
        PowerUp::ALL.into_iter().filter(|&k| self.is_active(k))
    }

    pub fn clear(&mut self) {
        *self = PowerUps::default();
    }
}

/// Ground-contact state, derived from the controller flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundState {
    Grounded,
    Jumping,
    /// Left the ground without jumping; a jump is still allowed
    Coyote,
    Falling,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub vy: f32,
    pub on_ground: bool,
    /// Platform under the feet; only `Some` while `on_ground`
    pub current_platform: Option<EntityId>,
    /// Jump lock, cleared on landing
    pub is_jumping: bool,
    pub is_thrusting: bool,
    pub coyote_timer: f32,
    pub fuel: f32,
    pub shoot_cooldown: f32,
    pub power_ups: PowerUps,
    pub power_up_timer: f32,
    pub projectiles: Vec<Projectile>,
}

impl Player {
    /// Spawn standing on `ground`
    pub fn new(tuning: &PlayerTuning, ground: &Platform) -> Self {
        let rect = Rect::new(
            tuning.start_x,
            ground.rect.top() - tuning.height,
            tuning.width,
            tuning.height,
        );
        Self {
            rect,
            vy: 0.0,
            on_ground: true,
            current_platform: Some(ground.id),
            is_jumping: false,
            is_thrusting: false,
            coyote_timer: tuning.coyote_frames,
            fuel: tuning.max_fuel,
            shoot_cooldown: 0.0,
            power_ups: PowerUps::default(),
            power_up_timer: 0.0,
            projectiles: Vec::new(),
        }
    }

    pub fn ground_state(&self) -> GroundState {
        if self.on_ground {
            GroundState::Grounded
        } else if self.is_jumping {
            GroundState::Jumping
        } else if self.coyote_timer > 0.0 {
            GroundState::Coyote
        } else {
            GroundState::Falling
        }
    }

    /// Advance one tick of `dt` frame units
    pub fn update(
        &mut self,
        input: &InputState,
        platforms: &[Platform],
        tuning: &Tuning,
        dt: f32,
        events: &mut Vec<GameEvent>,
    ) {
        let p = &tuning.player;
        let jump_held = input.jump_held();

        self.move_horizontal(input, p, tuning.world.width, dt);

        if self.shoot_cooldown > 0.0 {
            self.shoot_cooldown -= dt;
        }

        if input.down && self.on_ground {
            let thin_threshold = tuning.spawn.thin_threshold;
            let can_drop = self
                .current_platform
                .and_then(|id| platforms.iter().find(|pl| pl.id == id))
                .is_none_or(|pl| pl.is_thin(thin_threshold));
            if can_drop {
                self.rect.pos.y += p.drop_nudge;
                self.leave_ground();
            }
        }

        if !self.on_ground && !self.is_jumping {
            self.coyote_timer = (self.coyote_timer - dt).max(0.0);
        }
        if self.on_ground {
            self.coyote_timer = p.coyote_frames;
            self.is_jumping = false;
        }

        self.is_thrusting = false;
        if jump_held && (self.on_ground || self.coyote_timer > 0.0) && !self.is_jumping {
            self.jump(p);
            events.push(GameEvent::Jumped);
        } else if self.power_ups.jetpack
            && jump_held
            && self.fuel > 0.0
            && !self.on_ground
            && self.is_jumping
        {
            self.thrust(p, dt);
        }
        if !self.is_thrusting {
            self.fuel = (self.fuel + p.fuel_regen * dt).min(p.max_fuel);
        }

        let mut gravity = tuning.world.gravity;
        if self.power_ups.slow_fall && self.vy >= 0.0 {
            gravity *= p.slow_fall_gravity;
        }
        // Variable jump height: releasing early restores full gravity
        if !self.on_ground && self.vy < 0.0 && jump_held && !self.power_ups.jetpack {
            gravity *= p.held_jump_gravity;
        }
        self.vy += gravity * dt;
        self.rect.pos.y += self.vy * dt;

        if self.rect.top() < p.ceiling {
            self.rect.pos.y = p.ceiling;
            self.vy = self.vy.max(0.0);
        }

        self.resolve_landing(input, platforms, tuning, dt);

        if self.rect.top() > tuning.world.height {
            events.push(GameEvent::PlayerDied(DeathCause::Fell));
        }

        if self.power_ups.blaster && self.shoot_cooldown <= 0.0 {
            self.fire(p);
            self.shoot_cooldown += p.shoot_cooldown;
        }

        let right_edge = tuning.world.width;
        sweep(&mut self.projectiles, |shot| shot.advance(dt, right_edge));

        self.tick_power_ups(dt, events);
    }

    fn move_horizontal(&mut self, input: &InputState, p: &PlayerTuning, screen_width: f32, dt: f32) {
        let min_x = p.screen_margin;
        let max_x = screen_width - self.rect.width() - p.screen_margin;
        if input.right && self.rect.left() < max_x {
            self.rect.pos.x += p.move_speed * p.right_speed_factor * dt;
        }
        if input.left && self.rect.left() > min_x {
            self.rect.pos.x -= p.move_speed * dt;
        }
        self.rect.pos.x = self.rect.pos.x.clamp(min_x, max_x.max(min_x));
    }

    fn jump(&mut self, p: &PlayerTuning) {
        let power = if self.power_ups.high_jump {
            p.jump_power * p.high_jump_factor
        } else {
            p.jump_power
        };
        self.vy = -power;
        self.leave_ground();
        self.coyote_timer = 0.0;
        self.is_jumping = true;
    }

    /// Accelerate upward toward the thrust cap without overshooting it
    fn thrust(&mut self, p: &PlayerTuning, dt: f32) {
        self.is_thrusting = true;
        let max_up = -p.max_thrust_speed;
        if self.vy > max_up {
            self.vy = (self.vy - p.thrust_accel * dt).max(max_up);
        }
        self.fuel = (self.fuel - p.fuel_drain * dt).max(0.0);
    }

    fn leave_ground(&mut self) {
        self.on_ground = false;
        self.current_platform = None;
    }

    fn land_on(&mut self, platform: &Platform, coyote_frames: f32) {
        self.rect.pos.y = platform.rect.top() - self.rect.height();
        self.vy = 0.0;
        self.on_ground = true;
        self.current_platform = Some(platform.id);
        self.is_jumping = false;
        self.coyote_timer = coyote_frames;
    }

    /// Leading edge pushes into a ledge low enough to walk onto
    fn can_step_onto(&self, platform: &Platform, step_height: f32) -> bool {
        let leading_x = self.rect.right();
        let feet = self.rect.bottom();
        let touching = platform.rect.left() < leading_x
            && platform.rect.right() > self.rect.left()
            && platform.rect.top() < feet - 1.0
            && platform.rect.bottom() > self.rect.top();
        let step = feet - platform.rect.top();
        touching && step > 0.0 && step <= step_height
    }

    fn resolve_landing(&mut self, input: &InputState, platforms: &[Platform], tuning: &Tuning, dt: f32) {
        let p = &tuning.player;
        let landing_hitbox = Hitbox::widened(p.landing_expand);

        self.on_ground = false;
        self.current_platform = None;

        for platform in platforms {
            if input.down && platform.is_thin(tuning.spawn.thin_threshold) {
                continue;
            }

            if self.vy >= 0.0 && input.right && self.can_step_onto(platform, p.step_height) {
                self.land_on(platform, p.coyote_frames);
                continue;
            }

            if self.vy > 0.0
                && is_colliding(&self.rect, &platform.rect, landing_hitbox)
                && self.rect.bottom() < platform.rect.top() + self.vy * dt + 1.0
            {
                self.land_on(platform, p.coyote_frames);
            }
        }
    }

    /// Spawn a shot at the leading edge; dropped silently at the cap
    fn fire(&mut self, p: &PlayerTuning) {
        if self.projectiles.len() >= p.max_projectiles {
            return;
        }
        let x = self.rect.right();
        let y = self.rect.top() + self.rect.height() / 2.0;
        self.projectiles.push(Projectile::new(x, y, p.projectile_speed));
    }

    /// Grant a buff and restart the shared countdown
    pub fn grant_power_up(&mut self, kind: PowerUp, p: &PlayerTuning) {
        self.power_ups.set(kind);
        if kind == PowerUp::Jetpack {
            self.fuel = p.max_fuel;
        }
        self.power_up_timer = p.power_up_frames;
    }

    fn tick_power_ups(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
        if self.power_up_timer > 0.0 {
            self.power_up_timer -= dt;
            if self.power_up_timer <= 0.0 {
                self.power_up_timer = 0.0;
                self.power_ups.clear();
                events.push(GameEvent::PowerUpsExpired);
            }
        }
    }

    /// Fuel as a fraction of the tank
    pub fn fuel_fraction(&self, p: &PlayerTuning) -> f32 {
        (self.fuel / p.max_fuel).clamp(0.0, 1.0)
    }

    /// Whole seconds left on the shared buff timer at 60 frame units/s
    pub fn power_up_seconds(&self) -> u32 {
        (self.power_up_timer / 60.0).ceil().max(0.0) as u32
    }

    /// Live projectiles, for collision checks
    pub fn live_projectiles(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.projectiles.iter_mut().filter(|p| !p.is_marked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Action;
    use proptest::prelude::*;

    const GROUND_TOP: f32 = 670.0;

    fn ground() -> Platform {
        Platform::new(1, 0.0, GROUND_TOP, 2000.0, 50.0)
    }

    fn step(player: &mut Player, input: InputState, platforms: &[Platform], dt: f32) -> Vec<GameEvent> {
        let tuning = Tuning::default();
        let mut events = Vec::new();
        player.update(&input, platforms, &tuning, dt, &mut events);
        events
    }

    #[test]
    fn test_rests_on_ground_indefinitely() {
        let platforms = vec![ground()];
        let mut player = Player::new(&PlayerTuning::default(), &platforms[0]);
        for _ in 0..1000 {
            step(&mut player, InputState::default(), &platforms, 1.0);
            assert!(player.on_ground);
            assert_eq!(player.vy, 0.0);
            assert_eq!(player.current_platform, Some(1));
        }
        assert!((player.rect.bottom() - GROUND_TOP).abs() < 1e-3);
    }

    #[test]
    fn test_jump_velocity_curve() {
        let platforms = vec![ground()];
        let mut player = Player::new(&PlayerTuning::default(), &platforms[0]);

        let events = step(&mut player, InputState::default().with(Action::Jump), &platforms, 1.0);
        assert!(events.contains(&GameEvent::Jumped));
        // Jump held on the takeoff tick: reduced gravity
        assert!((player.vy - (-6.0 + 0.15 * 0.6)).abs() < 1e-5);
        assert_eq!(player.ground_state(), GroundState::Jumping);

        // Released: full gravity every tick until landing
        let mut previous = player.vy;
        let mut airtime = 1;
        while !player.on_ground {
            step(&mut player, InputState::default(), &platforms, 1.0);
            airtime += 1;
            if !player.on_ground {
                assert!((player.vy - previous - 0.15).abs() < 1e-4);
                previous = player.vy;
            }
            assert!(airtime < 1000);
        }
        assert!(airtime > 70 && airtime < 90, "airtime {airtime}");
    }

    #[test]
    fn test_airtime_is_deterministic() {
        let platforms = vec![ground()];
        let run = || {
            let mut player = Player::new(&PlayerTuning::default(), &platforms[0]);
            step(&mut player, InputState::default().with(Action::Jump), &platforms, 1.0);
            let mut ticks = 1;
            while !player.on_ground {
                step(&mut player, InputState::default(), &platforms, 1.0);
                ticks += 1;
            }
            ticks
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_holding_jump_goes_higher() {
        let platforms = vec![ground()];
        let apex = |hold: bool| {
            let mut player = Player::new(&PlayerTuning::default(), &platforms[0]);
            let jump = InputState::default().with(Action::Jump);
            step(&mut player, jump, &platforms, 1.0);
            let mut top = player.rect.top();
            while !player.on_ground {
                let input = if hold { jump } else { InputState::default() };
                step(&mut player, input, &platforms, 1.0);
                top = top.min(player.rect.top());
            }
            top
        };
        assert!(apex(true) < apex(false));
    }

    #[test]
    fn test_no_double_jump_without_landing() {
        let platforms = vec![ground()];
        let mut player = Player::new(&PlayerTuning::default(), &platforms[0]);
        let jump = InputState::default().with(Action::Jump);
        step(&mut player, jump, &platforms, 1.0);
        step(&mut player, InputState::default(), &platforms, 1.0);
        let vy_before = player.vy;
        let events = step(&mut player, jump, &platforms, 1.0);
        assert!(!events.contains(&GameEvent::Jumped));
        assert!(player.vy > vy_before);
    }

    #[test]
    fn test_coyote_jump_after_walking_off_edge() {
        // Ledge ends just left of the player
        let platforms = vec![Platform::new(1, 0.0, GROUND_TOP, 129.0, 50.0)];
        let mut player = Player::new(&PlayerTuning::default(), &platforms[0]);
        // Past the landing hitbox's reach
        player.rect.pos.x = 140.0;

        step(&mut player, InputState::default(), &platforms, 1.0);
        assert!(!player.on_ground);
        assert_eq!(player.current_platform, None);
        assert_eq!(player.ground_state(), GroundState::Coyote);

        let events = step(&mut player, InputState::default().with(Action::Jump), &platforms, 1.0);
        assert!(events.contains(&GameEvent::Jumped));
        assert!(player.vy < 0.0);
    }

    #[test]
    fn test_coyote_window_expires() {
        let platforms: Vec<Platform> = Vec::new();
        let mut player = Player::new(&PlayerTuning::default(), &ground());
        for _ in 0..10 {
            step(&mut player, InputState::default(), &platforms, 1.0);
        }
        assert_eq!(player.ground_state(), GroundState::Falling);
        let events = step(&mut player, InputState::default().with(Action::Jump), &platforms, 1.0);
        assert!(!events.contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_high_jump_scales_takeoff() {
        let platforms = vec![ground()];
        let tuning = PlayerTuning::default();
        let mut player = Player::new(&tuning, &platforms[0]);
        player.grant_power_up(PowerUp::HighJump, &tuning);
        step(&mut player, InputState::default().with(Action::Jump), &platforms, 1.0);
        assert!((player.vy - (-7.2 + 0.15 * 0.6)).abs() < 1e-5);
    }

    #[test]
    fn test_step_up_onto_low_ledge() {
        let platforms = vec![ground(), Platform::new(2, 131.0, GROUND_TOP - 10.0, 200.0, 60.0)];
        let mut player = Player::new(&PlayerTuning::default(), &platforms[0]);
        let right = InputState::default().with(Action::Right);
        for _ in 0..5 {
            step(&mut player, right, &platforms, 1.0);
        }
        assert!(player.on_ground);
        assert_eq!(player.current_platform, Some(2));
        assert!((player.rect.bottom() - (GROUND_TOP - 10.0)).abs() < 1e-3);
    }

    #[test]
    fn test_tall_wall_is_not_stepped() {
        let platforms = vec![ground(), Platform::new(2, 131.0, GROUND_TOP - 40.0, 200.0, 90.0)];
        let mut player = Player::new(&PlayerTuning::default(), &platforms[0]);
        let right = InputState::default().with(Action::Right);
        for _ in 0..5 {
            step(&mut player, right, &platforms, 1.0);
        }
        assert_eq!(player.current_platform, Some(1));
    }

    #[test]
    fn test_drop_through_thin_platform() {
        let thin = Platform::new(2, 0.0, 400.0, 400.0, 20.0);
        let platforms = vec![ground(), thin.clone()];
        let mut player = Player::new(&PlayerTuning::default(), &thin);
        step(&mut player, InputState::default(), &platforms, 1.0);
        assert_eq!(player.current_platform, Some(2));

        let down = InputState::default().with(Action::Down);
        step(&mut player, down, &platforms, 1.0);
        assert!(!player.on_ground);
        for _ in 0..200 {
            step(&mut player, InputState::default(), &platforms, 1.0);
        }
        assert_eq!(player.current_platform, Some(1));
    }

    #[test]
    fn test_cannot_drop_through_ground() {
        let platforms = vec![ground()];
        let mut player = Player::new(&PlayerTuning::default(), &platforms[0]);
        let down = InputState::default().with(Action::Down);
        for _ in 0..10 {
            step(&mut player, down, &platforms, 1.0);
            assert!(player.on_ground);
        }
    }

    #[test]
    fn test_ceiling_clamps_and_zeroes_rise() {
        let platforms: Vec<Platform> = Vec::new();
        let mut player = Player::new(&PlayerTuning::default(), &ground());
        player.rect.pos.y = -15.0;
        player.vy = -6.0;
        player.on_ground = false;
        player.is_jumping = true;
        step(&mut player, InputState::default(), &platforms, 1.0);
        assert_eq!(player.rect.top(), -20.0);
        assert_eq!(player.vy, 0.0);
    }

    #[test]
    fn test_falling_off_world_is_fatal() {
        let platforms: Vec<Platform> = Vec::new();
        let mut player = Player::new(&PlayerTuning::default(), &ground());
        let mut died = false;
        for _ in 0..300 {
            let events = step(&mut player, InputState::default(), &platforms, 1.0);
            died |= events.contains(&GameEvent::PlayerDied(DeathCause::Fell));
        }
        assert!(died);
    }

    #[test]
    fn test_rightward_movement_is_slower() {
        let platforms = vec![ground()];
        let mut player = Player::new(&PlayerTuning::default(), &platforms[0]);
        player.rect.pos.x = 500.0;
        step(&mut player, InputState::default().with(Action::Right), &platforms, 1.0);
        assert!((player.rect.left() - 502.4).abs() < 1e-4);
        step(&mut player, InputState::default().with(Action::Left), &platforms, 1.0);
        assert!((player.rect.left() - 499.4).abs() < 1e-4);
    }

    #[test]
    fn test_horizontal_clamped_to_screen() {
        let platforms = vec![ground()];
        let mut player = Player::new(&PlayerTuning::default(), &platforms[0]);
        for _ in 0..100 {
            step(&mut player, InputState::default().with(Action::Left), &platforms, 3.0);
        }
        assert_eq!(player.rect.left(), 10.0);
    }

    #[test]
    fn test_jetpack_thrust_caps_upward_speed() {
        let platforms = vec![ground()];
        let tuning = PlayerTuning::default();
        let mut player = Player::new(&tuning, &platforms[0]);
        player.grant_power_up(PowerUp::Jetpack, &tuning);
        let jump = InputState::default().with(Action::Jump);
        step(&mut player, jump, &platforms, 1.0);
        for _ in 0..60 {
            step(&mut player, jump, &platforms, 1.0);
            assert!(player.vy >= -6.0);
        }
        // Thrust holds the cap, gravity then pulls one step back
        assert!(player.is_thrusting);
        assert!((player.vy - (-3.0 + 0.15)).abs() < 1e-3);
        assert!((player.fuel - 70.0).abs() < 1e-3);
    }

    #[test]
    fn test_fuel_runs_dry_and_regenerates() {
        let platforms = vec![ground()];
        let tuning = PlayerTuning::default();
        let mut player = Player::new(&tuning, &platforms[0]);
        player.grant_power_up(PowerUp::Jetpack, &tuning);
        let jump = InputState::default().with(Action::Jump);
        let mut ran_dry = false;
        for _ in 0..400 {
            step(&mut player, jump, &platforms, 1.0);
            ran_dry |= player.fuel == 0.0;
        }
        assert!(ran_dry);
        for _ in 0..50 {
            step(&mut player, InputState::default(), &platforms, 1.0);
        }
        assert!(player.fuel > 0.0);
    }

    #[test]
    fn test_power_ups_expire_together() {
        let platforms = vec![ground()];
        let tuning = PlayerTuning::default();
        let mut player = Player::new(&tuning, &platforms[0]);
        player.grant_power_up(PowerUp::SlowFall, &tuning);
        player.grant_power_up(PowerUp::Blaster, &tuning);
        assert_eq!(player.power_up_timer, 600.0);

        for _ in 0..299 {
            step(&mut player, InputState::default(), &platforms, 2.0);
        }
        assert!(player.power_ups.slow_fall && player.power_ups.blaster);

        let events = step(&mut player, InputState::default(), &platforms, 2.0);
        assert!(events.contains(&GameEvent::PowerUpsExpired));
        assert!(!player.power_ups.any());
        assert_eq!(player.power_up_timer, 0.0);
    }

    #[test]
    fn test_second_grant_refreshes_shared_timer() {
        let tuning = PlayerTuning::default();
        let mut player = Player::new(&tuning, &ground());
        player.grant_power_up(PowerUp::HighJump, &tuning);
        player.power_up_timer = 100.0;
        player.grant_power_up(PowerUp::Jetpack, &tuning);
        assert_eq!(player.power_up_timer, 600.0);
        assert!(player.power_ups.high_jump && player.power_ups.jetpack);
        assert_eq!(player.power_up_seconds(), 10);
    }

    #[test]
    fn test_blaster_auto_fires_up_to_cap() {
        let platforms = vec![ground()];
        let tuning = PlayerTuning::default();
        let mut player = Player::new(&tuning, &platforms[0]);
        player.rect.pos.x = 10.0;
        player.grant_power_up(PowerUp::Blaster, &tuning);

        step(&mut player, InputState::default(), &platforms, 1.0);
        assert_eq!(player.projectiles.len(), 1);
        let shot = &player.projectiles[0];
        assert!((shot.rect.top() - (player.rect.top() + 25.0)).abs() < 1e-3);

        for _ in 0..100 {
            step(&mut player, InputState::default(), &platforms, 1.0);
            assert!(player.projectiles.len() <= 5);
        }
        assert!(player.projectiles.len() >= 5);
    }

    proptest! {
        #[test]
        fn fuel_stays_in_bounds(
            inputs in proptest::collection::vec((any::<bool>(), 0.0f32..=3.0), 1..300)
        ) {
            let tuning = Tuning::default();
            let platforms = vec![ground()];
            let mut player = Player::new(&tuning.player, &platforms[0]);
            player.grant_power_up(PowerUp::Jetpack, &tuning.player);
            let mut events = Vec::new();
            for (held, dt) in inputs {
                let mut input = InputState::default();
                input.jump = held;
                player.update(&input, &platforms, &tuning, dt, &mut events);
                prop_assert!(player.fuel >= 0.0 && player.fuel <= tuning.player.max_fuel);
                prop_assert!(player.coyote_timer >= 0.0 && player.coyote_timer <= tuning.player.coyote_frames);
                prop_assert!(player.current_platform.is_none() || player.on_ground);
            }
        }

        #[test]
        fn power_up_timer_is_linear(f in 0.01f32..=3.0) {
            let tuning = Tuning::default();
            let platforms = vec![ground()];
            let mut split = Player::new(&tuning.player, &platforms[0]);
            let mut whole = split.clone();
            split.grant_power_up(PowerUp::HighJump, &tuning.player);
            whole.grant_power_up(PowerUp::HighJump, &tuning.player);
            let mut events = Vec::new();
            let idle = InputState::default();
            split.update(&idle, &platforms, &tuning, f, &mut events);
            split.update(&idle, &platforms, &tuning, f, &mut events);
            whole.update(&idle, &platforms, &tuning, 2.0 * f, &mut events);
            prop_assert!((split.power_up_timer - whole.power_up_timer).abs() < 1e-3);
        }
    }
}
