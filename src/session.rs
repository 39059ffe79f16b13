//! Run lifecycle: Menu -> Playing <-> Paused -> GameOver -> Menu
//!
//! The session owns the clock, the current world and the outer services.
//! Hosts call `tick` once per display callback with a fresh input snapshot
//! and `render` whenever they want a frame.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::{AudioService, Music, SoundEffect};
use crate::error::ServiceError;
use crate::highscores::HighScoreStore;
use crate::input::{Action, InputState};
use crate::renderer::{Renderer, draw_frame, scene::Frame, start_button};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, SimClock, World, tick};
use crate::tuning::{Tuning, TuningError};

/// Log and drop a service failure
fn report(result: Result<(), ServiceError>, what: &str) {
    if let Err(err) = result {
        log::warn!("{} failed: {}", what, err);
    }
}

fn sound_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::Jumped => Some(SoundEffect::Jump),
        GameEvent::EnemyStomped | GameEvent::EnemyShot => Some(SoundEffect::EnemyDefeated),
        GameEvent::CoinCollected => Some(SoundEffect::Coin),
        GameEvent::PowerUpGranted(_) => Some(SoundEffect::Chest),
        GameEvent::PowerUpsExpired
        | GameEvent::SpeedIncreased { .. }
        | GameEvent::PlayerDied(_) => None,
    }
}

pub struct Session {
    tuning: Tuning,
    phase: GamePhase,
    clock: SimClock,
    /// Present from the first start onward; kept after game over for drawing
    world: Option<World>,
    audio: Box<dyn AudioService>,
    store: Box<dyn HighScoreStore>,
    high_score: u64,
    /// Draws one seed per run
    seeds: Pcg32,
    prev_input: InputState,
    settings: Settings,
    runs: u32,
}

impl Session {
    /// Rejects tuning that could not produce a sane run
    pub fn new(
        tuning: Tuning,
        audio: Box<dyn AudioService>,
        store: Box<dyn HighScoreStore>,
        seed: u64,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;

        let high_score = store.high_score().unwrap_or_else(|err| {
            log::warn!("Could not read high score: {}", err);
            0
        });
        let clock = SimClock::new(tuning.world.ideal_frame_ms, tuning.world.max_time_factor);

        let mut session = Self {
            tuning,
            phase: GamePhase::Menu,
            clock,
            world: None,
            audio,
            store,
            high_score,
            seeds: Pcg32::seed_from_u64(seed),
            prev_input: InputState::default(),
            settings: Settings::default(),
            runs: 0,
        };
        let settings = session.settings.clone();
        session.apply_settings(&settings);
        log::info!("Session ready, high score {}", high_score);
        Ok(session)
    }

    /// Throw away any previous run and begin a new one
    pub fn start(&mut self) {
        let seed = self.seeds.random::<u64>();
        self.world = Some(World::new(self.tuning.clone(), seed));
        self.phase = GamePhase::Playing;
        self.prev_input = InputState::default();
        self.runs += 1;
        log::info!("Run {} started (seed {})", self.runs, seed);
        report(self.audio.play_loop(Music::Theme), "Starting music");
    }

    /// Playing <-> Paused; ignored elsewhere
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                log::info!("Paused");
                report(self.audio.pause(), "Pausing music");
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                log::info!("Resumed");
                report(self.audio.play_loop(Music::Theme), "Resuming music");
            }
            GamePhase::Menu | GamePhase::GameOver => {}
        }
    }

    /// Enter key: start from the menu, leave the game-over screen
    pub fn confirm(&mut self) {
        match self.phase {
            GamePhase::Menu => self.start(),
            GamePhase::GameOver => self.phase = GamePhase::Menu,
            GamePhase::Playing | GamePhase::Paused => {}
        }
    }

    /// Pointer click in world coordinates; true when it started a run
    pub fn click(&mut self, x: f32, y: f32) -> bool {
        if self.phase != GamePhase::Menu {
            return false;
        }
        let button = start_button(self.tuning.world.width, self.tuning.world.height);
        let inside =
            x > button.left() && x < button.right() && y > button.top() && y < button.bottom();
        if inside {
            self.start();
        }
        inside
    }

    /// One host callback
    pub fn tick(&mut self, now_ms: f64, input: &InputState) {
        // The clock runs in every phase so resuming never produces a leap
        let dt = self.clock.advance(now_ms);

        let prev = std::mem::replace(&mut self.prev_input, *input);
        if input.pressed_since(&prev, Action::Pause) {
            self.toggle_pause();
        }
        if input.pressed_since(&prev, Action::Confirm) {
            self.confirm();
        }

        if self.phase != GamePhase::Playing {
            return;
        }
        let Some(world) = self.world.as_mut() else {
            return;
        };

        tick(world, input, dt);

        for event in world.drain_events() {
            if let Some(effect) = sound_for(&event) {
                report(self.audio.play_one_shot(effect), "Playing sound");
            }
        }

        if world.player_dead {
            self.game_over();
        }
    }

    fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        let score = self.score();
        log::info!("Game over with score {}", score);

        if score > self.high_score {
            self.high_score = score;
            log::info!("New high score: {}", score);
            report(self.store.set_high_score(score), "Saving high score");
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Score of the current or last run
    pub fn score(&self) -> u64 {
        self.world.as_ref().map_or(0, |w| w.score)
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.settings = settings.clone();
        report(settings.apply(self.audio.as_mut()), "Applying audio settings");
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        let frame = Frame {
            phase: self.phase,
            world: self.world.as_ref(),
            high_score: self.high_score,
            width: self.tuning.world.width,
            height: self.tuning.world.height,
        };
        draw_frame(&frame, renderer);
    }
}
