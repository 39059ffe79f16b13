//! Sky Runner - an endless side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, enemies, spawning, collisions)
//! - `session`: Menu / play / pause / game-over state machine
//! - `renderer`: Drawing seam and scene description
//! - `audio`, `highscores`, `settings`: Outer services behind traits
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod highscores;
pub mod input;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::ServiceError;
pub use input::{Action, InputState};
pub use session::Session;
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Logical screen size in world pixels
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Host frame length the balance was tuned against (ms)
    pub const IDEAL_FRAME_MS: f32 = 500.0 / 60.0;
    /// Cap on the per-tick time factor after a stall
    pub const MAX_TIME_FACTOR: f32 = 3.0;

    /// Native persistence files
    pub const HIGH_SCORE_FILE: &str = "sky-runner-highscore.json";
    pub const SETTINGS_FILE: &str = "sky-runner-settings.json";
}
