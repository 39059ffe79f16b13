//! Browser host glue (WASM only)
//!
//! JS owns the canvas, the animation-frame loop and the key listeners. It
//! forwards keys and timestamps here and replays the recorded draw commands.

use std::collections::HashMap;

use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

use crate::audio::{AudioService, Channel, Mix, Music, SoundEffect};
use crate::error::ServiceError;
use crate::highscores::LocalStorageStore;
use crate::input::{Action, InputState};
use crate::renderer::CommandBuffer;
use crate::session::Session;
use crate::settings::Settings;
use crate::tuning::Tuning;

fn rejected(err: JsValue) -> ServiceError {
    ServiceError::Rejected(format!("{err:?}"))
}

/// `<audio>` element backend
pub struct WebAudio {
    mix: Mix,
    effects: HashMap<SoundEffect, HtmlAudioElement>,
    music: HashMap<Music, HtmlAudioElement>,
    /// Directory prefix for asset files
    base_url: String,
}

impl WebAudio {
    pub fn new(base_url: &str) -> Self {
        Self {
            mix: Mix::default(),
            effects: HashMap::new(),
            music: HashMap::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, asset: &str) -> String {
        if self.base_url.is_empty() {
            asset.to_string()
        } else {
            format!("{}/{}", self.base_url, asset)
        }
    }

    fn effect(&mut self, effect: SoundEffect) -> Result<&HtmlAudioElement, ServiceError> {
        if !self.effects.contains_key(&effect) {
            let el = HtmlAudioElement::new_with_src(&self.url(effect.asset())).map_err(rejected)?;
            self.effects.insert(effect, el);
        }
        self.effects
            .get(&effect)
            .ok_or(ServiceError::Unavailable("audio element"))
    }

    fn track(&mut self, music: Music) -> Result<&HtmlAudioElement, ServiceError> {
        if !self.music.contains_key(&music) {
            let el = HtmlAudioElement::new_with_src(&self.url(music.asset())).map_err(rejected)?;
            el.set_loop(true);
            self.music.insert(music, el);
        }
        self.music
            .get(&music)
            .ok_or(ServiceError::Unavailable("audio element"))
    }
}

impl AudioService for WebAudio {
    fn play_one_shot(&mut self, effect: SoundEffect) -> Result<(), ServiceError> {
        let gain = self.mix.effect_gain(effect);
        let el = self.effect(effect)?;
        el.set_volume(f64::from(gain));
        el.set_current_time(0.0);
        // Autoplay rejections surface on the promise; nothing to do about them here
        let _ = el.play().map_err(rejected)?;
        Ok(())
    }

    fn play_loop(&mut self, music: Music) -> Result<(), ServiceError> {
        let volume = self.mix.music;
        let el = self.track(music)?;
        el.set_volume(f64::from(volume));
        let _ = el.play().map_err(rejected)?;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), ServiceError> {
        for el in self.music.values() {
            el.pause().map_err(rejected)?;
        }
        Ok(())
    }

    fn set_volume(&mut self, channel: Channel, level: f32) -> Result<(), ServiceError> {
        self.mix.set(channel, level);
        if channel == Channel::Music {
            for el in self.music.values() {
                el.set_volume(f64::from(self.mix.music));
            }
        }
        Ok(())
    }
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // A logger was already installed by the host page
        return;
    }
    log::info!("Sky Runner starting...");
}

/// Game handle exported to JS
#[wasm_bindgen]
pub struct WebGame {
    session: Session,
    input: InputState,
    frame: CommandBuffer,
}

#[wasm_bindgen]
impl WebGame {
    /// `tuning_json` overrides any subset of the default balance
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64, asset_base: &str, tuning_json: Option<String>) -> Result<WebGame, JsValue> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Tuning::default(),
        };
        let audio = Box::new(WebAudio::new(asset_base));
        let mut session = Session::new(tuning, audio, Box::new(LocalStorageStore), seed as u64)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        session.apply_settings(&Settings::load());
        Ok(WebGame {
            session,
            input: InputState::default(),
            frame: CommandBuffer::new(),
        })
    }

    /// Feed a `KeyboardEvent.code`; returns true when the key is bound
    pub fn key(&mut self, code: &str, held: bool) -> bool {
        match Action::from_key_code(code) {
            Some(action) => {
                self.input.set(action, held);
                true
            }
            None => false,
        }
    }

    /// Canvas click in world pixels
    pub fn click(&mut self, x: f32, y: f32) -> bool {
        self.session.click(x, y)
    }

    pub fn tick(&mut self, now_ms: f64) {
        let before = self.session.phase();
        self.session.tick(now_ms, &self.input);
        self.input = self.input.carry_over(before, self.session.phase());
    }

    /// Draw commands for the current frame as JSON
    pub fn frame_json(&mut self) -> Result<String, JsValue> {
        self.frame.clear();
        self.session.render(&mut self.frame);
        self.frame
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn set_settings_json(&mut self, json: &str) -> Result<(), JsValue> {
        let settings = Settings::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        settings.save();
        self.session.apply_settings(&settings);
        Ok(())
    }

    pub fn score(&self) -> f64 {
        self.session.score() as f64
    }

    pub fn high_score(&self) -> f64 {
        self.session.high_score() as f64
    }

    pub fn phase(&self) -> String {
        format!("{:?}", self.session.phase())
    }
}
