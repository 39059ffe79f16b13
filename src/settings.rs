//! Player preferences
//!
//! Audio levels only; gameplay balance lives in `tuning`. Persisted apart
//! from the high score in LocalStorage on the web, as JSON elsewhere.

use serde::{Deserialize, Serialize};

use crate::audio::{AudioService, Channel};
use crate::error::ServiceError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence both channels without losing the levels
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_volume: 0.1,
            sfx_volume: 0.5,
            muted: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "runnerSettings";

    pub fn from_json(json: &str) -> Result<Self, ServiceError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.clamp_levels();
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ServiceError> {
        Ok(serde_json::to_string(self)?)
    }

    fn clamp_levels(&mut self) {
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
    }

    /// Level actually sent to the backend
    pub fn effective_volume(&self, channel: Channel) -> f32 {
        if self.muted {
            return 0.0;
        }
        match channel {
            Channel::Music => self.music_volume,
            Channel::Effects => self.sfx_volume,
        }
    }

    /// Push both channel levels to `audio`
    pub fn apply(&self, audio: &mut dyn AudioService) -> Result<(), ServiceError> {
        audio.set_volume(Channel::Music, self.effective_volume(Channel::Music))?;
        audio.set_volume(Channel::Effects, self.effective_volume(Channel::Effects))
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => return settings,
                Err(err) => log::warn!("Ignoring {}: {}", path.display(), err),
            },
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => {
                log::warn!("Could not read {}: {}", path.display(), err)
            }
            Err(_) => {}
        }
        Self::default()
    }
}
