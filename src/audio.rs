//! Sound and music playback
//!
//! The simulation never talks to audio directly. The session maps game
//! events onto `SoundEffect`s and hands them to whatever `AudioService` the
//! host installed. Playback is fire-and-forget: a failure (autoplay blocked,
//! no device) is reported but never changes game state.

use crate::error::ServiceError;

/// One-shot clips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player takes off
    Jump,
    /// Enemy stomped or shot
    EnemyDefeated,
    /// Coin picked up
    Coin,
    /// Chest opened
    Chest,
}

impl SoundEffect {
    /// Per-clip loudness before the effects channel volume
    pub fn base_gain(self) -> f32 {
        match self {
            SoundEffect::Jump => 0.5,
            SoundEffect::EnemyDefeated => 0.6,
            SoundEffect::Coin => 0.4,
            SoundEffect::Chest => 0.7,
        }
    }

    /// Default asset file
    pub fn asset(self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump.wav",
            SoundEffect::EnemyDefeated => "hitHurt.wav",
            SoundEffect::Coin => "pickupCoin.wav",
            SoundEffect::Chest => "chest.mp3",
        }
    }
}

/// Looping tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Music {
    Theme,
}

impl Music {
    pub fn asset(self) -> &'static str {
        match self {
            Music::Theme => "SEGA.mp3",
        }
    }
}

/// Independently adjustable volume channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Music,
    Effects,
}

/// Audio backend installed by the host
pub trait AudioService {
    /// Restart `effect` from the beginning
    fn play_one_shot(&mut self, effect: SoundEffect) -> Result<(), ServiceError>;

    /// Start or resume a looping track
    fn play_loop(&mut self, music: Music) -> Result<(), ServiceError>;

    /// Pause the current track, keeping its position
    fn pause(&mut self) -> Result<(), ServiceError>;

    /// Channel volume in `[0, 1]`
    fn set_volume(&mut self, channel: Channel, level: f32) -> Result<(), ServiceError>;
}

/// Channel volumes shared by the concrete backends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mix {
    pub music: f32,
    pub effects: f32,
}

impl Default for Mix {
    fn default() -> Self {
        Self {
            music: 0.1,
            effects: 0.5,
        }
    }
}

impl Mix {
    pub fn set(&mut self, channel: Channel, level: f32) {
        let level = level.clamp(0.0, 1.0);
        match channel {
            Channel::Music => self.music = level,
            Channel::Effects => self.effects = level,
        }
    }

    /// Final gain for a one-shot clip
    pub fn effect_gain(&self, effect: SoundEffect) -> f32 {
        effect.base_gain() * self.effects
    }
}

/// Silent backend for headless runs and tests
#[derive(Debug, Default)]
pub struct NullAudio {
    mix: Mix,
    playing: Option<Music>,
}

impl NullAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mix(&self) -> Mix {
        self.mix
    }

    pub fn playing(&self) -> Option<Music> {
        self.playing
    }
}

impl AudioService for NullAudio {
    fn play_one_shot(&mut self, effect: SoundEffect) -> Result<(), ServiceError> {
        log::trace!("sfx {:?} at gain {:.2}", effect, self.mix.effect_gain(effect));
        Ok(())
    }

    fn play_loop(&mut self, music: Music) -> Result<(), ServiceError> {
        self.playing = Some(music);
        Ok(())
    }

    fn pause(&mut self) -> Result<(), ServiceError> {
        self.playing = None;
        Ok(())
    }

    fn set_volume(&mut self, channel: Channel, level: f32) -> Result<(), ServiceError> {
        self.mix.set(channel, level);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_gain_scales_with_channel() {
        let mut mix = Mix::default();
        assert!((mix.effect_gain(SoundEffect::Chest) - 0.35).abs() < 1e-6);
        mix.set(Channel::Effects, 1.0);
        assert!((mix.effect_gain(SoundEffect::Jump) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut audio = NullAudio::new();
        audio.set_volume(Channel::Music, 4.0).unwrap();
        assert_eq!(audio.mix().music, 1.0);
        audio.set_volume(Channel::Effects, -1.0).unwrap();
        assert_eq!(audio.mix().effects, 0.0);
    }

    #[test]
    fn test_null_audio_tracks_music() {
        let mut audio = NullAudio::new();
        audio.play_loop(Music::Theme).unwrap();
        assert_eq!(audio.playing(), Some(Music::Theme));
        audio.pause().unwrap();
        assert_eq!(audio.playing(), None);
    }
}
