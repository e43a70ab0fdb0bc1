//! Audio front end
//!
//! The host plays the clips; this module decides which clip, when, and how loud.

use crate::consts::CRASH_SOUND_VARIANTS;
use crate::settings::Settings;
use crate::sim::room::Room;
use crate::sim::state::GameEvent;

/// Sound clips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    /// Background music, looped during play
    Theme,
    /// Crash clip variant, 0-based
    Crash(u8),
}

impl Sound {
    /// Every clip the game uses
    pub fn all() -> impl Iterator<Item = Sound> {
        std::iter::once(Sound::Theme).chain((0..CRASH_SOUND_VARIANTS).map(Sound::Crash))
    }

    /// Asset file name
    pub fn file_name(&self) -> String {
        match self {
            Sound::Theme => "theme.mp3".to_string(),
            Sound::Crash(n) => format!("crash{}.mp3", n + 1),
        }
    }

    pub fn is_music(&self) -> bool {
        matches!(self, Sound::Theme)
    }
}

/// Host audio service
pub trait AudioBackend {
    fn preload(&mut self, sound: Sound, url: &str);

    /// Start a clip; `volume` is already scaled to 0..1
    fn play(&mut self, sound: Sound, looped: bool, volume: f32);
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self::from_settings(&Settings::default())
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self {
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
            muted: settings.muted,
        };
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Volume a clip should play at
    pub fn effective_volume(&self, sound: Sound) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if sound.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel
    }

    /// Hand every clip to the backend up front
    pub fn preload_all(&self, backend: &mut impl AudioBackend) {
        for sound in Sound::all() {
            backend.preload(sound, &sound.file_name());
        }
    }

    /// Play a sound; silent clips are never started
    pub fn play(&self, backend: &mut impl AudioBackend, sound: Sound, looped: bool) {
        let vol = self.effective_volume(sound);
        if vol <= 0.0 {
            return;
        }
        backend.play(sound, looped, vol);
    }

    /// React to a simulation event
    pub fn handle_event(&self, backend: &mut impl AudioBackend, event: &GameEvent) {
        match *event {
            GameEvent::RoomEntered(Room::Playing) => self.play(backend, Sound::Theme, true),
            GameEvent::Crash(variant) => self.play(backend, Sound::Crash(variant), false),
            GameEvent::RoomEntered(_) | GameEvent::LifeLost { .. } => {}
        }
    }
}
