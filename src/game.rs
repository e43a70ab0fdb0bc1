//! Frame driver
//!
//! Owns everything between the host and the simulation: buffered input,
//! the frame clock, the audio manager and the render caches. The host calls
//! [`Game::frame`] once per display refresh.

use crate::audio::{AudioBackend, AudioManager};
use crate::consts::MAX_FRAME_DT_MS;
use crate::input::Input;
use crate::render::{Atlas, DrawSink, GlyphCache, GlyphRasterizer, render_scene};
use crate::settings::Settings;
use crate::sim::{GameState, tick};
use crate::viewport::Viewport;

/// Game instance driven by the host
pub struct Game {
    pub state: GameState,
    input: Input,
    atlas: Atlas,
    glyphs: GlyphCache,
    audio: AudioManager,
    viewport: Viewport,
    /// Timestamp of the previous frame
    last_time: Option<f64>,
}

impl Game {
    /// Create a game on the title screen
    ///
    /// `seed` is used unless the settings pin one.
    pub fn new(atlas: Atlas, settings: &Settings, seed: u64) -> Self {
        let seed = settings.seed.unwrap_or(seed);
        let mut state = GameState::new(seed, atlas.sprite_sizes());
        state.blink_enabled = settings.effective_blink();
        log::info!("Game initialized with seed: {}", seed);

        Self {
            state,
            input: Input::new(),
            atlas,
            glyphs: GlyphCache::new(),
            audio: AudioManager::from_settings(settings),
            viewport: Viewport::fit(crate::consts::GAME_WIDTH, crate::consts::GAME_HEIGHT),
            last_time: None,
        }
    }

    /// Preload every clip; call once before the first frame
    pub fn preload_audio(&self, backend: &mut impl AudioBackend) {
        self.audio.preload_all(backend);
    }

    pub fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Window size changed
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::fit(width, height);
        log::debug!(
            "Viewport {}x{} -> scale {} at {:?}",
            width,
            height,
            self.viewport.scale,
            self.viewport.offset
        );
    }

    /// Step size for a frame at `now_ms`; zero on the first frame
    fn frame_dt(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_time {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_DT_MS as f64),
            None => 0.0,
        };
        self.last_time = Some(now_ms);
        dt as f32
    }

    /// Run one frame: update, play sounds, draw
    pub fn frame<A, H>(&mut self, now_ms: f64, audio: &mut A, host: &mut H)
    where
        A: AudioBackend,
        H: GlyphRasterizer + DrawSink,
    {
        let dt = self.frame_dt(now_ms);
        let input = self.input.snapshot();
        tick(&mut self.state, &input, dt);

        for event in self.state.drain_events() {
            self.audio.handle_event(audio, &event);
        }

        render_scene(&self.state.scene, &self.atlas, &mut self.glyphs, host);
        self.input.end_frame();
    }
}
