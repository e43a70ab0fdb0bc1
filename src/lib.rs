//! Bat Chase - a side-scrolling traffic dodger
//!
//! Core modules:
//! - `sim`: Game state, rooms, player/traffic physics and collisions
//! - `input`: Key and touch state with per-frame edge detection
//! - `render`: Image atlas, glyph cache and the draw traits a host implements
//! - `audio`: Sound ids and volume handling over a host audio backend
//! - `game`: Frame driver tying input, simulation, audio and rendering together
//! - `viewport`: Letterboxed fit of the logical frame into the window
//! - `settings` / `highscores`: Startup preferences and the in-memory best score

pub mod audio;
pub mod game;
pub mod highscores;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;
pub mod viewport;

pub use game::Game;
pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
///
/// Distances are logical pixels, times are milliseconds and velocities are
/// pixels per millisecond.
pub mod consts {
    /// Logical play field size
    pub const GAME_WIDTH: f32 = 569.0;
    pub const GAME_HEIGHT: f32 = 388.0;
    /// Vehicles keep their top edge within [0, STREET_HEIGHT]
    pub const STREET_HEIGHT: f32 = 160.0;

    /// Upper bound on a single simulation step
    pub const MAX_FRAME_DT_MS: f32 = 50.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 120.0;
    pub const PLAYER_MASS: f32 = 0.05;
    pub const PLAYER_START_VELX: f32 = 0.05;
    pub const PLAYER_MAX_VELX: f32 = 0.55;
    pub const PLAYER_MAX_VELY: f32 = 0.3;
    /// Vertical velocity decay toward zero (px/ms²)
    pub const PLAYER_FRICTION: f32 = 0.0006;
    /// Up/down acceleration (px/ms²)
    pub const PLAYER_STEER_ACCEL: f32 = 0.0012;
    /// Forward acceleration when holding right (px/ms²)
    pub const PLAYER_THROTTLE_ACCEL: f32 = 0.0004;
    /// Deceleration when holding left (px/ms²)
    pub const PLAYER_BRAKE_DECEL: f32 = 0.0008;

    /// Enemy cars
    pub const ENEMY_MASS: f32 = 1.0;
    pub const ENEMY_MIN_VELX: f32 = 0.15;
    pub const ENEMY_MAX_VELX: f32 = 0.45;
    pub const ENEMY_MAX_VELY: f32 = 0.07;
    pub const CAR_VARIANTS: u8 = 8;

    /// Spawner tuning
    pub const SPAWN_BASE_CAP: usize = 15;
    pub const SPAWN_CAP_SCORE_STEP: f64 = 10_000.0;
    pub const SPAWN_MAX_DELAY: f64 = 2500.0;
    pub const SPAWN_MIN_DELAY: f64 = 25.0;
    pub const SPAWN_DELAY_SCORE_FACTOR: f64 = 22_000_000.0;

    /// Lives and hit handling
    pub const START_LIVES: u8 = 3;
    pub const HIT_COOLDOWN_MS: f64 = 500.0;
    /// Number of crash clips picked from on a hit
    pub const CRASH_SOUND_VARIANTS: u8 = 3;
    /// High score blink half-period
    pub const BLINK_HALF_PERIOD_MS: f64 = 500.0;

    /// Road tiles; the second tile starts one road width to the right
    pub const ROAD_SECOND_TILE_X: f32 = 4096.0;
}
