//! Game state and events
//!
//! Everything the simulation mutates lives in [`GameState`]; there are no
//! module-level globals.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::SpriteSizes;
use super::room::{self, Room};
use super::scene::Scene;
use crate::consts::START_LIVES;
use crate::highscores::HighScore;

/// Things the host should react to (sounds, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A room's layout was just built
    RoomEntered(Room),
    /// The player collided; carries the crash clip variant to play
    Crash(u8),
    /// A life icon was removed
    LifeLost { remaining: u8 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    /// Current room
    pub room: Room,
    /// All entities of the current room
    pub scene: Scene,
    /// Image dimensions used to size sprites
    pub sizes: SpriteSizes,
    /// Lives remaining; equals the number of life icons while playing
    pub lives: u8,
    /// Score of the current (or last) run
    pub score: f64,
    pub high_score: HighScore,
    /// Milliseconds of play since entering the Playing room
    pub game_time: f64,
    /// Game time of the last life loss
    pub last_hit: Option<f64>,
    /// Countdown until the next spawn attempt
    pub spawn_timer: f64,
    /// Blink the high score while the current run holds it
    pub blink_enabled: bool,
    /// Events raised since the last drain
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state on the title screen
    pub fn new(seed: u64, sizes: SpriteSizes) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            room: Room::Title,
            scene: Scene::new(),
            sizes,
            lives: START_LIVES,
            score: 0.0,
            high_score: HighScore::new(),
            game_time: 0.0,
            last_hit: None,
            spawn_timer: 0.0,
            blink_enabled: true,
            events: Vec::new(),
        };
        room::enter(&mut state, Room::Title);
        state
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Reset run-scoped values when a new game starts
    pub fn reset_run(&mut self) {
        self.lives = START_LIVES;
        self.score = 0.0;
        self.game_time = 0.0;
        self.last_hit = None;
        self.spawn_timer = 0.0;
    }

    /// Player forward speed, zero outside of play
    pub fn player_velx(&self) -> f32 {
        self.scene
            .find(super::entity::Tag::Player)
            .map(|p| p.vel.x)
            .unwrap_or(0.0)
    }
}
