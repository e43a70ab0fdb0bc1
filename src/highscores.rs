//! High score tracking
//!
//! Kept in memory for the lifetime of the process; nothing is saved.

use serde::{Deserialize, Serialize};

/// Best score seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScore {
    best: f64,
}

impl HighScore {
    pub fn new() -> Self {
        Self { best: 0.0 }
    }

    pub fn best(&self) -> f64 {
        self.best
    }

    /// Raise the high score if `score` beats it
    ///
    /// Returns true when a new best was set.
    pub fn record(&mut self, score: f64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// The running score currently holds the record
    pub fn is_held_by(&self, score: f64) -> bool {
        score >= self.best
    }
}
