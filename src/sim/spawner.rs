//! Enemy traffic spawner
//!
//! A countdown drains in proportion to the player's speed; when it runs out
//! and the scene is below its score-dependent cap, one car enters off-screen
//! to the right and the countdown is re-armed with a random delay that
//! shrinks as the score grows.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

use super::entity::{Entity, ImageId, SpriteSizes, Tag};
use super::scene::Scene;

/// Maximum entity count before spawning pauses
pub fn soft_cap(score: f64) -> usize {
    SPAWN_BASE_CAP + (score.max(0.0) / SPAWN_CAP_SCORE_STEP) as usize
}

/// Exclusive upper bound of the next countdown
///
/// The score is clamped to at least 1 so a fresh game gets the longest delay
/// instead of dividing by zero.
pub fn max_delay(score: f64) -> f64 {
    let denom = score.max(1.0);
    SPAWN_MAX_DELAY.min(SPAWN_MIN_DELAY + SPAWN_DELAY_SCORE_FACTOR / denom)
}

/// Build a random enemy car
pub fn random_enemy<R: Rng>(rng: &mut R, sizes: &SpriteSizes) -> Entity {
    let variant = rng.random_range(0..CAR_VARIANTS);
    let pos = Vec2::new(GAME_WIDTH * 1.5, rng.random_range(0.0..=STREET_HEIGHT));
    let vel = Vec2::new(
        rng.random_range(ENEMY_MIN_VELX..ENEMY_MAX_VELX),
        rng.random_range(-ENEMY_MAX_VELY..=ENEMY_MAX_VELY),
    );
    Entity::sprite(ImageId::Car(variant), pos, sizes)
        .with_tag(Tag::Enemy)
        .with_body(ENEMY_MASS, vel)
}

/// Advance the countdown and spawn at most one car
///
/// Returns true if a car was added.
pub fn update_spawner<R: Rng>(
    timer: &mut f64,
    scene: &mut Scene,
    player_velx: f32,
    score: f64,
    dt: f32,
    rng: &mut R,
    sizes: &SpriteSizes,
) -> bool {
    *timer -= 2.0 * player_velx as f64 * dt as f64;
    if *timer >= 0.0 || scene.len() >= soft_cap(score) {
        return false;
    }

    let enemy = random_enemy(rng, sizes);
    log::debug!(
        "spawn {:?} at y={:.0} vel=({:.3}, {:.3})",
        enemy.visual,
        enemy.pos.y,
        enemy.vel.x,
        enemy.vel.y
    );
    scene.push(enemy);
    *timer = rng.random_range(0.0..max_delay(score));
    true
}
