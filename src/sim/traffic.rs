//! World scroll and enemy motion
//!
//! The player sprite never moves forward; instead the road and traffic slide
//! left by the player's forward travel each tick.

use crate::consts::*;

use super::entity::Tag;
use super::scene::Scene;

/// Shift roads and enemies left by `player_velx * dt`, wrapping road tiles
///
/// `road_width` is the width of one road tile; two tiles leapfrog each other.
pub fn scroll_world(scene: &mut Scene, player_velx: f32, dt: f32, road_width: f32) {
    let shift = player_velx * dt;
    for entity in scene.iter_mut() {
        match entity.tag {
            Tag::Road => {
                entity.pos.x -= shift;
                if road_width > 0.0 && entity.pos.x < -road_width {
                    entity.pos.x += 2.0 * road_width;
                }
            }
            Tag::Enemy => entity.pos.x -= shift,
            _ => {}
        }
    }
}

/// Integrate enemy velocities, bounce them off the curbs and drop stragglers
///
/// Returns the number of enemies removed.
pub fn move_enemies(scene: &mut Scene, dt: f32) -> usize {
    for enemy in scene.iter_mut().filter(|e| e.tag == Tag::Enemy) {
        enemy.pos.x += enemy.vel.x * dt;
        enemy.pos.y += enemy.vel.y * dt;
        if enemy.pos.y < 0.0 || enemy.pos.y > STREET_HEIGHT {
            enemy.pos.y = enemy.pos.y.clamp(0.0, STREET_HEIGHT);
            enemy.vel.y = -enemy.vel.y;
        }
    }

    let before = scene.len();
    scene.retain(|e| e.tag != Tag::Enemy || e.pos.x.abs() <= 2.0 * GAME_WIDTH);
    before - scene.len()
}
