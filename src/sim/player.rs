//! Player controller
//!
//! Integrates steering input into the player's velocity. Only the vertical
//! position is integrated; forward speed scrolls the world instead.

use crate::consts::*;
use crate::input::FrameInput;

use super::entity::Entity;

/// Move `v` toward zero by `amount` without crossing it
#[inline]
fn approach_zero(v: f32, amount: f32) -> f32 {
    if v > 0.0 {
        (v - amount).max(0.0)
    } else {
        (v + amount).min(0.0)
    }
}

/// Apply one tick of input to the player
pub fn update_player(player: &mut Entity, input: &FrameInput, dt: f32) {
    player.vel.y = approach_zero(player.vel.y, PLAYER_FRICTION * dt);

    if input.up() {
        player.vel.y -= PLAYER_STEER_ACCEL * dt;
    }
    if input.down() {
        player.vel.y += PLAYER_STEER_ACCEL * dt;
    }
    if input.brake() {
        player.vel.x -= PLAYER_BRAKE_DECEL * dt;
    }
    if input.throttle() {
        player.vel.x += PLAYER_THROTTLE_ACCEL * dt;
    }

    player.vel.x = player.vel.x.clamp(0.0, PLAYER_MAX_VELX);
    player.vel.y = player.vel.y.clamp(-PLAYER_MAX_VELY, PLAYER_MAX_VELY);

    player.pos.y = (player.pos.y + player.vel.y * dt).clamp(0.0, STREET_HEIGHT);
}

/// Keep the player sprite on the visible play field after collision pushes
pub fn confine_player(player: &mut Entity) {
    let max_x = (GAME_WIDTH - player.size.x).max(0.0);
    player.pos.x = player.pos.x.clamp(0.0, max_x);
    player.pos.y = player.pos.y.clamp(0.0, STREET_HEIGHT);
}
