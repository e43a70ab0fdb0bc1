//! Per-frame simulation step
//!
//! Dispatches to the active room's update. The Playing update runs the
//! player controller, world scroll, spawner, enemy motion, collisions and
//! HUD bookkeeping in that order.

use rand::Rng;

use super::collision::resolve_vehicles;
use super::entity::{Tag, Text, WHITE};
use super::hud;
use super::player::{confine_player, update_player};
use super::room::{self, Room};
use super::scene::Scene;
use super::spawner::update_spawner;
use super::state::{GameEvent, GameState};
use super::traffic::{move_enemies, scroll_world};
use crate::consts::*;
use crate::input::FrameInput;

/// Advance the game by `dt` milliseconds
pub fn tick(state: &mut GameState, input: &FrameInput, dt: f32) {
    let dt = dt.clamp(0.0, MAX_FRAME_DT_MS);
    state.game_time += dt as f64;

    match state.room {
        Room::Title => {
            blink_prompt(state);
            if input.confirm() {
                room::enter(state, Room::Playing);
            }
        }
        Room::Playing => update_playing(state, input, dt),
        Room::EndScreen => {
            blink_prompt(state);
            if input.confirm() {
                room::enter(state, Room::Title);
            }
        }
    }
}

fn blink_prompt(state: &mut GameState) {
    let color = hud::blink_color(state.game_time);
    if let Some(text) = state.scene.find_mut(Tag::Prompt).and_then(|e| e.text_mut()) {
        text.color = color;
    }
}

/// HUD text slot that the Playing layout always contains
fn hud_text(scene: &mut Scene, tag: Tag) -> &mut Text {
    match scene.expect_mut(tag).text_mut() {
        Some(text) => text,
        None => panic!("HUD slot {tag:?} is not a text entity"),
    }
}

fn update_playing(state: &mut GameState, input: &FrameInput, dt: f32) {
    let player = state.scene.expect_mut(Tag::Player);
    update_player(player, input, dt);
    let velx = player.vel.x;

    let road_w = room::road_width(state);
    scroll_world(&mut state.scene, velx, dt, road_w);

    update_spawner(
        &mut state.spawn_timer,
        &mut state.scene,
        velx,
        state.score,
        dt,
        &mut state.rng,
        &state.sizes,
    );

    move_enemies(&mut state.scene, dt);

    let player_hit = resolve_vehicles(&mut state.scene);
    confine_player(state.scene.expect_mut(Tag::Player));
    if player_hit && handle_player_hit(state) {
        // Game over: the scene now belongs to the end screen
        return;
    }

    state.score += velx as f64 * dt as f64;
    update_hud(state);
}

/// Play a crash and take a life unless one was lost recently
///
/// Returns true if that was the last life.
fn handle_player_hit(state: &mut GameState) -> bool {
    let variant = state.rng.random_range(0..CRASH_SOUND_VARIANTS);
    state.push_event(GameEvent::Crash(variant));

    let now = state.game_time;
    if !state.last_hit.is_none_or(|t| now - t >= HIT_COOLDOWN_MS) {
        return false;
    }

    state.last_hit = Some(now);
    state.scene.remove_tag(Tag::Life(state.lives));
    state.lives = state.lives.saturating_sub(1);
    log::info!("Life lost at {:.0} ms, {} remaining", now, state.lives);
    state.push_event(GameEvent::LifeLost {
        remaining: state.lives,
    });

    if state.lives == 0 {
        room::enter(state, Room::EndScreen);
        return true;
    }
    false
}

fn update_hud(state: &mut GameState) {
    state.high_score.record(state.score);
    let holds_record = state.high_score.is_held_by(state.score);
    let high_color = if state.blink_enabled && holds_record {
        hud::blink_color(state.game_time)
    } else {
        WHITE
    };
    let (minutes, seconds) = hud::format_clock(state.game_time);
    let score = hud::format_score(state.score);
    let best = hud::format_score(state.high_score.best());

    let scene = &mut state.scene;
    hud_text(scene, Tag::Score).content = score;
    let high = hud_text(scene, Tag::HighScore);
    high.content = best;
    high.color = high_color;
    hud_text(scene, Tag::Minutes).content = minutes;
    hud_text(scene, Tag::Seconds).content = seconds;
}
