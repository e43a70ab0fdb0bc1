//! Rooms and their entity layouts
//!
//! Entering a room clears the scene and rebuilds the room's fixed layout.

use glam::Vec2;

use super::entity::{Entity, FontId, ImageId, Tag, Text};
use super::hud;
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Room {
    /// Title art, waiting for confirm
    Title,
    /// Active gameplay
    Playing,
    /// Final score, waiting for confirm
    EndScreen,
}

const HUD_TEXT_SIZE: u32 = 16;
const HUD_SPACING: f32 = 11.0;
const HUD_TEXT_Y: f32 = 342.0;
const BANNER_SIZE: u32 = 32;
const BANNER_SPACING: f32 = 24.0;

fn hud_text(content: impl Into<String>) -> Text {
    Text::new(content, FontId::HUD, HUD_TEXT_SIZE, HUD_SPACING)
}

fn prompt() -> Entity {
    Entity::text(hud_text("PRESS ENTER"), Vec2::new(224.0, 300.0)).with_tag(Tag::Prompt)
}

/// Width of one road tile
pub fn road_width(state: &GameState) -> f32 {
    let w = state.sizes.get(ImageId::Road).x;
    if w > 0.0 { w } else { ROAD_SECOND_TILE_X }
}

/// Switch to `room`, rebuilding the scene
pub fn enter(state: &mut GameState, room: Room) {
    state.scene.clear();
    state.game_time = 0.0;

    match room {
        Room::Title => {
            state
                .scene
                .push(Entity::sprite(ImageId::Title, Vec2::ZERO, &state.sizes));
            state.scene.push(prompt());
        }
        Room::Playing => {
            state.reset_run();
            build_playing(state);
        }
        Room::EndScreen => {
            let sizes = &state.sizes;
            state
                .scene
                .push(Entity::sprite(ImageId::Title, Vec2::ZERO, sizes));
            state.scene.push(Entity::text(
                Text::new("GAME OVER", FontId::TITLE, BANNER_SIZE, BANNER_SPACING),
                Vec2::new(176.0, 150.0),
            ));
            state.scene.push(
                Entity::text(
                    hud_text(format!("SCORE {}", hud::format_score(state.score))),
                    Vec2::new(208.0, 220.0),
                )
                .with_tag(Tag::Score),
            );
            state.scene.push(prompt());
        }
    }

    state.room = room;
    log::info!("Entered {:?}", room);
    state.push_event(GameEvent::RoomEntered(room));
}

fn build_playing(state: &mut GameState) {
    let road_w = road_width(state);
    let sizes = &state.sizes;
    let scene = &mut state.scene;

    scene.push(Entity::sprite(ImageId::Road, Vec2::ZERO, sizes).with_tag(Tag::Road));
    scene.push(Entity::sprite(ImageId::Road, Vec2::new(road_w, 0.0), sizes).with_tag(Tag::Road));
    scene.push(
        Entity::sprite(
            ImageId::Player,
            Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            sizes,
        )
        .with_tag(Tag::Player)
        .with_body(PLAYER_MASS, Vec2::new(PLAYER_START_VELX, 0.0)),
    );
    scene.push(Entity::sprite(ImageId::Scorebar, Vec2::new(0.0, 314.0), sizes));
    for (i, x) in [380.0, 440.0, 500.0].into_iter().enumerate() {
        scene.push(
            Entity::sprite(ImageId::Life, Vec2::new(x, 330.0), sizes)
                .with_tag(Tag::Life(i as u8 + 1)),
        );
    }

    scene.push(
        Entity::text(hud_text(hud::format_score(0.0)), Vec2::new(16.0, HUD_TEXT_Y))
            .with_tag(Tag::Score),
    );
    scene.push(
        Entity::text(
            hud_text(hud::format_score(state.high_score.best())),
            Vec2::new(112.0, HUD_TEXT_Y),
        )
        .with_tag(Tag::HighScore),
    );
    scene.push(Entity::text(hud_text("00"), Vec2::new(236.0, HUD_TEXT_Y)).with_tag(Tag::Minutes));
    scene.push(Entity::text(hud_text(":"), Vec2::new(258.0, HUD_TEXT_Y)));
    scene.push(Entity::text(hud_text("00"), Vec2::new(269.0, HUD_TEXT_Y)).with_tag(Tag::Seconds));
}
