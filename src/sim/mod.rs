//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches the host:
//! - Time arrives as a clamped millisecond step
//! - Input arrives as a per-frame snapshot
//! - Sounds are requested through [`GameEvent`]s
//! - Randomness comes from the seeded RNG in [`GameState`]

pub mod collision;
pub mod entity;
pub mod hud;
pub mod player;
pub mod room;
pub mod scene;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod traffic;

pub use collision::{Axis, Contact, contact, resolve, resolve_vehicles};
pub use entity::{Entity, FontId, ImageId, SpriteSizes, Tag, Text, Visual};
pub use room::Room;
pub use scene::Scene;
pub use state::{GameEvent, GameState};
pub use tick::tick;

#[cfg(test)]
pub(crate) mod fixtures {
    use super::entity::{ImageId, SpriteSizes};
    use crate::consts::*;

    /// Image sizes used across tests; the road is narrow so wrapping is quick
    pub fn test_sizes() -> SpriteSizes {
        let mut sizes = SpriteSizes::new();
        sizes.insert(ImageId::Title, GAME_WIDTH, GAME_HEIGHT);
        sizes.insert(ImageId::Scorebar, GAME_WIDTH, 74.0);
        sizes.insert(ImageId::Road, 600.0, STREET_HEIGHT + 30.0);
        sizes.insert(ImageId::Player, 60.0, 28.0);
        sizes.insert(ImageId::Life, 24.0, 24.0);
        for n in 0..CAR_VARIANTS {
            sizes.insert(ImageId::Car(n), 60.0, 30.0);
        }
        sizes
    }
}
