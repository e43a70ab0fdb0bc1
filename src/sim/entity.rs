//! Scene entities (sprites and text)

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Image assets, in load order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageId {
    Title,
    Scorebar,
    Road,
    Player,
    Life,
    /// Enemy car variant, 0-based
    Car(u8),
}

impl ImageId {
    /// Every image the game uses
    pub fn all() -> impl Iterator<Item = ImageId> {
        [
            ImageId::Title,
            ImageId::Scorebar,
            ImageId::Road,
            ImageId::Player,
            ImageId::Life,
        ]
        .into_iter()
        .chain((0..crate::consts::CAR_VARIANTS).map(ImageId::Car))
    }

    /// Asset file name
    pub fn file_name(&self) -> String {
        match self {
            ImageId::Title => "title.png".to_string(),
            ImageId::Scorebar => "scorebar.png".to_string(),
            ImageId::Road => "road.png".to_string(),
            ImageId::Player => "batman.png".to_string(),
            ImageId::Life => "life.png".to_string(),
            ImageId::Car(n) => format!("car{}.png", n + 1),
        }
    }
}

/// Role of an entity in the scene
///
/// Lookups by tag return the first match in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tag {
    #[default]
    None,
    Player,
    Enemy,
    Road,
    /// Life icon, 1-based
    Life(u8),
    Score,
    HighScore,
    Minutes,
    Seconds,
    /// Title screen prompt
    Prompt,
}

impl Tag {
    /// Participates in collision resolution
    pub fn is_vehicle(&self) -> bool {
        matches!(self, Tag::Player | Tag::Enemy)
    }
}

/// Font handle understood by the glyph rasterizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontId(pub u32);

impl FontId {
    pub const HUD: FontId = FontId(0);
    pub const TITLE: FontId = FontId(1);
}

pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// Text payload of a text entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub content: String,
    pub font: FontId,
    /// Pixel size passed to the rasterizer
    pub size: u32,
    /// Horizontal advance per character
    pub spacing: f32,
    pub color: [f32; 4],
}

impl Text {
    pub fn new(content: impl Into<String>, font: FontId, size: u32, spacing: f32) -> Self {
        Self {
            content: content.into(),
            font,
            size,
            spacing,
            color: WHITE,
        }
    }
}

/// What an entity draws as
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Visual {
    Image(ImageId),
    Text(Text),
}

/// A scene object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Top-left corner
    pub pos: Vec2,
    /// Bounding box, taken from the image dimensions
    pub size: Vec2,
    pub visual: Visual,
    pub tag: Tag,
    /// Only meaningful for vehicles
    pub mass: f32,
    pub vel: Vec2,
}

impl Entity {
    /// An image sprite sized from its image
    pub fn sprite(image: ImageId, pos: Vec2, sizes: &SpriteSizes) -> Self {
        Self {
            pos,
            size: sizes.get(image),
            visual: Visual::Image(image),
            tag: Tag::None,
            mass: 0.0,
            vel: Vec2::ZERO,
        }
    }

    /// A text entity
    pub fn text(text: Text, pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::ZERO,
            visual: Visual::Text(text),
            tag: Tag::None,
            mass: 0.0,
            vel: Vec2::ZERO,
        }
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_body(mut self, mass: f32, vel: Vec2) -> Self {
        self.mass = mass;
        self.vel = vel;
        self
    }

    /// Center of the bounding box
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Mutable text payload, if this is a text entity
    pub fn text_mut(&mut self) -> Option<&mut Text> {
        match &mut self.visual {
            Visual::Text(text) => Some(text),
            Visual::Image(_) => None,
        }
    }
}

/// Pixel dimensions of each loaded image
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpriteSizes {
    sizes: HashMap<ImageId, Vec2>,
}

impl SpriteSizes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, image: ImageId, width: f32, height: f32) {
        self.sizes.insert(image, Vec2::new(width, height));
    }

    /// Size of an image; unknown images have no extent
    pub fn get(&self, image: ImageId) -> Vec2 {
        self.sizes.get(&image).copied().unwrap_or(Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_ids_cover_all_cars() {
        let ids: Vec<_> = ImageId::all().collect();
        assert_eq!(ids.len(), 5 + crate::consts::CAR_VARIANTS as usize);
        assert_eq!(ImageId::Car(0).file_name(), "car1.png");
        assert_eq!(ImageId::Car(7).file_name(), "car8.png");
    }

    #[test]
    fn test_sprite_takes_image_size() {
        let mut sizes = SpriteSizes::new();
        sizes.insert(ImageId::Player, 64.0, 30.0);
        let e = Entity::sprite(ImageId::Player, Vec2::new(10.0, 20.0), &sizes);
        assert_eq!(e.size, Vec2::new(64.0, 30.0));
        assert_eq!(e.center(), Vec2::new(42.0, 35.0));
        assert!(Entity::sprite(ImageId::Life, Vec2::ZERO, &sizes).size == Vec2::ZERO);
    }

    #[test]
    fn test_text_mut_only_on_text() {
        let mut t = Entity::text(Text::new("000", FontId::HUD, 16, 10.0), Vec2::ZERO);
        t.text_mut().unwrap().content = "123".into();
        assert!(matches!(&t.visual, Visual::Text(text) if text.content == "123"));

        let mut s = Entity::sprite(ImageId::Road, Vec2::ZERO, &SpriteSizes::new());
        assert!(s.text_mut().is_none());
    }
}
