//! Rendering front end
//!
//! The host owns textures and the actual drawing. This module keeps the
//! image atlas and glyph cache and turns the scene into a list of tinted
//! quads pushed into a [`DrawSink`].

use std::collections::HashMap;

use glam::Vec2;
use thiserror::Error;

use crate::sim::entity::{FontId, ImageId, SpriteSizes, Text, Visual, WHITE};
use crate::sim::scene::Scene;

/// Host texture handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// A loaded image as reported by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageInfo {
    pub texture: TextureId,
    pub width: f32,
    pub height: f32,
}

/// Asset loading failures
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load image {name}: {reason}")]
    Load { name: String, reason: String },
    #[error("image {0} has zero size")]
    Empty(String),
}

/// Host image loading service
pub trait ImageLoader {
    fn load_image(&mut self, name: &str) -> Result<ImageInfo, AssetError>;
}

/// All game images, keyed by id
#[derive(Debug, Clone, Default)]
pub struct Atlas {
    images: HashMap<ImageId, ImageInfo>,
}

impl Atlas {
    /// Load every image the game uses
    pub fn load(loader: &mut impl ImageLoader) -> Result<Self, AssetError> {
        let mut images = HashMap::new();
        for id in ImageId::all() {
            let name = id.file_name();
            let info = loader.load_image(&name)?;
            if info.width <= 0.0 || info.height <= 0.0 {
                return Err(AssetError::Empty(name));
            }
            log::debug!("Loaded {} ({}x{})", name, info.width, info.height);
            images.insert(id, info);
        }
        log::info!("Loaded {} images", images.len());
        Ok(Self { images })
    }

    pub fn get(&self, id: ImageId) -> Option<&ImageInfo> {
        self.images.get(&id)
    }

    /// Image dimensions for sizing sprites
    pub fn sprite_sizes(&self) -> SpriteSizes {
        let mut sizes = SpriteSizes::new();
        for (id, info) in &self.images {
            sizes.insert(*id, info.width, info.height);
        }
        sizes
    }
}

/// Glyph cache key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlyphKey {
    pub font: FontId,
    pub ch: char,
    pub size: u32,
}

/// A rasterized character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub texture: TextureId,
    pub size: Vec2,
}

/// Host glyph rasterization service
pub trait GlyphRasterizer {
    /// Rasterize one character; `None` if the font cannot draw it
    fn rasterize(&mut self, key: GlyphKey) -> Option<Glyph>;
}

/// One textured, tinted rectangle in logical coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub texture: TextureId,
    pub pos: Vec2,
    pub size: Vec2,
    pub tint: [f32; 4],
}

/// Host draw primitive sink
pub trait DrawSink {
    /// Called once before the first quad of a frame
    fn begin_frame(&mut self) {}

    fn draw(&mut self, quad: &Quad);
}

/// Memoized glyph lookups, including misses
#[derive(Debug, Clone, Default)]
pub struct GlyphCache {
    glyphs: HashMap<GlyphKey, Option<Glyph>>,
}

impl GlyphCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn get(&mut self, key: GlyphKey, rasterizer: &mut impl GlyphRasterizer) -> Option<Glyph> {
        *self.glyphs.entry(key).or_insert_with(|| {
            let glyph = rasterizer.rasterize(key);
            if glyph.is_none() {
                log::warn!("No glyph for {:?} in font {:?}", key.ch, key.font);
            }
            glyph
        })
    }
}

fn draw_text<H: GlyphRasterizer + DrawSink>(
    text: &Text,
    origin: Vec2,
    glyphs: &mut GlyphCache,
    host: &mut H,
) {
    for (i, ch) in text.content.chars().enumerate() {
        let key = GlyphKey {
            font: text.font,
            ch,
            size: text.size,
        };
        let Some(glyph) = glyphs.get(key, host) else {
            continue;
        };
        host.draw(&Quad {
            texture: glyph.texture,
            pos: origin + Vec2::new(i as f32 * text.spacing, 0.0),
            size: glyph.size,
            tint: text.color,
        });
    }
}

/// Draw every entity in insertion order
pub fn render_scene<H: GlyphRasterizer + DrawSink>(
    scene: &Scene,
    atlas: &Atlas,
    glyphs: &mut GlyphCache,
    host: &mut H,
) {
    host.begin_frame();
    for entity in scene {
        match &entity.visual {
            Visual::Image(id) => {
                let Some(info) = atlas.get(*id) else {
                    continue;
                };
                host.draw(&Quad {
                    texture: info.texture,
                    pos: entity.pos,
                    size: Vec2::new(info.width, info.height),
                    tint: WHITE,
                });
            }
            Visual::Text(text) => draw_text(text, entity.pos, glyphs, host),
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;

    /// Loader that hands out fixed dimensions per file
    pub struct FixedLoader {
        pub next: u32,
    }

    impl ImageLoader for FixedLoader {
        fn load_image(&mut self, name: &str) -> Result<ImageInfo, AssetError> {
            self.next += 1;
            let (width, height) = match name {
                "title.png" => (569.0, 388.0),
                "scorebar.png" => (569.0, 74.0),
                "road.png" => (600.0, 190.0),
                "batman.png" => (60.0, 28.0),
                "life.png" => (24.0, 24.0),
                _ => (60.0, 30.0),
            };
            Ok(ImageInfo {
                texture: TextureId(self.next),
                width,
                height,
            })
        }
    }

    /// Records quads; glyphs exist for everything but '?'
    #[derive(Default)]
    pub struct RecordingHost {
        pub quads: Vec<Quad>,
        pub frames: usize,
        pub rasterized: usize,
    }

    impl GlyphRasterizer for RecordingHost {
        fn rasterize(&mut self, key: GlyphKey) -> Option<Glyph> {
            self.rasterized += 1;
            (key.ch != '?').then(|| Glyph {
                texture: TextureId(1000 + key.ch as u32),
                size: Vec2::new(key.size as f32 * 0.6, key.size as f32),
            })
        }
    }

    impl DrawSink for RecordingHost {
        fn begin_frame(&mut self) {
            self.frames += 1;
            self.quads.clear();
        }

        fn draw(&mut self, quad: &Quad) {
            self.quads.push(*quad);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::*;
    use super::*;
    use crate::sim::entity::{Entity, RED};

    struct FailingLoader;

    impl ImageLoader for FailingLoader {
        fn load_image(&mut self, name: &str) -> Result<ImageInfo, AssetError> {
            if name == "road.png" {
                return Err(AssetError::Load {
                    name: name.to_string(),
                    reason: "404".to_string(),
                });
            }
            Ok(ImageInfo {
                texture: TextureId(0),
                width: 1.0,
                height: 1.0,
            })
        }
    }

    #[test]
    fn test_atlas_loads_every_image() {
        let atlas = Atlas::load(&mut FixedLoader { next: 0 }).unwrap();
        assert_eq!(atlas.images.len(), ImageId::all().count());
        let sizes = atlas.sprite_sizes();
        assert_eq!(sizes.get(ImageId::Road), Vec2::new(600.0, 190.0));
        assert_eq!(sizes.get(ImageId::Car(7)), Vec2::new(60.0, 30.0));
    }

    #[test]
    fn test_atlas_propagates_load_error() {
        let err = Atlas::load(&mut FailingLoader).unwrap_err();
        assert!(matches!(err, AssetError::Load { ref name, .. } if name == "road.png"));
    }

    #[test]
    fn test_glyph_cache_memoizes_misses() {
        let mut host = RecordingHost::default();
        let mut cache = GlyphCache::new();
        let key = |ch| GlyphKey {
            font: FontId::HUD,
            ch,
            size: 16,
        };

        assert!(cache.get(key('A'), &mut host).is_some());
        assert!(cache.get(key('A'), &mut host).is_some());
        assert!(cache.get(key('?'), &mut host).is_none());
        assert!(cache.get(key('?'), &mut host).is_none());
        assert_eq!(host.rasterized, 2);
        assert_eq!(cache.len(), 2);

        let bigger = GlyphKey { size: 32, ..key('A') };
        cache.get(bigger, &mut host);
        assert_eq!(host.rasterized, 3);
    }

    #[test]
    fn test_text_advances_by_spacing_and_skips_missing() {
        let mut scene = Scene::new();
        let mut text = Text::new("A?C", FontId::HUD, 16, 11.0);
        text.color = RED;
        scene.push(Entity::text(text, Vec2::new(10.0, 20.0)));

        let mut host = RecordingHost::default();
        let mut cache = GlyphCache::new();
        render_scene(&scene, &Atlas::default(), &mut cache, &mut host);

        let xs: Vec<f32> = host.quads.iter().map(|q| q.pos.x).collect();
        assert_eq!(xs, vec![10.0, 32.0]);
        assert!(host.quads.iter().all(|q| q.tint == RED && q.pos.y == 20.0));
    }

    #[test]
    fn test_images_draw_in_insertion_order_with_white_tint() {
        let atlas = Atlas::load(&mut FixedLoader { next: 0 }).unwrap();
        let sizes = atlas.sprite_sizes();
        let mut scene = Scene::new();
        scene.push(Entity::sprite(ImageId::Road, Vec2::ZERO, &sizes));
        scene.push(Entity::sprite(ImageId::Player, Vec2::new(100.0, 120.0), &sizes));

        let mut host = RecordingHost::default();
        render_scene(&scene, &atlas, &mut GlyphCache::new(), &mut host);

        assert_eq!(host.frames, 1);
        assert_eq!(host.quads.len(), 2);
        assert_eq!(host.quads[0].texture, atlas.get(ImageId::Road).unwrap().texture);
        assert_eq!(host.quads[1].pos, Vec2::new(100.0, 120.0));
        assert_eq!(host.quads[1].size, Vec2::new(60.0, 28.0));
        assert!(host.quads.iter().all(|q| q.tint == WHITE));
    }
}
