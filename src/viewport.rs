//! Letterboxed viewport
//!
//! Maps the fixed logical resolution onto the window, keeping the aspect
//! ratio and snapping to whole-pixel scales when upscaling.

use glam::Vec2;

use crate::consts::{GAME_HEIGHT, GAME_WIDTH};

/// Where the logical frame lands in the window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical pixel to window pixel factor
    pub scale: f32,
    /// Top-left of the frame in window pixels
    pub offset: Vec2,
    /// Frame size in window pixels
    pub size: Vec2,
}

impl Viewport {
    /// Fit the logical frame into a `width` x `height` window
    pub fn fit(width: f32, height: f32) -> Self {
        let mut scale = (width / GAME_WIDTH).min(height / GAME_HEIGHT).max(0.0);
        if scale >= 1.0 {
            scale = scale.floor();
        }
        let size = Vec2::new(GAME_WIDTH, GAME_HEIGHT) * scale;
        let offset = ((Vec2::new(width, height) - size) * 0.5).max(Vec2::ZERO);
        Self {
            scale,
            offset,
            size,
        }
    }

    /// Convert a window position to logical coordinates
    pub fn to_logical(&self, window: Vec2) -> Vec2 {
        if self.scale <= 0.0 {
            return Vec2::ZERO;
        }
        (window - self.offset) / self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_exact_fit() {
        let vp = Viewport::fit(GAME_WIDTH, GAME_HEIGHT);
        assert_eq!(vp.scale, 1.0);
        assert_eq!(vp.offset, Vec2::ZERO);
    }

    #[test]
    fn test_upscale_is_integer() {
        let vp = Viewport::fit(1920.0, 1080.0);
        // min(3.37, 2.78) floors to 2
        assert_eq!(vp.scale, 2.0);
        assert_eq!(vp.size, Vec2::new(1138.0, 776.0));
        assert_eq!(vp.offset, Vec2::new(391.0, 152.0));
    }

    #[test]
    fn test_downscale_is_fractional() {
        let vp = Viewport::fit(284.5, 388.0);
        assert_eq!(vp.scale, 0.5);
        assert_eq!(vp.offset.x, 0.0);
        assert_eq!(vp.offset.y, 97.0);
    }

    #[test]
    fn test_to_logical() {
        let vp = Viewport::fit(1920.0, 1080.0);
        let p = vp.to_logical(Vec2::new(391.0 + 200.0, 152.0 + 100.0));
        assert_eq!(p, Vec2::new(100.0, 50.0));
    }

    proptest! {
        #[test]
        fn prop_frame_fits_and_is_centered(w in 1.0f32..4000.0, h in 1.0f32..4000.0) {
            let vp = Viewport::fit(w, h);
            prop_assert!(vp.size.x <= w + 1e-2);
            prop_assert!(vp.size.y <= h + 1e-2);
            prop_assert!((vp.offset.x * 2.0 + vp.size.x - w).abs() < 1e-2);
            prop_assert!((vp.offset.y * 2.0 + vp.size.y - h).abs() < 1e-2);
            prop_assert!((vp.size.x / vp.size.y - GAME_WIDTH / GAME_HEIGHT).abs() < 1e-3);
        }
    }
}
