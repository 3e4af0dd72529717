//! Fixed-size pixel canvas that all kill positions are projected onto.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in canvas space. `x` grows to the right, `y` grows downwards.
pub type PixelPoint = Vec2;

pub const DEFAULT_CANVAS_SIZE: u32 = 1024;

/// Pixel dimensions of the canvas.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    /// Canvas size as floats.
    #[inline]
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Canvas center in pixel coordinates.
    #[inline]
    pub fn center(&self) -> PixelPoint {
        self.extent() / 2.0
    }

    /// Returns `true` if the point lies on the canvas, right and bottom edges included.
    pub fn contains(&self, p: PixelPoint) -> bool {
        let e = self.extent();
        (0.0..=e.x).contains(&p.x) && (0.0..=e.y).contains(&p.y)
    }

    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::square(DEFAULT_CANVAS_SIZE)
    }
}
