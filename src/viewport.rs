//! Drawable surface dimensions

use crate::consts::APEX_FRACTION;

/// Current width/height of the drawing surface in pixels.
///
/// Replaced wholesale on every resize; positions already stored by live
/// particles and flashes are absolute and unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Adopt new surface dimensions
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Horizontal launch position of `slot` among `slot_count` evenly spaced slots
    pub fn slot_x(&self, slot: usize, slot_count: usize) -> f32 {
        (slot + 1) as f32 * self.width as f32 / (slot_count + 1) as f32
    }

    /// Height at which rockets burst
    pub fn apex_y(&self) -> f32 {
        self.height as f32 * APEX_FRACTION
    }

    /// Bottom edge, where rockets start
    pub fn floor_y(&self) -> f32 {
        self.height as f32
    }
}
