//! Numeral flashes shown at explosion sites

use glam::Vec2;

use crate::consts::*;
use crate::renderer::{Color, Font, Surface, TextAlign};

/// A glyph that swells and fades where a rocket burst
#[derive(Debug, Clone, PartialEq)]
pub struct Flash {
    pub pos: Vec2,
    pub glyph: char,
    pub color: Color,
    pub alpha: f32,
    pub scale: f32,
}

impl Flash {
    pub fn new(pos: Vec2, glyph: char, color: Color) -> Self {
        Self {
            pos,
            glyph,
            color,
            alpha: 1.0,
            scale: FLASH_START_SCALE,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alpha > 0.0
    }

    pub fn font(&self) -> Font {
        Font::bold(FLASH_FONT_PX * self.scale, "Arial")
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let mut buf = [0u8; 4];
        let text = self.glyph.encode_utf8(&mut buf);

        surface.save();
        surface.set_global_alpha(self.alpha);
        surface.set_fill_color(self.color);
        surface.set_shadow(FLASH_GLOW, self.color);
        surface.set_font(&self.font());
        surface.set_text_align(TextAlign::Center);
        surface.fill_text(text, self.pos);
        surface.restore();
    }

    /// Fade and grow
    pub fn advance(&mut self) {
        self.alpha -= FADE_STEP;
        self.scale += FLASH_GROWTH;
    }

    /// Draw then advance one frame. Returns whether the flash is still alive.
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        self.draw(surface);
        self.advance();
        self.is_alive()
    }
}
