//! Show state
//!
//! Owns every live entity. The frame driver in `frame.rs` is the only code
//! that advances it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::flash::Flash;
use super::launch::Slot;
use super::particle::Particle;
use crate::audio::ToneGenerator;
use crate::consts::*;
use crate::settings::{Settings, TriggerMode};
use crate::viewport::Viewport;

/// Complete show state
#[derive(Debug, Clone)]
pub struct Show {
    /// Seed the particle RNG was created from
    pub seed: u64,
    rng: Pcg32,
    viewport: Viewport,
    pub trigger: TriggerMode,
    /// One scheduler per glyph
    pub slots: Vec<Slot>,
    /// Live particles
    pub particles: Vec<Particle>,
    /// Live flashes
    pub flashes: Vec<Flash>,
}

impl Show {
    pub fn new(seed: u64, viewport: Viewport, trigger: TriggerMode) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            trigger,
            slots: (0..GLYPHS.len()).map(Slot::new).collect(),
            particles: Vec::with_capacity(PARTICLES_PER_BURST * GLYPHS.len() * 2),
            flashes: Vec::with_capacity(GLYPHS.len() * 2),
        }
    }

    /// Build from settings, seeding with `fallback_seed` unless the settings pin one
    pub fn from_settings(settings: &Settings, viewport: Viewport, fallback_seed: u64) -> Self {
        let seed = settings.seed.unwrap_or(fallback_seed);
        Self::new(seed, viewport, settings.trigger)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Adopt new surface dimensions. Live entities keep their absolute
    /// positions; only future launches use the new size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height);
        log::info!("Viewport resized to {}x{}", width, height);
    }

    /// Burst at `pos` for `slot`: particles, one flash, and a boom
    pub fn explode<T: ToneGenerator + ?Sized>(&mut self, pos: Vec2, slot: usize, tone: &mut T) {
        let color = PALETTE[slot % PALETTE.len()];
        let glyph = GLYPHS[slot % GLYPHS.len()];

        tone.play_tone();

        let rng = &mut self.rng;
        self.particles
            .extend((0..PARTICLES_PER_BURST).map(|_| Particle::new(pos, color, rng)));
        self.flashes.push(Flash::new(pos, glyph, color));

        log::debug!(
            "Slot {} burst '{}' at ({:.0}, {:.0})",
            slot,
            glyph,
            pos.x,
            pos.y
        );
    }
}
