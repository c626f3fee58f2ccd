//! Glyph Fireworks - looping fireworks with numeral flashes
//!
//! Core modules:
//! - `sim`: Particles, flashes, launch scheduling and the per-frame driver
//! - `renderer`: 2D drawing surface abstraction (canvas on web, recording for tests)
//! - `audio`: Procedurally synthesized boom tone
//! - `viewport`: Drawable surface dimensions
//! - `settings`: Runtime settings

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod viewport;

pub use settings::{Settings, TriggerMode};
pub use viewport::Viewport;

use renderer::Color;

/// Show configuration constants
pub mod consts {
    use super::Color;

    /// Characters flashed by the launch slots, one slot per glyph
    pub const GLYPHS: [char; 4] = ['2', '0', '2', '6'];

    /// Explosion colors, picked by `slot % PALETTE.len()`
    pub const PALETTE: [Color; 4] = [
        Color::hex(0x00FFCC),
        Color::hex(0xFF3366),
        Color::hex(0xFFCC00),
        Color::hex(0x00CCFF),
    ];

    /// Length of one launch cycle (seconds)
    pub const CYCLE_DURATION: f64 = 2.5;
    /// Delay between consecutive slots (seconds)
    pub const SLOT_OFFSET: f64 = 0.7;
    /// Cycle time at which the rocket reaches its apex and bursts
    pub const ASCEND_DURATION: f64 = 0.8;
    /// End of the explosion trigger window
    pub const EXPLODE_WINDOW_END: f64 = 0.83;
    /// Apex height as a fraction of viewport height (from the top)
    pub const APEX_FRACTION: f32 = 0.35;
    /// Rocket dot radius
    pub const ROCKET_RADIUS: f32 = 2.0;

    /// Particles spawned per explosion
    pub const PARTICLES_PER_BURST: usize = 80;
    /// Half-width of the uniform velocity range per axis
    pub const PARTICLE_SPEED: f32 = 7.5;
    /// Per-frame velocity damping
    pub const PARTICLE_FRICTION: f32 = 0.95;
    /// Per-frame alpha decay for particles and flashes
    pub const FADE_STEP: f32 = 0.015;
    pub const PARTICLE_RADIUS: f32 = 2.5;
    pub const PARTICLE_GLOW: f32 = 15.0;

    /// Initial flash scale
    pub const FLASH_START_SCALE: f32 = 0.5;
    /// Per-frame flash growth
    pub const FLASH_GROWTH: f32 = 0.02;
    /// Font size at scale 1.0 (pixels)
    pub const FLASH_FONT_PX: f32 = 100.0;
    pub const FLASH_GLOW: f32 = 25.0;

    /// Opacity of the black veil painted each frame (gives the trails)
    pub const TRAIL_FADE_ALPHA: f32 = 0.2;
}

/// Wrap a time value into `[0, period)`, also for negative inputs
#[inline]
pub fn wrap_cycle(time: f64, period: f64) -> f64 {
    let c = time.rem_euclid(period);
    // rem_euclid rounds up to `period` for tiny negative inputs
    if c >= period { 0.0 } else { c }
}
