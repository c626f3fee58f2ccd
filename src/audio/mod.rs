//! Audio for the show
//!
//! Procedurally generated boom - no sound files. The frame driver only sees
//! the [`ToneGenerator`] trait; on the web it is backed by Web Audio, natively
//! by an offline synthesizer or nothing at all.

pub mod tone;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use tone::{BOOM, Tone};

#[cfg(target_arch = "wasm32")]
pub use web::WebAudioTone;

/// Something that can play tones.
///
/// Playing is fire-and-forget: each call starts an independent,
/// self-stopping sound. Implementations never fail; when no audio output is
/// available they do nothing.
pub trait ToneGenerator {
    fn play(&mut self, tone: &Tone);

    /// Play the explosion boom
    fn play_tone(&mut self) {
        self.play(&BOOM);
    }
}

/// Discards every tone
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentTone;

impl ToneGenerator for SilentTone {
    fn play(&mut self, _tone: &Tone) {}
}

/// Renders each tone into memory instead of playing it
#[derive(Debug)]
pub struct OfflineTone {
    sample_rate: u32,
    volume: f32,
    plays: usize,
    rendered_samples: usize,
    peak: f32,
}

impl OfflineTone {
    pub fn new(sample_rate: u32, volume: f32) -> Self {
        Self {
            sample_rate,
            volume: volume.clamp(0.0, 1.0),
            plays: 0,
            rendered_samples: 0,
            peak: 0.0,
        }
    }

    /// Tones played so far
    pub fn plays(&self) -> usize {
        self.plays
    }

    /// Total samples synthesized so far
    pub fn rendered_samples(&self) -> usize {
        self.rendered_samples
    }

    /// Loudest sample synthesized so far
    pub fn peak(&self) -> f32 {
        self.peak
    }
}

impl ToneGenerator for OfflineTone {
    fn play(&mut self, tone: &Tone) {
        let samples = tone.render(self.sample_rate, self.volume);
        self.plays += 1;
        self.rendered_samples += samples.len();
        self.peak = samples.iter().fold(self.peak, |m, s| m.max(s.abs()));
    }
}
