//! Tone envelopes and offline synthesis

/// Unit triangle wave at `phase` (in cycles): 0 at phase 0, peak +1 at 0.25
#[inline]
fn triangle(phase: f64) -> f32 {
    let q = phase - phase.floor() + 0.25;
    (2.0 * (2.0 * (q - (q + 0.5).floor())).abs() - 1.0) as f32
}

/// A self-terminating triangle tone: one oscillator with exponential frequency and
/// gain ramps, stopped after `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub start_freq: f32,
    pub end_freq: f32,
    pub start_gain: f32,
    pub end_gain: f32,
    /// Seconds
    pub duration: f64,
}

/// Explosion boom - deep triangle drop
pub const BOOM: Tone = Tone {
    start_freq: 150.0,
    end_freq: 0.01,
    start_gain: 0.3,
    end_gain: 0.01,
    duration: 0.5,
};

/// Exponential interpolation from `from` to `to` (both > 0), `t` in [0, 1]
#[inline]
fn exp_ramp(from: f32, to: f32, t: f64) -> f32 {
    let t = t.clamp(0.0, 1.0);
    (from as f64 * (to as f64 / from as f64).powf(t)) as f32
}

impl Tone {
    /// Oscillator frequency `t` seconds after start
    pub fn frequency_at(&self, t: f64) -> f32 {
        exp_ramp(self.start_freq, self.end_freq, t / self.duration)
    }

    /// Envelope gain `t` seconds after start (before master volume)
    pub fn gain_at(&self, t: f64) -> f32 {
        exp_ramp(self.start_gain, self.end_gain, t / self.duration)
    }

    /// Number of samples the tone lasts at `sample_rate`
    pub fn sample_count(&self, sample_rate: u32) -> usize {
        (self.duration * sample_rate as f64).round() as usize
    }

    /// Synthesize the whole tone as mono samples scaled by `volume`
    pub fn render(&self, sample_rate: u32, volume: f32) -> Vec<f32> {
        let n = self.sample_count(sample_rate);
        let dt = 1.0 / sample_rate as f64;
        let mut samples = Vec::with_capacity(n);
        let mut phase = 0.0f64;

        for i in 0..n {
            let t = i as f64 * dt;
            samples.push(triangle(phase) * self.gain_at(t) * volume);
            phase += self.frequency_at(t) as f64 * dt;
        }

        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boom_envelope_endpoints() {
        assert!((BOOM.frequency_at(0.0) - 150.0).abs() < 1e-3);
        assert!((BOOM.frequency_at(0.5) - 0.01).abs() < 1e-5);
        assert!((BOOM.gain_at(0.0) - 0.3).abs() < 1e-6);
        assert!((BOOM.gain_at(0.5) - 0.01).abs() < 1e-6);
        // Holds the end value past the ramp
        assert!((BOOM.gain_at(2.0) - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_boom_decay_is_exponential() {
        // Geometric mean at the midpoint
        let mid = BOOM.frequency_at(0.25);
        assert!((mid - (150.0f32 * 0.01).sqrt()).abs() < 1e-3);
        let mid_gain = BOOM.gain_at(0.25);
        assert!((mid_gain - (0.3f32 * 0.01).sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_envelope_strictly_decreasing() {
        let mut prev = f32::MAX;
        for i in 0..=50 {
            let g = BOOM.gain_at(i as f64 * 0.01);
            assert!(g < prev, "gain rose at step {}", i);
            prev = g;
        }
    }

    #[test]
    fn test_render_length_and_bounds() {
        let samples = BOOM.render(44_100, 1.0);
        assert_eq!(samples.len(), 22_050);
        assert_eq!(samples[0], 0.0);
        assert!(samples.iter().all(|s| s.abs() <= 0.3 + 1e-6));
        let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak > 0.2, "tone should be audible, peak {}", peak);
    }

    #[test]
    fn test_render_scaled_by_volume() {
        let silent = BOOM.render(8_000, 0.0);
        assert!(silent.iter().all(|s| *s == 0.0));

        let full = BOOM.render(8_000, 1.0);
        let half = BOOM.render(8_000, 0.5);
        for (a, b) in full.iter().zip(&half) {
            assert!((a * 0.5 - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_triangle_shape() {
        assert!(triangle(0.0).abs() < 1e-6);
        assert!((triangle(0.25) - 1.0).abs() < 1e-6);
        assert!(triangle(0.5).abs() < 1e-6);
        assert!((triangle(0.75) + 1.0).abs() < 1e-6);
        assert!(triangle(1.0).abs() < 1e-6);
        // Phase accumulates past one cycle during synthesis
        assert!((triangle(3.25) - 1.0).abs() < 1e-6);
    }
}
