//! Web Audio backend (wasm only)

use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

use super::{Tone, ToneGenerator};
use crate::settings::Settings;

/// Plays tones through a lazily created `AudioContext`.
///
/// Browsers keep a context suspended until a user gesture; call
/// [`WebAudioTone::resume`] from a gesture handler.
pub struct WebAudioTone {
    ctx: Option<AudioContext>,
    volume: f32,
    unavailable: bool,
}

impl WebAudioTone {
    pub fn new(settings: &Settings) -> Self {
        Self {
            ctx: None,
            volume: settings.effective_volume(),
            unavailable: false,
        }
    }

    /// Resume a suspended context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    fn context(&mut self) -> Option<&AudioContext> {
        if self.ctx.is_none() && !self.unavailable {
            match AudioContext::new() {
                Ok(ctx) => self.ctx = Some(ctx),
                Err(_) => {
                    log::warn!("Failed to create AudioContext - audio disabled");
                    self.unavailable = true;
                }
            }
        }
        self.ctx.as_ref()
    }
}

/// Create an oscillator routed through a gain node to the output
fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    osc_type: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}

impl ToneGenerator for WebAudioTone {
    fn play(&mut self, tone: &Tone) {
        let vol = self.volume;
        // Exponential ramps cannot start from zero
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = self.context() else { return };
        let Some((osc, gain)) = create_osc(ctx, tone.start_freq, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(tone.start_freq, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(tone.end_freq, t + tone.duration)
            .ok();

        gain.gain().set_value_at_time(tone.start_gain * vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(tone.end_gain * vol, t + tone.duration)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + tone.duration).ok();
    }
}
