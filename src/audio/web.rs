//! Web Audio backend
//!
//! The context is created on first activation (after a user gesture) and
//! lives for the page; `release` closes it for longer-lived embeddings.

use web_sys::{
    AudioBufferSourceNode, AudioContext, AudioContextState, AudioParam, BiquadFilterNode,
    BiquadFilterType, GainNode, OscillatorNode, OscillatorType,
};

use super::backend::AudioBackend;
use super::engine::{
    ENGINE_FILTER_Q, EngineCommand, NOISE_HIGHPASS_HZ, NOISE_SECONDS, NOISE_SEED, white_noise,
};
use super::recipe::{Automation, Voice, Waveform};

/// The persistent engine graph
struct EngineGraph {
    main_osc: OscillatorNode,
    sub_osc: OscillatorNode,
    noise: AudioBufferSourceNode,
    filter: BiquadFilterNode,
    engine_gain: GainNode,
    noise_gain: GainNode,
}

impl EngineGraph {
    fn build(ctx: &AudioContext) -> Option<Self> {
        let engine_gain = ctx.create_gain().ok()?;
        let filter = ctx.create_biquad_filter().ok()?;
        let noise_gain = ctx.create_gain().ok()?;

        // Grit layer
        let main_osc = ctx.create_oscillator().ok()?;
        main_osc.set_type(OscillatorType::Sawtooth);
        // Body layer, one octave down
        let sub_osc = ctx.create_oscillator().ok()?;
        sub_osc.set_type(OscillatorType::Triangle);

        // Exhaust hiss
        let sample_rate = ctx.sample_rate();
        let len = (sample_rate * NOISE_SECONDS) as usize;
        let buffer = ctx.create_buffer(1, len as u32, sample_rate).ok()?;
        let mut samples = white_noise(len, NOISE_SEED);
        buffer.copy_to_channel(&mut samples, 0).ok()?;
        let noise = ctx.create_buffer_source().ok()?;
        noise.set_buffer(Some(&buffer));
        noise.set_loop(true);

        let noise_filter = ctx.create_biquad_filter().ok()?;
        noise_filter.set_type(BiquadFilterType::Highpass);
        noise_filter.frequency().set_value(NOISE_HIGHPASS_HZ);

        main_osc.connect_with_audio_node(&filter).ok()?;
        sub_osc.connect_with_audio_node(&filter).ok()?;
        filter.connect_with_audio_node(&engine_gain).ok()?;
        engine_gain.connect_with_audio_node(&ctx.destination()).ok()?;

        noise.connect_with_audio_node(&noise_filter).ok()?;
        noise_filter.connect_with_audio_node(&noise_gain).ok()?;
        noise_gain.connect_with_audio_node(&ctx.destination()).ok()?;

        filter.set_type(BiquadFilterType::Lowpass);
        filter.q().set_value(ENGINE_FILTER_Q);
        let t = ctx.current_time();
        engine_gain.gain().set_value_at_time(0.0, t).ok()?;
        noise_gain.gain().set_value_at_time(0.0, t).ok()?;

        main_osc.start().ok()?;
        sub_osc.start().ok()?;
        noise.start().ok()?;

        Some(Self {
            main_osc,
            sub_osc,
            noise,
            filter,
            engine_gain,
            noise_gain,
        })
    }

    fn apply(&self, command: &EngineCommand, now: f64) {
        match *command {
            EngineCommand::Drive {
                targets,
                time_constant,
            } => {
                ramp(&self.main_osc.frequency(), targets.frequency, now, time_constant);
                ramp(&self.sub_osc.frequency(), targets.sub_frequency, now, time_constant);
                ramp(&self.filter.frequency(), targets.cutoff, now, time_constant);
                ramp(&self.engine_gain.gain(), targets.gain, now, time_constant);
                ramp(&self.noise_gain.gain(), targets.noise_gain, now, time_constant);
            }
            EngineCommand::Silence { time_constant } => {
                ramp(&self.engine_gain.gain(), 0.0, now, time_constant);
                ramp(&self.noise_gain.gain(), 0.0, now, time_constant);
            }
        }
    }

    fn stop(&self) {
        self.main_osc.stop().ok();
        self.sub_osc.stop().ok();
        self.noise.stop().ok();
        self.engine_gain.disconnect().ok();
        self.noise_gain.disconnect().ok();
    }
}

/// Exponential approach toward `target`
fn ramp(param: &AudioParam, target: f32, now: f64, time_constant: f64) {
    param.set_target_at_time(target, now, time_constant).ok();
}

fn schedule(param: &AudioParam, lane: &[Automation], t0: f64) {
    for step in lane {
        match *step {
            Automation::Set { value, at } => {
                param.set_value_at_time(value, t0 + at).ok();
            }
            Automation::Linear { value, at } => {
                param.linear_ramp_to_value_at_time(value, t0 + at).ok();
            }
            Automation::Exponential { value, at } => {
                param.exponential_ramp_to_value_at_time(value, t0 + at).ok();
            }
        }
    }
}

fn oscillator_type(waveform: Waveform) -> OscillatorType {
    match waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Square => OscillatorType::Square,
        Waveform::Sawtooth => OscillatorType::Sawtooth,
        Waveform::Triangle => OscillatorType::Triangle,
    }
}

/// Nodes of one playing cue; disconnected when dropped
pub struct WebVoice {
    oscillators: Vec<OscillatorNode>,
    gain: GainNode,
}

impl Drop for WebVoice {
    fn drop(&mut self) {
        for osc in &self.oscillators {
            osc.disconnect().ok();
        }
        self.gain.disconnect().ok();
    }
}

/// Browser audio output
#[derive(Default)]
pub struct WebAudioBackend {
    ctx: Option<AudioContext>,
    engine: Option<EngineGraph>,
    failed: bool,
}

impl WebAudioBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioBackend for WebAudioBackend {
    type Voice = WebVoice;

    fn activate(&mut self) -> bool {
        if self.ctx.is_none() && !self.failed {
            // May fail outside a secure context
            self.ctx = AudioContext::new().ok();
            self.failed = self.ctx.is_none();
        }
        let Some(ctx) = &self.ctx else { return false };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        true
    }

    fn now(&self) -> f64 {
        self.ctx.as_ref().map(|c| c.current_time()).unwrap_or(0.0)
    }

    fn build_engine(&mut self) -> bool {
        if self.engine.is_some() {
            return true;
        }
        let Some(ctx) = &self.ctx else { return false };
        self.engine = EngineGraph::build(ctx);
        self.engine.is_some()
    }

    fn apply_engine(&mut self, command: &EngineCommand) {
        if let (Some(ctx), Some(engine)) = (&self.ctx, &self.engine) {
            engine.apply(command, ctx.current_time());
        }
    }

    fn start_voice(&mut self, voice: &Voice, at: f64) -> Option<WebVoice> {
        let ctx = self.ctx.as_ref()?;
        let gain = ctx.create_gain().ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;
        schedule(&gain.gain(), voice.gain, at);

        // Owned from here on, so a partial failure still disconnects
        let mut nodes = WebVoice {
            oscillators: Vec::with_capacity(voice.tones.len()),
            gain,
        };
        for tone in voice.tones {
            let osc = ctx.create_oscillator().ok()?;
            osc.set_type(oscillator_type(tone.waveform));
            osc.connect_with_audio_node(&nodes.gain).ok()?;
            schedule(&osc.frequency(), tone.frequency, at);
            nodes.oscillators.push(osc);
        }
        for osc in &nodes.oscillators {
            osc.start_with_when(at).ok()?;
            osc.stop_with_when(at + voice.duration).ok()?;
        }

        Some(nodes)
    }

    fn release(&mut self) {
        if let Some(engine) = self.engine.take() {
            engine.stop();
        }
        if let Some(ctx) = self.ctx.take() {
            let _ = ctx.close();
        }
        self.failed = false;
    }
}
