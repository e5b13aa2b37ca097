//! Continuous engine layer
//!
//! Maps normalized throttle/speed onto the long-lived engine graph:
//! sawtooth main + triangle sub (one octave down) through a resonant
//! low-pass, and a looping noise bed through a high-pass for exhaust hiss.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::EngineAudioState;
use crate::{clamp01, lerp};

/// Main oscillator at idle / redline (Hz)
pub const IDLE_HZ: f32 = 38.0;
pub const REDLINE_HZ: f32 = 125.0;
/// Low-pass cutoff range (Hz)
pub const CUTOFF_IDLE_HZ: f32 = 200.0;
pub const CUTOFF_REDLINE_HZ: f32 = 1200.0;
/// Engine layer gain range
pub const ENGINE_GAIN_IDLE: f32 = 0.035;
pub const ENGINE_GAIN_MAX: f32 = 0.12;
/// Noise layer gain range
pub const NOISE_GAIN_IDLE: f32 = 0.006;
pub const NOISE_GAIN_MAX: f32 = 0.055;

/// Low-pass resonance for the growl
pub const ENGINE_FILTER_Q: f32 = 12.0;
/// High-pass on the noise bed
pub const NOISE_HIGHPASS_HZ: f32 = 1000.0;
/// Length of the looping noise buffer
pub const NOISE_SECONDS: f32 = 2.0;
pub const NOISE_SEED: u64 = 0x5eed_f0a1;

/// Smoothing time constant for parameter changes (s)
pub const RAMP_TIME_CONSTANT: f64 = 0.12;
/// Fade-out time constant when muted (s)
pub const MUTE_TIME_CONSTANT: f64 = 0.1;

/// Parameter targets for one engine update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineTargets {
    /// Normalized engine intensity
    pub rev: f32,
    pub frequency: f32,
    pub sub_frequency: f32,
    pub cutoff: f32,
    pub gain: f32,
    pub noise_gain: f32,
}

impl EngineTargets {
    pub fn from_state(throttle01: f32, speed01: f32) -> Self {
        let t = unit(throttle01);
        let s = unit(speed01);
        let rev = clamp01(0.35 * t + 0.65 * s);

        let frequency = lerp(IDLE_HZ, REDLINE_HZ, rev);
        Self {
            rev,
            frequency,
            sub_frequency: frequency / 2.0,
            cutoff: lerp(CUTOFF_IDLE_HZ, CUTOFF_REDLINE_HZ, rev),
            gain: lerp(ENGINE_GAIN_IDLE, ENGINE_GAIN_MAX, clamp01(0.8 * t + 0.2 * s)),
            noise_gain: lerp(NOISE_GAIN_IDLE, NOISE_GAIN_MAX, clamp01(0.6 * t + 0.4 * rev)),
        }
    }
}

impl From<EngineAudioState> for EngineTargets {
    fn from(state: EngineAudioState) -> Self {
        Self::from_state(state.throttle01, state.speed01)
    }
}

/// What the backend should do with the engine graph this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineCommand {
    /// Ramp every parameter toward `targets`
    Drive {
        targets: EngineTargets,
        time_constant: f64,
    },
    /// Ramp both gains to zero; oscillators keep running
    Silence { time_constant: f64 },
}

/// Clamp to [0, 1], mapping NaN to 0
fn unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { clamp01(v) }
}

/// White noise samples in [-1, 1)
pub fn white_noise(len: usize, seed: u64) -> Vec<f32> {
    let mut rng = Pcg32::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(-1.0f32..1.0)).collect()
}
