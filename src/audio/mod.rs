//! Audio system
//!
//! Procedurally generated sound - no external files needed!
//!
//! Two layers:
//! - a persistent engine graph whose parameters follow the vehicle every tick
//! - short-lived one-shot voices for discrete cues
//!
//! The graph is built lazily on the first audible engine update, because
//! browsers refuse to start audio before a user gesture.

pub mod backend;
pub mod engine;
pub mod recipe;
#[cfg(test)]
pub(crate) mod testing;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use backend::{AudioBackend, SilentBackend};
pub use engine::{EngineCommand, EngineTargets, MUTE_TIME_CONSTANT, RAMP_TIME_CONSTANT};
pub use recipe::{Automation, SoundEffect, Tone, Voice, Waveform};
#[cfg(target_arch = "wasm32")]
pub use web::WebAudioBackend;

/// Lifecycle of a one-shot voice relative to the audio clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoicePhase {
    /// Created, start time not reached yet
    Scheduled,
    Playing,
    /// Past its stop time; released on the next reap
    Finished,
}

/// A playing one-shot and the nodes backing it
struct LiveVoice<H> {
    effect: SoundEffect,
    start: f64,
    stop: f64,
    _handle: H,
}

impl<H> LiveVoice<H> {
    fn phase(&self, now: f64) -> VoicePhase {
        if now < self.start {
            VoicePhase::Scheduled
        } else if now < self.stop {
            VoicePhase::Playing
        } else {
            VoicePhase::Finished
        }
    }
}

/// Audio manager for the overworld
pub struct AudioEngine<B: AudioBackend> {
    backend: B,
    engine_ready: bool,
    voices: Vec<LiveVoice<B::Voice>>,
    warned_unavailable: bool,
}

impl Default for AudioEngine<SilentBackend> {
    fn default() -> Self {
        Self::new(SilentBackend)
    }
}

impl<B: AudioBackend> AudioEngine<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            engine_ready: false,
            voices: Vec::new(),
            warned_unavailable: false,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Whether the persistent engine graph exists
    pub fn is_engine_ready(&self) -> bool {
        self.engine_ready
    }

    /// Number of one-shot voices not yet released
    pub fn live_voices(&self) -> usize {
        self.voices.len()
    }

    /// Phases of the live one-shots, oldest first
    pub fn voice_phases(&self) -> Vec<(SoundEffect, VoicePhase)> {
        let now = self.backend.now();
        self.voices.iter().map(|v| (v.effect, v.phase(now))).collect()
    }

    /// Follow the vehicle with the continuous engine layer.
    ///
    /// When muted the gains fade to zero but the oscillators keep running.
    pub fn set_engine_state(&mut self, throttle01: f32, speed01: f32, muted: bool) {
        self.reap();

        if muted {
            if self.engine_ready {
                self.backend.apply_engine(&EngineCommand::Silence {
                    time_constant: MUTE_TIME_CONSTANT,
                });
            }
            return;
        }

        if !self.activate() || !self.ensure_engine() {
            return;
        }

        let targets = EngineTargets::from_state(throttle01, speed01);
        self.backend.apply_engine(&EngineCommand::Drive {
            targets,
            time_constant: RAMP_TIME_CONSTANT,
        });
    }

    /// Fire a one-shot cue. Muted calls create nothing.
    pub fn play_effect(&mut self, effect: SoundEffect, muted: bool) {
        if muted {
            return;
        }
        self.reap();
        if !self.activate() {
            return;
        }

        let voice = effect.voice();
        let now = self.backend.now();
        match self.backend.start_voice(voice, now) {
            Some(handle) => {
                log::debug!("Playing {:?}", effect);
                self.voices.push(LiveVoice {
                    effect,
                    start: now,
                    stop: now + voice.duration,
                    _handle: handle,
                });
            }
            None => log::debug!("Could not start {:?}", effect),
        }
    }

    /// Release finished one-shot voices
    pub fn reap(&mut self) {
        if self.voices.is_empty() {
            return;
        }
        let now = self.backend.now();
        self.voices.retain(|v| v.phase(now) != VoicePhase::Finished);
    }

    /// Drop the engine graph and every live voice.
    ///
    /// A later audible update rebuilds the graph from scratch.
    pub fn shutdown(&mut self) {
        self.voices.clear();
        if self.engine_ready {
            log::info!("Audio engine shut down");
        }
        self.engine_ready = false;
        self.backend.release();
    }

    fn activate(&mut self) -> bool {
        if self.backend.activate() {
            return true;
        }
        if !self.warned_unavailable {
            self.warned_unavailable = true;
            log::warn!("Audio output unavailable - sound disabled");
        }
        false
    }

    /// Idempotent: builds the graph at most once until `shutdown`
    fn ensure_engine(&mut self) -> bool {
        if !self.engine_ready {
            self.engine_ready = self.backend.build_engine();
            if self.engine_ready {
                log::info!("Engine audio graph ready");
            }
        }
        self.engine_ready
    }
}
