//! Output backends for the audio engine
//!
//! The engine decides *what* to play; a backend owns the actual synthesis
//! nodes. The browser build uses Web Audio, native builds are silent.

use super::engine::EngineCommand;
use super::recipe::Voice;

/// A synthesis graph host
pub trait AudioBackend {
    /// Keeps a one-shot voice's nodes alive. Dropping it releases them.
    type Voice;

    /// Bring the output device up (create or resume the context).
    /// Returns false when no audio output is possible right now.
    fn activate(&mut self) -> bool;

    /// Audio clock in seconds
    fn now(&self) -> f64;

    /// Build the persistent engine graph. Returns false on failure.
    fn build_engine(&mut self) -> bool;

    /// Schedule parameter ramps on the engine graph
    fn apply_engine(&mut self, command: &EngineCommand);

    /// Create and schedule a one-shot voice starting at `at` (audio clock)
    fn start_voice(&mut self, voice: &Voice, at: f64) -> Option<Self::Voice>;

    /// Tear the engine graph and context down
    fn release(&mut self);
}

/// Backend for hosts without an audio device. Everything is a no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    type Voice = ();

    fn activate(&mut self) -> bool {
        false
    }

    fn now(&self) -> f64 {
        0.0
    }

    fn build_engine(&mut self) -> bool {
        false
    }

    fn apply_engine(&mut self, _command: &EngineCommand) {}

    fn start_voice(&mut self, _voice: &Voice, _at: f64) -> Option<()> {
        None
    }

    fn release(&mut self) {}
}
