//! Recording backend for tests

use std::cell::Cell;
use std::rc::Rc;

use super::backend::AudioBackend;
use super::engine::EngineCommand;
use super::recipe::Voice;

/// A call the engine made on the backend
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    BuildEngine,
    Engine(EngineCommand),
    StartVoice { tones: usize, duration: f64, at: f64 },
    Release,
}

/// Handle that tracks how many voices are still alive
pub struct RecordedVoice {
    live: Rc<Cell<usize>>,
}

impl Drop for RecordedVoice {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

pub struct RecordingBackend {
    available: bool,
    time: f64,
    calls: Vec<BackendCall>,
    live: Rc<Cell<usize>>,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self {
            available: true,
            time: 0.0,
            calls: Vec::new(),
            live: Rc::new(Cell::new(0)),
        }
    }
}

impl RecordingBackend {
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::default()
        }
    }

    pub fn set_time(&mut self, t: f64) {
        self.time = t;
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    pub fn count(&self, pred: impl Fn(&BackendCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn engine_commands(&self) -> Vec<EngineCommand> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                BackendCall::Engine(cmd) => Some(*cmd),
                _ => None,
            })
            .collect()
    }

    /// Voices started whose handles have not been dropped
    pub fn live_handles(&self) -> usize {
        self.live.get()
    }
}

impl AudioBackend for RecordingBackend {
    type Voice = RecordedVoice;

    fn activate(&mut self) -> bool {
        self.available
    }

    fn now(&self) -> f64 {
        self.time
    }

    fn build_engine(&mut self) -> bool {
        self.calls.push(BackendCall::BuildEngine);
        true
    }

    fn apply_engine(&mut self, command: &EngineCommand) {
        self.calls.push(BackendCall::Engine(*command));
    }

    fn start_voice(&mut self, voice: &Voice, at: f64) -> Option<RecordedVoice> {
        self.calls.push(BackendCall::StartVoice {
            tones: voice.tones.len(),
            duration: voice.duration,
            at,
        });
        self.live.set(self.live.get() + 1);
        Some(RecordedVoice {
            live: self.live.clone(),
        })
    }

    fn release(&mut self) {
        self.calls.push(BackendCall::Release);
    }
}
