//! Frame orchestration
//!
//! `App` owns every piece of runtime state and is the only thing the host
//! glue talks to. Each animation frame runs: clock -> input -> tick ->
//! engine sound -> view -> events (shell, cues, bursts).

use crate::audio::{AudioBackend, AudioEngine, SoundEffect};
use crate::config::WorldConfig;
use crate::platform::{FrameClock, KeyAction, KeyState};
use crate::shell::Shell;
use crate::sim::{SectionId, World, WorldEvent, tick};
use crate::view::{ViewUpdate, WorldView};

/// Something only the host can do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRequest {
    /// Enter (true) or leave (false) fullscreen
    Fullscreen(bool),
}

/// What a frame changed, for the host to redraw
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// The simulation advanced this frame
    pub ticked: bool,
    pub view: ViewUpdate,
    /// A section panel opened this frame
    pub section_opened: Option<SectionId>,
    pub xp_gained: u32,
}

pub struct App<B: AudioBackend> {
    world: World,
    shell: Shell,
    view: WorldView,
    audio: AudioEngine<B>,
    keys: KeyState,
    clock: FrameClock,
}

impl<B: AudioBackend> App<B> {
    pub fn new(config: &WorldConfig, backend: B) -> Self {
        let world = World::new(config);
        let view = WorldView::new(&world.vehicle);
        log::info!(
            "World ready: {} nodes, {} pickups",
            world.nodes.len(),
            world.collectibles.len()
        );
        Self {
            world,
            shell: Shell::new(config.starting_xp),
            view,
            audio: AudioEngine::new(backend),
            keys: KeyState::new(),
            clock: FrameClock::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn view(&self) -> &WorldView {
        &self.view
    }

    pub fn audio(&self) -> &AudioEngine<B> {
        &self.audio
    }

    fn muted(&self) -> bool {
        self.shell.state().muted
    }

    /// Title screen dismissed (user gesture, so audio may start here)
    pub fn start(&mut self) {
        if self.shell.start() {
            self.clock.reset();
            let muted = self.muted();
            self.audio.play_effect(SoundEffect::Hover, muted);
        }
    }

    /// Run one animation frame at host time `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> FrameReport {
        let mut report = FrameReport::default();
        if !self.shell.state().started || !self.shell.in_hub() {
            // Paused; the next hub frame starts from a baseline tick
            self.clock.reset();
            self.audio.reap();
            return report;
        }

        let dt = self.clock.advance(now_ms);
        let intent = self.keys.intent();
        let outcome = tick(&mut self.world, &intent, dt);
        report.ticked = true;

        self.audio.set_engine_state(
            outcome.engine.throttle01,
            outcome.engine.speed01,
            self.shell.engine_muted(),
        );
        report.view = self
            .view
            .observe(&self.world.vehicle, outcome.engine, intent.forward, dt, now_ms);

        let in_range: Vec<SectionId> = outcome
            .events
            .iter()
            .filter_map(|e| match e {
                WorldEvent::SectionEntered(id) => Some(*id),
                _ => None,
            })
            .collect();
        self.shell.release_suppression(&in_range);

        let muted = self.muted();
        for event in outcome.events {
            match event {
                WorldEvent::SectionEntered(id) => {
                    if report.section_opened.is_none() && self.shell.enter_section(id) {
                        self.audio.play_effect(SoundEffect::Enter, muted);
                        report.section_opened = Some(id);
                    }
                }
                WorldEvent::Collected { id, pos, xp } => {
                    let total = self.shell.award_xp(xp);
                    log::debug!("Collected pickup {id} (+{xp} XP, total {total})");
                    self.view.spawn_burst(pos, now_ms);
                    if self.view.dismiss_hint() {
                        report.view.hint_dismissed = true;
                    }
                    self.audio.play_effect(SoundEffect::Collect, muted);
                    report.xp_gained += xp;
                }
            }
        }

        if report.section_opened.is_some() {
            // Panel is up, the engine idles silently until we're back
            self.audio.set_engine_state(0.0, 0.0, true);
        }
        report
    }

    /// Key pressed. Returns a request when the host has to act.
    pub fn key_down(&mut self, key: &str) -> Option<HostRequest> {
        let action = self.keys.key_down(key)?;
        match action {
            KeyAction::Horn | KeyAction::Startup => {
                if self.shell.state().started && self.shell.in_hub() {
                    let effect = if action == KeyAction::Horn {
                        SoundEffect::Horn
                    } else {
                        SoundEffect::Startup
                    };
                    let muted = self.muted();
                    self.audio.play_effect(effect, muted);
                }
                None
            }
            KeyAction::ReturnToHub => {
                self.return_to_hub();
                None
            }
            KeyAction::ToggleFullscreen => Some(self.toggle_fullscreen()),
            KeyAction::ToggleMute => {
                self.toggle_mute();
                None
            }
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.key_up(key);
    }

    /// Window lost focus; key-up events will not arrive
    pub fn blur(&mut self) {
        self.keys.clear();
    }

    /// Close the open section. No-op in the hub.
    pub fn return_to_hub(&mut self) -> bool {
        if !self.shell.return_to_hub() {
            return false;
        }
        let muted = self.muted();
        self.audio.play_effect(SoundEffect::Exit, muted);
        self.clock.reset();
        true
    }

    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.shell.toggle_mute();
        self.audio.play_effect(SoundEffect::Hover, muted);
        muted
    }

    pub fn toggle_fullscreen(&mut self) -> HostRequest {
        let muted = self.muted();
        self.audio.play_effect(SoundEffect::Hover, muted);
        HostRequest::Fullscreen(self.shell.toggle_fullscreen())
    }

    /// Host reported its actual fullscreen state
    pub fn fullscreen_changed(&mut self, fullscreen: bool) {
        self.shell.set_fullscreen(fullscreen);
    }

    /// Release audio resources
    pub fn shutdown(&mut self) {
        self.audio.shutdown();
    }
}
