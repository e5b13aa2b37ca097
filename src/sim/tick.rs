//! Simulation tick
//!
//! Motion first, then proximity against the post-move position.

use super::motion::integrate;
use super::proximity::detect;
use super::state::{EngineAudioState, InputIntent, World, WorldEvent};

/// Everything one tick produces for the layers above
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Normalized drive for the engine sound
    pub engine: EngineAudioState,
    /// Proximity events in node-then-pickup order
    pub events: Vec<WorldEvent>,
}

/// Advance the world by one frame of `dt` seconds (raw, sanitized internally)
pub fn tick(world: &mut World, intent: &InputIntent, dt: f32) -> TickOutcome {
    world.time_ticks += 1;
    let engine = integrate(&mut world.vehicle, intent, dt);
    let events = detect(world.vehicle.pos, &world.nodes, &mut world.collectibles);
    TickOutcome { engine, events }
}
