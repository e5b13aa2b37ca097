//! Simulation module
//!
//! All driving logic lives here. This module must stay free of rendering,
//! audio and platform dependencies:
//! - Variable timestep, normalized to a 60 Hz baseline
//! - Seeded RNG only
//! - Stable iteration order (config order for nodes, id order for pickups)

pub mod motion;
pub mod proximity;
pub mod state;
pub mod tick;

pub use motion::{integrate, sanitize_dt};
pub use proximity::{detect, nodes_in_range, within};
pub use state::{
    Collectible, EngineAudioState, InputIntent, KinematicState, MapNode, SectionId, World,
    WorldEvent,
};
pub use tick::{TickOutcome, tick};
