//! World state and core simulation types
//!
//! Everything the frame loop mutates lives in [`World`]. The view never holds
//! a reference into it; it receives snapshots instead.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::WorldConfig;
use crate::consts::*;

/// Content section reachable from the overworld
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Profile,
    Skills,
    Projects,
    Experience,
    Achievements,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 6] = [
        SectionId::Profile,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Experience,
        SectionId::Achievements,
        SectionId::Contact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::Profile => "profile",
            SectionId::Skills => "skills",
            SectionId::Projects => "projects",
            SectionId::Experience => "experience",
            SectionId::Achievements => "achievements",
            SectionId::Contact => "contact",
        }
    }
}

/// A static map location that opens a section
#[derive(Debug, Clone, PartialEq)]
pub struct MapNode {
    pub id: SectionId,
    pub label: String,
    pub icon: String,
    pub pos: Vec2,
}

/// An XP pickup. `collected` only ever goes false -> true.
#[derive(Debug, Clone, PartialEq)]
pub struct Collectible {
    pub id: u32,
    pub pos: Vec2,
    collected: bool,
}

impl Collectible {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            collected: false,
        }
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Mark as collected. Returns true only on the first call.
    pub fn collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        true
    }
}

/// Vehicle kinematics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicState {
    /// Position in percent of the world, [2, 98] after every tick
    pub pos: Vec2,
    /// Degrees, unbounded (never normalized)
    pub rotation: f32,
    /// World units per baseline frame
    pub vel: Vec2,
}

impl Default for KinematicState {
    fn default() -> Self {
        Self {
            pos: START_POSITION,
            rotation: 0.0,
            vel: Vec2::ZERO,
        }
    }
}

impl KinematicState {
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Driver intent for a single tick, derived from held keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputIntent {
    pub turn_left: bool,
    pub turn_right: bool,
    pub forward: bool,
    pub backward: bool,
}

impl InputIntent {
    pub fn turning(&self) -> bool {
        self.turn_left || self.turn_right
    }
}

/// Normalized engine drive, the only input to the engine sound mapping
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EngineAudioState {
    pub throttle01: f32,
    pub speed01: f32,
}

/// Discrete outcome of a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldEvent {
    /// Vehicle is inside a node's trigger radius (fires every tick while inside)
    SectionEntered(SectionId),
    /// A collectible was picked up
    Collected { id: u32, pos: Vec2, xp: u32 },
}

/// Complete simulation state, owned by the frame loop
#[derive(Debug, Clone)]
pub struct World {
    pub vehicle: KinematicState,
    pub nodes: Vec<MapNode>,
    pub collectibles: Vec<Collectible>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl World {
    /// Build the world from config, scattering collectibles with a seeded RNG
    pub fn new(config: &WorldConfig) -> Self {
        let mut rng = Pcg32::seed_from_u64(config.seed);
        let collectibles = (0..config.collectible_count)
            .map(|id| {
                let x = rng.random_range(config.spawn_min..config.spawn_max);
                let y = rng.random_range(config.spawn_min..config.spawn_max);
                Collectible::new(id, Vec2::new(x, y))
            })
            .collect();

        let nodes = config
            .nodes
            .iter()
            .map(|n| MapNode {
                id: n.id,
                label: n.label.clone(),
                icon: n.icon.clone(),
                pos: Vec2::new(n.x, n.y),
            })
            .collect();

        Self {
            vehicle: KinematicState::default(),
            nodes,
            collectibles,
            time_ticks: 0,
        }
    }

    /// Collectibles still on the map
    pub fn remaining(&self) -> usize {
        self.collectibles.iter().filter(|c| !c.is_collected()).count()
    }
}
