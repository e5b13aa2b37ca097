//! World configuration
//!
//! The map layout ships embedded as JSON. Hosts may hand in their own JSON
//! (e.g. from a `data-world` attribute) and fall back to the built-in world.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::SectionId;

/// Built-in world, compiled into the binary
const DEFAULT_WORLD_JSON: &str = include_str!("../assets/world.json");

/// A map node as described in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    pub id: SectionId,
    pub label: String,
    /// Icon name resolved by the view
    pub icon: String,
    pub x: f32,
    pub y: f32,
}

/// World layout and progression settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for collectible placement
    pub seed: u64,
    /// Number of collectibles spawned at startup
    pub collectible_count: u32,
    /// Collectibles spawn uniformly in [spawn_min, spawn_max) on both axes
    pub spawn_min: f32,
    pub spawn_max: f32,
    /// XP the profile starts with
    pub starting_xp: u32,
    pub nodes: Vec<NodeConfig>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 1337,
            collectible_count: 20,
            spawn_min: 10.0,
            spawn_max: 90.0,
            starting_xp: 15_000,
            nodes: Vec::new(),
        }
    }
}

/// Errors from loading a world config
#[derive(Debug)]
pub enum ConfigError {
    /// JSON was malformed or had the wrong shape
    Parse(serde_json::Error),
    /// Spawn range is empty or outside the world
    InvalidSpawnRange { min: f32, max: f32 },
    /// Two nodes share a section id
    DuplicateNode(SectionId),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "invalid world json: {e}"),
            ConfigError::InvalidSpawnRange { min, max } => {
                write!(f, "invalid spawn range {min}..{max}")
            }
            ConfigError::DuplicateNode(id) => write!(f, "duplicate node '{}'", id.as_str()),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl WorldConfig {
    /// Parse and validate a world config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// The embedded world
    pub fn builtin() -> Self {
        match Self::from_json(DEFAULT_WORLD_JSON) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Built-in world failed to load: {e}");
                Self::default()
            }
        }
    }

    /// Parse `json` if given, falling back to the built-in world on error
    pub fn load_or_builtin(json: Option<&str>) -> Self {
        let Some(json) = json else {
            return Self::builtin();
        };
        match Self::from_json(json) {
            Ok(config) => {
                log::info!("Loaded world with {} nodes", config.nodes.len());
                config
            }
            Err(e) => {
                log::warn!("Ignoring world config ({e}), using built-in world");
                Self::builtin()
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.spawn_min, self.spawn_max);
        if !(min.is_finite() && max.is_finite()) || min >= max || min < 0.0 || max > 100.0 {
            return Err(ConfigError::InvalidSpawnRange { min, max });
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if self.nodes[..i].iter().any(|n| n.id == node.id) {
                return Err(ConfigError::DuplicateNode(node.id));
            }
        }
        Ok(())
    }
}
