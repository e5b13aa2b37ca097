//! Folio Racer - a drivable portfolio overworld
//!
//! Core modules:
//! - `sim`: Vehicle motion, world state and proximity events
//! - `audio`: Procedural engine layer and one-shot cues
//! - `view`: Throttled render snapshots, trails and burst effects
//! - `shell`: Navigation, XP and global toggles
//! - `platform`: Frame clock, keyboard state and frame loop handle
//! - `config`: World layout loaded from JSON

pub mod app;
pub mod audio;
pub mod config;
pub mod platform;
pub mod shell;
pub mod sim;
pub mod view;

pub use app::{App, FrameReport, HostRequest};
pub use config::{ConfigError, WorldConfig};
pub use shell::{ActiveView, AppState, Shell};

use glam::Vec2;

/// Tuning constants. These define the feel of the drive and are kept verbatim.
pub mod consts {
    use glam::Vec2;

    /// Reference frame rate the per-frame constants were tuned at
    pub const BASELINE_HZ: f32 = 60.0;
    /// Nominal tick duration, also the fallback for bad clock readings
    pub const BASELINE_DT: f32 = 1.0 / 60.0;
    /// Upper bound on a single tick (tab-suspend resume)
    pub const MAX_DT: f32 = 0.05;

    /// Degrees per baseline frame while a turn key is held
    pub const TURN_RATE: f32 = 4.0;
    /// Speed added along the heading per baseline frame (forward)
    pub const FORWARD_ACCEL: f32 = 0.05;
    /// Speed added along the heading per baseline frame (brake)
    pub const BRAKE_ACCEL: f32 = -0.03;
    /// Maximum speed in world units per baseline frame
    pub const MAX_SPEED: f32 = 0.8;

    /// Forward friction per baseline frame
    pub const FORWARD_FRICTION: f32 = 0.985;
    /// Forward friction while turning above `CARVE_MIN_SPEED` (momentum carry)
    pub const FORWARD_FRICTION_CARVING: f32 = 0.992;
    pub const CARVE_MIN_SPEED: f32 = 0.2;
    /// Lateral friction per baseline frame (drift correction)
    pub const LATERAL_FRICTION: f32 = 0.92;

    /// World bounds the vehicle is clamped to (percent of viewport)
    pub const WORLD_MIN: f32 = 2.0;
    pub const WORLD_MAX: f32 = 98.0;
    pub const START_POSITION: Vec2 = Vec2::new(50.0, 50.0);

    /// Map node entry radius
    pub const NODE_TRIGGER_RADIUS: f32 = 4.0;
    /// Node highlight radii (view only)
    pub const NODE_NEAR_RADIUS: f32 = 10.0;
    pub const NODE_LOCK_RADIUS: f32 = 5.0;
    /// Collectible pickup radius
    pub const PICKUP_RADIUS: f32 = 3.0;
    /// XP per collectible
    pub const PICKUP_XP: u32 = 100;
    /// Hard XP ceiling
    pub const XP_CAP: u32 = 20_000;

    /// Render snapshot publish interval (~30 Hz)
    pub const SNAPSHOT_INTERVAL: f32 = 1.0 / 30.0;
    /// Trail sampling interval (~20 Hz)
    pub const TRAIL_INTERVAL: f32 = 1.0 / 20.0;
    /// Minimum speed before tire trails are laid down
    pub const TRAIL_MIN_SPEED: f32 = 0.1;
    /// Trail buffer length that triggers dropping the oldest segment
    pub const TRAIL_CAPACITY: usize = 50;
    pub const TRAIL_OPACITY: f32 = 0.2;
    /// Pickup burst lifetime
    pub const BURST_LIFETIME_MS: f64 = 1000.0;
    /// Controls hint auto-dismiss
    pub const HINT_TIMEOUT_MS: f64 = 5000.0;
}

/// Unit heading vector for a rotation in degrees.
///
/// Rotation 0 faces "up" (negative y in screen space).
#[inline]
pub fn heading(rotation_degrees: f32) -> Vec2 {
    let rad = (rotation_degrees - 90.0).to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Right-hand vector perpendicular to `forward`
#[inline]
pub fn right_of(forward: Vec2) -> Vec2 {
    Vec2::new(-forward.y, forward.x)
}

/// Clamp to [0, 1]
#[inline]
pub fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_zero_faces_up() {
        let h = heading(0.0);
        assert!(h.x.abs() < 1e-6);
        assert!((h.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_heading_ninety_faces_right() {
        let h = heading(90.0);
        assert!((h.x - 1.0).abs() < 1e-6);
        assert!(h.y.abs() < 1e-6);
        // Right of "right" is "down"
        let r = right_of(h);
        assert!((r.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_clamp01_and_lerp() {
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(1.5), 1.0);
        assert_eq!(lerp(38.0, 125.0, 0.0), 38.0);
        assert_eq!(lerp(38.0, 125.0, 1.0), 125.0);
    }
}
