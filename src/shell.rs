//! Application shell state
//!
//! Owns navigation (hub vs. a content section), XP and the global toggles.
//! Content panels themselves are rendered elsewhere.

use glam::Vec2;

use crate::consts::XP_CAP;
use crate::sim::SectionId;

/// What the page is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    /// The drivable overworld
    #[default]
    Hub,
    Section(SectionId),
}

/// Top-level UI state
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub active: ActiveView,
    /// Capped at `XP_CAP`, never decreases
    pub xp: u32,
    pub muted: bool,
    pub fullscreen: bool,
    /// Past the title screen
    pub started: bool,
}

/// Navigation and progression logic
#[derive(Debug, Clone)]
pub struct Shell {
    state: AppState,
    /// Section just left; entries for it are ignored until the vehicle leaves its radius
    suppressed: Option<SectionId>,
}

impl Shell {
    pub fn new(starting_xp: u32) -> Self {
        Self {
            state: AppState {
                active: ActiveView::Hub,
                xp: starting_xp.min(XP_CAP),
                muted: false,
                fullscreen: false,
                started: false,
            },
            suppressed: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn active(&self) -> ActiveView {
        self.state.active
    }

    pub fn in_hub(&self) -> bool {
        self.state.active == ActiveView::Hub
    }

    /// Leave the title screen. Returns false if already started.
    pub fn start(&mut self) -> bool {
        if self.state.started {
            return false;
        }
        self.state.started = true;
        log::info!("Overworld started");
        true
    }

    /// Handle a node entry. Returns true when the active view changed.
    ///
    /// Repeats for the current section are no-ops, as are entries for the
    /// section the player just backed out of.
    pub fn enter_section(&mut self, id: SectionId) -> bool {
        if self.suppressed == Some(id) || self.state.active == ActiveView::Section(id) {
            return false;
        }
        self.state.active = ActiveView::Section(id);
        self.suppressed = None;
        log::info!("Entered section {}", id.as_str());
        true
    }

    /// Back to the overworld. Vehicle and pickups are untouched.
    /// Returns false if already in the hub.
    pub fn return_to_hub(&mut self) -> bool {
        let ActiveView::Section(id) = self.state.active else {
            return false;
        };
        self.state.active = ActiveView::Hub;
        self.suppressed = Some(id);
        log::debug!("Returned to hub from {}", id.as_str());
        true
    }

    /// Re-arm a suppressed section once the vehicle is out of its radius
    pub fn release_suppression(&mut self, in_range: &[SectionId]) {
        if let Some(id) = self.suppressed {
            if !in_range.contains(&id) {
                self.suppressed = None;
            }
        }
    }

    /// Add XP, silently truncating at the cap. Returns the new total.
    pub fn award_xp(&mut self, amount: u32) -> u32 {
        self.state.xp = self.state.xp.saturating_add(amount).min(XP_CAP);
        self.state.xp
    }

    /// Returns the new mute flag
    pub fn toggle_mute(&mut self) -> bool {
        self.state.muted = !self.state.muted;
        log::info!("Muted: {}", self.state.muted);
        self.state.muted
    }

    /// Returns the requested fullscreen flag
    pub fn toggle_fullscreen(&mut self) -> bool {
        self.state.fullscreen = !self.state.fullscreen;
        self.state.fullscreen
    }

    /// Sync with the host's actual fullscreen state
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.state.fullscreen = fullscreen;
    }

    /// The engine idles silently while muted or while a panel is open
    pub fn engine_muted(&self) -> bool {
        self.state.muted || !self.in_hub()
    }

    /// XP bar fill, 0-100
    pub fn xp_percentage(&self) -> f32 {
        (self.state.xp as f32 / XP_CAP as f32 * 100.0).min(100.0)
    }
}

/// Radar cell (0..16) of a position on the 4x4 HUD grid
pub fn radar_sector(pos: Vec2) -> usize {
    // 25.1 keeps x = 100 in the last column
    let sx = (pos.x / 25.1).floor().clamp(0.0, 3.0) as usize;
    let sy = (pos.y / 25.1).floor().clamp(0.0, 3.0) as usize;
    sy * 4 + sx
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_starting_xp_clamped() {
        assert_eq!(Shell::new(15_000).state().xp, 15_000);
        assert_eq!(Shell::new(50_000).state().xp, XP_CAP);
    }

    #[test]
    fn test_award_xp_truncates_at_cap() {
        let mut shell = Shell::new(19_950);
        assert_eq!(shell.award_xp(100), 20_000);
        assert_eq!(shell.award_xp(100), 20_000);
        assert_eq!(shell.award_xp(u32::MAX), 20_000);
    }

    #[test]
    fn test_section_entry_is_idempotent() {
        let mut shell = Shell::new(0);
        assert!(shell.enter_section(SectionId::Skills));
        assert!(!shell.enter_section(SectionId::Skills));
        assert_eq!(shell.active(), ActiveView::Section(SectionId::Skills));
    }

    #[test]
    fn test_return_to_hub() {
        let mut shell = Shell::new(0);
        assert!(!shell.return_to_hub());
        shell.enter_section(SectionId::Projects);
        assert!(shell.return_to_hub());
        assert!(shell.in_hub());
    }

    #[test]
    fn test_left_section_suppressed_until_out_of_range() {
        let mut shell = Shell::new(0);
        shell.enter_section(SectionId::Contact);
        shell.return_to_hub();

        // Still parked on the node
        shell.release_suppression(&[SectionId::Contact]);
        assert!(!shell.enter_section(SectionId::Contact));
        assert!(shell.in_hub());

        // Other sections are unaffected
        assert!(shell.enter_section(SectionId::Profile));
        shell.return_to_hub();

        // Drove away from Profile, then back
        shell.release_suppression(&[]);
        assert!(shell.enter_section(SectionId::Profile));
    }

    #[test]
    fn test_engine_muted_composition() {
        let mut shell = Shell::new(0);
        assert!(!shell.engine_muted());
        shell.enter_section(SectionId::Skills);
        assert!(shell.engine_muted());
        shell.return_to_hub();
        assert!(!shell.engine_muted());
        shell.toggle_mute();
        assert!(shell.engine_muted());
    }

    #[test]
    fn test_toggles() {
        let mut shell = Shell::new(0);
        assert!(shell.toggle_mute());
        assert!(!shell.toggle_mute());
        assert!(shell.toggle_fullscreen());
        shell.set_fullscreen(false);
        assert!(!shell.state().fullscreen);
    }

    #[test]
    fn test_start_once() {
        let mut shell = Shell::new(0);
        assert!(shell.start());
        assert!(!shell.start());
    }

    #[test]
    fn test_xp_percentage() {
        assert_eq!(Shell::new(15_000).xp_percentage(), 75.0);
        assert_eq!(Shell::new(20_000).xp_percentage(), 100.0);
    }

    #[test]
    fn test_radar_sector() {
        assert_eq!(radar_sector(Vec2::new(2.0, 2.0)), 0);
        assert_eq!(radar_sector(Vec2::new(50.0, 50.0)), 5);
        assert_eq!(radar_sector(Vec2::new(98.0, 98.0)), 15);
        assert_eq!(radar_sector(Vec2::new(100.0, 0.0)), 3);
        assert_eq!(radar_sector(Vec2::new(25.0, 75.5)), 12);
    }

    proptest! {
        #[test]
        fn prop_xp_monotonic_and_capped(
            start in 0u32..=25_000,
            awards in prop::collection::vec(0u32..5_000, 0..100),
        ) {
            let mut shell = Shell::new(start);
            let mut last = shell.state().xp;
            prop_assert!(last <= XP_CAP);
            for amount in awards {
                let xp = shell.award_xp(amount);
                prop_assert!(xp <= XP_CAP);
                prop_assert!(xp >= last);
                last = xp;
            }
        }
    }
}
