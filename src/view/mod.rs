//! World view-model
//!
//! The simulation runs every frame but the visible overworld refreshes at a
//! lower rate. This module owns everything the page shows besides the
//! shell: throttled vehicle snapshots, tire trails, pickup bursts, node
//! highlight states and the controls hint. DOM output lives in `dom`.

#[cfg(target_arch = "wasm32")]
pub mod dom;

use std::collections::VecDeque;

use glam::Vec2;

use crate::consts::*;
use crate::sim::{EngineAudioState, KinematicState, MapNode, SectionId};

/// Vehicle state as last published to the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSnapshot {
    pub pos: Vec2,
    pub rotation: f32,
    pub throttle01: f32,
    pub speed01: f32,
    pub accelerating: bool,
}

impl RenderSnapshot {
    fn of(vehicle: &KinematicState, engine: EngineAudioState, accelerating: bool) -> Self {
        Self {
            pos: vehicle.pos,
            rotation: vehicle.rotation,
            throttle01: engine.throttle01,
            speed01: engine.speed01,
            accelerating,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSegment {
    pub id: u64,
    pub pos: Vec2,
    pub rotation: f32,
    pub opacity: f32,
}

/// Expanding ring shown where a pickup was collected
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub id: u64,
    pub pos: Vec2,
    pub born_ms: f64,
}

/// Node highlight, derived from distance to the published vehicle position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Idle,
    /// Scanner ring
    Near,
    /// Lock-on brackets
    Locked,
}

impl NodeState {
    pub fn at_distance(distance: f32) -> Self {
        if distance < NODE_LOCK_RADIUS {
            NodeState::Locked
        } else if distance < NODE_NEAR_RADIUS {
            NodeState::Near
        } else {
            NodeState::Idle
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            NodeState::Idle => "node",
            NodeState::Near => "node near",
            NodeState::Locked => "node near locked",
        }
    }
}

/// What changed during one `observe` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewUpdate {
    /// A new snapshot was published
    pub published: bool,
    /// A trail segment was laid down
    pub trail_added: bool,
    /// New accelerating flag, when it toggled this frame
    pub accelerating: Option<bool>,
    /// Bursts expired this frame
    pub bursts_expired: bool,
    /// Controls hint went away this frame
    pub hint_dismissed: bool,
}

impl ViewUpdate {
    /// Anything the page needs to redraw
    pub fn is_dirty(&self) -> bool {
        self.published
            || self.trail_added
            || self.accelerating.is_some()
            || self.bursts_expired
            || self.hint_dismissed
    }
}

#[derive(Debug, Clone)]
pub struct WorldView {
    snapshot: RenderSnapshot,
    snapshot_accum: f32,
    trail_accum: f32,
    trail: VecDeque<TrailSegment>,
    next_trail_id: u64,
    bursts: Vec<Burst>,
    next_burst_id: u64,
    accelerating: bool,
    hint_visible: bool,
    hint_deadline_ms: Option<f64>,
}

impl WorldView {
    pub fn new(vehicle: &KinematicState) -> Self {
        Self {
            snapshot: RenderSnapshot::of(vehicle, EngineAudioState::default(), false),
            snapshot_accum: 0.0,
            trail_accum: 0.0,
            trail: VecDeque::with_capacity(TRAIL_CAPACITY + 1),
            next_trail_id: 0,
            bursts: Vec::new(),
            next_burst_id: 0,
            accelerating: false,
            hint_visible: true,
            hint_deadline_ms: None,
        }
    }

    /// Feed one simulated frame. `dt` is the sanitized tick delta,
    /// `now_ms` the host frame timestamp.
    pub fn observe(
        &mut self,
        vehicle: &KinematicState,
        engine: EngineAudioState,
        accelerating: bool,
        dt: f32,
        now_ms: f64,
    ) -> ViewUpdate {
        let mut update = ViewUpdate::default();

        if accelerating != self.accelerating {
            self.accelerating = accelerating;
            update.accelerating = Some(accelerating);
        }

        self.snapshot_accum += dt;
        if self.snapshot_accum >= SNAPSHOT_INTERVAL {
            self.snapshot_accum = 0.0;
            self.snapshot = RenderSnapshot::of(vehicle, engine, accelerating);
            update.published = true;
        }

        self.trail_accum += dt;
        if vehicle.speed() > TRAIL_MIN_SPEED && self.trail_accum >= TRAIL_INTERVAL {
            self.trail_accum = 0.0;
            self.push_trail(vehicle.pos, vehicle.rotation);
            update.trail_added = true;
        }

        update.bursts_expired = self.expire_bursts(now_ms);
        update.hint_dismissed = self.tick_hint(now_ms);
        update
    }

    fn push_trail(&mut self, pos: Vec2, rotation: f32) {
        if self.trail.len() > TRAIL_CAPACITY {
            self.trail.pop_front();
        }
        self.trail.push_back(TrailSegment {
            id: self.next_trail_id,
            pos,
            rotation,
            opacity: TRAIL_OPACITY,
        });
        self.next_trail_id += 1;
    }

    /// Start a pickup burst at `pos`
    pub fn spawn_burst(&mut self, pos: Vec2, now_ms: f64) -> u64 {
        let id = self.next_burst_id;
        self.next_burst_id += 1;
        self.bursts.push(Burst {
            id,
            pos,
            born_ms: now_ms,
        });
        id
    }

    fn expire_bursts(&mut self, now_ms: f64) -> bool {
        let before = self.bursts.len();
        self.bursts
            .retain(|b| now_ms - b.born_ms < BURST_LIFETIME_MS);
        self.bursts.len() != before
    }

    fn tick_hint(&mut self, now_ms: f64) -> bool {
        if !self.hint_visible {
            return false;
        }
        match self.hint_deadline_ms {
            None => {
                self.hint_deadline_ms = Some(now_ms + HINT_TIMEOUT_MS);
                false
            }
            Some(deadline) if now_ms >= deadline => {
                self.hint_visible = false;
                true
            }
            Some(_) => false,
        }
    }

    /// Hide the controls hint. Returns true if it was showing.
    pub fn dismiss_hint(&mut self) -> bool {
        std::mem::replace(&mut self.hint_visible, false)
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    pub fn snapshot(&self) -> &RenderSnapshot {
        &self.snapshot
    }

    pub fn trail(&self) -> impl Iterator<Item = &TrailSegment> {
        self.trail.iter()
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    pub fn bursts(&self) -> &[Burst] {
        &self.bursts
    }

    pub fn node_state(&self, node: &MapNode) -> NodeState {
        NodeState::at_distance(self.snapshot.pos.distance(node.pos))
    }

    pub fn node_states(&self, nodes: &[MapNode]) -> Vec<(SectionId, NodeState)> {
        nodes.iter().map(|n| (n.id, self.node_state(n))).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn moving(speed: f32) -> KinematicState {
        KinematicState {
            vel: Vec2::new(0.0, -speed),
            ..KinematicState::default()
        }
    }

    fn node_at(x: f32, y: f32) -> MapNode {
        MapNode {
            id: SectionId::Skills,
            label: "Abilities".into(),
            icon: "sword".into(),
            pos: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_snapshot_throttled() {
        let mut view = WorldView::new(&KinematicState::default());
        let mut vehicle = KinematicState::default();
        let mut published = 0;
        for i in 0..60 {
            vehicle.pos.y = 50.0 - i as f32 * 0.1;
            if view.observe(&vehicle, EngineAudioState::default(), false, DT, 0.0).published {
                published += 1;
            }
        }
        // Every second frame at 60 Hz
        assert!((29..=31).contains(&published), "published {published}");
        assert!(view.snapshot().pos.y < 50.0);
    }

    #[test]
    fn test_snapshot_every_frame_at_low_rate() {
        let mut view = WorldView::new(&KinematicState::default());
        for _ in 0..3 {
            let update = view.observe(&KinematicState::default(), EngineAudioState::default(), false, 0.05, 0.0);
            assert!(update.published);
        }
    }

    #[test]
    fn test_no_trail_when_slow() {
        let mut view = WorldView::new(&KinematicState::default());
        for _ in 0..120 {
            view.observe(&moving(0.05), EngineAudioState::default(), true, DT, 0.0);
        }
        assert_eq!(view.trail_len(), 0);
    }

    #[test]
    fn test_trail_sampled_and_bounded() {
        let mut view = WorldView::new(&KinematicState::default());
        for _ in 0..10_000 {
            view.observe(&moving(0.5), EngineAudioState::default(), true, 0.05, 0.0);
        }
        assert_eq!(view.trail_len(), TRAIL_CAPACITY + 1);
        let ids: Vec<u64> = view.trail().map(|t| t.id).collect();
        assert!(ids.windows(2).all(|w| w[1] == w[0] + 1));
        assert_eq!(*ids.last().unwrap(), 9_999);
        assert!(view.trail().all(|t| t.opacity == TRAIL_OPACITY));
    }

    #[test]
    fn test_accelerating_change_reported_once() {
        let mut view = WorldView::new(&KinematicState::default());
        let e = EngineAudioState::default();
        let k = KinematicState::default();
        assert_eq!(view.observe(&k, e, true, DT, 0.0).accelerating, Some(true));
        assert_eq!(view.observe(&k, e, true, DT, 0.0).accelerating, None);
        assert_eq!(view.observe(&k, e, false, DT, 0.0).accelerating, Some(false));
    }

    #[test]
    fn test_burst_expires_after_lifetime() {
        let mut view = WorldView::new(&KinematicState::default());
        let k = KinematicState::default();
        let e = EngineAudioState::default();
        view.spawn_burst(Vec2::new(20.0, 20.0), 1_000.0);
        view.spawn_burst(Vec2::new(30.0, 30.0), 1_500.0);

        assert!(!view.observe(&k, e, false, DT, 1_999.0).bursts_expired);
        assert_eq!(view.bursts().len(), 2);
        assert!(view.observe(&k, e, false, DT, 2_000.0).bursts_expired);
        assert_eq!(view.bursts().len(), 1);
        assert_eq!(view.bursts()[0].pos, Vec2::new(30.0, 30.0));
        view.observe(&k, e, false, DT, 2_500.0);
        assert!(view.bursts().is_empty());
    }

    #[test]
    fn test_hint_times_out() {
        let mut view = WorldView::new(&KinematicState::default());
        let k = KinematicState::default();
        let e = EngineAudioState::default();
        view.observe(&k, e, false, DT, 100.0);
        assert!(view.hint_visible());
        view.observe(&k, e, false, DT, 5_000.0);
        assert!(view.hint_visible());
        assert!(view.observe(&k, e, false, DT, 5_100.0).hint_dismissed);
        assert!(!view.hint_visible());
    }

    #[test]
    fn test_hint_dismissed_by_pickup() {
        let mut view = WorldView::new(&KinematicState::default());
        assert!(view.dismiss_hint());
        assert!(!view.dismiss_hint());
        let update = view.observe(&KinematicState::default(), EngineAudioState::default(), false, DT, 10_000.0);
        assert!(!update.hint_dismissed);
    }

    #[test]
    fn test_node_states() {
        assert_eq!(NodeState::at_distance(12.0), NodeState::Idle);
        assert_eq!(NodeState::at_distance(10.0), NodeState::Idle);
        assert_eq!(NodeState::at_distance(9.9), NodeState::Near);
        assert_eq!(NodeState::at_distance(5.0), NodeState::Near);
        assert_eq!(NodeState::at_distance(4.9), NodeState::Locked);

        let view = WorldView::new(&KinematicState::default());
        assert_eq!(view.node_state(&node_at(50.0, 57.0)), NodeState::Near);
        assert_eq!(view.node_state(&node_at(52.0, 52.0)), NodeState::Locked);
        assert_eq!(
            view.node_states(&[node_at(90.0, 90.0)]),
            vec![(SectionId::Skills, NodeState::Idle)]
        );
    }
}
