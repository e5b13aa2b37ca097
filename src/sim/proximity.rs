//! Proximity checks between the vehicle and map entities
//!
//! Node entry is level-triggered: it reports every tick the vehicle sits
//! inside a node's radius, and the receiver decides what a repeat means.
//! Pickups are edge-triggered through their `collected` flag.

use glam::Vec2;

use super::state::{Collectible, MapNode, WorldEvent};
use crate::consts::{NODE_TRIGGER_RADIUS, PICKUP_RADIUS, PICKUP_XP};

/// Strict radius test (`distance < radius`)
#[inline]
pub fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance(b) < radius
}

/// Nodes whose trigger radius contains `pos`
pub fn nodes_in_range(pos: Vec2, nodes: &[MapNode]) -> impl Iterator<Item = &MapNode> {
    nodes
        .iter()
        .filter(move |node| within(pos, node.pos, NODE_TRIGGER_RADIUS))
}

/// Produce this tick's events, marking reached collectibles as collected
pub fn detect(pos: Vec2, nodes: &[MapNode], collectibles: &mut [Collectible]) -> Vec<WorldEvent> {
    let mut events: Vec<WorldEvent> = nodes_in_range(pos, nodes)
        .map(|node| WorldEvent::SectionEntered(node.id))
        .collect();

    for pickup in collectibles.iter_mut() {
        if pickup.is_collected() || !within(pos, pickup.pos, PICKUP_RADIUS) {
            continue;
        }
        if pickup.collect() {
            events.push(WorldEvent::Collected {
                id: pickup.id,
                pos: pickup.pos,
                xp: PICKUP_XP,
            });
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SectionId;

    fn node(id: SectionId, x: f32, y: f32) -> MapNode {
        MapNode {
            id,
            label: id.as_str().to_string(),
            icon: String::new(),
            pos: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_pickup_inside_radius() {
        let mut pickups = vec![Collectible::new(7, Vec2::new(40.0, 40.0))];
        let events = detect(Vec2::new(42.9, 40.0), &[], &mut pickups);
        assert_eq!(events.len(), 1);
        match events[0] {
            WorldEvent::Collected { id, pos, xp } => {
                assert_eq!(id, 7);
                assert_eq!(pos, Vec2::new(40.0, 40.0));
                assert_eq!(xp, 100);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert!(pickups[0].is_collected());
    }

    #[test]
    fn test_pickup_boundary_is_exclusive() {
        let mut pickups = vec![Collectible::new(0, Vec2::new(40.0, 40.0))];
        assert!(detect(Vec2::new(43.0, 40.0), &[], &mut pickups).is_empty());
        assert!(detect(Vec2::new(43.1, 40.0), &[], &mut pickups).is_empty());
        assert!(!pickups[0].is_collected());
    }

    #[test]
    fn test_pickup_only_once() {
        let mut pickups = vec![Collectible::new(0, Vec2::new(40.0, 40.0))];
        assert_eq!(detect(Vec2::new(40.0, 40.0), &[], &mut pickups).len(), 1);
        assert!(detect(Vec2::new(40.0, 40.0), &[], &mut pickups).is_empty());
        // Leave and come back
        assert!(detect(Vec2::new(60.0, 60.0), &[], &mut pickups).is_empty());
        assert!(detect(Vec2::new(41.0, 40.0), &[], &mut pickups).is_empty());
    }

    #[test]
    fn test_node_entry_is_level_triggered() {
        let nodes = [node(SectionId::Skills, 45.0, 15.0)];
        let pos = Vec2::new(45.0, 18.9);
        for _ in 0..3 {
            let events = detect(pos, &nodes, &mut []);
            assert_eq!(events, vec![WorldEvent::SectionEntered(SectionId::Skills)]);
        }
    }

    #[test]
    fn test_node_boundary_is_exclusive() {
        let nodes = [node(SectionId::Contact, 85.0, 60.0)];
        assert!(detect(Vec2::new(81.0, 60.0), &nodes, &mut []).is_empty());
        assert_eq!(detect(Vec2::new(81.1, 60.0), &nodes, &mut []).len(), 1);
    }

    #[test]
    fn test_nodes_and_pickups_same_tick() {
        let nodes = [node(SectionId::Profile, 15.0, 20.0)];
        let mut pickups = vec![
            Collectible::new(0, Vec2::new(16.0, 20.0)),
            Collectible::new(1, Vec2::new(14.0, 21.0)),
            Collectible::new(2, Vec2::new(80.0, 80.0)),
        ];
        let events = detect(Vec2::new(15.0, 20.0), &nodes, &mut pickups);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], WorldEvent::SectionEntered(SectionId::Profile));
        assert!(!pickups[2].is_collected());
    }
}
