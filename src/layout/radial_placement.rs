// Radial placement ("orbital" layout) for the family tree.
//
// Turns ring assignments into angles and radius offsets:
// 1. Ring 0 sits in the centre
// 2. Ring 1 is spread evenly around the full circle, starting at the top
// 3. Outer rings fan out around the node they hang off, with per-id jitter
//
// Properties:
// - Deterministic: jitter comes from a stable hash of the profile id
// - Parents are always placed before their children (rings go outwards)
// - Angles are relative to the centre, radii to the caller's geometry

use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use crate::profile::ProfileId;
use super::jitter::Jitter;
use super::rings::{RingAssignment, Rings};
use super::{FamilyTreeNode, LayoutConfig};

/// Angle of the `index`-th of `count` evenly spaced ring-1 nodes.
pub fn ring_one_angle(index: usize, count: usize) -> f64 {
    let step = TAU / count.max(1) as f64;
    -FRAC_PI_2 + index as f64 * step
}

/// Offset of the `index`-th of `count` siblings, centred on their parent.
pub fn sibling_offset(index: usize, count: usize, spread: f64) -> f64 {
    let mid = (count.max(1) - 1) as f64 / 2.0;
    (index as f64 - mid) * spread
}

/// Angle and radius offset for a node on ring 2 or beyond.
pub fn place_child(
    id: &ProfileId,
    parent_angle: f64,
    index: usize,
    count: usize,
    cfg: &LayoutConfig,
) -> (f64, f64) {
    let jitter = Jitter::for_id(id, cfg.radius_jitter, cfg.angle_jitter);
    let angle = parent_angle + sibling_offset(index, count, cfg.sibling_spread) + jitter.angle;
    (angle, jitter.radius)
}

/// Place every ring assignment. Output keeps the ring/discovery order of
/// `rings.entries`.
pub fn place_rings(rings: &Rings, cfg: &LayoutConfig) -> Vec<FamilyTreeNode> {
    // id -> (angle, radius_offset)
    let mut placed: HashMap<&ProfileId, (f64, f64)> = HashMap::new();

    let ring_one: Vec<&RingAssignment> = rings.entries.iter().filter(|e| e.ring == 1).collect();
    for (i, e) in ring_one.iter().enumerate() {
        placed.insert(&e.id, (ring_one_angle(i, ring_one.len()), 0.0));
    }
    for e in rings.entries.iter().filter(|e| e.ring == 0) {
        placed.insert(&e.id, (0.0, 0.0));
    }

    let max_ring = rings.entries.iter().map(|e| e.ring).max().unwrap_or(0);
    for ring in 2..=max_ring {
        for (anchor, mut siblings) in group_by_anchor(&rings.entries, ring) {
            siblings.sort_by(|a, b| a.id.cmp(&b.id));
            // Only cap-clamped rings can lack a placed anchor.
            let parent_angle = anchor
                .and_then(|a| placed.get(a))
                .map(|&(angle, _)| angle)
                .unwrap_or(0.0);

            let count = siblings.len();
            for (i, e) in siblings.into_iter().enumerate() {
                let (angle, offset) = place_child(&e.id, parent_angle, i, count, cfg);
                placed.insert(&e.id, (angle, offset));
            }
        }
    }

    rings
        .entries
        .iter()
        .map(|e| {
            let (angle, radius_offset) = placed.get(&e.id).copied().unwrap_or((0.0, 0.0));
            FamilyTreeNode {
                id: e.id.clone(),
                ring: e.ring,
                angle,
                connected_to_profile_id: e.connected_to.clone(),
                radius_offset,
            }
        })
        .collect()
}

/// Group the entries of one ring by anchor, in order of first appearance.
fn group_by_anchor(
    entries: &[RingAssignment],
    ring: u32,
) -> Vec<(Option<&ProfileId>, Vec<&RingAssignment>)> {
    let mut groups: Vec<(Option<&ProfileId>, Vec<&RingAssignment>)> = Vec::new();
    for e in entries.iter().filter(|e| e.ring == ring) {
        let anchor = e.anchor.as_ref();
        match groups.iter_mut().find(|(a, _)| *a == anchor) {
            Some((_, members)) => members.push(e),
            None => groups.push((anchor, vec![e])),
        }
    }
    groups
}

/// Layout with nobody in the centre: everyone evenly on ring 1.
pub fn place_without_focus(ids: &[ProfileId]) -> Vec<FamilyTreeNode> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| FamilyTreeNode {
            id: id.clone(),
            ring: 1,
            angle: ring_one_angle(i, ids.len()),
            connected_to_profile_id: None,
            radius_offset: 0.0,
        })
        .collect()
}
