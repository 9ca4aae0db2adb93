// Ring assignment: hop distance from the focused profile.
//
// Two entry points:
// - `assign_rings`: focus-relative breadth-first expansion over the resolved
//   connection graph. Used for every layout pass.
// - `assign_rings_from_root`: root-relative recursive ascent through
//   context-free inference. The canonical construction when the primary
//   profile is centred.
//
// Both are bounded by `max_rings` and terminate on cyclic connection data.

use std::collections::{HashMap, HashSet};

use crate::profile::{Profile, ProfileId};
use super::connections::Connections;
use super::inference::infer_connection;

/// One profile's ring membership.
#[derive(Debug, Clone, PartialEq)]
pub struct RingAssignment {
    pub id: ProfileId,
    pub ring: u32,
    /// Resolved parent, used to draw the connecting edge.
    pub connected_to: Option<ProfileId>,
    /// Node on the previous ring this one was discovered from. Placement
    /// fans siblings out around the anchor's angle.
    pub anchor: Option<ProfileId>,
}

#[derive(Debug, Clone, Default)]
pub struct Rings {
    /// Ordered by ring, then discovery order.
    pub entries: Vec<RingAssignment>,
    /// Eligible profiles not reached within the ring cap.
    pub unplaced: Vec<ProfileId>,
}

impl Rings {
    pub fn ring_of(&self, id: &ProfileId) -> Option<u32> {
        self.entries.iter().find(|e| &e.id == id).map(|e| e.ring)
    }
}

/// Breadth-first ring expansion from `focus`.
///
/// Ring 1 is the focus's own parent (so the tree can always be walked back
/// up) followed by its children. Each later ring expands every node of the
/// previous ring the same way: parent first, then children in input order.
pub fn assign_rings(
    profiles: &[&Profile],
    focus: &ProfileId,
    conns: &Connections,
    max_rings: u32,
) -> Rings {
    let mut placed: HashSet<ProfileId> = HashSet::new();
    let mut entries: Vec<RingAssignment> = Vec::new();

    placed.insert(focus.clone());
    entries.push(RingAssignment {
        id: focus.clone(),
        ring: 0,
        connected_to: conns.get_parent(focus).cloned(),
        anchor: None,
    });

    let mut frontier: Vec<ProfileId> = vec![focus.clone()];
    let mut ring = 0;

    while !frontier.is_empty() && ring < max_rings {
        ring += 1;
        let mut next: Vec<ProfileId> = Vec::new();

        for from in &frontier {
            let candidates = conns
                .get_parent(from)
                .into_iter()
                .chain(conns.get_children(from).iter());

            for cand in candidates {
                if !placed.insert(cand.clone()) {
                    continue;
                }
                entries.push(RingAssignment {
                    id: cand.clone(),
                    ring,
                    connected_to: conns.get_parent(cand).cloned(),
                    anchor: Some(from.clone()),
                });
                next.push(cand.clone());
            }
        }

        frontier = next;
    }

    let unplaced = collect_unplaced(profiles, &placed);
    if !unplaced.is_empty() {
        log::warn!(
            "{} profile(s) unreachable from '{}' within {} rings",
            unplaced.len(),
            focus,
            max_rings
        );
    }

    Rings { entries, unplaced }
}

fn collect_unplaced(profiles: &[&Profile], placed: &HashSet<ProfileId>) -> Vec<ProfileId> {
    profiles
        .iter()
        .filter(|p| !placed.contains(&p.id))
        .map(|p| p.id.clone())
        .collect()
}

/// Root-relative depth of `profile`, capped at `max_rings`.
///
/// Walks up through context-free inference. Revisiting an id returns 1,
/// which stops cyclic `connected_to_profile_id` chains.
pub fn calculate_depth(
    profile: &Profile,
    root: &ProfileId,
    profiles: &[&Profile],
    max_rings: u32,
) -> u32 {
    let by_id: HashMap<&ProfileId, &Profile> = profiles.iter().map(|p| (&p.id, *p)).collect();
    let mut visited: HashSet<ProfileId> = HashSet::new();
    ascend(profile, root, profiles, &by_id, &mut visited).min(max_rings)
}

fn ascend(
    profile: &Profile,
    root: &ProfileId,
    profiles: &[&Profile],
    by_id: &HashMap<&ProfileId, &Profile>,
    visited: &mut HashSet<ProfileId>,
) -> u32 {
    if &profile.id == root {
        return 0;
    }
    if !visited.insert(profile.id.clone()) {
        return 1;
    }
    let Some(parent_id) = infer_connection(profile, Some(root), profiles) else {
        return 1;
    };
    if &parent_id == root {
        return 1;
    }
    match by_id.get(&parent_id) {
        Some(parent) => 1 + ascend(parent, root, profiles, by_id, visited),
        None => 1,
    }
}

/// Canonical root-relative rings: every eligible profile gets its ascent
/// depth, and is drawn towards its inferred parent (or the root).
pub fn assign_rings_from_root(profiles: &[&Profile], root: &ProfileId, max_rings: u32) -> Rings {
    let known: HashSet<&ProfileId> = profiles.iter().map(|p| &p.id).collect();
    let mut entries: Vec<RingAssignment> = Vec::with_capacity(profiles.len());

    for p in profiles {
        if &p.id == root {
            entries.push(RingAssignment { id: p.id.clone(), ring: 0, connected_to: None, anchor: None });
            continue;
        }
        let ring = calculate_depth(p, root, profiles, max_rings).max(1);
        let connected_to = infer_connection(p, Some(root), profiles)
            .filter(|c| c != &p.id && known.contains(c))
            .unwrap_or_else(|| root.clone());
        entries.push(RingAssignment {
            id: p.id.clone(),
            ring,
            anchor: Some(connected_to.clone()),
            connected_to: Some(connected_to),
        });
    }

    // Stable: input order is kept within a ring.
    entries.sort_by_key(|e| e.ring);

    Rings { entries, unplaced: Vec::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family() -> Vec<Profile> {
        vec![
            Profile::primary("P"),
            Profile::new("M").with_relationship("Mother"),
            Profile::new("S").with_relationship("Son"),
            Profile::new("G").with_relationship("Grandson"),
        ]
    }

    fn run(profiles: &[Profile], focus: &str) -> Rings {
        let all: Vec<&Profile> = profiles.iter().collect();
        let root = all.iter().find(|p| p.is_primary()).map(|p| p.id.clone());
        let conns = Connections::resolve(&all, root.as_ref());
        assign_rings(&all, &ProfileId::from(focus), &conns, 5)
    }

    fn ring(rings: &Rings, id: &str) -> Option<u32> {
        rings.ring_of(&ProfileId::from(id))
    }

    #[test]
    fn test_rings_from_primary() {
        let rings = run(&family(), "P");
        assert_eq!(ring(&rings, "P"), Some(0));
        assert_eq!(ring(&rings, "M"), Some(1));
        assert_eq!(ring(&rings, "S"), Some(1));
        assert_eq!(ring(&rings, "G"), Some(2));
        assert!(rings.unplaced.is_empty());
    }

    #[test]
    fn test_refocus_on_mother_reaches_whole_family() {
        let rings = run(&family(), "M");
        assert_eq!(ring(&rings, "M"), Some(0));
        assert_eq!(ring(&rings, "P"), Some(1));
        assert_eq!(ring(&rings, "S"), Some(2));
        assert_eq!(ring(&rings, "G"), Some(3));
    }

    #[test]
    fn test_refocus_on_leaf_walks_up() {
        let rings = run(&family(), "G");
        assert_eq!(ring(&rings, "S"), Some(1));
        assert_eq!(ring(&rings, "P"), Some(2));
        assert_eq!(ring(&rings, "M"), Some(3));
        let p = rings.entries.iter().find(|e| e.id.as_str() == "P").unwrap();
        assert_eq!(p.anchor, Some(ProfileId::from("S")));
        assert_eq!(p.connected_to, None);
    }

    #[test]
    fn test_ring_one_lists_parent_first() {
        let profiles = vec![
            Profile::primary("P"),
            Profile::new("S").with_relationship("Son"),
            Profile::new("G1").with_relationship("Grandson"),
            Profile::new("G2").connected_to("S"),
        ];
        let rings = run(&profiles, "S");
        let ring1: Vec<&str> = rings
            .entries
            .iter()
            .filter(|e| e.ring == 1)
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ring1, vec!["P", "G1", "G2"]);
    }

    #[test]
    fn test_explicit_chain_depths() {
        let profiles = vec![
            Profile::primary("R"),
            Profile::new("C").connected_to("R"),
            Profile::new("B").connected_to("C"),
            Profile::new("A").connected_to("B"),
        ];
        let rings = run(&profiles, "R");
        assert_eq!(ring(&rings, "A"), Some(3));
        assert_eq!(ring(&rings, "B"), Some(2));
        assert_eq!(ring(&rings, "C"), Some(1));
        assert_eq!(ring(&rings, "R"), Some(0));
    }

    #[test]
    fn test_ring_cap_stops_expansion() {
        let mut profiles = vec![Profile::primary("n0")];
        for i in 1..=8 {
            profiles.push(Profile::new(format!("n{i}")).connected_to(format!("n{}", i - 1)));
        }
        let rings = run(&profiles, "n0");
        assert_eq!(ring(&rings, "n5"), Some(5));
        assert_eq!(ring(&rings, "n6"), None);
        assert_eq!(rings.unplaced.len(), 3);
    }

    #[test]
    fn test_isolated_cycle_terminates_and_is_reported() {
        let profiles = vec![
            Profile::primary("P"),
            Profile::new("A").connected_to("B"),
            Profile::new("B").connected_to("A"),
        ];
        let rings = run(&profiles, "P");
        assert_eq!(rings.entries.len(), 1);
        assert_eq!(rings.unplaced, vec![ProfileId::from("A"), ProfileId::from("B")]);
    }

    #[test]
    fn test_focus_inside_cycle() {
        let profiles = vec![
            Profile::new("A").connected_to("B"),
            Profile::new("B").connected_to("A"),
        ];
        let rings = run(&profiles, "A");
        assert_eq!(ring(&rings, "A"), Some(0));
        assert_eq!(ring(&rings, "B"), Some(1));
        assert_eq!(rings.entries.len(), 2);
    }

    #[test]
    fn test_no_duplicate_ids() {
        let profiles = vec![
            Profile::primary("P"),
            Profile::new("A").connected_to("B"),
            Profile::new("B").connected_to("P"),
            Profile::new("C").connected_to("A"),
        ];
        let rings = run(&profiles, "C");
        let mut ids: Vec<&str> = rings.entries.iter().map(|e| e.id.as_str()).collect();
        let n = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), n);
        assert_eq!(n, 4);
    }

    #[test]
    fn test_calculate_depth_cycle_guard() {
        let profiles = vec![
            Profile::primary("P"),
            Profile::new("A").connected_to("B"),
            Profile::new("B").connected_to("A"),
        ];
        let all: Vec<&Profile> = profiles.iter().collect();
        let root = ProfileId::from("P");
        // A -> B -> (A revisited => 1)
        assert_eq!(calculate_depth(&profiles[1], &root, &all, 5), 3);
        assert_eq!(calculate_depth(&profiles[1], &root, &all, 2), 2);
    }

    #[test]
    fn test_calculate_depth_unknown_parent() {
        let profiles = vec![Profile::primary("P"), Profile::new("A").connected_to("ghost")];
        let all: Vec<&Profile> = profiles.iter().collect();
        assert_eq!(calculate_depth(&profiles[1], &ProfileId::from("P"), &all, 5), 1);
    }

    #[test]
    fn test_rings_from_root_match_family_example() {
        let profiles = family();
        let all: Vec<&Profile> = profiles.iter().collect();
        let rings = assign_rings_from_root(&all, &ProfileId::from("P"), 5);
        assert_eq!(ring(&rings, "P"), Some(0));
        assert_eq!(ring(&rings, "M"), Some(1));
        assert_eq!(ring(&rings, "S"), Some(1));
        assert_eq!(ring(&rings, "G"), Some(2));
        let g = rings.entries.iter().find(|e| e.id.as_str() == "G").unwrap();
        assert_eq!(g.connected_to, Some(ProfileId::from("S")));
    }
}
