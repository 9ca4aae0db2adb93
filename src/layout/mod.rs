// family_tree layout
//
// Radial family-tree layouter. Given a flat profile list and a focal
// profile, builds the concentric-ring layout the app renders.
//
// Goals:
// - Deterministic: same profiles + focus => same layout, no stored state
// - Pure: no I/O, nothing mutated outside the pass
// - Total: empty lists, missing primary and cyclic data all produce a layout
// - Full rebuild on every re-focus: nothing carries over between passes
//
// Submodules:
// - inference: relationship label -> parent connection
// - connections: resolved parent/children index for one pass
// - rings: hop distance from the focus (bounded, cycle-safe)
// - jitter: stable per-id nudges
// - radial_placement: rings -> angles and radius offsets
//
// Output:
// - LayoutResult with one FamilyTreeNode per placed profile. Screen
//   geometry (centre, ring radii) comes from LayoutConfig.

use serde::{Deserialize, Serialize};

use crate::profile::{eligible_profiles, find_root, Profile, ProfileId};

pub mod connections;
pub mod inference;
pub mod jitter;
pub mod radial_placement;
pub mod rings;

use connections::Connections;
use radial_placement::{place_rings, place_without_focus};
use rings::{assign_rings, assign_rings_from_root};

#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl RectF {
    pub fn right(&self) -> f64 { self.x + self.w }
    pub fn bottom(&self) -> f64 { self.y + self.h }

    /// Grow to include `p`.
    pub fn include(&self, p: PointF) -> RectF {
        let x0 = self.x.min(p.x);
        let y0 = self.y.min(p.y);
        let x1 = self.right().max(p.x);
        let y1 = self.bottom().max(p.y);
        RectF { x: x0, y: y0, w: x1 - x0, h: y1 - y0 }
    }
}

/// Caller-owned geometry and placement constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Screen point of ring 0.
    pub center: PointF,
    /// Base radius of ring 1.
    pub first_ring_radius: f64,
    /// Extra radius per ring beyond the first.
    pub ring_spacing: f64,
    /// Angle between siblings on outer rings (radians).
    pub sibling_spread: f64,
    /// Max radius jitter on outer rings (±).
    pub radius_jitter: f64,
    /// Max angle jitter on outer rings (±, radians).
    pub angle_jitter: f64,
    /// Ring expansion stops after this many rings.
    pub max_rings: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            center: PointF { x: 0.0, y: 0.0 },
            first_ring_radius: 120.0,
            ring_spacing: 110.0,
            sibling_spread: 0.35,
            radius_jitter: 30.0,
            angle_jitter: 0.2,
            max_rings: 5,
        }
    }
}

/// One placed profile. Shares its id with the source profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyTreeNode {
    pub id: ProfileId,
    /// 0 = focus, 1 = directly connected, 2+ = via chains.
    pub ring: u32,
    /// Radians around the centre.
    pub angle: f64,
    /// Resolved parent, for drawing the edge only.
    pub connected_to_profile_id: Option<ProfileId>,
    /// Deterministic jitter added to the ring's base radius.
    pub radius_offset: f64,
}

impl FamilyTreeNode {
    pub fn radius(&self, cfg: &LayoutConfig) -> f64 {
        match self.ring {
            0 => 0.0,
            r => cfg.first_ring_radius + cfg.ring_spacing * (r - 1) as f64 + self.radius_offset,
        }
    }

    pub fn position(&self, cfg: &LayoutConfig) -> PointF {
        let r = self.radius(cfg);
        PointF {
            x: cfg.center.x + r * self.angle.cos(),
            y: cfg.center.y + r * self.angle.sin(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LayoutResult {
    /// Profile at ring 0, if any.
    pub focus: Option<ProfileId>,
    /// Primary profile, if included.
    pub root: Option<ProfileId>,
    /// Ordered by ring, then discovery order.
    pub nodes: Vec<FamilyTreeNode>,
    /// Eligible profiles that couldn't be reached within the ring cap.
    pub unplaced: Vec<ProfileId>,
}

impl LayoutResult {
    pub fn node(&self, id: &ProfileId) -> Option<&FamilyTreeNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// (child, parent) pairs where both ends are placed.
    pub fn edges(&self) -> Vec<(&ProfileId, &ProfileId)> {
        self.nodes
            .iter()
            .filter_map(|n| {
                let parent = n.connected_to_profile_id.as_ref()?;
                self.node(parent).map(|p| (&n.id, &p.id))
            })
            .collect()
    }

    /// Bounding box of all node positions.
    pub fn bounds(&self, cfg: &LayoutConfig) -> Option<RectF> {
        let mut points = self.nodes.iter().map(|n| n.position(cfg));
        let first = points.next()?;
        let start = RectF { x: first.x, y: first.y, w: 0.0, h: 0.0 };
        Some(points.fold(start, |bb, p| bb.include(p)))
    }
}

/// Lay out the tree centred on `focus` (or the primary profile when `None`).
///
/// An unknown or excluded focus falls back to the primary profile. With
/// neither a focus nor a primary profile, everyone goes on ring 1.
pub fn layout_family_tree(
    profiles: &[Profile],
    focus: Option<&ProfileId>,
    cfg: &LayoutConfig,
) -> LayoutResult {
    let eligible = eligible_profiles(profiles);
    let root = find_root(&eligible).map(|p| p.id.clone());

    let focus = match focus {
        Some(f) if eligible.iter().any(|p| &p.id == f) => Some(f.clone()),
        Some(f) => {
            log::warn!("focus '{}' is not in the tree, using primary profile", f);
            root.clone()
        }
        None => root.clone(),
    };

    let Some(focus) = focus else {
        return layout_without_focus(&eligible);
    };

    let conns = Connections::resolve(&eligible, root.as_ref());
    let rings = assign_rings(&eligible, &focus, &conns, cfg.max_rings);
    let nodes = place_rings(&rings, cfg);

    log::debug!(
        "family tree around '{}': {} node(s), {} unplaced",
        focus,
        nodes.len(),
        rings.unplaced.len()
    );

    LayoutResult { focus: Some(focus), root, nodes, unplaced: rings.unplaced }
}

/// Canonical layout centred on the primary profile, with rings from
/// root-relative depth rather than focus-relative expansion.
pub fn layout_from_root(profiles: &[Profile], cfg: &LayoutConfig) -> LayoutResult {
    let eligible = eligible_profiles(profiles);
    let Some(root) = find_root(&eligible).map(|p| p.id.clone()) else {
        return layout_without_focus(&eligible);
    };

    let rings = assign_rings_from_root(&eligible, &root, cfg.max_rings);
    let nodes = place_rings(&rings, cfg);

    LayoutResult { focus: Some(root.clone()), root: Some(root), nodes, unplaced: Vec::new() }
}

fn layout_without_focus(eligible: &[&Profile]) -> LayoutResult {
    let ids: Vec<ProfileId> = eligible.iter().map(|p| p.id.clone()).collect();
    LayoutResult {
        focus: None,
        root: None,
        nodes: place_without_focus(&ids),
        unplaced: Vec::new(),
    }
}
