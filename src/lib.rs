//! Radial family-tree layout for the family organizer app.
//!
//! Takes a flat list of profiles (with optional relationship labels and
//! explicit connections), infers who hangs off whom, and places everyone on
//! concentric rings around a focused profile. Re-focusing recomputes the
//! whole layout.

mod error;
pub mod layout;
pub mod output;
pub mod profile;
pub mod relationship;
mod wasm;

pub use error::InputError;
pub use layout::{
    layout_family_tree, layout_from_root, FamilyTreeNode, LayoutConfig, LayoutResult, PointF,
    RectF,
};
pub use profile::{Profile, ProfileId, ProfileType};
pub use wasm::*;
