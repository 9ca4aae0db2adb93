// Resolved connection graph for one layout pass.
//
// Runs focus-relative inference once per profile and indexes the result both
// ways, so ring expansion can walk up (parent) and down (children) without
// re-running inference for every candidate.

use std::collections::{HashMap, HashSet};

use crate::profile::{Profile, ProfileId};
use super::inference::resolve_for_focus;

#[derive(Debug, Clone, Default)]
pub struct Connections {
    /// Resolved parent for each profile that has one.
    pub parent: HashMap<ProfileId, ProfileId>,
    /// Children per parent, in input order.
    pub children: HashMap<ProfileId, Vec<ProfileId>>,
}

impl Connections {
    /// Resolve every eligible profile's parent.
    pub fn resolve(profiles: &[&Profile], root: Option<&ProfileId>) -> Self {
        let known: HashSet<&ProfileId> = profiles.iter().map(|p| &p.id).collect();

        let mut parent: HashMap<ProfileId, ProfileId> = HashMap::new();
        let mut children: HashMap<ProfileId, Vec<ProfileId>> = HashMap::new();

        for p in profiles {
            let Some(target) = resolve_for_focus(p, root, profiles) else {
                continue;
            };
            if target == p.id || !known.contains(&target) {
                continue;
            }
            children.entry(target.clone()).or_default().push(p.id.clone());
            parent.insert(p.id.clone(), target);
        }

        Self { parent, children }
    }

    pub fn get_parent(&self, id: &ProfileId) -> Option<&ProfileId> {
        self.parent.get(id)
    }

    /// Children of a profile, or empty slice if none.
    pub fn get_children(&self, id: &ProfileId) -> &[ProfileId] {
        self.children.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }
}
