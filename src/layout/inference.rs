// Connection inference.
//
// Relationship labels carry no graph structure of their own: "Grandson" only
// says how someone relates to the primary profile. This module rebuilds a
// parent link for each profile from those labels, with explicit
// `connected_to_profile_id` data always taking priority.
//
// Rules (first match wins):
// 1. explicit connection
// 2. direct relationship          -> root
// 3. grandson/granddaughter       -> first son/daughter, else root
// 4. nephew/niece                 -> first brother/sister, else root
// 5. cousin                       -> first aunt/uncle, else root
// 6. nothing                      -> None (focus-relative: root)

use crate::profile::{Profile, ProfileId};
use crate::relationship::{self, RelationshipCategory};

/// Context-free inference. Explicit connections are returned verbatim, even
/// if they name a profile that isn't in `profiles`.
pub fn infer_connection(
    profile: &Profile,
    root: Option<&ProfileId>,
    profiles: &[&Profile],
) -> Option<ProfileId> {
    if root == Some(&profile.id) {
        return None;
    }
    if let Some(explicit) = &profile.connected_to_profile_id {
        return Some(explicit.clone());
    }
    connection_from_relationship(profile, root, profiles)
}

/// Inference used while centred on an arbitrary profile.
///
/// Unlike [`infer_connection`] this never leaves a non-root profile
/// dangling: unusable explicit links are skipped and anything unresolved
/// attaches to the root.
pub fn resolve_for_focus(
    profile: &Profile,
    root: Option<&ProfileId>,
    profiles: &[&Profile],
) -> Option<ProfileId> {
    if root == Some(&profile.id) {
        return None;
    }
    if let Some(explicit) = &profile.connected_to_profile_id {
        if explicit != &profile.id && profiles.iter().any(|p| &p.id == explicit) {
            return Some(explicit.clone());
        }
        log::debug!(
            "profile '{}' has unusable connection '{}', inferring instead",
            profile.id,
            explicit
        );
    }
    connection_from_relationship(profile, root, profiles).or_else(|| root.cloned())
}

/// Rules 2-5: resolve purely from the relationship label.
fn connection_from_relationship(
    profile: &Profile,
    root: Option<&ProfileId>,
    profiles: &[&Profile],
) -> Option<ProfileId> {
    let label = profile.relationship.as_deref()?;

    let anchor = match relationship::category(label)? {
        RelationshipCategory::Direct => return root.cloned(),
        RelationshipCategory::Grandchild => {
            first_matching(profiles, profile, root, relationship::is_child_term)
        }
        RelationshipCategory::Nibling => {
            first_matching(profiles, profile, root, relationship::is_sibling_term)
        }
        RelationshipCategory::Cousin => {
            first_matching(profiles, profile, root, relationship::is_aunt_or_uncle)
        }
    };

    anchor.map(|p| p.id.clone()).or_else(|| root.cloned())
}

/// First profile in list order (other than the root and `subject` itself)
/// whose label satisfies `pred`.
fn first_matching<'a>(
    profiles: &[&'a Profile],
    subject: &Profile,
    root: Option<&ProfileId>,
    pred: fn(&str) -> bool,
) -> Option<&'a Profile> {
    profiles.iter().copied().find(|p| {
        p.id != subject.id
            && root != Some(&p.id)
            && p.relationship.as_deref().is_some_and(pred)
    })
}
