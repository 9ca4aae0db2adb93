//! Profile records consumed by the layout engine.
//!
//! These mirror the records the app's data layer hands over. The layout only
//! reads them; it never mutates or persists anything.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Stable profile identifier, held in its canonical string form.
///
/// Equality, hashing and ordering all go through the string, which is what
/// sibling ordering and jitter hashing depend on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub String);

impl ProfileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProfileId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Profile type. Only the account owner's own profile is `Primary`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileType {
    Primary,
    #[default]
    Other,
}

// The app has more profile types than the layout cares about; anything that
// isn't "primary" collapses to `Other` instead of failing the whole list.
impl<'de> Deserialize<'de> for ProfileType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().eq_ignore_ascii_case("primary") {
            Ok(ProfileType::Primary)
        } else {
            Ok(ProfileType::Other)
        }
    }
}

fn default_included() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    /// Free-text kinship label, always relative to the primary profile.
    #[serde(default)]
    pub relationship: Option<String>,
    /// Explicit parent reference; overrides relationship inference.
    #[serde(default)]
    pub connected_to_profile_id: Option<ProfileId>,
    #[serde(default = "default_included")]
    pub include_in_family_tree: bool,
    #[serde(rename = "type", default)]
    pub profile_type: ProfileType,
}

impl Profile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: ProfileId::new(id),
            relationship: None,
            connected_to_profile_id: None,
            include_in_family_tree: true,
            profile_type: ProfileType::Other,
        }
    }

    pub fn primary(id: impl Into<String>) -> Self {
        Self { profile_type: ProfileType::Primary, ..Self::new(id) }
    }

    pub fn with_relationship(mut self, relationship: impl Into<String>) -> Self {
        self.relationship = Some(relationship.into());
        self
    }

    pub fn connected_to(mut self, id: impl Into<String>) -> Self {
        self.connected_to_profile_id = Some(ProfileId::new(id));
        self
    }

    pub fn excluded(mut self) -> Self {
        self.include_in_family_tree = false;
        self
    }

    pub fn is_primary(&self) -> bool {
        self.profile_type == ProfileType::Primary
    }
}

/// Profiles that take part in layout: included in the tree, first
/// occurrence of each id only.
pub fn eligible_profiles(profiles: &[Profile]) -> Vec<&Profile> {
    let mut seen: HashSet<&ProfileId> = HashSet::new();
    let mut out = Vec::with_capacity(profiles.len());
    for p in profiles {
        if !p.include_in_family_tree {
            continue;
        }
        if !seen.insert(&p.id) {
            log::warn!("duplicate profile id '{}' ignored", p.id);
            continue;
        }
        out.push(p);
    }
    out
}

/// The primary profile among eligible ones, if any.
pub fn find_root<'a>(eligible: &[&'a Profile]) -> Option<&'a Profile> {
    eligible.iter().copied().find(|p| p.is_primary())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_app_record() {
        let json = r#"{
            "id": "b7c1",
            "relationship": "Son",
            "connectedToProfileId": "a001",
            "includeInFamilyTree": false,
            "type": "dependent"
        }"#;
        let p: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, ProfileId::from("b7c1"));
        assert_eq!(p.relationship.as_deref(), Some("Son"));
        assert_eq!(p.connected_to_profile_id, Some(ProfileId::from("a001")));
        assert!(!p.include_in_family_tree);
        assert_eq!(p.profile_type, ProfileType::Other);
    }

    #[test]
    fn test_deserialize_defaults() {
        let p: Profile = serde_json::from_str(r#"{"id": "x", "type": "Primary"}"#).unwrap();
        assert!(p.include_in_family_tree);
        assert!(p.is_primary());
        assert!(p.relationship.is_none());
    }

    #[test]
    fn test_eligible_skips_excluded_and_duplicates() {
        let profiles = vec![
            Profile::primary("p"),
            Profile::new("a").excluded(),
            Profile::new("b").with_relationship("Son"),
            Profile::new("b").with_relationship("Daughter"),
        ];
        let eligible = eligible_profiles(&profiles);
        let ids: Vec<&str> = eligible.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p", "b"]);
        assert_eq!(eligible[1].relationship.as_deref(), Some("Son"));
    }

    #[test]
    fn test_find_root_ignores_excluded_primary() {
        let profiles = vec![Profile::primary("p").excluded(), Profile::new("a")];
        let eligible = eligible_profiles(&profiles);
        assert!(find_root(&eligible).is_none());
    }
}
