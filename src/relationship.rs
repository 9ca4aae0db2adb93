use serde::Serialize;

// ============================================================================
// Relationship tables - labels are always relative to the primary profile
// ============================================================================

/// Labels that connect straight to the primary profile.
pub const DIRECT_RELATIONSHIPS: &[&str] = &[
    // parents
    "mother", "father", "parent", "stepmother", "stepfather",
    // children
    "son", "daughter", "child", "stepson", "stepdaughter",
    // siblings
    "brother", "sister", "sibling",
    // spouse / partner / ex
    "husband", "wife", "spouse", "partner", "ex", "ex-partner", "ex-husband", "ex-wife",
    // grandparents
    "grandmother", "grandfather", "grandparent",
    // aunts / uncles
    "aunt", "uncle",
    // non-kin associates
    "friend", "neighbour", "neighbor", "carer", "caregiver", "doctor", "nurse",
    "therapist", "social worker", "colleague", "teacher",
];

pub const CHILD_TERMS: &[&str] = &["son", "daughter"];

pub const SIBLING_TERMS: &[&str] = &["brother", "sister"];

pub const GRANDCHILD_TERMS: &[&str] = &["grandson", "granddaughter"];

pub const NIBLING_TERMS: &[&str] = &["nephew", "niece"];

pub const AUNT_UNCLE_TERMS: &[&str] = &["aunt", "uncle"];

pub const COUSIN_TERM: &str = "cousin";

/// How a relationship label is resolved into a parent connection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipCategory {
    /// Connects to the primary profile.
    Direct,
    /// Connects under the first son/daughter.
    Grandchild,
    /// Connects under the first brother/sister.
    Nibling,
    /// Connects under the first aunt/uncle.
    Cousin,
}

impl RelationshipCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipCategory::Direct => "direct",
            RelationshipCategory::Grandchild => "grandchild",
            RelationshipCategory::Nibling => "nibling",
            RelationshipCategory::Cousin => "cousin",
        }
    }
}

/// Labels are user-entered; compare trimmed and case-folded.
pub fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

fn in_table(table: &[&str], label: &str) -> bool {
    let norm = normalize(label);
    table.iter().any(|&t| t == norm)
}

/// Classify a label, or `None` if it matches nothing we can place.
pub fn category(label: &str) -> Option<RelationshipCategory> {
    if in_table(DIRECT_RELATIONSHIPS, label) {
        Some(RelationshipCategory::Direct)
    } else if in_table(GRANDCHILD_TERMS, label) {
        Some(RelationshipCategory::Grandchild)
    } else if in_table(NIBLING_TERMS, label) {
        Some(RelationshipCategory::Nibling)
    } else if normalize(label) == COUSIN_TERM {
        Some(RelationshipCategory::Cousin)
    } else {
        None
    }
}

pub fn is_child_term(label: &str) -> bool {
    in_table(CHILD_TERMS, label)
}

pub fn is_sibling_term(label: &str) -> bool {
    in_table(SIBLING_TERMS, label)
}

pub fn is_aunt_or_uncle(label: &str) -> bool {
    in_table(AUNT_UNCLE_TERMS, label)
}
