//! Core tag types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A unique tag identifier.
///
/// Identifiers come from the external record store and are treated as
/// opaque strings.
pub type TagId = String;

/// Lifecycle status of a tag record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagStatus {
    #[default]
    Active,
    /// Folded into another tag; `merge_to` names the canonical record.
    Merged,
    /// Excluded from search and suggestions, but still resolvable for
    /// already-assigned ids.
    Hidden,
}

impl TagStatus {
    /// Parse an external status string. Anything unrecognized counts as active.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "merged" => Self::Merged,
            "hidden" => Self::Hidden,
            _ => Self::Active,
        }
    }
}

/// A node in the merge/hierarchy graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    /// Alternate names, searchable alongside `name`.
    pub aliases: Vec<String>,
    pub status: TagStatus,
    /// Canonical tag id when `status` is `Merged`.
    pub merge_to: Option<TagId>,
    /// Ids this tag is a child of (child-to-parent edges).
    pub parents: BTreeSet<TagId>,
    /// Inverse of `parents`; the relation editor keeps both sides updated.
    pub children: BTreeSet<TagId>,
    /// Ranking hint only.
    pub usage_count: u32,
}

impl Tag {
    /// Create an active tag with no relations.
    pub fn new(id: impl Into<TagId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            aliases: Vec::new(),
            status: TagStatus::Active,
            merge_to: None,
            parents: BTreeSet::new(),
            children: BTreeSet::new(),
            usage_count: 0,
        }
    }

    /// Whether this tag has been folded into another record.
    pub fn is_merged(&self) -> bool {
        self.status == TagStatus::Merged
    }

    /// Whether this tag is excluded from search and suggestions.
    pub fn is_hidden(&self) -> bool {
        self.status == TagStatus::Hidden
    }
}
