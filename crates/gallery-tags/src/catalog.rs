//! Session facade over the tag store and search index.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::derive;
use crate::directory::TagDirectory;
use crate::edit::{self, CreatedTag, EditError, TagInit};
use crate::resolve::resolve_merged;
use crate::search::SearchIndex;
use crate::snapshot::{StalenessWarning, TagSnapshot};
use crate::store::TagStore;
use crate::suggest::child_suggestions;
use crate::tag::{Tag, TagId};

/// One admin session's view of the tag graph.
///
/// Owns the store and the search index and keeps them in sync across
/// mutations. Construct one per session from a loaded snapshot; tests build
/// isolated instances the same way.
#[derive(Debug, Clone, Default)]
pub struct TagCatalog {
    store: TagStore,
    index: SearchIndex,
    generated_at: Option<DateTime<Utc>>,
}

impl TagCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a loaded snapshot.
    ///
    /// Records are registered in snapshot order, which fixes the tie-break
    /// order for search results.
    pub fn from_snapshot(snapshot: TagSnapshot) -> Self {
        let mut catalog = Self {
            generated_at: snapshot.generated_at(),
            ..Self::default()
        };
        for tag in snapshot.tags {
            catalog.upsert(tag);
        }
        catalog
    }

    /// Apply an authoritative external record and re-index it.
    ///
    /// Used for snapshot rows and for collaborator responses (created tags,
    /// updated edge endpoints).
    pub fn upsert(&mut self, tag: Tag) {
        self.index.upsert(&tag);
        self.store.upsert(tag);
    }

    /// Get a tag by id.
    pub fn get(&self, id: &str) -> Option<&Tag> {
        self.store.get(id)
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &TagStore {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Warn when the loaded snapshot is older than the staleness threshold.
    pub fn staleness_warning(&self, now: DateTime<Utc>) -> Option<StalenessWarning> {
        StalenessWarning::check(self.generated_at?, now)
    }

    /// Canonical id for a possibly-merged tag id.
    pub fn resolve(&self, id: &str) -> TagId {
        resolve_merged(&self.store, id)
    }

    /// Ancestor ids implied by the explicit selection.
    pub fn derive_parents(&self, explicit: &[TagId]) -> BTreeSet<TagId> {
        derive::derive_parent_ids(&self.store, explicit)
    }

    /// Ids persisted when a work record is saved: canonical explicit ids
    /// plus derived ancestors, deduplicated.
    pub fn final_tag_ids(&self, explicit: &[TagId]) -> Vec<TagId> {
        derive::final_tag_ids(&self.store, explicit)
    }

    /// Ranked search over non-hidden tags.
    pub fn search(&self, query: &str) -> Vec<&Tag> {
        self.index.search(&self.store, query)
    }

    /// Child tags worth offering for the current selection.
    pub fn child_suggestions(&self, explicit: &[TagId]) -> Vec<&Tag> {
        let derived = self.derive_parents(explicit);
        child_suggestions(&self.store, explicit, &derived)
    }

    /// Create a tag through the directory, or reuse an existing one by name.
    pub fn create_tag<D: TagDirectory>(
        &mut self,
        directory: &mut D,
        name: &str,
        init: &TagInit,
    ) -> Result<CreatedTag, EditError> {
        edit::create_tag(&mut self.store, &mut self.index, directory, name, init)
    }

    /// Record a parent/child relation between two existing tags.
    pub fn add_parent_child_edge(
        &mut self,
        parent_id: &str,
        child_id: &str,
    ) -> Result<(), EditError> {
        edit::add_parent_child_edge(&mut self.store, &mut self.index, parent_id, child_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_catalog() -> TagCatalog {
        TagCatalog::from_snapshot(TagSnapshot::from_value(&json!({
            "generated_at": "2026-08-01T00:00:00Z",
            "tags": [
                { "id": "animal", "name": "動物", "children": ["cat"] },
                { "id": "cat", "name": "猫", "parents": ["animal"], "usage_count": 5 },
                { "id": "neko-old", "name": "ねこ", "status": "merged", "merge_to": "cat" },
            ]
        })))
    }

    #[test]
    fn from_snapshot_registers_all_records() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.get("cat").is_some());
    }

    #[test]
    fn resolve_and_derive_through_facade() {
        let catalog = sample_catalog();
        assert_eq!(catalog.resolve("neko-old"), "cat");
        let derived = catalog.derive_parents(&["neko-old".to_string()]);
        assert!(derived.contains("animal"));
    }

    #[test]
    fn upsert_makes_record_searchable() {
        let mut catalog = sample_catalog();
        catalog.upsert(Tag::new("dog", "犬"));
        assert_eq!(catalog.search("犬").len(), 1);
    }

    #[test]
    fn staleness_uses_snapshot_timestamp() {
        let catalog = sample_catalog();
        let now = "2026-08-05T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert!(catalog.staleness_warning(now).is_some());
        let soon = "2026-08-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert!(catalog.staleness_warning(soon).is_none());
    }

    #[test]
    fn empty_catalog_has_no_staleness_warning() {
        let catalog = TagCatalog::new();
        assert!(catalog.staleness_warning(Utc::now()).is_none());
    }
}
