//! In-memory tag store for one admin session.

use std::collections::HashMap;

use crate::normalize::normalize_search;
use crate::tag::{Tag, TagId};

/// Session-scoped store of tag records.
///
/// Keyed by id, with a normalized-name index for create-or-reuse lookups.
/// Loaded once from a snapshot and mutated in place as the session edits
/// tags; there is no deletion path. The authoritative graph lives in the
/// external record store and is re-fetched on reload.
#[derive(Debug, Clone, Default)]
pub struct TagStore {
    tags: HashMap<TagId, Tag>,
    ids_by_name: HashMap<String, TagId>,
}

impl TagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a tag by id.
    pub fn get(&self, id: &str) -> Option<&Tag> {
        self.tags.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Tag> {
        self.tags.get_mut(id)
    }

    /// Whether a record exists for this id.
    pub fn contains(&self, id: &str) -> bool {
        self.tags.contains_key(id)
    }

    /// Look up a tag id by display name, compared under search normalization.
    ///
    /// When several records normalize to the same name, the first one
    /// registered wins.
    pub fn find_by_name(&self, name: &str) -> Option<&TagId> {
        self.ids_by_name.get(&normalize_search(name))
    }

    /// Insert or replace a record, keeping the name index consistent.
    pub fn upsert(&mut self, tag: Tag) {
        if let Some(previous) = self.tags.get(&tag.id) {
            let old_key = normalize_search(&previous.name);
            if self.ids_by_name.get(&old_key) == Some(&tag.id)
                && old_key != normalize_search(&tag.name)
            {
                self.ids_by_name.remove(&old_key);
            }
        }
        let key = normalize_search(&tag.name);
        if !key.is_empty() {
            self.ids_by_name.entry(key).or_insert_with(|| tag.id.clone());
        }
        self.tags.insert(tag.id.clone(), tag);
    }

    /// Iterate over all records, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
