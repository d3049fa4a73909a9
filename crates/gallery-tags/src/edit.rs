//! Local relation editing: tag creation and parent/child edges.

use thiserror::Error;

use crate::directory::{DirectoryError, TagDirectory};
use crate::normalize::normalize_search;
use crate::resolve::resolve_merged;
use crate::search::SearchIndex;
use crate::store::TagStore;
use crate::tag::TagId;

/// Invalid-input errors from the relation editor.
///
/// Graph anomalies in snapshot data are absorbed by resolution; only inputs
/// that would corrupt an edit are surfaced, and a rejected operation never
/// partially applies.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("Empty tag id")]
    EmptyId,

    #[error("Empty tag name")]
    EmptyName,

    #[error("Tag cannot be its own parent: {0}")]
    SelfEdge(TagId),

    #[error("Unknown tag id: {0}")]
    UnknownTag(TagId),

    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),
}

/// Outcome of a create-or-reuse request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTag {
    pub id: TagId,
    /// False when an existing tag with the same normalized name was reused.
    pub created: bool,
}

/// Initial relations for a newly created tag.
#[derive(Debug, Clone, Default)]
pub struct TagInit {
    pub parent_ids: Vec<TagId>,
    pub child_ids: Vec<TagId>,
}

/// Create a tag through the directory, or reuse an existing one by name.
///
/// Reuse is keyed on the normalized display name so the external store never
/// gains duplicate records. For a new tag, the directory's response is the
/// authoritative record: it is registered as returned, indexed, and wired to
/// the requested initial edges. A response without an id surfaces as a
/// directory error.
pub fn create_tag<D: TagDirectory>(
    store: &mut TagStore,
    index: &mut SearchIndex,
    directory: &mut D,
    name: &str,
    init: &TagInit,
) -> Result<CreatedTag, EditError> {
    if normalize_search(name).is_empty() {
        return Err(EditError::EmptyName);
    }
    if let Some(id) = store.find_by_name(name) {
        return Ok(CreatedTag {
            id: id.clone(),
            created: false,
        });
    }

    for related in init.parent_ids.iter().chain(init.child_ids.iter()) {
        if related.is_empty() {
            return Err(EditError::EmptyId);
        }
        let resolved = resolve_merged(store, related);
        if !store.contains(&resolved) {
            return Err(EditError::UnknownTag(resolved));
        }
    }

    let mut record = directory.create_tag(name, init)?;
    if record.id.is_empty() {
        return Err(EditError::Directory(DirectoryError::MissingId));
    }
    if record.name.is_empty() {
        record.name = name.to_string();
    }
    let id = record.id.clone();
    index.upsert(&record);
    store.upsert(record);

    for parent in &init.parent_ids {
        add_parent_child_edge(store, index, parent, &id)?;
    }
    for child in &init.child_ids {
        add_parent_child_edge(store, index, &id, child)?;
    }

    Ok(CreatedTag { id, created: true })
}

/// Record a parent/child relation, updating both halves of the edge.
///
/// Both ids are canonicalized first. Empty ids, edges from a tag to itself
/// after resolution, and ids with no record in the store are rejected
/// without mutating anything.
pub fn add_parent_child_edge(
    store: &mut TagStore,
    index: &mut SearchIndex,
    parent_id: &str,
    child_id: &str,
) -> Result<(), EditError> {
    if parent_id.is_empty() || child_id.is_empty() {
        return Err(EditError::EmptyId);
    }
    let parent = resolve_merged(store, parent_id);
    let child = resolve_merged(store, child_id);
    if parent == child {
        return Err(EditError::SelfEdge(parent));
    }
    if !store.contains(&parent) {
        return Err(EditError::UnknownTag(parent));
    }
    if !store.contains(&child) {
        return Err(EditError::UnknownTag(child));
    }

    if let Some(tag) = store.get_mut(&parent) {
        tag.children.insert(child.clone());
    }
    if let Some(tag) = store.get_mut(&child) {
        tag.parents.insert(parent.clone());
    }
    if let Some(tag) = store.get(&parent) {
        index.upsert(tag);
    }
    if let Some(tag) = store.get(&child) {
        index.upsert(tag);
    }
    Ok(())
}
