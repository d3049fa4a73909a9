//! Merge-alias resolution.

use std::collections::HashSet;

use crate::store::TagStore;
use crate::tag::TagId;

/// Follow `merge_to` pointers to the canonical tag id.
///
/// The walk stops at the first id that is unknown to the store, not merged,
/// missing a target, or already visited, and returns the last id reached.
/// Snapshot data can be stale or inconsistent, so broken chains degrade
/// instead of failing.
pub fn resolve_merged(store: &TagStore, id: &str) -> TagId {
    let mut current = id.to_string();
    let mut visited: HashSet<TagId> = HashSet::new();

    while !current.is_empty() && !visited.contains(&current) {
        visited.insert(current.clone());
        let Some(tag) = store.get(&current) else {
            return current;
        };
        if !tag.is_merged() {
            return current;
        }
        match &tag.merge_to {
            Some(next) if !next.is_empty() => current = next.clone(),
            _ => return current,
        }
    }
    current
}
