//! Transitive parent derivation for explicit tag selections.

use std::collections::BTreeSet;

use crate::resolve::resolve_merged;
use crate::store::TagStore;
use crate::tag::TagId;

/// Compute the ancestor ids implied by a set of explicitly chosen tags.
///
/// Each explicit id is canonicalized first, and every parent id met during
/// the walk is canonicalized before use. One visited set spans the whole
/// call, so cyclic parent data terminates and shared ancestors are walked
/// once. The result never contains a canonicalized explicit id, even when
/// the graph loops back onto one.
pub fn derive_parent_ids(store: &TagStore, explicit: &[TagId]) -> BTreeSet<TagId> {
    let mut derived = BTreeSet::new();
    let mut visited = BTreeSet::new();

    for id in explicit {
        let resolved = resolve_merged(store, id);
        if resolved.is_empty() {
            continue;
        }
        visited.insert(resolved.clone());
        walk(store, &resolved, &mut derived, &mut visited);
    }

    for id in explicit {
        derived.remove(&resolve_merged(store, id));
    }
    derived
}

fn walk(store: &TagStore, id: &str, derived: &mut BTreeSet<TagId>, visited: &mut BTreeSet<TagId>) {
    let Some(tag) = store.get(id) else {
        return;
    };
    for parent in &tag.parents {
        let pid = resolve_merged(store, parent);
        if pid.is_empty() || visited.contains(&pid) {
            continue;
        }
        visited.insert(pid.clone());
        derived.insert(pid.clone());
        walk(store, &pid, derived, visited);
    }
}

/// Assemble the ids persisted when a work record is saved.
///
/// Canonical explicit ids come first in input order (first occurrence wins),
/// followed by the derived ancestors. The result carries no duplicates.
pub fn final_tag_ids(store: &TagStore, explicit: &[TagId]) -> Vec<TagId> {
    let derived = derive_parent_ids(store, explicit);
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();

    for id in explicit {
        let resolved = resolve_merged(store, id);
        if resolved.is_empty() || !seen.insert(resolved.clone()) {
            continue;
        }
        out.push(resolved);
    }
    for id in derived {
        if seen.insert(id.clone()) {
            out.push(id);
        }
    }
    out
}
