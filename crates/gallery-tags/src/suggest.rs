//! Child-tag suggestions for the current selection.

use std::collections::{BTreeSet, HashSet};

use crate::resolve::resolve_merged;
use crate::store::TagStore;
use crate::tag::{Tag, TagId};

/// Children of the selected tags that are not yet part of the selection.
///
/// Candidates come from the child sets of the canonical explicit tags.
/// Anything already selected (explicitly or via derivation), hidden, or
/// missing from the store is skipped. First-seen order is kept so the
/// suggestions are stable across renders.
pub fn child_suggestions<'a>(
    store: &'a TagStore,
    explicit: &[TagId],
    derived: &BTreeSet<TagId>,
) -> Vec<&'a Tag> {
    let mut selected: HashSet<TagId> = HashSet::new();
    for id in explicit.iter().chain(derived.iter()) {
        selected.insert(resolve_merged(store, id));
    }

    let mut seen: HashSet<TagId> = HashSet::new();
    let mut out = Vec::new();
    for id in explicit {
        let Some(tag) = store.get(&resolve_merged(store, id)) else {
            continue;
        };
        for child in &tag.children {
            let cid = resolve_merged(store, child);
            if cid.is_empty() || selected.contains(&cid) || !seen.insert(cid.clone()) {
                continue;
            }
            let Some(child_tag) = store.get(&cid) else {
                continue;
            };
            if child_tag.is_hidden() {
                continue;
            }
            out.push(child_tag);
        }
    }
    out
}
