//! Ranked tag search over name and alias tokens.

use std::collections::HashMap;

use crate::normalize::normalize_search;
use crate::store::TagStore;
use crate::tag::{Tag, TagId};

/// Maximum number of search results returned.
pub const MAX_RESULTS: usize = 20;

#[derive(Debug, Clone)]
struct SearchEntry {
    id: TagId,
    tokens: Vec<String>,
}

/// Token index over the tag store, kept in registration order.
///
/// Each tag contributes its normalized name and aliases as tokens. A query
/// scores each tag by its best token match: exact 3, prefix 2, substring 1.
/// Results rank by score, then usage count, then name; full ties keep
/// registration order.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
    positions: HashMap<TagId, usize>,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or refresh the token row for a tag.
    pub fn upsert(&mut self, tag: &Tag) {
        let tokens = tokenize(tag);
        match self.positions.get(&tag.id) {
            Some(&pos) => self.entries[pos].tokens = tokens,
            None => {
                self.positions.insert(tag.id.clone(), self.entries.len());
                self.entries.push(SearchEntry {
                    id: tag.id.clone(),
                    tokens,
                });
            }
        }
    }

    /// Rank tags matching `query`, best first, at most [`MAX_RESULTS`].
    ///
    /// Hidden tags never match. An empty query matches nothing.
    pub fn search<'a>(&self, store: &'a TagStore, query: &str) -> Vec<&'a Tag> {
        let q = normalize_search(query);
        if q.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(&'a Tag, u8)> = Vec::new();
        for entry in &self.entries {
            let Some(tag) = store.get(&entry.id) else {
                continue;
            };
            if tag.is_hidden() {
                continue;
            }
            let mut best = 0u8;
            for token in &entry.tokens {
                if token == &q {
                    best = best.max(3);
                } else if token.starts_with(q.as_str()) {
                    best = best.max(2);
                } else if token.contains(q.as_str()) {
                    best = best.max(1);
                }
            }
            if best > 0 {
                scored.push((tag, best));
            }
        }

        scored.sort_by(|(a, sa), (b, sb)| {
            sb.cmp(sa)
                .then_with(|| b.usage_count.cmp(&a.usage_count))
                .then_with(|| a.name.cmp(&b.name))
        });
        scored.truncate(MAX_RESULTS);
        scored.into_iter().map(|(tag, _)| tag).collect()
    }
}

fn tokenize(tag: &Tag) -> Vec<String> {
    std::iter::once(tag.name.as_str())
        .chain(tag.aliases.iter().map(String::as_str))
        .map(normalize_search)
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::TagStatus;

    fn tag(id: &str, name: &str, usage: u32) -> Tag {
        let mut tag = Tag::new(id, name);
        tag.usage_count = usage;
        tag
    }

    fn build(tags: Vec<Tag>) -> (TagStore, SearchIndex) {
        let mut store = TagStore::new();
        let mut index = SearchIndex::new();
        for t in tags {
            index.upsert(&t);
            store.upsert(t);
        }
        (store, index)
    }

    #[test]
    fn exact_match_beats_usage_count() {
        let (store, index) = build(vec![tag("1", "猫", 5), tag("2", "猫耳", 50)]);
        let results = index.search(&store, "猫");
        let ids: Vec<&str> = results.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn usage_count_breaks_same_score() {
        let (store, index) = build(vec![tag("1", "猫又", 5), tag("2", "猫耳", 50)]);
        let ids: Vec<&str> = index.search(&store, "猫").iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn substring_ranks_below_prefix() {
        let (store, index) = build(vec![tag("1", "黒猫", 50), tag("2", "猫耳", 1)]);
        let ids: Vec<&str> = index.search(&store, "猫").iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn aliases_are_searchable() {
        let mut t = tag("1", "水彩", 0);
        t.aliases.push("watercolor".to_string());
        let (store, index) = build(vec![t]);
        assert_eq!(index.search(&store, "WATER").len(), 1);
    }

    #[test]
    fn hidden_tags_never_match() {
        let mut hidden = tag("1", "猫", 100);
        hidden.status = TagStatus::Hidden;
        let (store, index) = build(vec![hidden, tag("2", "猫耳", 1)]);
        let ids: Vec<&str> = index.search(&store, "猫").iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn query_is_normalized() {
        let (store, index) = build(vec![tag("1", "Cafe", 0)]);
        assert_eq!(index.search(&store, "ＣＡＦＥ").len(), 1);
    }

    #[test]
    fn empty_query_matches_nothing() {
        let (store, index) = build(vec![tag("1", "猫", 0)]);
        assert!(index.search(&store, "").is_empty());
        assert!(index.search(&store, "   ").is_empty());
    }

    #[test]
    fn truncates_to_limit() {
        let tags: Vec<Tag> = (0..30).map(|i| tag(&format!("t{i}"), &format!("猫{i}"), 0)).collect();
        let (store, index) = build(tags);
        assert_eq!(index.search(&store, "猫").len(), MAX_RESULTS);
    }

    #[test]
    fn upsert_refreshes_tokens() {
        let (mut store, mut index) = build(vec![tag("1", "旧名", 0)]);
        let renamed = tag("1", "新名", 0);
        index.upsert(&renamed);
        store.upsert(renamed);
        assert!(index.search(&store, "旧名").is_empty());
        assert_eq!(index.search(&store, "新名").len(), 1);
    }

    #[test]
    fn full_tie_keeps_registration_order() {
        let (store, index) = build(vec![tag("a", "猫", 1), tag("b", "猫", 1)]);
        let ids: Vec<&str> = index.search(&store, "猫").iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
