//! Tolerant parsing of the external tag index snapshot.
//!
//! The snapshot is produced by an external pipeline and can be stale or
//! loosely shaped. This module is the only place that sees the external
//! shape; everything downstream works on the strict [`Tag`] record.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use crate::tag::{Tag, TagStatus};

/// Snapshots older than this many hours trigger a staleness warning.
pub const STALE_AFTER_HOURS: i64 = 24;

/// A loaded tag index snapshot.
#[derive(Debug, Clone, Default)]
pub struct TagSnapshot {
    /// Raw `generated_at` string from the index, if present.
    pub generated_at: Option<String>,
    pub tags: Vec<Tag>,
}

impl TagSnapshot {
    /// Parse a snapshot from JSON text.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::from_value(&serde_json::from_str(input)?))
    }

    /// Build a snapshot from an already-parsed JSON value.
    ///
    /// Records without a usable id are dropped; every other field falls back
    /// to a default rather than failing the load.
    pub fn from_value(value: &Value) -> Self {
        let generated_at = value.get("generated_at").and_then(coerce_string);
        let raw_tags = value
            .get("tags")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut tags = Vec::with_capacity(raw_tags.len());
        let mut skipped = 0usize;
        for raw in raw_tags {
            match tag_from_value(raw) {
                Some(tag) => tags.push(tag),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            tracing::warn!(skipped, "dropped tag index records without an id");
        }

        Self { generated_at, tags }
    }

    /// The snapshot timestamp, when present and parseable.
    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.generated_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    /// Warn when the snapshot is older than [`STALE_AFTER_HOURS`].
    ///
    /// A missing or unparseable timestamp yields no warning; the index is
    /// still usable either way.
    pub fn staleness_warning(&self, now: DateTime<Utc>) -> Option<StalenessWarning> {
        StalenessWarning::check(self.generated_at()?, now)
    }
}

/// A stale tag index was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StalenessWarning {
    pub generated_at: DateTime<Utc>,
    pub age: Duration,
}

impl StalenessWarning {
    /// Check a snapshot timestamp against the staleness threshold.
    pub fn check(generated_at: DateTime<Utc>, now: DateTime<Utc>) -> Option<Self> {
        let age = now.signed_duration_since(generated_at);
        if age > Duration::hours(STALE_AFTER_HOURS) {
            Some(Self { generated_at, age })
        } else {
            None
        }
    }
}

/// Map one external record into the strict tag shape.
///
/// Returns `None` when the record carries no usable id.
pub fn tag_from_value(value: &Value) -> Option<Tag> {
    let id = value
        .get("id")
        .and_then(coerce_string)
        .filter(|s| !s.is_empty())?;

    let status = value
        .get("status")
        .and_then(coerce_string)
        .map(|s| TagStatus::parse(&s))
        .unwrap_or_default();

    let merge_to = value
        .get("merge_to")
        .and_then(coerce_string)
        .filter(|s| !s.is_empty());

    Some(Tag {
        id,
        name: value.get("name").and_then(coerce_string).unwrap_or_default(),
        aliases: value.get("aliases").map(coerce_string_list).unwrap_or_default(),
        status,
        merge_to,
        parents: value
            .get("parents")
            .map(coerce_string_list)
            .unwrap_or_default()
            .into_iter()
            .collect(),
        children: value
            .get("children")
            .map(coerce_string_list)
            .unwrap_or_default()
            .into_iter()
            .collect(),
        usage_count: value.get("usage_count").map(coerce_count).unwrap_or(0),
    })
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coerce_string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(coerce_string).collect())
        .unwrap_or_default()
}

fn coerce_count(value: &Value) -> u32 {
    match value.as_f64() {
        Some(n) if n.is_finite() && n > 0.0 => n.floor() as u32,
        _ => 0,
    }
}
