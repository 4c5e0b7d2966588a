//! Per-document index accumulation
//!
//!     Builders are owned by one session and only ever grow. Merging is commutative and
//!     associative (bitwise OR for contexts, addition for counts), so the finished
//!     indices do not depend on the order tokens were visited in.

use super::context::ContextCategory;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Version of an indexing algorithm
///
/// Persisted indices are keyed by version; a new version means stale entries must be
/// recomputed instead of reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AlgorithmVersion(pub u32);

impl fmt::Display for AlgorithmVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Bump whenever classification tables, attribute parsing or word boundaries change
pub const OCCURRENCE_INDEX_VERSION: AlgorithmVersion = AlgorithmVersion(3);

/// Bump whenever comment detection or marker counting changes
pub const TODO_INDEX_VERSION: AlgorithmVersion = AlgorithmVersion(2);

/// Finished word occurrence index of one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccurrenceIndex {
    version: AlgorithmVersion,
    entries: BTreeMap<String, ContextCategory>,
}

impl OccurrenceIndex {
    pub fn version(&self) -> AlgorithmVersion {
        self.version
    }

    pub fn get(&self, word: &str) -> Option<ContextCategory> {
        self.entries.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Words in lexicographic order with their contexts
    pub fn iter(&self) -> impl Iterator<Item = (&str, ContextCategory)> {
        self.entries.iter().map(|(word, context)| (word.as_str(), *context))
    }

    /// Raw `word -> bitmask` form handed to index stores
    pub fn to_bitmasks(&self) -> BTreeMap<String, u8> {
        self.entries
            .iter()
            .map(|(word, context)| (word.clone(), context.bits()))
            .collect()
    }
}

/// Finished TODO index of one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoIndex {
    version: AlgorithmVersion,
    counts: BTreeMap<String, u32>,
}

impl TodoIndex {
    pub fn version(&self) -> AlgorithmVersion {
        self.version
    }

    /// Occurrences of `pattern_id`, zero if it never matched
    pub fn count(&self, pattern_id: &str) -> u32 {
        self.counts.get(pattern_id).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(id, count)| (id.as_str(), *count))
    }

    pub fn total(&self) -> u64 {
        self.counts.values().map(|count| u64::from(*count)).sum()
    }
}

/// Accumulates `word -> contexts`
#[derive(Debug, Default)]
pub struct OccurrenceIndexBuilder {
    entries: BTreeMap<String, ContextCategory>,
}

impl OccurrenceIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// OR `context` into the contexts recorded for `word`
    ///
    /// Empty words and empty contexts are ignored, so every stored entry keeps a non-zero
    /// bitmask.
    pub fn add(&mut self, word: &str, context: ContextCategory) {
        if word.is_empty() || context.is_empty() {
            return;
        }
        match self.entries.get_mut(word) {
            Some(existing) => *existing |= context,
            None => {
                self.entries.insert(word.to_string(), context);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn build(self) -> OccurrenceIndex {
        OccurrenceIndex {
            version: OCCURRENCE_INDEX_VERSION,
            entries: self.entries,
        }
    }
}

/// Accumulates `pattern id -> count`
#[derive(Debug, Default)]
pub struct TodoIndexBuilder {
    counts: BTreeMap<String, u32>,
}

impl TodoIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `pattern_id`; zero counts are not stored
    pub fn add(&mut self, pattern_id: &str, count: u32) {
        if count == 0 {
            return;
        }
        match self.counts.get_mut(pattern_id) {
            Some(existing) => *existing = existing.saturating_add(count),
            None => {
                self.counts.insert(pattern_id.to_string(), count);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn build(self) -> TodoIndex {
        TodoIndex {
            version: TODO_INDEX_VERSION,
            counts: self.counts,
        }
    }
}
