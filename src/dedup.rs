//! Order-preserving deduplication
//!
//! Candidates are kept in the order they are first seen. Membership is
//! checked against a hash set, so the scan stays linear however many
//! duplicates the input contains.

use ahash::RandomState;
use hashbrown::HashSet;

/// Statistics for deduplication operations
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DedupStats {
    /// Total items offered
    pub total_processed: u64,
    /// Items kept
    pub unique_count: u64,
    /// Items dropped as repeats
    pub duplicate_count: u64,
}

impl DedupStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_unique(&mut self) {
        self.total_processed += 1;
        self.unique_count += 1;
    }

    pub fn record_duplicate(&mut self) {
        self.total_processed += 1;
        self.duplicate_count += 1;
    }
}

/// Duplicate-free sequence of strings in first-seen order
///
/// Equality is exact and case-sensitive: `a@x.com` and `A@x.com` are
/// different entries.
#[derive(Debug, Clone)]
pub struct UniqueCollection {
    items: Vec<String>,
    seen: HashSet<String, RandomState>,
    stats: DedupStats,
}

impl UniqueCollection {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::with_hasher(RandomState::new()),
            stats: DedupStats::new(),
        }
    }

    /// Add an item unless an identical one is already present
    ///
    /// Returns true if the item was kept.
    pub fn insert(&mut self, item: &str) -> bool {
        if self.seen.contains(item) {
            self.stats.record_duplicate();
            return false;
        }

        self.seen.insert(item.to_string());
        self.items.push(item.to_string());
        self.stats.record_unique();
        true
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn stats(&self) -> DedupStats {
        self.stats
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

impl Default for UniqueCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> FromIterator<&'a str> for UniqueCollection {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut collection = Self::new();
        for item in iter {
            collection.insert(item);
        }
        collection
    }
}
