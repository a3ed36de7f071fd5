//! LRU memoization for [`combined_score`], keyed on `(s1, s2, preset)`.
//!
//! Interactive callers (completion ranking, history search) re-score the same
//! candidate pairs on nearly every keystroke; caching avoids redoing the
//! Levenshtein DP and Jaro-Winkler pass for inputs that haven't changed.

use std::num::NonZeroUsize;

use lru::LruCache;
use tracing::trace;

use crate::score::{FuzzyPreset, FuzzyWeights, combined_score};
use crate::{default_cache_capacity, hash_pair, preset_id};

/// Memoizing wrapper around [`combined_score`]. Not thread-safe; callers that
/// need sharing across threads should wrap it in a mutex at the call site.
pub struct FuzzyCache {
    entries: LruCache<u64, u32>,
}

impl FuzzyCache {
    /// Creates a cache with the default capacity (512 entries).
    pub fn new() -> Self {
        Self::with_capacity(default_cache_capacity())
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Returns the combined score for `(s1, s2)` under `preset`, computing
    /// and caching it on a miss.
    pub fn score(&mut self, s1: &str, s2: &str, preset: FuzzyPreset) -> u32 {
        let key = hash_pair(s1, s2, preset_id(preset));
        if let Some(&cached) = self.entries.get(&key) {
            trace!(target: "fuzzy.cache", s1, s2, "cache hit");
            return cached;
        }
        let weights = FuzzyWeights::for_preset(preset);
        let score = combined_score(s1, s2, weights);
        self.entries.put(key, score);
        trace!(target: "fuzzy.cache", s1, s2, score, "cache miss, computed");
        score
    }

    /// Drops all memoized entries, e.g. when the candidate set changes shape
    /// enough that stale hits would be misleading.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FuzzyCache {
    fn default() -> Self {
        Self::new()
    }
}
