//! Recall reconstruction cache ("Recall caching"): memoizes the
//! string a history entry reconstructs to under a given presentation
//! profile, since recall can re-run structure analysis and re-indentation
//! repeatedly as the user cycles through history.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReconstructionProfile {
    /// Verbatim `recall_source()`, no re-indentation.
    Raw,
    /// Structure-aware re-indented form.
    Reindented,
}

struct Cached {
    value: String,
    inserted_at: Instant,
}

pub struct RecallCache {
    entries: LruCache<(u64, ReconstructionProfile), Cached>,
    ttl: Duration,
}

impl RecallCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity clamped to >= 1");
        Self { entries: LruCache::new(capacity), ttl }
    }

    /// Returns the cached reconstruction for `key`, evicting and treating as
    /// a miss if it has outlived the configured TTL.
    pub fn get(&mut self, key: (u64, ReconstructionProfile)) -> Option<String> {
        let expired = match self.entries.peek(&key) {
            Some(cached) => cached.inserted_at.elapsed() > self.ttl,
            None => return None,
        };
        if expired {
            self.entries.pop(&key);
            trace!(target: "history.cache", id = key.0, "expired");
            return None;
        }
        let value = self.entries.get(&key).map(|c| c.value.clone());
        if value.is_some() {
            trace!(target: "history.cache", id = key.0, "hit");
        }
        value
    }

    pub fn insert(&mut self, key: (u64, ReconstructionProfile), value: String) {
        self.entries.put(key, Cached { value, inserted_at: Instant::now() });
    }

    pub fn invalidate(&mut self, id: u64) {
        for profile in [ReconstructionProfile::Raw, ReconstructionProfile::Reindented] {
            self.entries.pop(&(id, profile));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
