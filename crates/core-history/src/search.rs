//! Interactive reverse/forward-i-search state machine.

use core_fuzzy::{FuzzyCache, FuzzyPreset};
use tracing::trace;

use crate::entry::HistoryEntry;
use crate::store::HistoryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Backward,
    Forward,
}

/// State for one interactive search session, from entering search mode
/// (`reverse_search_history` / `forward_search_history`) to either
/// accepting a match (Enter) or aborting back to `original_buffer`
/// (Ctrl-G).
pub struct SearchSession {
    pub query: String,
    pub direction: SearchDirection,
    pub original_buffer: String,
    pub current_match_id: Option<u64>,
    /// Ids already shown for the current query; repeated Ctrl-R/Ctrl-S
    /// cycles past them to the next-best match instead of repeating one.
    skip_ids: Vec<u64>,
    cache: FuzzyCache,
}

impl SearchSession {
    pub fn begin(original_buffer: impl Into<String>, direction: SearchDirection) -> Self {
        Self {
            query: String::new(),
            direction,
            original_buffer: original_buffer.into(),
            current_match_id: None,
            skip_ids: Vec::new(),
            cache: FuzzyCache::new(),
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.skip_ids.clear();
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.skip_ids.clear();
    }

    /// Repeated Ctrl-R (in `Backward`) or Ctrl-S (in `Forward`) cycles to
    /// the next-best match for the same query rather than re-finding the
    /// one already shown.
    pub fn cycle_to_next_match(&mut self) {
        if let Some(id) = self.current_match_id {
            self.skip_ids.push(id);
        }
    }

    pub fn toggle_direction(&mut self) {
        self.direction = match self.direction {
            SearchDirection::Backward => SearchDirection::Forward,
            SearchDirection::Forward => SearchDirection::Backward,
        };
    }

    /// Scans `store` for the best match to the current query, combining
    /// exact-equality (score 100) and fuzzy scoring under the history
    /// preset, ranked by score with recency as tiebreaker (store iteration
    /// is already most-recent-first, so the first strictly-higher score
    /// wins ties in favor of the newer entry). Returns `None` if the query
    /// is empty or nothing clears `min_score`.
    pub fn search<'s>(&mut self, store: &'s HistoryStore, min_score: u32) -> Option<&'s HistoryEntry> {
        if self.query.is_empty() {
            self.current_match_id = None;
            return None;
        }

        let mut best: Option<(&HistoryEntry, u32)> = None;
        for entry in store.iter_most_recent_first() {
            if self.skip_ids.contains(&entry.id) {
                continue;
            }
            let score = if entry.normalized == self.query {
                100
            } else {
                self.cache.score(&self.query, &entry.normalized, FuzzyPreset::History)
            };
            if score < min_score {
                continue;
            }
            if best.as_ref().is_none_or(|(_, best_score)| score > *best_score) {
                best = Some((entry, score));
            }
        }

        self.current_match_id = best.as_ref().map(|(entry, _)| entry.id);
        trace!(target: "history.search", query = %self.query, matched = self.current_match_id.is_some(), "search step");
        best.map(|(entry, _)| entry)
    }
}
