//! Bounded ring-buffer history store with O(1) duplicate detection.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, trace};

use crate::entry::HistoryEntry;
use crate::error::{HistoryError, HistoryResult};

pub struct HistoryStore {
    entries: VecDeque<HistoryEntry>,
    by_normalized: HashMap<String, u64>,
    next_id: u64,
    max_entries: usize,
    ignore_leading_space: bool,
}

impl HistoryStore {
    pub fn new(max_entries: usize, ignore_leading_space: bool) -> Self {
        Self {
            entries: VecDeque::new(),
            by_normalized: HashMap::new(),
            next_id: 0,
            max_entries: max_entries.max(1),
            ignore_leading_space,
        }
    }

    /// Appends `raw_command`, returning its assigned id, or `None` if the
    /// command was excluded (leading-space convention, or empty after
    /// trimming). A command matching an existing normalized entry is
    /// re-surfaced as most-recent rather than duplicated.
    pub fn append(
        &mut self,
        raw_command: &str,
        created_at: u64,
        cwd: impl Into<String>,
        original_multiline: Option<String>,
    ) -> Option<u64> {
        if self.ignore_leading_space && raw_command.starts_with(' ') {
            trace!(target: "history.store", "excluded leading-space command");
            return None;
        }
        let normalized = raw_command.trim_end().to_string();
        if normalized.is_empty() {
            return None;
        }

        if let Some(&existing_id) = self.by_normalized.get(&normalized) {
            if let Some(pos) = self.entries.iter().position(|e| e.id == existing_id) {
                let mut entry = self.entries.remove(pos).expect("position just found");
                entry.created_at = created_at;
                if original_multiline.is_some() {
                    entry.original_multiline = original_multiline;
                    entry.invalidate_structure_cache();
                }
                self.entries.push_back(entry);
                trace!(target: "history.store", id = existing_id, "resurfaced duplicate command");
                return Some(existing_id);
            }
        }

        let id = self.next_id;
        self.next_id += 1;
        let entry = HistoryEntry::new(id, created_at, cwd, normalized.clone(), original_multiline);
        self.by_normalized.insert(normalized, id);
        self.entries.push_back(entry);
        self.enforce_limit();
        debug!(target: "history.store", id, "appended history entry");
        Some(id)
    }

    fn enforce_limit(&mut self) {
        while self.entries.len() > self.max_entries {
            if let Some(evicted) = self.entries.pop_front() {
                self.by_normalized.remove(&evicted.normalized);
                trace!(target: "history.store", id = evicted.id, "evicted oldest entry");
            }
        }
    }

    pub fn set_exit_code(&mut self, id: u64, exit_code: i32) -> HistoryResult<()> {
        self.get_mut(id)?.exit_code = Some(exit_code);
        Ok(())
    }

    pub fn get(&self, id: u64) -> HistoryResult<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id).ok_or(HistoryError::IdNotFound(id))
    }

    pub fn get_mut(&mut self, id: u64) -> HistoryResult<&mut HistoryEntry> {
        self.entries.iter_mut().find(|e| e.id == id).ok_or(HistoryError::IdNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most-recent-first order, the direction `history_previous` walks.
    pub fn iter_most_recent_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }
}
