//! History–buffer integrator (component E of the line editor engine):
//! ring-buffered entries with multi-line originals, structural
//! re-indentation on recall, fuzzy/interactive search, and a recall
//! reconstruction cache.

pub mod cache;
pub mod entry;
pub mod error;
pub mod search;
pub mod store;
pub mod structure;

pub use cache::{ReconstructionProfile, RecallCache};
pub use entry::HistoryEntry;
pub use error::{HistoryError, HistoryResult};
pub use search::{SearchDirection, SearchSession};
pub use store::HistoryStore;
pub use structure::{ConstructKind, StructureRecord, analyze, reindent};

/// Where the cursor lands after a recall: buffer end for multiline
/// recall, buffer start for single-line recall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecallCursor {
    Start,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recall {
    pub text: String,
    pub cursor: RecallCursor,
}

/// Reconstructs the buffer content for recalling `entry` with structural
/// preservation: single-line entries recall
/// verbatim with the cursor at the start; multi-line entries run structure
/// analysis, re-indent, and cache the result, with the cursor placed at
/// the end. Falls back to the raw recall source if re-indentation
/// produced a line count that doesn't match the source — a sign analysis
/// misjudged the construct rather than something safe to trust.
pub fn reconstruct(entry: &mut HistoryEntry, cache: &mut RecallCache) -> Recall {
    if !entry.is_multiline() {
        return Recall { text: entry.recall_source().to_string(), cursor: RecallCursor::Start };
    }

    let key = (entry.id, ReconstructionProfile::Reindented);
    if let Some(text) = cache.get(key) {
        return Recall { text, cursor: RecallCursor::End };
    }

    let _ = entry.structure();
    let source = entry.recall_source();
    let reindented = structure::reindent(source);
    let text = if reindented.lines().count() == source.lines().count() {
        reindented
    } else {
        source.to_string()
    };

    cache.insert(key, text.clone());
    Recall { text, cursor: RecallCursor::End }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn single_line_recall_lands_cursor_at_start() {
        let mut entry = HistoryEntry::new(1, 0, "/home/u", "echo hi", None);
        let mut cache = RecallCache::new(16, Duration::from_secs(60));
        let recall = reconstruct(&mut entry, &mut cache);
        assert_eq!(recall.text, "echo hi");
        assert_eq!(recall.cursor, RecallCursor::Start);
    }

    #[test]
    fn multiline_recall_reindents_and_lands_cursor_at_end() {
        let mut entry = HistoryEntry::new(
            2,
            0,
            "/home/u",
            "for i in 1 2 3; do echo $i; done",
            Some("for i in 1 2 3; do\n      echo $i\n  done".to_string()),
        );
        let mut cache = RecallCache::new(16, Duration::from_secs(60));
        let recall = reconstruct(&mut entry, &mut cache);
        assert_eq!(recall.cursor, RecallCursor::End);
        assert_eq!(recall.text, "for i in 1 2 3; do\n  echo $i\ndone");
    }

    #[test]
    fn second_recall_of_same_entry_hits_the_cache() {
        let mut entry = HistoryEntry::new(
            3,
            0,
            "/home/u",
            "x",
            Some("if true\nthen\necho yes\nfi".to_string()),
        );
        let mut cache = RecallCache::new(16, Duration::from_secs(60));
        reconstruct(&mut entry, &mut cache);
        assert_eq!(cache.len(), 1);
        reconstruct(&mut entry, &mut cache);
        assert_eq!(cache.len(), 1);
    }
}
