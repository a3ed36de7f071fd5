//! Kill ring: a bounded circular buffer of killed text fragments, with
//! append-on-successive-kill and yank-pop cycling.
//!
//! The ring owns a cursor into itself plus the byte span of the last yank,
//! so `yank_pop` can tell the caller exactly which span in the buffer to
//! replace — a small explicit state enum rather than ad hoc counters.

use std::collections::VecDeque;

pub const DEFAULT_KILL_RING_CAPACITY: usize = 32;

/// How a new kill combines with the ring's most recent entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillAppend {
    /// Push a new, independent entry (a kill not immediately preceded by
    /// another kill action).
    NewEntry,
    /// Concatenate onto the end of the most recent entry (successive
    /// forward kills, e.g. repeated `kill_word`).
    AppendForward,
    /// Concatenate before the start of the most recent entry (successive
    /// backward kills, e.g. repeated `backward_kill_word`).
    AppendBackward,
}

/// A byte-offset span in the buffer that a yank (or the most recent
/// yank-pop) inserted — what `yank_pop` must delete before re-inserting
/// the next ring entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YankSpan {
    pub start: usize,
    pub end: usize,
}

pub struct KillRing {
    ring: VecDeque<String>,
    capacity: usize,
    /// Index into `ring` of the entry last yanked, if a yank/yank-pop
    /// cycle is in progress.
    cursor: Option<usize>,
    last_span: Option<YankSpan>,
}

impl KillRing {
    pub fn new(capacity: usize) -> Self {
        Self { ring: VecDeque::new(), capacity: capacity.max(1), cursor: None, last_span: None }
    }

    /// Records a kill. Appending onto the ring's front entry implements
    /// "two kills in a row concatenate into one entry"; any other edit
    /// between two kills should be recorded with `NewEntry` instead.
    pub fn kill(&mut self, text: &str, append: KillAppend) {
        if text.is_empty() {
            return;
        }
        match append {
            KillAppend::NewEntry => {
                self.ring.push_front(text.to_string());
                while self.ring.len() > self.capacity {
                    self.ring.pop_back();
                }
            }
            KillAppend::AppendForward => match self.ring.front_mut() {
                Some(top) => top.push_str(text),
                None => self.ring.push_front(text.to_string()),
            },
            KillAppend::AppendBackward => match self.ring.front_mut() {
                Some(top) => {
                    let mut combined = text.to_string();
                    combined.push_str(top);
                    *top = combined;
                }
                None => self.ring.push_front(text.to_string()),
            },
        }
        self.cursor = None;
        self.last_span = None;
    }

    /// Yanks the most recent entry at buffer byte offset `at`, starting a
    /// new yank-pop cycle. `None` if the ring is empty (a bare `yank` with
    /// nothing killed yet is a no-op at the call site).
    pub fn yank(&mut self, at: usize) -> Option<(String, YankSpan)> {
        let text = self.ring.front()?.clone();
        self.cursor = Some(0);
        let span = YankSpan { start: at, end: at + text.len() };
        self.last_span = Some(span);
        Some((text, span))
    }

    /// Cycles to the next-older ring entry, replacing exactly the span the
    /// last yank (or yank-pop) inserted. `None` when there is no yank in
    /// progress to cycle from, or when the ring is empty: both are treated
    /// as plain no-ops rather than errors.
    pub fn yank_pop(&mut self) -> Option<(String, YankSpan)> {
        let cursor = self.cursor?;
        let last_span = self.last_span?;
        if self.ring.is_empty() {
            return None;
        }
        let next = (cursor + 1) % self.ring.len();
        let text = self.ring.get(next)?.clone();
        let span = YankSpan { start: last_span.start, end: last_span.start + text.len() };
        self.cursor = Some(next);
        self.last_span = Some(span);
        Some((text, span))
    }

    /// Clears the yank-pop cursor without touching the ring's contents —
    /// called on any edit other than yank/yank-pop, and by `abort_line`.
    pub fn clear_yank_state(&mut self) {
        self.cursor = None;
        self.last_span = None;
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successive_forward_kills_concatenate_into_one_entry() {
        let mut ring = KillRing::new(DEFAULT_KILL_RING_CAPACITY);
        ring.kill("foo ", KillAppend::NewEntry);
        ring.kill("bar", KillAppend::AppendForward);
        assert_eq!(ring.len(), 1);
        let (text, _) = ring.yank(0).unwrap();
        assert_eq!(text, "foo bar");
    }

    #[test]
    fn unrelated_kills_stay_as_separate_entries() {
        let mut ring = KillRing::new(DEFAULT_KILL_RING_CAPACITY);
        ring.kill("first", KillAppend::NewEntry);
        ring.kill("second", KillAppend::NewEntry);
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn ring_is_bounded_at_capacity() {
        let mut ring = KillRing::new(2);
        ring.kill("a", KillAppend::NewEntry);
        ring.kill("b", KillAppend::NewEntry);
        ring.kill("c", KillAppend::NewEntry);
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn yank_pop_cycles_through_entries_and_reports_replacement_span() {
        let mut ring = KillRing::new(DEFAULT_KILL_RING_CAPACITY);
        ring.kill("second", KillAppend::NewEntry);
        ring.kill("first", KillAppend::NewEntry);

        let (text, span) = ring.yank(10).unwrap();
        assert_eq!(text, "first");
        assert_eq!(span, YankSpan { start: 10, end: 15 });

        let (text, span) = ring.yank_pop().unwrap();
        assert_eq!(text, "second");
        assert_eq!(span, YankSpan { start: 10, end: 16 });
    }

    #[test]
    fn yank_pop_on_empty_ring_is_a_no_op() {
        let mut ring = KillRing::new(DEFAULT_KILL_RING_CAPACITY);
        assert!(ring.yank_pop().is_none());
    }

    #[test]
    fn yank_pop_without_a_prior_yank_is_a_no_op() {
        let mut ring = KillRing::new(DEFAULT_KILL_RING_CAPACITY);
        ring.kill("text", KillAppend::NewEntry);
        assert!(ring.yank_pop().is_none());
    }
}
