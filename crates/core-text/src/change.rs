//! Change-operation-based undo/redo.
//!
//! A change sequence (a doubly-ended run of insert/delete/replace operations)
//! is the atomic undo unit. Rapid, successive edits within a short window are
//! folded into the same sequence so a burst of typing undoes as one step,
//! while deliberate pauses start a new one.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::buffer::{Buffer, CursorPos};

const AUTO_GROUP_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub enum ChangeKind {
    Insert { text: Vec<u8> },
    Delete { text: Vec<u8> },
    Replace { removed: Vec<u8>, inserted: Vec<u8> },
}

impl ChangeKind {
    fn byte_len(&self) -> usize {
        match self {
            ChangeKind::Insert { text } | ChangeKind::Delete { text } => text.len(),
            ChangeKind::Replace { removed, inserted } => removed.len() + inserted.len(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChangeOp {
    pub byte_pos: usize,
    pub kind: ChangeKind,
    pub cursor_before: CursorPos,
    pub cursor_after: CursorPos,
}

#[derive(Debug, Clone)]
pub struct ChangeSequence {
    pub id: u64,
    pub ops: VecDeque<ChangeOp>,
    pub started_at: Instant,
    pub ended_at: Option<Instant>,
}

impl ChangeSequence {
    fn byte_len(&self) -> usize {
        self.ops.iter().map(|op| op.kind.byte_len()).sum()
    }
}

/// Owns every change sequence for one managed buffer, exclusively.
pub struct ChangeTracker {
    past: VecDeque<ChangeSequence>,
    future: Vec<ChangeSequence>,
    active: Option<ChangeSequence>,
    last_closed_at: Option<Instant>,
    next_id: u64,
    auto_sequence: bool,
    max_sequences: usize,
    max_bytes: usize,
    total_bytes: usize,
}

impl ChangeTracker {
    pub fn new(max_sequences: usize, max_bytes: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            active: None,
            last_closed_at: None,
            next_id: 0,
            auto_sequence: true,
            max_sequences,
            max_bytes,
            total_bytes: 0,
        }
    }

    pub fn set_auto_sequence(&mut self, enabled: bool) {
        self.auto_sequence = enabled;
    }

    /// Opens an active sequence. No-op if one is already open (sequences do
    /// not nest). Clears the redo tail, since a fresh undo unit invalidates
    /// whatever could previously be redone.
    pub fn begin_sequence(&mut self) {
        if self.active.is_some() {
            return;
        }
        self.drop_future();
        self.next_id += 1;
        self.active = Some(ChangeSequence {
            id: self.next_id,
            ops: VecDeque::new(),
            started_at: Instant::now(),
            ended_at: None,
        });
        trace!(target: "text.undo", id = self.next_id, "begin_sequence");
    }

    fn ensure_active(&mut self) {
        if self.active.is_some() {
            return;
        }
        if !self.auto_sequence {
            return;
        }
        let can_reopen = self
            .last_closed_at
            .map(|t| t.elapsed() < AUTO_GROUP_TIMEOUT)
            .unwrap_or(false)
            && !self.past.is_empty();
        if can_reopen {
            // Reopening still counts as "a new edit" for redo-invalidation
            // purposes: whatever could previously be redone no longer can.
            self.drop_future();
            let seq = self.past.pop_back().expect("checked non-empty above");
            self.total_bytes -= seq.byte_len();
            trace!(target: "text.undo", id = seq.id, "reopened sequence for auto-grouping");
            self.active = Some(seq);
        } else {
            self.begin_sequence();
        }
    }

    pub fn record_insert(
        &mut self,
        byte_pos: usize,
        text: Vec<u8>,
        cursor_before: CursorPos,
        cursor_after: CursorPos,
    ) {
        self.ensure_active();
        self.push_op(ChangeOp {
            byte_pos,
            kind: ChangeKind::Insert { text },
            cursor_before,
            cursor_after,
        });
    }

    pub fn record_delete(
        &mut self,
        byte_pos: usize,
        text: Vec<u8>,
        cursor_before: CursorPos,
        cursor_after: CursorPos,
    ) {
        self.ensure_active();
        self.push_op(ChangeOp {
            byte_pos,
            kind: ChangeKind::Delete { text },
            cursor_before,
            cursor_after,
        });
    }

    pub fn record_replace(
        &mut self,
        byte_pos: usize,
        removed: Vec<u8>,
        inserted: Vec<u8>,
        cursor_before: CursorPos,
        cursor_after: CursorPos,
    ) {
        self.ensure_active();
        self.push_op(ChangeOp {
            byte_pos,
            kind: ChangeKind::Replace { removed, inserted },
            cursor_before,
            cursor_after,
        });
    }

    fn push_op(&mut self, op: ChangeOp) {
        if let Some(seq) = self.active.as_mut() {
            seq.ops.push_back(op);
        }
    }

    /// Closes the active sequence. Empty sequences (no ops ever recorded)
    /// are discarded rather than pushed onto the undo timeline.
    pub fn end_sequence(&mut self) {
        let Some(mut seq) = self.active.take() else {
            return;
        };
        if seq.ops.is_empty() {
            return;
        }
        let now = Instant::now();
        seq.ended_at = Some(now);
        self.total_bytes += seq.byte_len();
        self.last_closed_at = Some(now);
        self.past.push_back(seq);
        self.enforce_limits();
        trace!(target: "text.undo", "end_sequence");
    }

    fn enforce_limits(&mut self) {
        while self.past.len() > self.max_sequences.max(1) {
            self.drop_oldest_past();
        }
        while self.total_bytes > self.max_bytes && self.past.len() > 1 {
            self.drop_oldest_past();
        }
    }

    fn drop_oldest_past(&mut self) {
        if let Some(dropped) = self.past.pop_front() {
            self.total_bytes -= dropped.byte_len();
            trace!(target: "text.undo", id = dropped.id, "dropped oldest sequence (limit exceeded)");
        }
    }

    /// `total_bytes` only ever counts sequences on the past side (see
    /// `undo`/`redo`, which move a sequence's bytes out of/into that total
    /// as it crosses the pointer); sequences sitting in `future` were
    /// already excluded, so clearing them must not touch `total_bytes`.
    fn drop_future(&mut self) {
        self.future.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty() || self.active.as_ref().is_some_and(|s| !s.ops.is_empty())
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Pops one sequence from the past, applies its inverse operations to
    /// `buffer` in reverse order, and returns the cursor position to restore
    /// (the *before* position of the sequence's first operation).
    pub fn undo(&mut self, buffer: &mut Buffer) -> Option<CursorPos> {
        self.end_sequence();
        let seq = self.past.pop_back()?;
        self.total_bytes -= seq.byte_len();
        let cursor = seq.ops.front().map(|op| op.cursor_before);
        for op in seq.ops.iter().rev() {
            apply_inverse(buffer, op);
        }
        self.future.push(seq);
        trace!(target: "text.undo", "undo");
        cursor
    }

    /// The dual of [`Self::undo`].
    pub fn redo(&mut self, buffer: &mut Buffer) -> Option<CursorPos> {
        let seq = self.future.pop()?;
        let cursor = seq.ops.back().map(|op| op.cursor_after);
        for op in seq.ops.iter() {
            apply_forward(buffer, op);
        }
        self.total_bytes += seq.byte_len();
        self.past.push_back(seq);
        trace!(target: "text.undo", "redo");
        cursor
    }
}

fn apply_inverse(buffer: &mut Buffer, op: &ChangeOp) {
    match &op.kind {
        ChangeKind::Insert { text } => {
            buffer.delete_raw(op.byte_pos, text.len());
        }
        ChangeKind::Delete { text } => {
            let text = std::str::from_utf8(text).expect("recorded change text is valid UTF-8");
            buffer.insert_raw(op.byte_pos, text);
        }
        ChangeKind::Replace { removed, inserted } => {
            let removed_text =
                std::str::from_utf8(removed).expect("recorded change text is valid UTF-8");
            buffer.delete_raw(op.byte_pos, inserted.len());
            buffer.insert_raw(op.byte_pos, removed_text);
        }
    }
    buffer.set_cursor(op.cursor_before);
}

fn apply_forward(buffer: &mut Buffer, op: &ChangeOp) {
    match &op.kind {
        ChangeKind::Insert { text } => {
            let text = std::str::from_utf8(text).expect("recorded change text is valid UTF-8");
            buffer.insert_raw(op.byte_pos, text);
        }
        ChangeKind::Delete { text } => {
            buffer.delete_raw(op.byte_pos, text.len());
        }
        ChangeKind::Replace { removed, inserted } => {
            let inserted_text =
                std::str::from_utf8(inserted).expect("recorded change text is valid UTF-8");
            buffer.delete_raw(op.byte_pos, removed.len());
            buffer.insert_raw(op.byte_pos, inserted_text);
        }
    }
    buffer.set_cursor(op.cursor_after);
}
