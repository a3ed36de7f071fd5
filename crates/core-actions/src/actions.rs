//! Implementations of the ≈42 Readline-compatible actions,
//! each a plain function over `&mut Engine`. Kept as free functions rather
//! than methods so `Engine`'s dispatch table (`engine.rs`) reads as a flat
//! lookup from [`core_keymap::Action`] to behavior, mirroring the keymap's
//! own flat hashtable design.

use core_history::RecallCursor;

use crate::dispatch::Dispatched;
use crate::engine::{Engine, KillDirection};
use crate::session::{SearchState, SessionMode};

// ---- word/char boundary helpers ------------------------------------------

fn next_char_boundary(content: &str, byte: usize) -> usize {
    match content[byte..].chars().next() {
        Some(c) => byte + c.len_utf8(),
        None => byte,
    }
}

fn prev_char_boundary(content: &str, byte: usize) -> usize {
    content[..byte].char_indices().next_back().map(|(i, _)| i).unwrap_or(0)
}

/// The range `cursor` through the end of the next whitespace-delimited
/// word, including any whitespace run skipped to reach it — the same span
/// `forward_word` moves the cursor across.
fn word_forward_range(content: &str, cursor_byte: usize) -> (usize, usize) {
    let mut idx = cursor_byte;
    while idx < content.len() {
        let ch = content[idx..].chars().next().unwrap();
        if !ch.is_whitespace() {
            break;
        }
        idx += ch.len_utf8();
    }
    let start = idx;
    while idx < content.len() {
        let ch = content[idx..].chars().next().unwrap();
        if ch.is_whitespace() {
            break;
        }
        idx += ch.len_utf8();
    }
    (start, idx)
}

fn word_backward_range(content: &str, cursor_byte: usize) -> (usize, usize) {
    let mut idx = cursor_byte;
    loop {
        if idx == 0 {
            break;
        }
        let ch = content[..idx].chars().next_back().unwrap();
        if !ch.is_whitespace() {
            break;
        }
        idx -= ch.len_utf8();
    }
    let end = idx;
    loop {
        if idx == 0 {
            break;
        }
        let ch = content[..idx].chars().next_back().unwrap();
        if ch.is_whitespace() {
            break;
        }
        idx -= ch.len_utf8();
    }
    (idx, end)
}

fn end_of_current_line_byte(engine: &mut Engine) -> usize {
    let saved = engine.buffer().cursor();
    engine.buffers.current_mut().buffer.cursor_move_line_end();
    let end = engine.buffer().cursor().byte;
    engine.buffers.current_mut().buffer.set_cursor(saved);
    end
}

fn start_of_current_line_byte(engine: &mut Engine) -> usize {
    let saved = engine.buffer().cursor();
    engine.buffers.current_mut().buffer.cursor_move_line_start();
    let start = engine.buffer().cursor().byte;
    engine.buffers.current_mut().buffer.set_cursor(saved);
    start
}

// ---- movement -------------------------------------------------------------

pub fn beginning_of_line(engine: &mut Engine) -> Dispatched {
    engine.buffers.current_mut().buffer.cursor_move_line_start();
    Dispatched::Redraw
}

pub fn end_of_line(engine: &mut Engine) -> Dispatched {
    engine.buffers.current_mut().buffer.cursor_move_line_end();
    Dispatched::Redraw
}

pub fn forward_char(engine: &mut Engine) -> Dispatched {
    if engine.buffer().cursor().codepoint >= engine.buffer().codepoint_count() {
        return Dispatched::NoChange;
    }
    engine.buffers.current_mut().buffer.cursor_move_char_forward();
    Dispatched::Redraw
}

pub fn backward_char(engine: &mut Engine) -> Dispatched {
    if engine.buffer().cursor().codepoint == 0 {
        return Dispatched::NoChange;
    }
    engine.buffers.current_mut().buffer.cursor_move_char_backward();
    Dispatched::Redraw
}

pub fn forward_word(engine: &mut Engine) -> Dispatched {
    engine.buffers.current_mut().buffer.cursor_move_word_forward();
    Dispatched::Redraw
}

pub fn backward_word(engine: &mut Engine) -> Dispatched {
    engine.buffers.current_mut().buffer.cursor_move_word_backward();
    Dispatched::Redraw
}

// ---- deletion ---------------------------------------------------------

pub fn delete_char(engine: &mut Engine) -> Dispatched {
    let buf = engine.buffer();
    if buf.cursor().codepoint >= buf.codepoint_count() {
        return Dispatched::NoChange;
    }
    let byte = buf.cursor().byte;
    let content = buf.get_complete_content();
    let next = next_char_boundary(&content, byte);
    match engine.delete_recorded(byte, next - byte) {
        Ok(_) => Dispatched::Redraw,
        Err(_) => Dispatched::NoChange,
    }
}

pub fn backward_delete_char(engine: &mut Engine) -> Dispatched {
    let buf = engine.buffer();
    if buf.cursor().codepoint == 0 {
        return Dispatched::NoChange;
    }
    let byte = buf.cursor().byte;
    let content = buf.get_complete_content();
    let prev = prev_char_boundary(&content, byte);
    match engine.delete_recorded(prev, byte - prev) {
        Ok(_) => Dispatched::Redraw,
        Err(_) => Dispatched::NoChange,
    }
}

pub fn kill_line(engine: &mut Engine) -> Dispatched {
    let byte = engine.buffer().cursor().byte;
    let line_end = end_of_current_line_byte(engine);
    if line_end <= byte {
        return Dispatched::NoChange;
    }
    let mode = engine.kill_append_mode(KillDirection::Forward);
    match engine.delete_recorded(byte, line_end - byte) {
        Ok(removed) => {
            engine.kill_ring.kill(&String::from_utf8_lossy(&removed), mode);
            Dispatched::Redraw
        }
        Err(_) => Dispatched::NoChange,
    }
}

pub fn backward_kill_line(engine: &mut Engine) -> Dispatched {
    let byte = engine.buffer().cursor().byte;
    let line_start = start_of_current_line_byte(engine);
    if byte <= line_start {
        return Dispatched::NoChange;
    }
    let mode = engine.kill_append_mode(KillDirection::Backward);
    match engine.delete_recorded(line_start, byte - line_start) {
        Ok(removed) => {
            engine.kill_ring.kill(&String::from_utf8_lossy(&removed), mode);
            Dispatched::Redraw
        }
        Err(_) => Dispatched::NoChange,
    }
}

pub fn kill_word(engine: &mut Engine) -> Dispatched {
    let content = engine.buffer().get_complete_content();
    let cursor = engine.buffer().cursor().byte;
    let (_, end) = word_forward_range(&content, cursor);
    if end <= cursor {
        return Dispatched::NoChange;
    }
    let mode = engine.kill_append_mode(KillDirection::Forward);
    match engine.delete_recorded(cursor, end - cursor) {
        Ok(removed) => {
            engine.kill_ring.kill(&String::from_utf8_lossy(&removed), mode);
            Dispatched::Redraw
        }
        Err(_) => Dispatched::NoChange,
    }
}

pub fn backward_kill_word(engine: &mut Engine) -> Dispatched {
    let content = engine.buffer().get_complete_content();
    let cursor = engine.buffer().cursor().byte;
    let (start, _) = word_backward_range(&content, cursor);
    if start >= cursor {
        return Dispatched::NoChange;
    }
    let mode = engine.kill_append_mode(KillDirection::Backward);
    match engine.delete_recorded(start, cursor - start) {
        Ok(removed) => {
            engine.kill_ring.kill(&String::from_utf8_lossy(&removed), mode);
            Dispatched::Redraw
        }
        Err(_) => Dispatched::NoChange,
    }
}

/// Readline keeps `unix-word-rubout` and `backward-kill-word` as distinct,
/// independently rebindable commands even though they share one word-
/// boundary definition in this engine.
pub fn unix_word_rubout(engine: &mut Engine) -> Dispatched {
    backward_kill_word(engine)
}

pub fn delete_horizontal_space(engine: &mut Engine) -> Dispatched {
    let content = engine.buffer().get_complete_content();
    let cursor = engine.buffer().cursor().byte;
    let is_hspace = |b: u8| b == b' ' || b == b'\t';
    let mut start = cursor;
    while start > 0 && is_hspace(content.as_bytes()[start - 1]) {
        start -= 1;
    }
    let mut end = cursor;
    while end < content.len() && is_hspace(content.as_bytes()[end]) {
        end += 1;
    }
    if start == end {
        return Dispatched::NoChange;
    }
    match engine.delete_recorded(start, end - start) {
        Ok(_) => Dispatched::Redraw,
        Err(_) => Dispatched::NoChange,
    }
}

// ---- paste ------------------------------------------------------------

pub fn yank(engine: &mut Engine) -> Dispatched {
    let at = engine.buffer().cursor().byte;
    let Some((text, span)) = engine.kill_ring.yank(at) else {
        return Dispatched::NoChange;
    };
    match engine.insert_recorded(at, &text) {
        Ok(()) => {
            engine.last_yank_span = Some(span);
            Dispatched::Redraw
        }
        Err(_) => Dispatched::NoChange,
    }
}

pub fn yank_pop(engine: &mut Engine) -> Dispatched {
    let Some(old_span) = engine.last_yank_span else {
        return Dispatched::NoChange;
    };
    let Some((text, new_span)) = engine.kill_ring.yank_pop() else {
        return Dispatched::NoChange;
    };
    match engine.replace_recorded(old_span.start, old_span.end - old_span.start, &text) {
        Ok(_) => {
            engine.last_yank_span = Some(new_span);
            Dispatched::Redraw
        }
        Err(_) => Dispatched::NoChange,
    }
}

// ---- structural ---------------------------------------------------------

pub fn self_insert(engine: &mut Engine, c: char) -> Dispatched {
    let byte = engine.buffer().cursor().byte;
    let mut tmp = [0u8; 4];
    let s = c.encode_utf8(&mut tmp);
    match engine.insert_recorded(byte, s) {
        Ok(()) => Dispatched::Redraw,
        Err(_) => Dispatched::NoChange,
    }
}

pub fn quoted_insert(engine: &mut Engine) -> Dispatched {
    engine.session = SessionMode::QuotedInsert;
    Dispatched::NoChange
}

pub fn transpose_chars(engine: &mut Engine) -> Dispatched {
    let content = engine.buffer().get_complete_content();
    let total_chars = engine.buffer().codepoint_count();
    if total_chars < 2 {
        return Dispatched::NoChange;
    }
    let cursor_cp = engine.buffer().cursor().codepoint;
    let at_end = cursor_cp >= total_chars;
    let (first_cp, second_cp) = if at_end {
        (total_chars - 2, total_chars - 1)
    } else if cursor_cp == 0 {
        return Dispatched::NoChange;
    } else {
        (cursor_cp - 1, cursor_cp)
    };
    let chars: Vec<char> = content.chars().collect();
    let a = chars[first_cp];
    let b = chars[second_cp];
    let byte_start = content.char_indices().nth(first_cp).map(|(i, _)| i).unwrap();
    let total_len = a.len_utf8() + b.len_utf8();
    let swapped: String = [b, a].into_iter().collect();
    if engine.replace_recorded(byte_start, total_len, &swapped).is_err() {
        return Dispatched::NoChange;
    }
    let new_cursor_cp = if at_end { total_chars } else { cursor_cp + 1 };
    engine.buffers.current_mut().buffer.cursor_move_absolute(new_cursor_cp);
    Dispatched::Redraw
}

pub fn transpose_words(engine: &mut Engine) -> Dispatched {
    let content = engine.buffer().get_complete_content();
    let cursor = engine.buffer().cursor().byte;
    let (back_start, back_end) = word_backward_range(&content, cursor);
    if back_start == back_end {
        return Dispatched::NoChange;
    }
    let (fwd_start, fwd_end) = word_forward_range(&content, back_end);
    if fwd_start == fwd_end {
        return Dispatched::NoChange;
    }
    let word1 = &content[back_start..back_end];
    let between = &content[back_end..fwd_start];
    let word2 = &content[fwd_start..fwd_end];
    let replacement = format!("{word2}{between}{word1}");
    let total_len = fwd_end - back_start;
    if engine.replace_recorded(back_start, total_len, &replacement).is_err() {
        return Dispatched::NoChange;
    }
    let new_end_byte = back_start + replacement.len();
    let updated = engine.buffer().get_complete_content();
    let cp = updated[..new_end_byte.min(updated.len())].chars().count();
    engine.buffers.current_mut().buffer.cursor_move_absolute(cp);
    Dispatched::Redraw
}

// ---- undo/redo ----------------------------------------------------------

pub fn undo(engine: &mut Engine) -> Dispatched {
    let mb = engine.buffers.current_mut();
    match mb.tracker.undo(&mut mb.buffer) {
        Some(_) => Dispatched::Redraw,
        None => Dispatched::NoChange,
    }
}

pub fn redo(engine: &mut Engine) -> Dispatched {
    let mb = engine.buffers.current_mut();
    match mb.tracker.redo(&mut mb.buffer) {
        Some(_) => Dispatched::Redraw,
        None => Dispatched::NoChange,
    }
}

// ---- case conversion ------------------------------------------------------

fn transform_word(engine: &mut Engine, f: impl FnOnce(&str) -> String) -> Dispatched {
    let content = engine.buffer().get_complete_content();
    let cursor = engine.buffer().cursor().byte;
    let (start, end) = word_forward_range(&content, cursor);
    if start == end {
        return Dispatched::NoChange;
    }
    let replacement = f(&content[start..end]);
    let new_end_byte = start + replacement.len();
    if engine.replace_recorded(start, end - start, &replacement).is_err() {
        return Dispatched::NoChange;
    }
    let updated = engine.buffer().get_complete_content();
    let cp = updated[..new_end_byte.min(updated.len())].chars().count();
    engine.buffers.current_mut().buffer.cursor_move_absolute(cp);
    Dispatched::Redraw
}

pub fn upcase_word(engine: &mut Engine) -> Dispatched {
    transform_word(engine, |s| s.to_uppercase())
}

pub fn downcase_word(engine: &mut Engine) -> Dispatched {
    transform_word(engine, |s| s.to_lowercase())
}

pub fn capitalize_word(engine: &mut Engine) -> Dispatched {
    transform_word(engine, |s| {
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
            None => String::new(),
        }
    })
}

// ---- completion -----------------------------------------------------------

pub fn complete(engine: &mut Engine) -> Dispatched {
    let content = engine.buffer().get_complete_content();
    let cursor_byte = engine.buffer().cursor().byte;
    let (start, end) = crate::completion::current_word_range(&content, cursor_byte);
    let partial = content[start..end].to_string();
    let candidates = match engine.completion_source.as_ref() {
        Some(source) => source.complete(&content, cursor_byte),
        None => return Dispatched::NoChange,
    };
    let ranked = crate::completion::rank(candidates, &partial);
    if ranked.is_empty() {
        return Dispatched::NoChange;
    }
    if ranked.len() == 1 {
        let replacement = format!("{}{}", ranked[0].text, ranked[0].suffix);
        if engine.replace_recorded(start, end - start, &replacement).is_err() {
            return Dispatched::NoChange;
        }
        engine.session = SessionMode::Idle;
        return Dispatched::Redraw;
    }
    let prefix = crate::completion::longest_common_prefix(&ranked);
    if prefix.len() > partial.len() {
        let _ = engine.replace_recorded(start, end - start, &prefix);
    }
    engine.session = SessionMode::Completion(ranked);
    Dispatched::Redraw
}

pub fn possible_completions(engine: &mut Engine) -> Dispatched {
    let content = engine.buffer().get_complete_content();
    let cursor_byte = engine.buffer().cursor().byte;
    let (start, end) = crate::completion::current_word_range(&content, cursor_byte);
    let partial = content[start..end].to_string();
    let candidates = match engine.completion_source.as_ref() {
        Some(source) => source.complete(&content, cursor_byte),
        None => return Dispatched::NoChange,
    };
    let ranked = crate::completion::rank(candidates, &partial);
    if ranked.is_empty() {
        return Dispatched::NoChange;
    }
    engine.session = SessionMode::Completion(ranked);
    Dispatched::Redraw
}

pub fn insert_completions(engine: &mut Engine) -> Dispatched {
    let content = engine.buffer().get_complete_content();
    let cursor_byte = engine.buffer().cursor().byte;
    let (start, end) = crate::completion::current_word_range(&content, cursor_byte);
    let partial = content[start..end].to_string();
    let candidates = match engine.completion_source.as_ref() {
        Some(source) => source.complete(&content, cursor_byte),
        None => return Dispatched::NoChange,
    };
    let ranked = crate::completion::rank(candidates, &partial);
    if ranked.is_empty() {
        return Dispatched::NoChange;
    }
    let joined = ranked.iter().map(|c| c.text.as_str()).collect::<Vec<_>>().join(" ");
    if engine.replace_recorded(start, end - start, &joined).is_err() {
        return Dispatched::NoChange;
    }
    engine.session = SessionMode::Idle;
    Dispatched::Redraw
}

// ---- history browse -------------------------------------------------------

fn recall_entry(engine: &mut Engine, id: u64) -> Dispatched {
    let Ok(entry) = engine.history.get_mut(id) else {
        return Dispatched::NoChange;
    };
    let recall = core_history::reconstruct(entry, &mut engine.recall_cache);
    let cursor_at_end = matches!(recall.cursor, RecallCursor::End);
    engine.load_into_buffer(&recall.text, cursor_at_end);
    Dispatched::Redraw
}

pub fn history_previous(engine: &mut Engine) -> Dispatched {
    let ids: Vec<u64> = engine.history.iter_most_recent_first().map(|e| e.id).collect();
    if ids.is_empty() {
        return Dispatched::NoChange;
    }
    let next_index = match engine.history_cursor {
        None => 0,
        Some(i) if i + 1 < ids.len() => i + 1,
        Some(i) => i,
    };
    if engine.history_cursor.is_none() {
        engine.live_buffer_stash = Some(engine.buffer().get_complete_content());
    }
    engine.history_cursor = Some(next_index);
    recall_entry(engine, ids[next_index])
}

pub fn history_next(engine: &mut Engine) -> Dispatched {
    let ids: Vec<u64> = engine.history.iter_most_recent_first().map(|e| e.id).collect();
    match engine.history_cursor {
        None => Dispatched::NoChange,
        Some(0) => {
            engine.history_cursor = None;
            let stash = engine.live_buffer_stash.take().unwrap_or_default();
            engine.load_into_buffer(&stash, true);
            Dispatched::Redraw
        }
        Some(i) => {
            let next_index = i - 1;
            engine.history_cursor = Some(next_index);
            recall_entry(engine, ids[next_index])
        }
    }
}

fn history_prefix_search(engine: &mut Engine, backward: bool) -> Dispatched {
    let prefix_end = engine.buffer().cursor().byte;
    let content = engine.buffer().get_complete_content();
    let prefix = content[..prefix_end].to_string();
    if prefix.is_empty() {
        return if backward { history_previous(engine) } else { history_next(engine) };
    }
    let entries: Vec<(u64, String)> =
        engine.history.iter_most_recent_first().map(|e| (e.id, e.normalized.clone())).collect();
    if entries.is_empty() {
        return Dispatched::NoChange;
    }
    let start_index = engine.history_cursor.map(|i| i + 1).unwrap_or(0);
    let indices: Box<dyn Iterator<Item = usize>> =
        if backward { Box::new(start_index..entries.len()) } else { Box::new((0..start_index).rev()) };
    for i in indices {
        if entries[i].1.starts_with(&prefix) {
            if engine.history_cursor.is_none() {
                engine.live_buffer_stash = Some(content.clone());
            }
            engine.history_cursor = Some(i);
            return recall_entry(engine, entries[i].0);
        }
    }
    Dispatched::NoChange
}

pub fn history_search_backward(engine: &mut Engine) -> Dispatched {
    history_prefix_search(engine, true)
}

pub fn history_search_forward(engine: &mut Engine) -> Dispatched {
    history_prefix_search(engine, false)
}

// ---- interactive search entry points --------------------------------------

pub fn reverse_search_history(engine: &mut Engine) -> Dispatched {
    engine.keymap.flush_chord();
    let original = engine.buffer().get_complete_content();
    let session = core_history::SearchSession::begin(original, core_history::SearchDirection::Backward);
    engine.session = SessionMode::Search(SearchState::new(session));
    Dispatched::Redraw
}

pub fn forward_search_history(engine: &mut Engine) -> Dispatched {
    engine.keymap.flush_chord();
    let original = engine.buffer().get_complete_content();
    let session = core_history::SearchSession::begin(original, core_history::SearchDirection::Forward);
    engine.session = SessionMode::Search(SearchState::new(session));
    Dispatched::Redraw
}

// ---- critical actions -------------------------------------------------

/// Local copy of the block-construct keywords `core_history::structure`
/// uses for recall re-indentation. Those lists are private to that crate
/// (its analysis is cached per-entry, not something this layer should
/// reach into); this is the minimal subset needed to decide whether a
/// buffer is an unterminated multi-line construct, duplicated rather than
/// exposed as a new cross-crate dependency.
const BLOCK_OPENERS: &[&str] = &["if", "for", "while", "until", "case"];
const BLOCK_CLOSERS: &[&str] = &["fi", "done", "esac"];

fn buffer_needs_continuation(content: &str) -> bool {
    let tokens = core_syntax::tokenize(content);
    if tokens.iter().any(|t| t.is_error()) {
        return true;
    }
    if content.trim_end_matches('\n').ends_with('\\') {
        return true;
    }
    if let Some(last) = tokens.iter().rev().find(|t| matches!(t.kind, core_syntax::TokenKind::HereDoc)) {
        if last.range.end >= content.len() {
            return true;
        }
    }

    let mut depth: i32 = 0;
    for line in content.lines() {
        for word in line.split_whitespace() {
            let word = word.trim_end_matches(';');
            if BLOCK_OPENERS.contains(&word) {
                depth += 1;
            } else if BLOCK_CLOSERS.contains(&word) {
                depth -= 1;
            }
        }
    }
    depth > 0
}

/// Collapses a (possibly multi-line) accepted command into the single-line
/// form `core_history::HistoryStore::append` expects as `raw_command`:
/// trimmed, blank lines dropped, lines joined with `"; "`.
fn flatten_to_single_line(content: &str) -> String {
    content.lines().map(str::trim).filter(|l| !l.is_empty()).collect::<Vec<_>>().join("; ")
}

pub fn abort_line(engine: &mut Engine) -> Dispatched {
    engine.keymap.flush_chord();
    let restore = match std::mem::replace(&mut engine.session, SessionMode::Idle) {
        SessionMode::Search(state) => Some(state.session.original_buffer),
        _ => None,
    };
    engine.kill_ring.clear_yank_state();
    engine.last_yank_span = None;
    engine.history_cursor = None;
    engine.live_buffer_stash = None;
    match restore {
        Some(text) => engine.load_into_buffer(&text, true),
        None => engine.load_into_buffer("", false),
    }
    Dispatched::Aborted
}

pub fn accept_line(engine: &mut Engine) -> Dispatched {
    if let SessionMode::Search(state) = std::mem::replace(&mut engine.session, SessionMode::Idle) {
        let text = state.preview.unwrap_or(state.session.original_buffer);
        engine.load_into_buffer(&text, true);
    }

    let content = engine.buffer().get_complete_content();
    if content.is_empty() {
        return Dispatched::Accepted(String::new());
    }

    if buffer_needs_continuation(&content) {
        let pos = engine.buffer().cursor().byte;
        let _ = engine.insert_recorded(pos, "\n");
        return Dispatched::Redraw;
    }

    let normalized = flatten_to_single_line(&content);
    let original_multiline = content.contains('\n').then(|| content.clone());
    let created_at = engine.now_unix();
    let cwd = engine.cwd.clone();
    if engine
        .history
        .append(&normalized, created_at, cwd.clone(), original_multiline.clone())
        .is_some()
    {
        engine.persistence.append(&crate::persistence::PersistedEntry {
            raw_command: normalized,
            created_at,
            cwd,
            original_multiline,
            exit_code: None,
        });
    }
    engine.history_cursor = None;
    engine.live_buffer_stash = None;
    Dispatched::Accepted(content)
}

pub fn send_eof(engine: &mut Engine) -> Dispatched {
    if engine.buffer().length_bytes() == 0 {
        Dispatched::Eof
    } else {
        Dispatched::NoChange
    }
}
