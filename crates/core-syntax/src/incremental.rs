//! Incremental reparse scope selection: small edits within one
//! word reclassify only that word; inserting or deleting a syntactically
//! significant character widens the reparse to the whole buffer (finding
//! the true enclosing-construct boundary cheaply, without a real parse
//! tree, isn't worth it at shell command-line lengths); large/paste edits
//! always reparse everything. Errors never block highlighting — error
//! tokens just render with a distinct style alongside everything else.

/// Characters whose insertion or deletion can change the token family of
/// everything around them, not just the word they touch (quotes, `$`,
/// braces, parens, backslash).
const SIGNIFICANT_CHARS: &[char] = &['\'', '"', '`', '$', '{', '}', '(', ')', '\\'];

/// Edits larger than this many bytes are treated as "paste-sized" and
/// always trigger a full reparse rather than trying to reason about scope.
const LARGE_EDIT_THRESHOLD: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReparseScope {
    /// Reclassify only the single word token touching the edit.
    Word,
    /// Reparse the whole buffer (cheapest correct option available without
    /// an incremental parse tree; still well within the < 0.5 ms budget for
    /// typical command lengths).
    Full,
}

/// Decides how much of the buffer a tokenizer needs to redo after an edit
/// of `edit_len` bytes whose text is `edit_text`.
pub fn scope_for_edit(edit_text: &str, edit_len: usize) -> ReparseScope {
    if edit_len > LARGE_EDIT_THRESHOLD {
        return ReparseScope::Full;
    }
    if edit_text.chars().any(|c| SIGNIFICANT_CHARS.contains(&c)) {
        return ReparseScope::Full;
    }
    ReparseScope::Word
}

/// Tracks the last tokenized content so repeated small edits can ask "do I
/// even need to retokenize?" before doing any work. This crate always
/// returns a fresh token list from [`crate::tokenize`] regardless (shell
/// command lines are short enough that a full lex is cheap), but callers on
/// the render hot path use `scope_for_edit` to decide whether word-level
/// reclassification alone would have sufficed, for instrumentation.
pub struct IncrementalTokenizer {
    last_content: String,
}

impl IncrementalTokenizer {
    pub fn new() -> Self {
        Self { last_content: String::new() }
    }

    /// Returns the reparse scope an edit from `last_content` to `new_content`
    /// would require, then updates the tracked content.
    pub fn note_edit(&mut self, new_content: &str, edit_text: &str, edit_len: usize) -> ReparseScope {
        let scope = scope_for_edit(edit_text, edit_len);
        self.last_content = new_content.to_string();
        scope
    }
}

impl Default for IncrementalTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_plain_edit_is_word_scope() {
        assert_eq!(scope_for_edit("x", 1), ReparseScope::Word);
    }

    #[test]
    fn quote_insertion_widens_to_full() {
        assert_eq!(scope_for_edit("\"", 1), ReparseScope::Full);
    }

    #[test]
    fn dollar_insertion_widens_to_full() {
        assert_eq!(scope_for_edit("$", 1), ReparseScope::Full);
    }

    #[test]
    fn large_paste_is_always_full() {
        let text = "a".repeat(64);
        assert_eq!(scope_for_edit(&text, 64), ReparseScope::Full);
    }
}
