//! Completion: the engine's half of the completion-source contract.
//!
//! The host supplies candidates (files, commands, variables, ...); the
//! engine's job is only to rank, categorize, and decide how much of the
//! line to fill in — it never goes looking for candidates itself.

use core_fuzzy::{FuzzyPreset, combined_score};

/// The category a completion candidate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    Command,
    Builtin,
    Alias,
    File,
    Directory,
    Variable,
    History,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub text: String,
    pub kind: CandidateKind,
    /// Appended after `text` on insertion (e.g. `/` for a directory, a
    /// trailing space for a finished word).
    pub suffix: String,
    /// Host-supplied relevance hint, folded into the final ranking
    /// alongside the fuzzy score against the partial word.
    pub relevance: i32,
}

impl Candidate {
    pub fn new(text: impl Into<String>, kind: CandidateKind) -> Self {
        Self { text: text.into(), kind, suffix: String::new(), relevance: 0 }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_relevance(mut self, relevance: i32) -> Self {
        self.relevance = relevance;
        self
    }
}

/// A plug-in source of completion candidates ("Completion source").
/// Implementations are supplied by the host shell via
/// [`crate::Engine::register_completion_source`]; the engine holds this as
/// a trait object so it never depends on how candidates are actually
/// produced (filesystem walks, a command table, etc).
pub trait CompletionSource {
    /// Returns every plausible candidate for the word at `cursor_byte`
    /// within `buffer_content`. The engine does the ranking; sources may
    /// return candidates in any order.
    fn complete(&self, buffer_content: &str, cursor_byte: usize) -> Vec<Candidate>;
}

/// Ranks `candidates` against `partial` (the word being completed) using
/// the `completion` fuzzy preset, folding in each candidate's own
/// `relevance` hint, highest score first.
pub fn rank(candidates: Vec<Candidate>, partial: &str) -> Vec<Candidate> {
    let mut scored: Vec<(i64, Candidate)> = candidates
        .into_iter()
        .map(|c| {
            let fuzzy = if partial.is_empty() {
                100
            } else {
                combined_score(partial, &c.text, FuzzyPreset::Completion) as i64
            };
            (fuzzy + c.relevance as i64, c)
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, c)| c).collect()
}

/// The longest prefix shared by every candidate's `text`, byte-exact. Used
/// by `complete` to fill in as much of an ambiguous match as is safe
/// without guessing between candidates.
pub fn longest_common_prefix(candidates: &[Candidate]) -> String {
    let Some(first) = candidates.first() else {
        return String::new();
    };
    let mut prefix = first.text.as_str();
    for c in &candidates[1..] {
        let mut end = 0;
        for (a, b) in prefix.char_indices().zip(c.text.chars()) {
            if a.1 != b {
                break;
            }
            end = a.0 + a.1.len_utf8();
        }
        prefix = &prefix[..end];
    }
    prefix.to_string()
}

/// The byte range of the "word" the cursor sits inside or just after,
/// delimited by whitespace — the span `complete` replaces.
pub fn current_word_range(content: &str, cursor_byte: usize) -> (usize, usize) {
    let bytes = content.as_bytes();
    let mut start = cursor_byte.min(bytes.len());
    while start > 0 && !bytes[start - 1].is_ascii_whitespace() {
        start -= 1;
    }
    let mut end = cursor_byte.min(bytes.len());
    while end < bytes.len() && !bytes[end].is_ascii_whitespace() {
        end += 1;
    }
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_exact_match_highest() {
        let candidates = vec![
            Candidate::new("git", CandidateKind::Command),
            Candidate::new("grep", CandidateKind::Command),
        ];
        let ranked = rank(candidates, "git");
        assert_eq!(ranked[0].text, "git");
    }

    #[test]
    fn common_prefix_of_divergent_candidates_is_empty() {
        let candidates =
            vec![Candidate::new("apple", CandidateKind::File), Candidate::new("banana", CandidateKind::File)];
        assert_eq!(longest_common_prefix(&candidates), "");
    }

    #[test]
    fn common_prefix_of_shared_stem() {
        let candidates = vec![
            Candidate::new("report_jan.csv", CandidateKind::File),
            Candidate::new("report_feb.csv", CandidateKind::File),
        ];
        assert_eq!(longest_common_prefix(&candidates), "report_");
    }

    #[test]
    fn word_range_finds_partial_word_under_cursor() {
        let content = "echo hel";
        assert_eq!(current_word_range(content, content.len()), (5, 8));
    }
}
