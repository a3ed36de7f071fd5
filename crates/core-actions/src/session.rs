//! Sum-typed session state.
//!
//! GNU Readline's own `abort_line` historically cancels "many things at
//! once" via a `setjmp`/`longjmp`-style unwind out of whatever nested mode
//! was active. Here there is exactly one mode at a time, represented as a
//! variant of [`SessionMode`], and `abort_line` is simply "transition to
//! `Idle`" plus the cleanup each variant's data demands (restoring the
//! pre-search buffer, clearing a pending completion menu, etc).

use core_history::SearchSession;

use crate::completion::Candidate;

/// An in-progress interactive search: the
/// underlying `core_history` session plus the uncommitted match currently
/// shown in the buffer, so the render step doesn't have to re-run the
/// search just to know what to display.
pub struct SearchState {
    pub session: SearchSession,
    pub preview: Option<String>,
}

impl SearchState {
    pub fn new(session: SearchSession) -> Self {
        Self { session, preview: None }
    }

    pub fn push_char(&mut self, c: char) {
        self.session.push_char(c);
    }

    pub fn pop_char(&mut self) {
        self.session.pop_char();
    }
}

/// The engine's current sub-mode. Exactly one of these is active; entering
/// a new one (e.g. `reverse_search_history` while idle) replaces whatever
/// was active before — this engine's action set has no notion of nested
/// modes.
pub enum SessionMode {
    /// No sub-mode active: keys dispatch straight through the keymap to
    /// ordinary buffer-mutating actions.
    Idle,
    /// Reverse/forward incremental history search. Carries the
    /// in-progress query/match state plus whatever the buffer held before
    /// search was entered, so `abort_line` can restore it exactly.
    Search(SearchState),
    /// `quoted_insert` (C-q/C-v) was just pressed: the *next* key event,
    /// whatever it is, is inserted literally rather than dispatched as an
    /// action.
    QuotedInsert,
    /// The last `complete`/`possible_completions` produced more than one
    /// candidate; held here so a host-rendered menu (or `insert_completions`)
    /// can read it without redoing the completion query.
    Completion(Vec<Candidate>),
}

impl Default for SessionMode {
    fn default() -> Self {
        SessionMode::Idle
    }
}

impl SessionMode {
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionMode::Idle)
    }

    pub fn is_search(&self) -> bool {
        matches!(self, SessionMode::Search(_))
    }
}
