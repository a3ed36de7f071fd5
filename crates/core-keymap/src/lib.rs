//! Keybinding engine (component of C, the input dispatcher): a hashtable
//! from canonical GNU Readline key-sequence notation (`"C-a"`, `"M-f"`,
//! `"C-x C-s"`, `"UP"`, `"RET"`) to a bound [`Action`].
//!
//! Lookup is a single hashtable probe per key in the common (non-chord)
//! case, which satisfies the < 50 µs per-keypress contract trivially.
//! Multi-key chords are handled by [`Keymap::feed`], which buffers the
//! sequence in a small internal state machine rather than growing a real
//! trie; the binding table itself stays a flat `HashMap<String, Action>`.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use core_input::KeyEvent;
use tracing::{debug, trace};

pub mod action;
pub mod error;
pub mod presets;

pub use action::Action;
pub use error::{KeymapError, KeymapResult};

/// How long a chord prefix may sit unconfirmed before it flushes on its own.
/// Mirrors `chord_timeout_ms` in the engine configuration (default 100 ms);
/// callers that don't poll on a timer can ignore this and rely on `feed`'s
/// synchronous prefix/complete/flush protocol instead.
pub const DEFAULT_CHORD_TIMEOUT: Duration = Duration::from_millis(100);

/// The result of feeding one key event through the keymap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A binding matched exactly; the caller should execute `action`.
    Bound(Action),
    /// No binding matched, but the key was a plain printable character with
    /// no modifiers: the universal fallback action.
    SelfInsert(char),
    /// No binding matched and the key is not self-insertable (e.g. an
    /// unbound control character or symbolic key): silently dropped rather
    /// than surfaced as an error.
    Unbound,
    /// `key` extends one or more registered bindings as a strict prefix but
    /// doesn't complete any of them yet; the dispatcher is now in chord
    /// state awaiting the next key.
    ChordPending,
}

/// A hashtable-backed keybinding table plus chord-accumulation state.
pub struct Keymap {
    bindings: HashMap<String, Action>,
    pending: Vec<String>,
    chord_started_at: Option<Instant>,
    chord_timeout: Duration,
}

impl Keymap {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            pending: Vec::new(),
            chord_started_at: None,
            chord_timeout: DEFAULT_CHORD_TIMEOUT,
        }
    }

    pub fn with_chord_timeout(timeout: Duration) -> Self {
        let mut km = Self::new();
        km.chord_timeout = timeout;
        km
    }

    pub fn emacs_defaults() -> Self {
        let mut km = Self::new();
        for (seq, action) in presets::EMACS_DEFAULTS {
            km.bind(seq, *action);
        }
        km
    }

    /// The vi-mode preset: most bindings are shared with emacs (this engine
    /// does not reimplement vi's full normal-mode operator/motion grammar,
    /// only its existing action set), but a handful of single-letter
    /// motions route to the same actions while in vi command mode. See
    /// `core_config::EditingMode` for how `editing_mode` toggles which
    /// table `Engine::new` picks.
    pub fn vi_command_defaults() -> Self {
        let mut km = Self::new();
        for (seq, action) in presets::VI_COMMAND_DEFAULTS {
            km.bind(seq, *action);
        }
        km
    }

    pub fn bind(&mut self, sequence: &str, action: Action) {
        self.bindings.insert(sequence.to_string(), action);
    }

    pub fn unbind(&mut self, sequence: &str) -> KeymapResult<()> {
        self.bindings
            .remove(sequence)
            .map(|_| ())
            .ok_or_else(|| KeymapError::NoSuchBinding(sequence.to_string()))
    }

    pub fn is_bound(&self, sequence: &str) -> bool {
        self.bindings.contains_key(sequence)
    }

    pub fn in_chord(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Whether a chord has sat unconfirmed longer than `chord_timeout`. The
    /// caller (the read-line loop) checks this between blocking reads and,
    /// if true, should call [`Self::flush_chord`] before waiting for the
    /// next key.
    pub fn chord_timed_out(&self) -> bool {
        self.chord_started_at
            .is_some_and(|t| t.elapsed() >= self.chord_timeout)
    }

    /// Abandons a pending chord without dispatching anything (used by
    /// `abort_line` and by the chord timeout path). Returns the token
    /// sequence that was pending, if any, purely for logging.
    pub fn flush_chord(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let seq = self.pending.join(" ");
        self.pending.clear();
        self.chord_started_at = None;
        trace!(target: "input.dispatch", seq, "chord flushed without completion");
        Some(seq)
    }

    /// Feeds one key event through the table. Handles chord accumulation
    /// internally: a caller just calls this once per key event and reacts
    /// to the returned [`Dispatch`].
    pub fn feed(&mut self, event: KeyEvent) -> Dispatch {
        let token = event.to_readline_notation();
        self.pending.push(token);
        let candidate = self.pending.join(" ");

        if let Some(&action) = self.bindings.get(&candidate) {
            self.pending.clear();
            self.chord_started_at = None;
            debug!(target: "input.dispatch", seq = %candidate, action = action.name(), "bound");
            return Dispatch::Bound(action);
        }

        if self.has_longer_prefix(&candidate) {
            if self.chord_started_at.is_none() {
                self.chord_started_at = Some(Instant::now());
            }
            trace!(target: "input.dispatch", seq = %candidate, "chord pending");
            return Dispatch::ChordPending;
        }

        // No exact match and no extension possible: flush whatever was
        // pending and decide fallback behavior for the fresh key alone.
        self.pending.clear();
        self.chord_started_at = None;
        match event.code {
            core_input::KeyCode::Char(c) if event.mods.is_empty() => Dispatch::SelfInsert(c),
            _ => Dispatch::Unbound,
        }
    }

    fn has_longer_prefix(&self, candidate: &str) -> bool {
        self.bindings
            .keys()
            .any(|k| k.len() > candidate.len() && k.starts_with(candidate.as_str()))
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_input::{KeyCode, KeyModifiers};

    #[test]
    fn single_key_binding_dispatches_immediately() {
        let mut km = Keymap::emacs_defaults();
        let ev = KeyEvent::ctrl('a');
        assert_eq!(km.feed(ev), Dispatch::Bound(Action::BeginningOfLine));
    }

    #[test]
    fn unbound_printable_self_inserts() {
        let mut km = Keymap::emacs_defaults();
        let ev = KeyEvent::plain(KeyCode::Char('q'));
        assert_eq!(km.feed(ev), Dispatch::SelfInsert('q'));
    }

    #[test]
    fn unbound_control_key_is_silently_dropped() {
        let mut km = Keymap::new();
        let ev = KeyEvent::ctrl('z');
        assert_eq!(km.feed(ev), Dispatch::Unbound);
    }

    #[test]
    fn chord_completes_across_two_keys() {
        let mut km = Keymap::new();
        km.bind("C-x C-s", Action::AcceptLine);
        let first = km.feed(KeyEvent::ctrl('x'));
        assert_eq!(first, Dispatch::ChordPending);
        assert!(km.in_chord());
        let second = km.feed(KeyEvent::ctrl('s'));
        assert_eq!(second, Dispatch::Bound(Action::AcceptLine));
        assert!(!km.in_chord());
    }

    #[test]
    fn chord_flushes_when_next_key_extends_nothing() {
        let mut km = Keymap::new();
        km.bind("C-x C-s", Action::AcceptLine);
        km.feed(KeyEvent::ctrl('x'));
        assert!(km.in_chord());
        // 'q' doesn't extend "C-x" into any binding.
        let result = km.feed(KeyEvent::plain(KeyCode::Char('q')));
        assert_eq!(result, Dispatch::SelfInsert('q'));
        assert!(!km.in_chord());
    }

    #[test]
    fn rebinding_and_unbinding() {
        let mut km = Keymap::new();
        km.bind("C-a", Action::BeginningOfLine);
        assert!(km.is_bound("C-a"));
        km.unbind("C-a").unwrap();
        assert!(!km.is_bound("C-a"));
        assert!(matches!(km.unbind("C-a"), Err(KeymapError::NoSuchBinding(_))));
    }

    #[test]
    fn meta_letter_binding() {
        let mut km = Keymap::emacs_defaults();
        let ev = KeyEvent::new(KeyCode::Char('f'), KeyModifiers::META);
        assert_eq!(km.feed(ev), Dispatch::Bound(Action::ForwardWord));
    }

    #[test]
    fn arrow_keys_bound_to_history_navigation() {
        let mut km = Keymap::emacs_defaults();
        assert_eq!(
            km.feed(KeyEvent::plain(KeyCode::ArrowUp)),
            Dispatch::Bound(Action::HistoryPrevious)
        );
        assert_eq!(
            km.feed(KeyEvent::plain(KeyCode::ArrowDown)),
            Dispatch::Bound(Action::HistoryNext)
        );
    }
}
