//! Default keybinding tables. `EMACS_DEFAULTS` is the engine's standard
//! Readline-compatible preset; `VI_COMMAND_DEFAULTS` is the command-mode
//! overlay used when `editing_mode = vi`.

use crate::action::Action;

pub const EMACS_DEFAULTS: &[(&str, Action)] = &[
    // Movement
    ("C-a", Action::BeginningOfLine),
    ("HOME", Action::BeginningOfLine),
    ("C-e", Action::EndOfLine),
    ("END", Action::EndOfLine),
    ("C-f", Action::ForwardChar),
    ("RIGHT", Action::ForwardChar),
    ("C-b", Action::BackwardChar),
    ("LEFT", Action::BackwardChar),
    ("M-f", Action::ForwardWord),
    ("M-b", Action::BackwardWord),
    // Deletion
    ("C-d", Action::DeleteChar),
    ("DEL", Action::DeleteChar),
    ("RUBOUT", Action::BackwardDeleteChar),
    ("C-h", Action::BackwardDeleteChar),
    ("C-k", Action::KillLine),
    ("C-u", Action::BackwardKillLine),
    ("M-d", Action::KillWord),
    ("M-RUBOUT", Action::BackwardKillWord),
    ("C-w", Action::UnixWordRubout),
    ("M-\\", Action::DeleteHorizontalSpace),
    // Paste
    ("C-y", Action::Yank),
    ("M-y", Action::YankPop),
    // Structural
    ("C-t", Action::TransposeChars),
    ("M-t", Action::TransposeWords),
    ("C-q", Action::QuotedInsert),
    ("C-v", Action::QuotedInsert),
    // Undo/redo
    ("C-_", Action::Undo),
    ("C-x C-u", Action::Undo),
    ("C-x C-r", Action::Redo),
    // History
    ("UP", Action::HistoryPrevious),
    ("C-p", Action::HistoryPrevious),
    ("DOWN", Action::HistoryNext),
    ("C-n", Action::HistoryNext),
    ("C-r", Action::ReverseSearchHistory),
    ("C-s", Action::ForwardSearchHistory),
    ("M-p", Action::HistorySearchBackward),
    ("M-n", Action::HistorySearchForward),
    // Completion
    ("TAB", Action::Complete),
    ("M-?", Action::PossibleCompletions),
    ("M-*", Action::InsertCompletions),
    // Case
    ("M-u", Action::UpcaseWord),
    ("M-l", Action::DowncaseWord),
    ("M-c", Action::CapitalizeWord),
    // Critical
    ("C-g", Action::AbortLine),
    ("RET", Action::AcceptLine),
    ("C-l", Action::ClearScreen),
    ("C-c", Action::Interrupt),
    ("C-z", Action::Suspend),
    // `send_eof` has no binding of its own: C-d is bound to `delete_char`
    // above, and `core-actions` reinterprets it as EOF when the buffer is
    // empty (Readline's actual behavior), so the two actions never compete
    // for the same key.
];

/// vi command-mode (normal-mode-lite) bindings: single-letter motions and
/// edits mapped onto the same ≈40-action set, not a full vi operator/motion
/// grammar, which is out of scope for this engine.
pub const VI_COMMAND_DEFAULTS: &[(&str, Action)] = &[
    ("h", Action::BackwardChar),
    ("l", Action::ForwardChar),
    ("w", Action::ForwardWord),
    ("b", Action::BackwardWord),
    ("0", Action::BeginningOfLine),
    ("$", Action::EndOfLine),
    ("x", Action::DeleteChar),
    ("X", Action::BackwardDeleteChar),
    ("D", Action::KillLine),
    ("dw", Action::KillWord),
    ("p", Action::Yank),
    ("u", Action::Undo),
    ("k", Action::HistoryPrevious),
    ("j", Action::HistoryNext),
    ("/", Action::ReverseSearchHistory),
    ("i", Action::SelfInsert),
    ("RET", Action::AcceptLine),
    ("ESC", Action::AbortLine),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Keymap;

    #[test]
    fn emacs_defaults_bind_without_duplicate_sequences() {
        let mut seen = std::collections::HashSet::new();
        for (seq, _) in EMACS_DEFAULTS {
            assert!(seen.insert(*seq), "duplicate binding for {seq}");
        }
    }

    #[test]
    fn emacs_defaults_load_into_a_keymap() {
        let km = Keymap::emacs_defaults();
        assert!(km.is_bound("C-a"));
        assert!(km.is_bound("RET"));
    }

    #[test]
    fn vi_defaults_load_into_a_keymap() {
        let km = Keymap::vi_command_defaults();
        assert!(km.is_bound("h"));
        assert!(km.is_bound("ESC"));
    }
}
