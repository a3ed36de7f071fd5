//! The ≈40 Readline-compatible actions a key sequence can dispatch to.
//! Deliberately a plain enum with no payload: the triggering [`KeyEvent`]
//! (which carries e.g. the character for `SelfInsert`) travels alongside the
//! resolved `Action` rather than being folded into it, since the engine that
//! executes the action (`core-actions`) needs the raw event too.
//!
//! [`KeyEvent`]: core_input::KeyEvent

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    BeginningOfLine,
    EndOfLine,
    ForwardChar,
    BackwardChar,
    ForwardWord,
    BackwardWord,

    // Deletion
    DeleteChar,
    BackwardDeleteChar,
    KillLine,
    BackwardKillLine,
    KillWord,
    BackwardKillWord,
    UnixWordRubout,
    DeleteHorizontalSpace,

    // Paste
    Yank,
    YankPop,

    // Structural
    TransposeChars,
    TransposeWords,
    SelfInsert,
    QuotedInsert,

    // Undo/redo, needed for the change tracker's own undo/redo roundtrip.
    Undo,
    Redo,

    // History
    HistoryPrevious,
    HistoryNext,
    ReverseSearchHistory,
    ForwardSearchHistory,
    HistorySearchBackward,
    HistorySearchForward,

    // Completion
    Complete,
    PossibleCompletions,
    InsertCompletions,

    // Case
    UpcaseWord,
    DowncaseWord,
    CapitalizeWord,

    // Critical
    AbortLine,
    AcceptLine,
    ClearScreen,
    Interrupt,
    Suspend,
    SendEof,
}

impl Action {
    /// The lower_snake_case name used in config files and `engine_bind_key`.
    pub fn name(self) -> &'static str {
        match self {
            Action::BeginningOfLine => "beginning_of_line",
            Action::EndOfLine => "end_of_line",
            Action::ForwardChar => "forward_char",
            Action::BackwardChar => "backward_char",
            Action::ForwardWord => "forward_word",
            Action::BackwardWord => "backward_word",
            Action::DeleteChar => "delete_char",
            Action::BackwardDeleteChar => "backward_delete_char",
            Action::KillLine => "kill_line",
            Action::BackwardKillLine => "backward_kill_line",
            Action::KillWord => "kill_word",
            Action::BackwardKillWord => "backward_kill_word",
            Action::UnixWordRubout => "unix_word_rubout",
            Action::DeleteHorizontalSpace => "delete_horizontal_space",
            Action::Yank => "yank",
            Action::YankPop => "yank_pop",
            Action::TransposeChars => "transpose_chars",
            Action::TransposeWords => "transpose_words",
            Action::SelfInsert => "self_insert",
            Action::QuotedInsert => "quoted_insert",
            Action::Undo => "undo",
            Action::Redo => "redo",
            Action::HistoryPrevious => "history_previous",
            Action::HistoryNext => "history_next",
            Action::ReverseSearchHistory => "reverse_search_history",
            Action::ForwardSearchHistory => "forward_search_history",
            Action::HistorySearchBackward => "history_search_backward",
            Action::HistorySearchForward => "history_search_forward",
            Action::Complete => "complete",
            Action::PossibleCompletions => "possible_completions",
            Action::InsertCompletions => "insert_completions",
            Action::UpcaseWord => "upcase_word",
            Action::DowncaseWord => "downcase_word",
            Action::CapitalizeWord => "capitalize_word",
            Action::AbortLine => "abort_line",
            Action::AcceptLine => "accept_line",
            Action::ClearScreen => "clear_screen",
            Action::Interrupt => "interrupt",
            Action::Suspend => "suspend",
            Action::SendEof => "send_eof",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "beginning_of_line" => Action::BeginningOfLine,
            "end_of_line" => Action::EndOfLine,
            "forward_char" => Action::ForwardChar,
            "backward_char" => Action::BackwardChar,
            "forward_word" => Action::ForwardWord,
            "backward_word" => Action::BackwardWord,
            "delete_char" => Action::DeleteChar,
            "backward_delete_char" => Action::BackwardDeleteChar,
            "kill_line" => Action::KillLine,
            "backward_kill_line" => Action::BackwardKillLine,
            "kill_word" => Action::KillWord,
            "backward_kill_word" => Action::BackwardKillWord,
            "unix_word_rubout" => Action::UnixWordRubout,
            "delete_horizontal_space" => Action::DeleteHorizontalSpace,
            "yank" => Action::Yank,
            "yank_pop" => Action::YankPop,
            "transpose_chars" => Action::TransposeChars,
            "transpose_words" => Action::TransposeWords,
            "self_insert" => Action::SelfInsert,
            "quoted_insert" => Action::QuotedInsert,
            "undo" => Action::Undo,
            "redo" => Action::Redo,
            "history_previous" => Action::HistoryPrevious,
            "history_next" => Action::HistoryNext,
            "reverse_search_history" => Action::ReverseSearchHistory,
            "forward_search_history" => Action::ForwardSearchHistory,
            "history_search_backward" => Action::HistorySearchBackward,
            "history_search_forward" => Action::HistorySearchForward,
            "complete" => Action::Complete,
            "possible_completions" => Action::PossibleCompletions,
            "insert_completions" => Action::InsertCompletions,
            "upcase_word" => Action::UpcaseWord,
            "downcase_word" => Action::DowncaseWord,
            "capitalize_word" => Action::CapitalizeWord,
            "abort_line" => Action::AbortLine,
            "accept_line" => Action::AcceptLine,
            "clear_screen" => Action::ClearScreen,
            "interrupt" => Action::Interrupt,
            "suspend" => Action::Suspend,
            "send_eof" => Action::SendEof,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_round_trips_through_from_name() {
        let all = [
            Action::BeginningOfLine,
            Action::KillWord,
            Action::Yank,
            Action::SelfInsert,
            Action::AbortLine,
            Action::SendEof,
        ];
        for action in all {
            assert_eq!(Action::from_name(action.name()), Some(action));
        }
    }

    #[test]
    fn unknown_name_returns_none() {
        assert_eq!(Action::from_name("not_a_real_action"), None);
    }
}
