//! What one call to [`crate::Engine::dispatch`] can report back to the
//! read-line loop ("read byte -> parse -> lookup binding -> execute
//! action -> record change -> redraw", collapsed into a single return value
//! instead of the source's side-channel flags).

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// Buffer or session-mode state changed; the host should re-render.
    Redraw,
    /// Nothing observable changed (unbound key, chord still pending, a
    /// boundary no-op): no redraw is strictly necessary.
    NoChange,
    /// `clear_screen`: the host should wipe the terminal before the next
    /// render rather than rely on the diff-based pipeline, which has no
    /// notion of "the whole screen is now garbage."
    ClearScreen,
    /// `accept_line` finalized a command.
    Accepted(String),
    /// `abort_line` outside of any active sub-mode (the buffer is cleared).
    Aborted,
    /// `interrupt` (Ctrl-C under this engine's synchronous model: surfaced
    /// to the host rather than raising a real signal).
    Interrupted,
    /// `suspend` (Ctrl-Z): the host should suspend the session; the engine
    /// itself has no notion of job control.
    Suspend,
    /// `send_eof` on an empty buffer, or the input stream itself ended.
    Eof,
}
