//! The `Engine` glue layer: owns every component and turns one dispatched
//! [`core_keymap::Action`] into buffer mutations, recorded undo history,
//! and a render pass, through an explicit, testable state machine.

use core_config::EngineConfig;
use core_history::{HistoryStore, RecallCache};
use core_keymap::{Action, Dispatch, Keymap};
use core_render::{RenderInput, RenderPipeline, Viewport, WriteOp};
use core_terminal::{ColorDepth, Mode, RawModeGuard, TerminalCapabilities};
use core_text::{Buffer, BufferManager, ChangeTracker, KillRing, TextResult, YankSpan};
use tracing::debug;

use crate::actions;
use crate::completion::CompletionSource;
use crate::dispatch::Dispatched;
use crate::error::EngineResult;
use crate::persistence::HistoryPersistence;
use crate::session::{SearchState, SessionMode};

/// Tracks whether the two most recent kill actions were both forward or
/// both backward, so successive kills concatenate into one ring entry
/// ("Kill ring append semantics").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KillDirection {
    Forward,
    Backward,
}

pub struct Engine {
    pub(crate) config: EngineConfig,
    pub(crate) buffers: BufferManager,
    pub(crate) keymap: Keymap,
    pub(crate) history: HistoryStore,
    pub(crate) recall_cache: RecallCache,
    pub(crate) kill_ring: KillRing,
    pub(crate) render: RenderPipeline,
    pub(crate) caps: TerminalCapabilities,
    pub(crate) mode: Mode,
    pub(crate) viewport: Viewport,
    pub(crate) session: SessionMode,
    pub(crate) completion_source: Option<Box<dyn CompletionSource>>,
    pub(crate) persistence: Box<dyn HistoryPersistence>,
    pub(crate) history_cursor: Option<usize>,
    pub(crate) live_buffer_stash: Option<String>,
    pub(crate) last_kill_direction: Option<KillDirection>,
    pub(crate) last_yank_span: Option<YankSpan>,
    pub(crate) cwd: String,
}

impl Engine {
    /// Builds a fully-formed, pure (no I/O) engine. `caps`/`mode` are
    /// supplied by the caller (normally [`crate::engine_init`], which does
    /// the actual terminal probing) so the engine itself stays unit
    /// testable against fabricated capabilities.
    pub fn new(
        config: EngineConfig,
        caps: TerminalCapabilities,
        mode: Mode,
        mut persistence: Box<dyn HistoryPersistence>,
    ) -> Self {
        let keymap = match config.editing_mode {
            core_config::EditingMode::Emacs => Keymap::emacs_defaults(),
            core_config::EditingMode::Vi => Keymap::vi_command_defaults(),
        };

        let mut history = HistoryStore::new(config.history_max_entries, config.history_ignore_leading_space);
        for persisted in persistence.load_all() {
            if let Some(id) = history.append(
                &persisted.raw_command,
                persisted.created_at,
                persisted.cwd,
                persisted.original_multiline,
            ) {
                if let Some(code) = persisted.exit_code {
                    let _ = history.set_exit_code(id, code);
                }
            }
        }

        let (cols, rows) = core_terminal::terminal_size();

        Engine {
            buffers: BufferManager::new(config.max_undo_sequences, config.max_undo_memory_bytes),
            keymap,
            history,
            recall_cache: RecallCache::new(256, std::time::Duration::from_secs(300)),
            kill_ring: KillRing::new(config.kill_ring_size),
            render: RenderPipeline::default(),
            caps,
            mode,
            viewport: Viewport::new(rows as usize, cols as usize),
            session: SessionMode::Idle,
            completion_source: None,
            persistence,
            history_cursor: None,
            live_buffer_stash: None,
            last_kill_direction: None,
            last_yank_span: None,
            cwd: String::new(),
            config,
        }
    }

    pub fn set_cwd(&mut self, cwd: impl Into<String>) {
        self.cwd = cwd.into();
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffers.current().buffer
    }

    pub fn bind_key(&mut self, sequence: &str, action_name: &str) -> bool {
        match Action::from_name(action_name) {
            Some(action) => {
                self.keymap.bind(sequence, action);
                true
            }
            None => false,
        }
    }

    pub fn unbind_key(&mut self, sequence: &str) -> bool {
        self.keymap.unbind(sequence).is_ok()
    }

    pub fn register_completion_source(&mut self, source: Box<dyn CompletionSource>) {
        self.completion_source = Some(source);
    }

    /// Flushes history persistence. Called once at session end.
    pub fn shutdown(&mut self) {
        self.persistence.flush();
    }

    // ---- recorded mutation helpers, used by `actions` -----------------

    pub(crate) fn insert_recorded(&mut self, byte_pos: usize, text: &str) -> TextResult<()> {
        let mb = self.buffers.current_mut();
        let before = mb.buffer.cursor();
        mb.buffer.insert(byte_pos, text)?;
        let after = mb.buffer.cursor();
        mb.tracker.record_insert(byte_pos, text.as_bytes().to_vec(), before, after);
        Ok(())
    }

    pub(crate) fn delete_recorded(&mut self, byte_pos: usize, n_bytes: usize) -> TextResult<Vec<u8>> {
        let mb = self.buffers.current_mut();
        let before = mb.buffer.cursor();
        let removed = mb.buffer.delete(byte_pos, n_bytes)?;
        let after = mb.buffer.cursor();
        mb.tracker.record_delete(byte_pos, removed.clone(), before, after);
        Ok(removed)
    }

    pub(crate) fn replace_recorded(&mut self, byte_pos: usize, n_bytes: usize, text: &str) -> TextResult<Vec<u8>> {
        let mb = self.buffers.current_mut();
        let before = mb.buffer.cursor();
        let removed = mb.buffer.replace(byte_pos, n_bytes, text)?;
        let after = mb.buffer.cursor();
        mb.tracker.record_replace(byte_pos, removed.clone(), text.as_bytes().to_vec(), before, after);
        Ok(removed)
    }

    pub(crate) fn end_current_sequence(&mut self) {
        self.buffers.current_mut().tracker.end_sequence();
    }

    /// Replaces the entire buffer content outright and resets its undo
    /// tracker, bypassing the recorded-mutation path entirely. Used by
    /// history recall and `abort_line`: the new content has no relationship
    /// to whatever undo history preceded it (see DESIGN.md).
    pub(crate) fn load_into_buffer(&mut self, text: &str, cursor_at_end: bool) {
        let max_sequences = self.config.max_undo_sequences;
        let max_bytes = self.config.max_undo_memory_bytes;
        let mb = self.buffers.current_mut();
        let len = mb.buffer.length_bytes();
        if len > 0 {
            let _ = mb.buffer.delete(0, len);
        }
        if !text.is_empty() {
            let _ = mb.buffer.insert(0, text);
        }
        if cursor_at_end {
            let cp = mb.buffer.codepoint_count();
            mb.buffer.cursor_move_absolute(cp);
        } else {
            mb.buffer.cursor_move_absolute(0);
        }
        mb.buffer.clear_modified();
        mb.tracker = ChangeTracker::new(max_sequences, max_bytes);
    }

    pub(crate) fn note_non_kill_action(&mut self) {
        self.last_kill_direction = None;
    }

    pub(crate) fn kill_append_mode(&mut self, dir: KillDirection) -> core_text::KillAppend {
        let mode = match self.last_kill_direction {
            Some(d) if d == dir => match dir {
                KillDirection::Forward => core_text::KillAppend::AppendForward,
                KillDirection::Backward => core_text::KillAppend::AppendBackward,
            },
            _ => core_text::KillAppend::NewEntry,
        };
        self.last_kill_direction = Some(dir);
        mode
    }

    pub(crate) fn now_unix(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    // ---- dispatch -------------------------------------------------------

    /// Routes one key event through whatever sub-mode is active: lookup
    /// binding -> execute action -> record change -> redraw, with the
    /// byte-read/parse steps happening upstream in [`crate::readline`].
    pub fn dispatch(&mut self, event: core_input::KeyEvent) -> Dispatched {
        match &self.session {
            SessionMode::QuotedInsert => self.dispatch_quoted_insert(event),
            SessionMode::Search(_) => self.dispatch_search(event),
            _ => match self.keymap.feed(event) {
                Dispatch::Bound(action) => self.execute_action(action, event),
                Dispatch::SelfInsert(c) => {
                    self.note_non_kill_action();
                    let outcome = actions::self_insert(self, c);
                    self.finish(outcome)
                }
                Dispatch::Unbound | Dispatch::ChordPending => Dispatched::NoChange,
            },
        }
    }

    fn finish(&mut self, outcome: Dispatched) -> Dispatched {
        self.end_current_sequence();
        outcome
    }

    fn execute_action(&mut self, action: Action, event: core_input::KeyEvent) -> Dispatched {
        let is_kill = matches!(
            action,
            Action::KillLine | Action::BackwardKillLine | Action::KillWord | Action::BackwardKillWord | Action::UnixWordRubout
        );
        if !is_kill {
            self.note_non_kill_action();
        }
        let outcome = match action {
            Action::BeginningOfLine => actions::beginning_of_line(self),
            Action::EndOfLine => actions::end_of_line(self),
            Action::ForwardChar => actions::forward_char(self),
            Action::BackwardChar => actions::backward_char(self),
            Action::ForwardWord => actions::forward_word(self),
            Action::BackwardWord => actions::backward_word(self),
            Action::DeleteChar => {
                if self.buffer().length_bytes() == 0 {
                    Dispatched::Eof
                } else {
                    actions::delete_char(self)
                }
            }
            Action::BackwardDeleteChar => actions::backward_delete_char(self),
            Action::KillLine => actions::kill_line(self),
            Action::BackwardKillLine => actions::backward_kill_line(self),
            Action::KillWord => actions::kill_word(self),
            Action::BackwardKillWord => actions::backward_kill_word(self),
            Action::UnixWordRubout => actions::unix_word_rubout(self),
            Action::DeleteHorizontalSpace => actions::delete_horizontal_space(self),
            Action::Yank => actions::yank(self),
            Action::YankPop => actions::yank_pop(self),
            Action::TransposeChars => actions::transpose_chars(self),
            Action::TransposeWords => actions::transpose_words(self),
            Action::SelfInsert => match event.code {
                core_input::KeyCode::Char(c) => actions::self_insert(self, c),
                _ => Dispatched::NoChange,
            },
            Action::QuotedInsert => actions::quoted_insert(self),
            Action::Undo => actions::undo(self),
            Action::Redo => actions::redo(self),
            Action::HistoryPrevious => actions::history_previous(self),
            Action::HistoryNext => actions::history_next(self),
            Action::ReverseSearchHistory => actions::reverse_search_history(self),
            Action::ForwardSearchHistory => actions::forward_search_history(self),
            Action::HistorySearchBackward => actions::history_search_backward(self),
            Action::HistorySearchForward => actions::history_search_forward(self),
            Action::Complete => actions::complete(self),
            Action::PossibleCompletions => actions::possible_completions(self),
            Action::InsertCompletions => actions::insert_completions(self),
            Action::UpcaseWord => actions::upcase_word(self),
            Action::DowncaseWord => actions::downcase_word(self),
            Action::CapitalizeWord => actions::capitalize_word(self),
            Action::AbortLine => actions::abort_line(self),
            Action::AcceptLine => actions::accept_line(self),
            Action::ClearScreen => Dispatched::ClearScreen,
            Action::Interrupt => Dispatched::Interrupted,
            Action::Suspend => Dispatched::Suspend,
            Action::SendEof => actions::send_eof(self),
        };
        self.finish(outcome)
    }

    fn dispatch_quoted_insert(&mut self, event: core_input::KeyEvent) -> Dispatched {
        self.session = SessionMode::Idle;
        self.note_non_kill_action();
        let ch = match event.code {
            core_input::KeyCode::Char(c) => c,
            core_input::KeyCode::Enter => '\n',
            core_input::KeyCode::Tab => '\t',
            _ => return Dispatched::NoChange,
        };
        let outcome = actions::self_insert(self, ch);
        self.finish(outcome)
    }

    fn dispatch_search(&mut self, event: core_input::KeyEvent) -> Dispatched {
        match self.keymap.feed(event) {
            Dispatch::Bound(action) => self.execute_search_action(action),
            Dispatch::SelfInsert(c) => {
                if let SessionMode::Search(state) = &mut self.session {
                    state.push_char(c);
                }
                self.refresh_search_preview();
                Dispatched::Redraw
            }
            Dispatch::Unbound | Dispatch::ChordPending => Dispatched::NoChange,
        }
    }

    fn execute_search_action(&mut self, action: Action) -> Dispatched {
        match action {
            Action::AbortLine => actions::abort_line(self),
            Action::AcceptLine => actions::accept_line(self),
            Action::BackwardDeleteChar | Action::DeleteChar => {
                if let SessionMode::Search(state) = &mut self.session {
                    state.pop_char();
                }
                self.refresh_search_preview();
                Dispatched::Redraw
            }
            Action::ReverseSearchHistory | Action::HistoryPrevious => self.cycle_search(core_history::SearchDirection::Backward),
            Action::ForwardSearchHistory | Action::HistoryNext => self.cycle_search(core_history::SearchDirection::Forward),
            _ => Dispatched::NoChange,
        }
    }

    fn cycle_search(&mut self, wanted: core_history::SearchDirection) -> Dispatched {
        if let SessionMode::Search(state) = &mut self.session {
            if state.session.direction != wanted {
                state.session.toggle_direction();
            } else {
                state.session.cycle_to_next_match();
            }
        }
        self.refresh_search_preview();
        Dispatched::Redraw
    }

    fn refresh_search_preview(&mut self) {
        let preview = match &mut self.session {
            SessionMode::Search(state) => state.session.search(&self.history, 0).map(|e| e.recall_source().to_string()),
            _ => None,
        };
        if let SessionMode::Search(state) = &mut self.session {
            state.preview = preview.clone();
        }
        debug!(target: "actions.search", matched = preview.is_some(), "search preview refreshed");
    }

    // ---- rendering --------------------------------------------------------

    fn effective_prompt<'a>(&'a self, host_prompt: &'a str) -> std::borrow::Cow<'a, str> {
        match &self.session {
            SessionMode::Search(state) => {
                let label = match state.session.direction {
                    core_history::SearchDirection::Backward => "reverse-i-search",
                    core_history::SearchDirection::Forward => "i-search",
                };
                std::borrow::Cow::Owned(format!("({label})`{}': ", state.session.query))
            }
            _ => std::borrow::Cow::Borrowed(host_prompt),
        }
    }

    fn current_render_content(&self) -> String {
        match &self.session {
            SessionMode::Search(state) => state.preview.clone().unwrap_or_default(),
            _ => self.buffer().get_complete_content(),
        }
    }

    fn current_render_cursor(&self, content: &str) -> usize {
        match &self.session {
            SessionMode::Search(_) => content.chars().count(),
            _ => self.buffer().cursor().codepoint,
        }
    }

    fn update_viewport(&mut self, content: &str, cursor_codepoint: usize) {
        let prefix: String = content.chars().take(cursor_codepoint).collect();
        let line = prefix.matches('\n').count();
        let col = prefix.rsplit('\n').next().map(|s| s.chars().count()).unwrap_or(0);
        let auto_scroll = self.config.auto_scroll;
        self.viewport.clamp_cursor_into_view(line, col, auto_scroll);
    }

    /// Discards the render pipeline's notion of "what's already on screen",
    /// forcing the next call to emit a full frame (used after `clear_screen`
    /// wipes the terminal out from under it).
    pub(crate) fn force_full_redraw(&mut self) {
        self.render = RenderPipeline::default();
    }

    /// Runs the render pipeline and writes its output to `out`. A no-op
    /// when `self.mode` is [`Mode::None`] ("the engine does not
    /// engage at all"). Public so a host driving its own I/O loop (or a
    /// test) can force a render pass outside of `read_line`.
    pub fn render_to(&mut self, prompt: &str, out: &mut impl std::io::Write) -> std::io::Result<()> {
        if !self.mode.engine_engaged() {
            return Ok(());
        }
        let effective_prompt = self.effective_prompt(prompt).into_owned();
        let content = self.current_render_content();
        let cursor_codepoint = self.current_render_cursor(&content);
        let color_depth = if self.mode.styling_enabled() { self.caps.color_depth } else { ColorDepth::None };

        let output = self.render.render(RenderInput {
            content: &content,
            cursor_codepoint,
            prompt: &effective_prompt,
            color_depth,
            tab_width: self.config.tab_width,
        });
        self.update_viewport(&content, cursor_codepoint);

        for write in &output.writes {
            match write {
                WriteOp::ClearLine => out.write_all(b"\r\x1b[K")?,
                WriteOp::Print(s) => out.write_all(s.as_bytes())?,
                WriteOp::MoveToColumn(col) => write!(out, "\x1b[{col}G")?,
            }
        }
        out.flush()
    }
}

/// Detects terminal capabilities, classifies the adaptive mode, and puts
/// fd 0 into raw mode, returning the engine together with the guard that
/// restores termios on drop. Kept separate from [`Engine::new`] so the
/// engine's core logic stays testable without a real terminal.
pub fn engine_init(config: EngineConfig, persistence: Box<dyn HistoryPersistence>) -> EngineResult<(Engine, RawModeGuard)> {
    use crossterm::tty::IsTty;

    let caps = TerminalCapabilities::detect();
    let stdin_is_tty = std::io::stdin().is_tty();
    let stdout_is_tty = std::io::stdout().is_tty();
    let mode = Mode::classify(&caps, stdin_is_tty, stdout_is_tty);
    let guard = RawModeGuard::enable(0)?;
    let engine = Engine::new(config, caps, mode, persistence);
    Ok((engine, guard))
}
