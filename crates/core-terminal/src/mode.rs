//! The five adaptive terminal modes, classified from
//! [`TerminalCapabilities`] plus whether stdin is itself a tty.

use crate::capabilities::{ColorDepth, TerminalCapabilities};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Non-interactive (pipe, script): the engine does not engage at all.
    None,
    /// Basic output, no cursor control: no styling, no interactive menus.
    Minimal,
    /// Capable stdout but non-tty stdin (editor-hosted terminals, AI
    /// assistant shells): styling and menus work, but raw-mode
    /// escape-sequence probing is skipped.
    Enhanced,
    /// Traditional tty: full functionality.
    Native,
    /// tmux / screen: `Native` plus pass-through/escape-doubling
    /// conventions.
    Multiplexed,
}

impl Mode {
    pub fn classify(caps: &TerminalCapabilities, stdin_is_tty: bool, stdout_is_tty: bool) -> Self {
        if !stdin_is_tty && !stdout_is_tty {
            return Mode::None;
        }
        if caps.color_depth == ColorDepth::None {
            return Mode::Minimal;
        }
        if !stdin_is_tty {
            return Mode::Enhanced;
        }
        if std::env::var("TMUX").is_ok() || caps.signature.contains("screen") {
            return Mode::Multiplexed;
        }
        Mode::Native
    }

    /// Whether the render pipeline should engage at all. `None` means the
    /// engine is not engaged: no highlighting, no cursor
    /// positioning, no escape sequences.
    pub fn engine_engaged(self) -> bool {
        self != Mode::None
    }

    /// Whether color/menu emission should happen. `Minimal` still runs the
    /// syntax tokenizer (so highlighting state stays consistent if
    /// capabilities change at runtime) but suppresses color and interactive
    /// menus.
    pub fn styling_enabled(self) -> bool {
        !matches!(self, Mode::None | Mode::Minimal)
    }

    /// Whether raw-mode escape-sequence probing is safe to attempt.
    pub fn probing_allowed(self) -> bool {
        matches!(self, Mode::Native | Mode::Multiplexed)
    }
}
