//! Terminal capability detection ("Terminal capabilities"). Detected
//! once at engine start and cached; callers may re-detect on explicit
//! request (a user-issued "redetect terminal" command, say), but nothing in
//! the hot path re-runs this.

use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ColorDepth {
    None,
    Ansi16,
    Ansi256,
    TrueColor,
}

#[derive(Debug, Clone)]
pub struct TerminalCapabilities {
    pub color_depth: ColorDepth,
    pub cursor_positioning: bool,
    pub mouse: bool,
    pub bracketed_paste: bool,
    pub unicode: bool,
    /// Best-effort identification string, e.g. `"iTerm.app"`, `"tmux"`,
    /// `"xterm-256color"`, `"unknown"`.
    pub signature: String,
}

impl TerminalCapabilities {
    /// Environment-signature detection: `TERM_PROGRAM`, `TERM`,
    /// `COLORTERM`, and tool-specific vars, checked before any runtime
    /// probing is attempted.
    pub fn detect() -> Self {
        Self::detect_from_env(&EnvReader)
    }

    pub(crate) fn detect_from_env(env: &dyn EnvLookup) -> Self {
        let term = env.get("TERM").unwrap_or_default();
        let term_program = env.get("TERM_PROGRAM").unwrap_or_default();
        let colorterm = env.get("COLORTERM").unwrap_or_default();

        let color_depth = if term == "dumb" {
            ColorDepth::None
        } else if colorterm == "truecolor" || colorterm == "24bit" {
            ColorDepth::TrueColor
        } else if term_program == "iTerm.app" || term_program == "WezTerm" || term_program == "vscode" {
            ColorDepth::TrueColor
        } else if term.contains("256color") {
            ColorDepth::Ansi256
        } else if term.is_empty() {
            ColorDepth::None
        } else {
            ColorDepth::Ansi16
        };

        let signature = if !term_program.is_empty() {
            term_program
        } else if !term.is_empty() {
            term
        } else {
            "unknown".to_string()
        };

        let is_dumb = signature == "dumb" || color_depth == ColorDepth::None;

        Self {
            color_depth,
            cursor_positioning: !is_dumb,
            mouse: !is_dumb,
            bracketed_paste: !is_dumb,
            unicode: env
                .get("LANG")
                .map(|l| l.to_lowercase().contains("utf-8") || l.to_lowercase().contains("utf8"))
                .unwrap_or(true),
            signature,
        }
    }
}

/// Abstraction over environment-variable lookup so detection logic can be
/// unit tested without mutating the real process environment.
pub(crate) trait EnvLookup {
    fn get(&self, key: &str) -> Option<String>;
}

pub(crate) struct EnvReader;

impl EnvLookup for EnvReader {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

#[cfg(test)]
pub(crate) struct FakeEnv(pub Vec<(&'static str, &'static str)>);

#[cfg(test)]
impl EnvLookup for FakeEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string())
    }
}
