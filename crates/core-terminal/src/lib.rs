//! Terminal integration: raw-mode termios control, capability detection,
//! adaptive mode classification, and optional runtime probing.
//!
//! This is the only crate that owns the one piece of globally shared
//! mutable state in the engine: the saved/raw termios pair. Every
//! exit path — normal shutdown, error, or probe timeout — restores it via
//! [`RawModeGuard`]'s `Drop` impl.

pub mod capabilities;
pub mod error;
pub mod mode;
pub mod probe;
pub mod raw;

pub use capabilities::{ColorDepth, TerminalCapabilities};
pub use error::{TerminalError, TerminalResult};
pub use mode::Mode;
pub use probe::{DEFAULT_PROBE_TIMEOUT, probe, probe_cursor_position_support};
pub use raw::RawModeGuard;

/// Queries the terminal's current size in columns/rows, or a conservative
/// 80x24 default if the query fails (e.g. stdout is not a tty).
pub fn terminal_size() -> (u16, u16) {
    crossterm::terminal::size().unwrap_or((80, 24))
}
