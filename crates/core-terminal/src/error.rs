//! Terminal I/O error taxonomy.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("termios call failed: {0}")]
    Termios(#[source] std::io::Error),
    #[error("terminal size query failed: {0}")]
    SizeQuery(#[source] std::io::Error),
}

pub type TerminalResult<T> = Result<T, TerminalError>;
