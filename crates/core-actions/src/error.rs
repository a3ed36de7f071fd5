//! Error taxonomy for the glue layer. Buffer/keymap/history
//! errors are handled internally (an action that fails simply records no
//! change and triggers no redraw); what's left here is the read-line loop's
//! own exit conditions: terminal I/O failure is fatal to the session, the
//! rest are flow-control, not errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("terminal error: {0}")]
    Terminal(#[from] core_terminal::TerminalError),
    #[error("input error: {0}")]
    Input(#[from] core_input::InputError),
}

pub type EngineResult<T> = Result<T, EngineError>;
