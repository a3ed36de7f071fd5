//! Input error taxonomy. `Timeout` and `EndOfStream` are deliberately
//! distinct: a timeout means "no byte arrived within the inter-byte window,"
//! a plain escape keypress; end-of-stream means the input source is gone.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("timed out waiting for the next byte")]
    Timeout,
    #[error("input stream ended")]
    EndOfStream,
    #[error("input byte was not valid UTF-8")]
    InvalidUtf8,
    #[error("i/o error reading input: {0}")]
    Io(#[from] std::io::Error),
}

pub type InputResult<T> = Result<T, InputError>;
