//! Error taxonomy for the text buffer and buffer manager.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextError {
    #[error("buffer is read-only")]
    ReadOnly,
    #[error("position {0} does not lie on a UTF-8 character boundary")]
    InvalidBoundary(usize),
    #[error("position {0} is out of range (buffer holds {1} bytes)")]
    OutOfRange(usize, usize),
    #[error("a buffer named {0:?} already exists")]
    NameExists(String),
    #[error("no buffer named {0:?}")]
    NameNotFound(String),
    #[error("no buffer with id {0}")]
    IdNotFound(u64),
}

pub type TextResult<T> = Result<T, TextError>;
