use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("no history entry with id {0}")]
    IdNotFound(u64),
    #[error("history store is empty")]
    Empty,
    #[error("malformed history entry: {0}")]
    Malformed(String),
}

pub type HistoryResult<T> = Result<T, HistoryError>;
