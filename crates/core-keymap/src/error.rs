use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeymapError {
    #[error("key sequence is empty")]
    EmptySequence,
    #[error("no binding named action {0:?}")]
    UnknownAction(String),
    #[error("no binding exists for {0:?}")]
    NoSuchBinding(String),
}

pub type KeymapResult<T> = Result<T, KeymapError>;
