use crate::word::Word;
use thiserror::Error;

/// Why a candidate guess was turned away before touching the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("guess must be exactly 5 letters A-Z (got {0:?})")]
    MalformedGuess(String),
    #[error("{0} has already been guessed")]
    DuplicateGuess(Word),
    #[error("{0} is not in the word list")]
    UnknownWord(Word),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("the game is already over")]
    GameOver,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data could not be encoded: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum WordSourceError {
    #[error("word list is empty")]
    Empty,
}
