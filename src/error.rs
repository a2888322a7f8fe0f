//! Error taxonomy shared by the engine, the cache and sessions

use crate::cache::CacheError;
use crate::core::{PatternError, WordError};
use std::io;

/// Errors raised by the engine
///
/// Every variant leaves the caller's state untouched; see each variant for
/// how it is expected to be handled.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed guess or pattern; always recoverable
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No pool word is consistent with the submitted guess and pattern
    #[error("no candidate left for guess '{guess}' with pattern {pattern}")]
    PoolExhausted { guess: String, pattern: String },

    /// The session already used every try it was given
    #[error("no tries left ({max_tries} used)")]
    TriesExhausted { max_tries: usize },

    /// A persisted artifact failed structural validation
    #[error("cache corrupt: {0}")]
    CacheCorrupt(String),

    /// A parallel worker panicked or the worker pool could not start
    #[error("computation failed: {0}")]
    ComputeFailure(String),

    #[error("dictionary {0} has no word of the requested length")]
    EmptyDictionary(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Cache(CacheError),
}

impl From<CacheError> for Error {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::Corrupt(reason) => Self::CacheCorrupt(reason),
            other => Self::Cache(other),
        }
    }
}

impl From<WordError> for Error {
    fn from(err: WordError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl From<PatternError> for Error {
    fn from(err: PatternError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
