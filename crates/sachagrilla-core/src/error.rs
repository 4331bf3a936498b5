//! Error types for the Sachagrilla engine.
//!
//! We use `thiserror` for ergonomic error definitions. Note what is NOT
//! here: an attempt that finds no eligible word is an expected outcome of
//! dictionary sparsity, not an error, and travels as [`crate::builder::BuildOutcome::Infeasible`]
//! rather than through these types.

use thiserror::Error;

use crate::types::WordId;

/// Result type alias for Sachagrilla operations.
pub type Result<T> = std::result::Result<T, SachagrillaError>;

/// Main error type for Sachagrilla operations.
#[derive(Error, Debug)]
pub enum SachagrillaError {
    /// Store-related errors
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A word offered as eligible has no clue. The store guarantees one
    /// clue per word, so this signals upstream data corruption, not
    /// ordinary search failure.
    #[error("word {0} has no associated clue; the dictionary is corrupt")]
    MissingClue(WordId),

    /// Invalid configuration (empty candidate set, bad column pair, ...)
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP errors while collecting data
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The downloaded page no longer matches the expected markup
    #[error("extraction error: {0}")]
    Extract(String),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the persistence layer.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no quotes available in the store; run the collector first")]
    NoQuotes,

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl From<rusqlite::Error> for SachagrillaError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Store(StoreError::Sqlite(err))
    }
}
