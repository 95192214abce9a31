//! # Store Error Types
//!
//! Failures crossing the persistence boundary. The cart wiring in the app
//! treats every one of these as a warning and degrades to doing nothing;
//! the binary's setup path is the only place they are fatal.

use thiserror::Error;

/// Persistence operation failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file or a stored value is not the JSON we wrote.
    #[error("store data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The store file path has no parent directory to create.
    #[error("store path {0} has no parent directory")]
    BadPath(String),
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;
