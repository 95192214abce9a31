//! # Setup Error Type
//!
//! The only fatal error surface in the app. Everything past setup runs
//! under the permissive regime: routing and relaying degrade to no-ops
//! instead of failing.

use thiserror::Error;

use shopfront_store::StoreError;

/// Failures while bringing the app up (or reading its input stream).
#[derive(Debug, Error)]
pub enum SetupError {
    /// The platform data directory could not be resolved and no
    /// `SHOPFRONT_STORE_PATH` override was given.
    #[error("could not determine the platform data directory")]
    NoDataDir,

    /// Opening the store file failed.
    #[error("store setup failed: {0}")]
    Store(#[from] StoreError),

    /// Reading the input stream failed.
    #[error("reading input failed: {0}")]
    Io(#[from] std::io::Error),
}
