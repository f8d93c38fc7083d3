//! Error types for the engine and its stores.
//!
//! The turn cycle itself never fails: disallowed reveals are no-ops. Errors
//! only surface from configuration and from concrete store backends.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced to callers of the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The game cannot be dealt with the given configuration
    /// (empty or duplicate symbols, zero history limits).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A store backend failed outside the best-effort write path.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors raised by key-value store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing data is not valid JSON.
    #[error("store data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
