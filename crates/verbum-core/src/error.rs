//! Error types
//!
//! The scheduling functions themselves are total and never fail. Errors only
//! arise at the boundary: validating caller input, talking to an item store,
//! and loading configuration or snapshots.

/// Errors raised at the edges of the scheduler
#[derive(Debug, thiserror::Error)]
pub enum VerbumError {
    /// A quality rating outside `0..=5`
    #[error("Invalid quality rating {0}: must be between 0 and 5")]
    InvalidQuality(i64),

    /// Any other caller precondition violation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An item id the store does not know about
    #[error("Item not found: {0}")]
    NotFound(String),

    /// Store-level failure (poisoned lock, inconsistent snapshot)
    #[error("Store error: {0}")]
    Store(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VerbumError>;
