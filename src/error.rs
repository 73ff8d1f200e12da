//! Error types for the cache engine
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache operations.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backend could not be reached or refused the operation
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A backend operation was applied to a key holding another shape
    #[error("Wrong type: {0}")]
    WrongType(String),

    /// Payload could not be encoded or decoded as the requested type
    #[error("Codec error: {0}")]
    Codec(String),

    /// The caller-supplied loader failed
    #[error("Loader failed: {0}")]
    Loader(anyhow::Error),

    /// Key is empty
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// TTL of zero was requested
    #[error("Invalid TTL: {0}")]
    InvalidTtl(String),

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CacheError {
    // == Loader Helpers ==
    /// Wraps a loader failure without altering it.
    pub fn loader<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        CacheError::Loader(err.into())
    }

    /// Returns the original loader error, if this is a loader failure.
    pub fn as_loader_error(&self) -> Option<&anyhow::Error> {
        match self {
            CacheError::Loader(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true if the failure came from the backend.
    pub fn is_backend(&self) -> bool {
        matches!(
            self,
            CacheError::BackendUnavailable(_) | CacheError::WrongType(_)
        )
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Codec(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
