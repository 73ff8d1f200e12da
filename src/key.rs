//! Cache Key Module
//!
//! Validated string keys addressing entries in the backend keyspace.

use std::fmt;

use crate::error::{CacheError, Result};

// == Public Constants ==
/// Separator used by [`CacheKey::compose`]
pub const KEY_SEPARATOR: &str = "_";

// == Cache Key ==
/// An opaque, non-empty key. Equal keys address the same cached entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    // == Constructor ==
    /// Creates a key, rejecting the empty string. Length is not limited.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(CacheError::InvalidKey("Key cannot be empty".to_string()));
        }
        Ok(Self(key))
    }

    // == Compose ==
    /// Builds a key from a name and its parameters, e.g. `findUser_42_active`.
    ///
    /// # Arguments
    /// * `name` - Leading component, usually the operation being cached
    /// * `parts` - Parameters appended in order
    pub fn compose<I, P>(name: &str, parts: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: fmt::Display,
    {
        let mut key = name.to_string();
        for part in parts {
            key.push_str(KEY_SEPARATOR);
            key.push_str(&part.to_string());
        }
        Self::new(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for CacheKey {
    type Error = CacheError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for CacheKey {
    type Error = CacheError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}
