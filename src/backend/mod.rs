//! Backend Module
//!
//! The async key-value store the engine sits in front of, and an in-process
//! implementation of it.

mod entry;
mod memory;
mod stats;

#[cfg(test)]
mod property_tests;

pub use entry::{Shape, StoredEntry, StoredValue};
pub use memory::MemoryBackend;
pub use stats::BackendStats;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

// == Backend Trait ==
/// Non-blocking key-value store holding scalars, lists and hashes.
///
/// Implementations are shared across concurrent calls and must be safe for
/// concurrent use. Connectivity failures are reported as
/// `CacheError::BackendUnavailable`; the engine never retries them.
#[async_trait]
pub trait Backend: Send + Sync + 'static {
    /// Reads a scalar value. `None` when the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Writes a scalar value with a TTL, replacing whatever the key held.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<bool>;

    /// Removes a key of any shape. Returns whether it existed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Reads list elements between `start` and `end` inclusive. Negative
    /// indices count from the tail (`-1` is the last element).
    async fn list_range(&self, key: &str, start: i64, end: i64) -> Result<Vec<Vec<u8>>>;

    /// Appends one element to the tail of a list, returning the new length.
    async fn list_push(&self, key: &str, value: Vec<u8>) -> Result<usize>;

    /// Reads one field of a hash.
    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<Vec<u8>>>;

    /// Writes one field of a hash. Returns true if the field was new.
    async fn hash_put(&self, key: &str, field: &str, value: Vec<u8>) -> Result<bool>;

    /// Removes a whole hash. Returns whether it existed.
    async fn hash_delete(&self, key: &str) -> Result<bool>;

    /// Sets the TTL of an existing key. Returns false if the key is absent.
    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool>;

    /// Atomically moves `from` over `to`, replacing whatever `to` held and
    /// keeping the TTL of `from`. Returns false if `from` is absent.
    async fn rename(&self, from: &str, to: &str) -> Result<bool>;
}

#[async_trait]
impl<B> Backend for Arc<B>
where
    B: Backend + ?Sized,
{
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<bool> {
        (**self).set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        (**self).delete(key).await
    }

    async fn list_range(&self, key: &str, start: i64, end: i64) -> Result<Vec<Vec<u8>>> {
        (**self).list_range(key, start, end).await
    }

    async fn list_push(&self, key: &str, value: Vec<u8>) -> Result<usize> {
        (**self).list_push(key, value).await
    }

    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<Vec<u8>>> {
        (**self).hash_get(key, field).await
    }

    async fn hash_put(&self, key: &str, field: &str, value: Vec<u8>) -> Result<bool> {
        (**self).hash_put(key, field, value).await
    }

    async fn hash_delete(&self, key: &str) -> Result<bool> {
        (**self).hash_delete(key).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        (**self).expire(key, ttl).await
    }

    async fn rename(&self, from: &str, to: &str) -> Result<bool> {
        (**self).rename(from, to).await
    }
}
