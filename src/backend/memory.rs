//! In-Memory Backend Module
//!
//! HashMap-backed store with per-key TTL expiration implementing [`Backend`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{Backend, BackendStats, Shape, StoredEntry, StoredValue};
use crate::error::{CacheError, Result};

// == Memory Store ==
#[derive(Debug, Default)]
struct MemoryStore {
    entries: HashMap<String, StoredEntry>,
    stats: BackendStats,
}

impl MemoryStore {
    // == Live Entry ==
    /// Returns the entry for `key`, dropping it first if its TTL has elapsed.
    fn live(&mut self, key: &str) -> Option<&mut StoredEntry> {
        let expired = self.entries.get(key).map(StoredEntry::is_expired)?;
        if expired {
            self.entries.remove(key);
            self.stats.record_expired(1);
            debug!(key, "dropped expired entry");
            return None;
        }
        self.entries.get_mut(key)
    }

    /// Like [`MemoryStore::live`], but fails if the entry has another shape.
    fn live_shaped(&mut self, key: &str, shape: Shape) -> Result<Option<&mut StoredEntry>> {
        match self.live(key) {
            Some(entry) if entry.value.shape() != shape => Err(wrong_type(key, shape)),
            other => Ok(other),
        }
    }

    fn record_read(&mut self, found: bool) {
        if found {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
    }

    fn remove(&mut self, key: &str) -> bool {
        // An expired entry counts as already gone.
        if self.live(key).is_none() {
            return false;
        }
        self.entries.remove(key).is_some()
    }
}

fn wrong_type(key: &str, expected: Shape) -> CacheError {
    CacheError::WrongType(format!(
        "key '{}' does not hold a {:?} value",
        key, expected
    ))
}

/// Resolves inclusive, possibly negative list indices into a slice range.
fn resolve_range(len: usize, start: i64, end: i64) -> Option<(usize, usize)> {
    let len = len as i64;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let end = if end < 0 { len + end } else { end.min(len - 1) };
    if len == 0 || start > end || start >= len {
        return None;
    }
    Some((start as usize, end as usize + 1))
}

// == Memory Backend ==
/// In-process backend. Cloning shares the same underlying store.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<RwLock<MemoryStore>>,
}

impl MemoryBackend {
    // == Constructor ==
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    // == Stats ==
    /// Returns current backend statistics.
    pub async fn stats(&self) -> BackendStats {
        let store = self.inner.read().await;
        let mut stats = store.stats.clone();
        stats.set_total_entries(store.entries.len());
        stats
    }

    // == Purge Expired ==
    /// Removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub async fn purge_expired(&self) -> usize {
        let mut store = self.inner.write().await;
        let before = store.entries.len();
        store.entries.retain(|_, entry| !entry.is_expired());
        let removed = before - store.entries.len();
        store.stats.record_expired(removed);
        let remaining = store.entries.len();
        store.stats.set_total_entries(remaining);
        removed
    }

    // == TTL ==
    /// Returns the remaining TTL of a live key, `None` if absent or without expiry.
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let mut store = self.inner.write().await;
        store.live(key).and_then(|entry| entry.ttl_remaining())
    }

    // == Shape ==
    /// Returns the shape held by a live key.
    pub async fn shape_of(&self, key: &str) -> Option<Shape> {
        let mut store = self.inner.write().await;
        store.live(key).map(|entry| entry.value.shape())
    }

    // == Length ==
    /// Returns the number of stored entries, including ones not yet purged.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut store = self.inner.write().await;
        let value = match store.live_shaped(key, Shape::Scalar)? {
            Some(StoredEntry {
                value: StoredValue::Scalar(bytes),
                ..
            }) => Some(bytes.clone()),
            _ => None,
        };
        store.record_read(value.is_some());
        Ok(value)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<bool> {
        let mut store = self.inner.write().await;
        store.entries.insert(
            key.to_string(),
            StoredEntry::new(StoredValue::Scalar(value), Some(ttl)),
        );
        Ok(true)
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut store = self.inner.write().await;
        Ok(store.remove(key))
    }

    async fn list_range(&self, key: &str, start: i64, end: i64) -> Result<Vec<Vec<u8>>> {
        let mut store = self.inner.write().await;
        let items = match store.live_shaped(key, Shape::List)? {
            Some(StoredEntry {
                value: StoredValue::List(items),
                ..
            }) => match resolve_range(items.len(), start, end) {
                Some((from, to)) => items[from..to].to_vec(),
                None => Vec::new(),
            },
            _ => Vec::new(),
        };
        store.record_read(!items.is_empty());
        Ok(items)
    }

    async fn list_push(&self, key: &str, value: Vec<u8>) -> Result<usize> {
        let mut store = self.inner.write().await;
        if let Some(entry) = store.live_shaped(key, Shape::List)? {
            if let StoredValue::List(items) = &mut entry.value {
                items.push(value);
                return Ok(items.len());
            }
        }
        // New lists carry no expiry until `expire` is called.
        store.entries.insert(
            key.to_string(),
            StoredEntry::new(StoredValue::List(vec![value]), None),
        );
        Ok(1)
    }

    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<Vec<u8>>> {
        let mut store = self.inner.write().await;
        let value = match store.live_shaped(key, Shape::Hash)? {
            Some(StoredEntry {
                value: StoredValue::Hash(fields),
                ..
            }) => fields.get(field).cloned(),
            _ => None,
        };
        store.record_read(value.is_some());
        Ok(value)
    }

    async fn hash_put(&self, key: &str, field: &str, value: Vec<u8>) -> Result<bool> {
        let mut store = self.inner.write().await;
        if let Some(entry) = store.live_shaped(key, Shape::Hash)? {
            if let StoredValue::Hash(fields) = &mut entry.value {
                return Ok(fields.insert(field.to_string(), value).is_none());
            }
        }
        let mut fields = HashMap::new();
        fields.insert(field.to_string(), value);
        store.entries.insert(
            key.to_string(),
            StoredEntry::new(StoredValue::Hash(fields), None),
        );
        Ok(true)
    }

    async fn hash_delete(&self, key: &str) -> Result<bool> {
        let mut store = self.inner.write().await;
        if store.live_shaped(key, Shape::Hash)?.is_none() {
            return Ok(false);
        }
        Ok(store.remove(key))
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        let mut store = self.inner.write().await;
        match store.live(key) {
            Some(entry) => {
                entry.expire_in(ttl);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn rename(&self, from: &str, to: &str) -> Result<bool> {
        let mut store = self.inner.write().await;
        if store.live(from).is_none() {
            return Ok(false);
        }
        match store.entries.remove(from) {
            Some(entry) => {
                store.entries.insert(to.to_string(), entry);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
