//! List operations: ordered elements pushed one by one under a single key,
//! sharing one expiry.
//!
//! A list is never built in place. Elements are pushed under a unique staging
//! key, the TTL is set there, and the staging key is then renamed over the
//! real one, so readers see either the previous list or the complete new one.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use super::CacheEngine;
use crate::backend::Backend;
use crate::codec::Codec;
use crate::error::{CacheError, Result};
use crate::key::CacheKey;

impl<B, C> CacheEngine<B, C>
where
    B: Backend,
    C: Codec,
{
    // == Retrieve List ==
    /// Returns the cached list for `key`, or loads, caches and returns it.
    ///
    /// A hit reads the full range in one backend call and decodes it element
    /// by element in insertion order. A miss appends each loaded element and
    /// then applies `ttl` to the whole list. If that write fails nothing is
    /// left behind and the loaded values are still returned. Concurrent misses
    /// each swap in their own complete list; the last swap wins.
    ///
    /// An empty list cannot be told apart from a missing key, so empty loader
    /// results are never cached.
    pub async fn retrieve_list<T, F, Fut, E>(
        &self,
        key: impl AsRef<str>,
        ttl: Option<Duration>,
        loader: F,
    ) -> Result<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<Vec<T>, E>>,
        E: Into<anyhow::Error>,
    {
        let key = CacheKey::new(key.as_ref())?;
        let ttl = self.resolve_ttl(ttl)?;

        let cached = self.backend.list_range(key.as_str(), 0, -1).await?;
        if !cached.is_empty() {
            debug!(key = %key, len = cached.len(), "list cache hit");
            return cached
                .iter()
                .map(|payload| self.codec.decode(payload))
                .collect();
        }

        debug!(key = %key, "list cache miss, invoking loader");
        let values = loader().await.map_err(CacheError::loader)?;
        let payloads = self.encode_all(&values)?;

        if let Err(err) = self.replace_list(&key, payloads, ttl).await {
            warn!(key = %key, error = %err, "list write-through failed, returning loaded values");
        }
        Ok(values)
    }

    // == Update List ==
    /// Evicts the whole list at `key`, calls the loader and caches its result.
    ///
    /// Every failure is surfaced. A failed write leaves `key` evicted.
    pub async fn update_list<T, F, Fut, E>(
        &self,
        key: impl AsRef<str>,
        ttl: Option<Duration>,
        loader: F,
    ) -> Result<Vec<T>>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<Vec<T>, E>>,
        E: Into<anyhow::Error>,
    {
        let key = CacheKey::new(key.as_ref())?;
        let ttl = self.resolve_ttl(ttl)?;

        self.backend.delete(key.as_str()).await?;
        let values = loader().await.map_err(CacheError::loader)?;
        let payloads = self.encode_all(&values)?;
        self.replace_list(&key, payloads, ttl).await?;

        debug!(key = %key, len = values.len(), "refreshed list");
        Ok(values)
    }

    fn encode_all<T: Serialize>(&self, values: &[T]) -> Result<Vec<Vec<u8>>> {
        values.iter().map(|value| self.codec.encode(value)).collect()
    }

    /// Stages `payloads` and swaps them in at `key`. On failure the staging
    /// key is removed and `key` is left untouched.
    async fn replace_list(
        &self,
        key: &CacheKey,
        payloads: Vec<Vec<u8>>,
        ttl: Duration,
    ) -> Result<()> {
        if payloads.is_empty() {
            return Ok(());
        }
        let staging = staging_key(key);
        let written = self.write_staged(key, &staging, payloads, ttl).await;
        if written.is_err() {
            if let Err(err) = self.backend.delete(&staging).await {
                warn!(
                    key = %key,
                    staging = %staging,
                    error = %err,
                    "could not remove staged list"
                );
            }
        }
        written
    }

    /// Appends each payload, sets the TTL after the last push, then renames.
    async fn write_staged(
        &self,
        key: &CacheKey,
        staging: &str,
        payloads: Vec<Vec<u8>>,
        ttl: Duration,
    ) -> Result<()> {
        for payload in payloads {
            self.backend.list_push(staging, payload).await?;
        }
        if !self.backend.expire(staging, ttl).await? {
            return Err(CacheError::BackendUnavailable(format!(
                "staged list for '{}' vanished before its TTL could be set",
                key
            )));
        }
        if !self.backend.rename(staging, key.as_str()).await? {
            return Err(CacheError::BackendUnavailable(format!(
                "staged list for '{}' vanished before it could be swapped in",
                key
            )));
        }
        Ok(())
    }
}

fn staging_key(key: &CacheKey) -> String {
    format!("{}:staging:{}", key, Uuid::new_v4())
}
