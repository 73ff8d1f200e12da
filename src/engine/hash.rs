//! Hash-field operations: values addressed by `(key, field)`, evicted per key.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

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
    // == Store In Hash ==
    /// Writes `value` under `field` of the hash at `key` and returns it.
    ///
    /// The TTL applies to the whole hash and restarts on every field write.
    /// Failures are surfaced; if the TTL could not be set the hash is removed.
    pub async fn store_in_hash<T>(
        &self,
        key: impl AsRef<str>,
        field: &str,
        ttl: Option<Duration>,
        value: T,
    ) -> Result<T>
    where
        T: Serialize,
    {
        let key = CacheKey::new(key.as_ref())?;
        let ttl = self.resolve_ttl(ttl)?;
        let payload = self.codec.encode(&value)?;
        self.put_field(&key, field, payload, ttl).await?;
        Ok(value)
    }

    // == Get From Hash ==
    /// Reads `field` of the hash at `key`. `None` when either is absent.
    pub async fn get_from_hash<T>(&self, key: impl AsRef<str>, field: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let key = CacheKey::new(key.as_ref())?;
        match self.backend.hash_get(key.as_str(), field).await? {
            Some(payload) => self.codec.decode(&payload).map(Some),
            None => Ok(None),
        }
    }

    // == Retrieve From Hash ==
    /// Read-through for a single hash field, with the same contract as
    /// [`CacheEngine::retrieve`]: a failed write after a successful load is
    /// logged and the loaded value returned.
    pub async fn retrieve_from_hash<T, F, Fut, E>(
        &self,
        key: impl AsRef<str>,
        field: &str,
        ttl: Option<Duration>,
        loader: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: Into<anyhow::Error>,
    {
        let key = CacheKey::new(key.as_ref())?;
        let ttl = self.resolve_ttl(ttl)?;

        if let Some(payload) = self.backend.hash_get(key.as_str(), field).await? {
            debug!(key = %key, field, "hash field hit");
            return self.codec.decode(&payload);
        }

        debug!(key = %key, field, "hash field miss, invoking loader");
        let value = loader().await.map_err(CacheError::loader)?;
        let payload = self.codec.encode(&value)?;
        if let Err(err) = self.put_field(&key, field, payload, ttl).await {
            warn!(key = %key, field, error = %err, "hash write-through failed, returning loaded value");
        }
        Ok(value)
    }

    // == Evict From Hash ==
    /// Removes the entire hash at `key`, not a single field.
    ///
    /// Fails with `CacheError::WrongType` if `key` holds a scalar or a list;
    /// [`CacheEngine::evict`] removes a key of any shape.
    pub async fn evict_from_hash(&self, key: impl AsRef<str>) -> Result<bool> {
        let key = CacheKey::new(key.as_ref())?;
        let removed = self.backend.hash_delete(key.as_str()).await?;
        debug!(key = %key, removed, "evict hash");
        Ok(removed)
    }

    /// Writes one field, then restarts the hash's TTL. A hash whose TTL could
    /// not be set is deleted so it cannot outlive its expiry.
    async fn put_field(
        &self,
        key: &CacheKey,
        field: &str,
        payload: Vec<u8>,
        ttl: Duration,
    ) -> Result<()> {
        self.backend.hash_put(key.as_str(), field, payload).await?;
        let failed = match self.backend.expire(key.as_str(), ttl).await {
            Ok(true) => return Ok(()),
            Ok(false) => Err(CacheError::BackendUnavailable(format!(
                "hash '{}' vanished before its TTL could be set",
                key
            ))),
            Err(err) => Err(err),
        };
        if let Err(err) = self.backend.hash_delete(key.as_str()).await {
            warn!(key = %key, error = %err, "could not remove hash without TTL");
        }
        failed
    }
}
