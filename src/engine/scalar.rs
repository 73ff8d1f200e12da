//! Scalar operations: one encoded value per key.

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
    // == Retrieve ==
    /// Returns the cached value for `key`, or loads, caches and returns it.
    ///
    /// On a hit the loader is never called. On a miss it is called once; if
    /// caching its result fails the value is still returned. A payload that
    /// no longer decodes as `T` is reported as `CacheError::Codec` rather
    /// than reloaded.
    ///
    /// # Arguments
    /// * `key` - Cache key
    /// * `ttl` - Expiry for a freshly loaded value; policy default when `None`
    /// * `loader` - Produces the value on a miss
    pub async fn retrieve<T, F, Fut, E>(
        &self,
        key: impl AsRef<str>,
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

        if let Some(payload) = self.backend.get(key.as_str()).await? {
            debug!(key = %key, "cache hit");
            return self.codec.decode(&payload);
        }

        debug!(key = %key, "cache miss, invoking loader");
        let value = loader().await.map_err(CacheError::loader)?;
        let payload = self.codec.encode(&value)?;

        match self.backend.set(key.as_str(), payload, ttl).await {
            Ok(true) => debug!(key = %key, ttl_ms = ttl.as_millis() as u64, "cached loaded value"),
            Ok(false) => warn!(key = %key, "backend declined write, returning loaded value"),
            Err(err) => warn!(key = %key, error = %err, "write-through failed, returning loaded value"),
        }
        Ok(value)
    }

    // == Update ==
    /// Evicts `key`, calls the loader and writes its result through.
    ///
    /// Every failure is surfaced, including the final write.
    pub async fn update<T, F, Fut, E>(
        &self,
        key: impl AsRef<str>,
        ttl: Option<Duration>,
        loader: F,
    ) -> Result<T>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: Into<anyhow::Error>,
    {
        let key = CacheKey::new(key.as_ref())?;
        let ttl = self.resolve_ttl(ttl)?;

        self.backend.delete(key.as_str()).await?;
        let value = loader().await.map_err(CacheError::loader)?;
        let payload = self.codec.encode(&value)?;

        if !self.backend.set(key.as_str(), payload, ttl).await? {
            return Err(CacheError::BackendUnavailable(format!(
                "backend declined write for '{}'",
                key
            )));
        }
        debug!(key = %key, "refreshed value");
        Ok(value)
    }
}
