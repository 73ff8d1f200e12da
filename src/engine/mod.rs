//! Cache Engine Module
//!
//! Cache-aside orchestration over a [`Backend`] and a [`Codec`]: read-through
//! (`retrieve*`), forced refresh (`update*`) and invalidation (`evict*`) for
//! scalar, list and hash-field shapes.
//!
//! The engine keeps no state of its own between calls. It does not serialize
//! concurrent misses on the same key: two callers missing at once will both
//! run their loaders and the last write wins. Lists are staged under a
//! private key and swapped in whole, so concurrent misses never interleave
//! their elements.

mod hash;
mod list;
mod named;
mod scalar;


pub use named::NamedCache;

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::backend::Backend;
use crate::codec::{Codec, JsonCodec};
use crate::error::Result;
use crate::key::CacheKey;
use crate::policy::{validate_ttl, NamedCachePolicy};

// == Cache Engine ==
/// Composes backend reads, loader calls and TTL writes into cache-aside operations.
#[derive(Debug, Clone)]
pub struct CacheEngine<B, C = JsonCodec> {
    backend: B,
    codec: C,
    policy: Arc<NamedCachePolicy>,
}

impl<B> CacheEngine<B, JsonCodec>
where
    B: Backend,
{
    /// Creates an engine with the JSON codec and the given policy table.
    pub fn with_policy(backend: B, policy: Arc<NamedCachePolicy>) -> Self {
        Self::new(backend, JsonCodec, policy)
    }
}

impl<B, C> CacheEngine<B, C>
where
    B: Backend,
    C: Codec,
{
    // == Constructor ==
    /// Creates an engine.
    ///
    /// # Arguments
    /// * `backend` - Store shared by all calls; must tolerate concurrent use
    /// * `codec` - Serializer for cached values
    /// * `policy` - TTL table built at startup
    pub fn new(backend: B, codec: C, policy: Arc<NamedCachePolicy>) -> Self {
        Self {
            backend,
            codec,
            policy,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn policy(&self) -> &NamedCachePolicy {
        &self.policy
    }

    // == Named Cache ==
    /// Returns a handle whose operations use the TTL the policy assigns to `name`.
    pub fn named(&self, name: impl Into<String>) -> NamedCache<'_, B, C> {
        let name = name.into();
        let ttl = self.policy.resolve(&name);
        NamedCache::new(self, name, ttl)
    }

    // == Evict ==
    /// Deletes `key`. Returns whether it existed; an absent key is not an error.
    pub async fn evict(&self, key: impl AsRef<str>) -> Result<bool> {
        let key = CacheKey::new(key.as_ref())?;
        let removed = self.backend.delete(key.as_str()).await?;
        debug!(key = %key, removed, "evict");
        Ok(removed)
    }

    /// Evicts each key in order, returning how many existed.
    ///
    /// Stops at the first failure.
    pub async fn evict_many<I, K>(&self, keys: I) -> Result<usize>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut removed = 0;
        for key in keys {
            if self.evict(key).await? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    // == TTL Resolution ==
    /// Uses the explicit TTL when given, else the policy default.
    fn resolve_ttl(&self, ttl: Option<Duration>) -> Result<Duration> {
        match ttl {
            Some(ttl) => {
                validate_ttl("explicit", ttl)?;
                Ok(ttl)
            }
            None => Ok(self.policy.default_ttl()),
        }
    }
}
