//! Handle bound to one named cache, carrying the TTL its policy entry assigns.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::CacheEngine;
use crate::backend::Backend;
use crate::codec::Codec;
use crate::error::Result;

// == Named Cache ==
/// Engine view whose writes use the TTL resolved for `name`.
///
/// Created with [`CacheEngine::named`]; the TTL is looked up once.
#[derive(Debug)]
pub struct NamedCache<'a, B, C> {
    engine: &'a CacheEngine<B, C>,
    name: String,
    ttl: Duration,
}

impl<'a, B, C> NamedCache<'a, B, C>
where
    B: Backend,
    C: Codec,
{
    pub(super) fn new(engine: &'a CacheEngine<B, C>, name: String, ttl: Duration) -> Self {
        Self { engine, name, ttl }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// See [`CacheEngine::retrieve`].
    pub async fn retrieve<T, F, Fut, E>(&self, key: impl AsRef<str>, loader: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: Into<anyhow::Error>,
    {
        self.engine.retrieve(key, Some(self.ttl), loader).await
    }

    /// See [`CacheEngine::retrieve_list`].
    pub async fn retrieve_list<T, F, Fut, E>(
        &self,
        key: impl AsRef<str>,
        loader: F,
    ) -> Result<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<Vec<T>, E>>,
        E: Into<anyhow::Error>,
    {
        self.engine.retrieve_list(key, Some(self.ttl), loader).await
    }

    /// See [`CacheEngine::update`].
    pub async fn update<T, F, Fut, E>(&self, key: impl AsRef<str>, loader: F) -> Result<T>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: Into<anyhow::Error>,
    {
        self.engine.update(key, Some(self.ttl), loader).await
    }

    /// See [`CacheEngine::update_list`].
    pub async fn update_list<T, F, Fut, E>(
        &self,
        key: impl AsRef<str>,
        loader: F,
    ) -> Result<Vec<T>>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<Vec<T>, E>>,
        E: Into<anyhow::Error>,
    {
        self.engine.update_list(key, Some(self.ttl), loader).await
    }

    pub async fn evict(&self, key: impl AsRef<str>) -> Result<bool> {
        self.engine.evict(key).await
    }

    pub async fn store_in_hash<T>(&self, key: impl AsRef<str>, field: &str, value: T) -> Result<T>
    where
        T: Serialize,
    {
        self.engine
            .store_in_hash(key, field, Some(self.ttl), value)
            .await
    }

    pub async fn get_from_hash<T>(&self, key: impl AsRef<str>, field: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        self.engine.get_from_hash(key, field).await
    }

    pub async fn retrieve_from_hash<T, F, Fut, E>(
        &self,
        key: impl AsRef<str>,
        field: &str,
        loader: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: Into<anyhow::Error>,
    {
        self.engine
            .retrieve_from_hash(key, field, Some(self.ttl), loader)
            .await
    }

    pub async fn evict_from_hash(&self, key: impl AsRef<str>) -> Result<bool> {
        self.engine.evict_from_hash(key).await
    }
}
