//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cache_aside::{Backend, CacheEngine, CacheError, MemoryBackend, NamedCachePolicy, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

pub fn ann() -> User {
    User {
        id: 42,
        name: "Ann".to_string(),
    }
}

/// Installs a test subscriber honouring `RUST_LOG`; safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// == Counting Loader ==
/// Counts how many times loaders built from it ran.
#[derive(Debug, Default, Clone)]
pub struct LoadCounter(Arc<AtomicUsize>);

impl LoadCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

// == Faulty Backend ==
/// Which backend calls should fail.
#[derive(Debug, Default)]
pub struct Faults {
    pub get: AtomicBool,
    pub set: AtomicBool,
    pub delete: AtomicBool,
    pub list_push: AtomicBool,
    pub expire: AtomicBool,
    pub hash_put: AtomicBool,
    pub rename: AtomicBool,
}

impl Faults {
    fn check(flag: &AtomicBool, op: &str) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(CacheError::BackendUnavailable(format!(
                "injected {} failure",
                op
            )));
        }
        Ok(())
    }
}

/// Wraps a [`MemoryBackend`] and fails selected operations on demand.
#[derive(Debug, Clone, Default)]
pub struct FaultyBackend {
    pub inner: MemoryBackend,
    pub faults: Arc<Faults>,
}

impl FaultyBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, flag: impl Fn(&Faults) -> &AtomicBool) {
        flag(&self.faults).store(true, Ordering::SeqCst);
    }

    pub fn heal(&self, flag: impl Fn(&Faults) -> &AtomicBool) {
        flag(&self.faults).store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl Backend for FaultyBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Faults::check(&self.faults.get, "get")?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<bool> {
        Faults::check(&self.faults.set, "set")?;
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Faults::check(&self.faults.delete, "delete")?;
        self.inner.delete(key).await
    }

    async fn list_range(&self, key: &str, start: i64, end: i64) -> Result<Vec<Vec<u8>>> {
        Faults::check(&self.faults.get, "list_range")?;
        self.inner.list_range(key, start, end).await
    }

    async fn list_push(&self, key: &str, value: Vec<u8>) -> Result<usize> {
        Faults::check(&self.faults.list_push, "list_push")?;
        self.inner.list_push(key, value).await
    }

    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<Vec<u8>>> {
        Faults::check(&self.faults.get, "hash_get")?;
        self.inner.hash_get(key, field).await
    }

    async fn hash_put(&self, key: &str, field: &str, value: Vec<u8>) -> Result<bool> {
        Faults::check(&self.faults.hash_put, "hash_put")?;
        self.inner.hash_put(key, field, value).await
    }

    async fn hash_delete(&self, key: &str) -> Result<bool> {
        Faults::check(&self.faults.delete, "hash_delete")?;
        self.inner.hash_delete(key).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        Faults::check(&self.faults.expire, "expire")?;
        self.inner.expire(key, ttl).await
    }

    async fn rename(&self, from: &str, to: &str) -> Result<bool> {
        Faults::check(&self.faults.rename, "rename")?;
        self.inner.rename(from, to).await
    }
}

pub fn memory_engine() -> CacheEngine<MemoryBackend> {
    init_tracing();
    CacheEngine::with_policy(MemoryBackend::new(), Arc::new(NamedCachePolicy::default()))
}

pub fn faulty_engine() -> CacheEngine<FaultyBackend> {
    init_tracing();
    CacheEngine::with_policy(FaultyBackend::new(), Arc::new(NamedCachePolicy::default()))
}
