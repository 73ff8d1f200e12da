//! Cache Aside - cache orchestration in front of an async key-value store
//!
//! Decides per key whether to serve a cached value, load and populate on a
//! miss, or force a refresh, across scalar, list and hash-field shapes.
//!
//! ```ignore
//! let policy = Arc::new(Config::from_env().policy()?);
//! let engine = CacheEngine::with_policy(MemoryBackend::new(), policy);
//!
//! let user: User = engine
//!     .retrieve("user:42", None, || async { load_user(42).await })
//!     .await?;
//! ```

pub mod backend;
pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod key;
pub mod policy;
pub mod tasks;

pub use backend::{Backend, MemoryBackend};
pub use codec::{Codec, JsonCodec};
pub use config::Config;
pub use engine::{CacheEngine, NamedCache};
pub use error::{CacheError, Result};
pub use key::CacheKey;
pub use policy::NamedCachePolicy;
pub use tasks::spawn_purge_task;
