//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the cache is in use.
//!
//! # Tasks
//! - TTL Purge: Removes expired in-memory entries at configured intervals

mod purge;

pub use purge::{spawn_purge_task, MIN_PURGE_INTERVAL};
