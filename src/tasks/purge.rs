//! TTL Purge Task
//!
//! Background task that periodically removes expired entries from a
//! [`MemoryBackend`]. Reads already skip expired entries; this only reclaims
//! memory held by keys nobody reads again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::backend::MemoryBackend;

/// Shortest interval the task will sleep between runs
pub const MIN_PURGE_INTERVAL: Duration = Duration::from_millis(100);

/// Spawns a background task that purges expired entries every `interval`.
///
/// # Arguments
/// * `backend` - Backend to purge; clones share the same store
/// * `interval` - Time between purge runs, raised to [`MIN_PURGE_INTERVAL`]
///   if shorter
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
///
/// # Example
/// ```ignore
/// let backend = MemoryBackend::new();
/// let purge_handle = spawn_purge_task(backend.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// purge_handle.abort();
/// ```
pub fn spawn_purge_task(backend: MemoryBackend, interval: Duration) -> JoinHandle<()> {
    let interval = interval.max(MIN_PURGE_INTERVAL);
    tokio::spawn(async move {
        info!(
            interval_ms = interval.as_millis() as u64,
            "Starting TTL purge task"
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = backend.purge_expired().await;
            if removed > 0 {
                info!("TTL purge: removed {} expired entries", removed);
            } else {
                debug!("TTL purge: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Backend;

    #[tokio::test(start_paused = true)]
    async fn test_purge_task_removes_expired_entries() {
        let backend = MemoryBackend::new();
        backend
            .set("expire_soon", b"value".to_vec(), Duration::from_secs(1))
            .await
            .unwrap();

        let handle = spawn_purge_task(backend.clone(), Duration::from_secs(1));

        // Paused clock auto-advances through the task's sleeps.
        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert_eq!(backend.len().await, 0, "expired entry should be purged");
        assert_eq!(backend.stats().await.expired, 1);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_task_preserves_valid_entries() {
        let backend = MemoryBackend::new();
        backend
            .set("long_lived", b"value".to_vec(), Duration::from_secs(3600))
            .await
            .unwrap();

        let handle = spawn_purge_task(backend.clone(), Duration::from_secs(1));
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(
            backend.get("long_lived").await.unwrap(),
            Some(b"value".to_vec())
        );

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_task_zero_interval_is_raised() {
        let backend = MemoryBackend::new();
        backend
            .set("expire_soon", b"value".to_vec(), Duration::from_millis(50))
            .await
            .unwrap();

        let handle = spawn_purge_task(backend.clone(), Duration::ZERO);
        tokio::time::sleep(Duration::from_millis(250)).await;

        assert_eq!(backend.len().await, 0);
        assert_eq!(backend.stats().await.expired, 1);

        handle.abort();
        tokio::time::sleep(MIN_PURGE_INTERVAL).await;
        assert!(handle.is_finished());
    }

    #[tokio::test]
    async fn test_purge_task_can_be_aborted() {
        let handle = spawn_purge_task(MemoryBackend::new(), Duration::from_secs(1));

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
