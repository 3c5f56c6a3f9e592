//! Per-light lock registry.
//!
//! Every read-credit → decide → write-credit sequence — whether driven by a
//! rule resolution or a decay tick — runs under that light's lock, so
//! concurrent firings and ticks can never interleave into a lost update.
//! Different lights lock independently and proceed in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use lumen_domain::id::LightId;
use tokio::sync::OwnedMutexGuard;

/// Registry of one async mutex per light id.
///
/// Entries are created on first use and live for the registry's lifetime;
/// the population is bounded by the number of persisted lights.
#[derive(Debug, Default)]
pub struct LightLocks {
    inner: Mutex<HashMap<LightId, Arc<tokio::sync::Mutex<()>>>>,
}

impl LightLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for the given light, waiting if another task holds it.
    pub async fn acquire(&self, id: LightId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().expect("light lock registry poisoned");
            Arc::clone(map.entry(id).or_default())
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn should_serialize_tasks_on_the_same_light() {
        let locks = Arc::new(LightLocks::new());
        let counter = Arc::new(AtomicUsize::new(0));
        let id = LightId::from_i64(1);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let locks = Arc::clone(&locks);
            let counter = Arc::clone(&counter);
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire(id).await;
                // Read-modify-write with a yield in the middle; the lock
                // must prevent interleaving.
                let seen = counter.load(Ordering::SeqCst);
                tokio::task::yield_now().await;
                counter.store(seen + 1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(counter.load(Ordering::SeqCst), 8);
    }

    #[tokio::test]
    async fn should_not_block_between_different_lights() {
        let locks = LightLocks::new();
        let a = locks.acquire(LightId::from_i64(1)).await;
        // A second light locks immediately even while the first is held.
        let b = locks.acquire(LightId::from_i64(2)).await;
        drop(a);
        drop(b);
    }

    #[tokio::test]
    async fn should_reuse_the_same_mutex_per_light() {
        let locks = Arc::new(LightLocks::new());
        let id = LightId::from_i64(3);

        let guard = locks.acquire(id).await;
        let locks2 = Arc::clone(&locks);
        let pending = tokio::spawn(async move {
            let _guard = locks2.acquire(id).await;
        });
        // The spawned task cannot finish while the guard is held.
        tokio::task::yield_now().await;
        assert!(!pending.is_finished());
        drop(guard);
        pending.await.unwrap();
    }
}
