use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = DashMap<String, Arc<Mutex<()>>>;

/// Async critical sections keyed by id.
///
/// Callers holding the guard for one key exclude each other; different keys
/// never contend. An entry lives only while someone holds or waits for it.
#[derive(Debug, Clone, Default)]
pub struct KeyedLocks {
    locks: Arc<LockMap>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, key: &str) -> KeyedGuard {
        // Clone the mutex out so no map shard stays locked across the await
        let mutex = self.locks.entry(key.to_string()).or_default().clone();
        let guard = mutex.lock_owned().await;
        KeyedGuard {
            key: key.to_string(),
            locks: self.locks.clone(),
            guard: Some(guard),
        }
    }

    #[cfg(test)]
    fn held_keys(&self) -> usize {
        self.locks.len()
    }
}

/// Held critical section for one key. Dropping it releases the key and
/// forgets the entry when nobody else is waiting on it.
pub struct KeyedGuard {
    key: String,
    locks: Arc<LockMap>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for KeyedGuard {
    fn drop(&mut self) {
        // Release first so the guard's own reference to the mutex is gone
        self.guard.take();
        // The map's reference is then the only one unless a waiter cloned it;
        // new lockers clone under the same shard lock, so this cannot race them
        self.locks
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
