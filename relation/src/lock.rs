use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

pub type PairKey = (String, String);

/// Sorted so that (a, b) and (b, a) share one lock.
pub fn pair_key(a: &str, b: &str) -> PairKey {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// One async mutex per unordered user pair. Different pairs never wait on each other;
/// an entry lives only while somebody holds or waits for it.
#[derive(Debug, Clone, Default)]
pub struct PairLocks {
    inner: Arc<DashMap<PairKey, Arc<Mutex<()>>>>,
}

impl PairLocks {
    pub async fn lock(&self, a: &str, b: &str) -> PairGuard {
        let key = pair_key(a, b);
        // the shard lock is released at the end of this statement, before awaiting
        let mutex = self.inner.entry(key.clone()).or_default().clone();
        // registered before waiting, so a waiter dropped mid-wait still cleans up
        let slot = Slot {
            key,
            mutex: Some(mutex.clone()),
            locks: self.inner.clone(),
        };
        let guard = mutex.lock_owned().await;
        PairGuard { guard, slot }
    }

    /// number of pairs currently locked or contended
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Fields drop in order: the mutex guard is released before the slot checks for other users.
pub struct PairGuard {
    guard: OwnedMutexGuard<()>,
    slot: Slot,
}

impl PairGuard {
    pub fn key(&self) -> &PairKey {
        &self.slot.key
    }
}

struct Slot {
    key: PairKey,
    mutex: Option<Arc<Mutex<()>>>,
    locks: Arc<DashMap<PairKey, Arc<Mutex<()>>>>,
}

impl Drop for Slot {
    fn drop(&mut self) {
        drop(self.mutex.take());
        // only the map holds it now: nobody holds or waits, the entry can go
        self.locks
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
