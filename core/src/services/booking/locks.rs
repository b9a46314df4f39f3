//! Per-item async locks.
//!
//! Create and accept both check for overlapping confirmed bookings and then
//! write. Holding the item's lock across both steps serializes those
//! sections per item while leaving different items independent.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

type LockMap = HashMap<Uuid, Arc<AsyncMutex<()>>>;

/// Registry of lazily created per-item locks
#[derive(Default)]
pub struct ItemLocks {
    locks: Arc<Mutex<LockMap>>,
}

impl ItemLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `item_id`
    pub async fn acquire(&self, item_id: Uuid) -> ItemLockGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(item_id).or_default())
        };

        let guard = lock.lock_owned().await;

        ItemLockGuard {
            item_id,
            guard: Some(guard),
            locks: Arc::clone(&self.locks),
        }
    }

    /// Number of items with a live lock entry
    pub fn tracked(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Exclusive access to one item; the map entry is pruned on drop when unused
pub struct ItemLockGuard {
    item_id: Uuid,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<Mutex<LockMap>>,
}

impl Drop for ItemLockGuard {
    fn drop(&mut self) {
        // Release first so the strong count below reflects only the map and waiters.
        drop(self.guard.take());

        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(lock) = locks.get(&self.item_id) {
            if Arc::strong_count(lock) == 1 {
                locks.remove(&self.item_id);
            }
        }
    }
}
