use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{KeyLock, LockError, LockManager};

/// Idle locks are pruned once the table grows past this many entries.
const PRUNE_THRESHOLD: usize = 1024;

/// In-memory lock manager backed by a `HashMap<String, Arc<KeyLock>>`.
///
/// Lazily creates one lock per key and returns the same `Arc` for repeated
/// lookups while the lock is in use.
pub struct InMemoryLockManager {
    locks: Mutex<HashMap<String, Arc<KeyLock>>>,
}

impl InMemoryLockManager {
    pub fn new() -> Self {
        InMemoryLockManager {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Number of keys currently tracked.
    pub fn len(&self) -> usize {
        self.locks.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryLockManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LockManager for InMemoryLockManager {
    fn get_lock(&self, key: &str) -> Result<Arc<KeyLock>, LockError> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| LockError::Poisoned("lock manager map poisoned".into()))?;

        if locks.len() >= PRUNE_THRESHOLD {
            // Only the table holds these; nobody is waiting on them.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        }

        Ok(locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(KeyLock::new(())))
            .clone())
    }
}
