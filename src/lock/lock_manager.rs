use std::sync::Arc;

use super::LockError;

/// An async mutual-exclusion lock for a single key.
pub type KeyLock = tokio::sync::Mutex<()>;

/// Factory trait for obtaining per-key locks.
///
/// Repeated calls with the same key must return the same logical lock
/// (the same `Arc` for in-memory managers).
pub trait LockManager: Send + Sync {
    fn get_lock(&self, key: &str) -> Result<Arc<KeyLock>, LockError>;
}

impl<T: LockManager + ?Sized> LockManager for Arc<T> {
    fn get_lock(&self, key: &str) -> Result<Arc<KeyLock>, LockError> {
        (**self).get_lock(key)
    }
}
