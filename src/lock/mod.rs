//! Per-key locks for serializing work on the same document.
//!
//! The upsert engine is stateless and never locks. Callers that need strict
//! per-key ordering obtain a lock from a `LockManager` and hold it across
//! the find-then-write sequence (see `QueuedUpsertEngine`).

mod error;
mod in_memory;
mod lock_manager;

pub use error::LockError;
pub use in_memory::InMemoryLockManager;
pub use lock_manager::{KeyLock, LockManager};
