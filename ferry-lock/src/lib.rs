#![deny(missing_docs)]

//! Process-wide serialization of model inference calls.
//!
//! A local model server degrades badly when several generations run at
//! once, so the bot funnels every inference through one [`ModelLock`].
//! Handlers receive a clone of the lock at construction time, which
//! keeps them testable with an isolated lock instead of a global.
//!
//! ```ignore
//! let lock = ModelLock::new();
//! let _held = lock.acquire().await;
//! // exactly one task is past this point at a time
//! ```

use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// An async mutual-exclusion handle shared by cloning.
///
/// All clones contend on the same underlying mutex. Waiters are admitted
/// in arrival order.
#[derive(Clone, Debug, Default)]
pub struct ModelLock {
    inner: Arc<Mutex<()>>,
}

impl ModelLock {
    /// Create an unlocked instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access.
    ///
    /// The returned guard releases the lock when dropped, which covers
    /// every exit path of the calling scope including early `?` returns.
    pub async fn acquire(&self) -> ModelLockGuard {
        ModelLockGuard {
            _permit: self.inner.clone().lock_owned().await,
        }
    }
}

/// Proof of exclusive access, held for the duration of a critical section.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct ModelLockGuard {
    _permit: OwnedMutexGuard<()>,
}

// ─── Tests ───────────────────────────────────────────────────────────────────
