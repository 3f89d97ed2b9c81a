//! Whole-value snapshot storage.
//!
//! DESIGN
//! ======
//! A snapshot is held as `Arc<T>` behind a lock that is only ever taken to
//! swap or clone the pointer. Writers build the new value completely before
//! calling `replace`, so a reader sees either the old snapshot or the new
//! one, never a mix.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod tests;

use std::sync::{Arc, PoisonError, RwLock};

/// Shared handle to the latest snapshot of `T`. Clones share the same slot.
pub struct SnapshotCell<T> {
    inner: Arc<RwLock<Option<Arc<T>>>>,
}

impl<T> SnapshotCell<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(None)) }
    }

    /// The latest snapshot, or `None` before the first successful fetch.
    #[must_use]
    pub fn latest(&self) -> Option<Arc<T>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a complete new snapshot and return it.
    pub fn replace(&self, value: T) -> Arc<T> {
        let next = Arc::new(value);
        *self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&next));
        next
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.latest().is_none()
    }
}

impl<T> Clone for SnapshotCell<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T> Default for SnapshotCell<T> {
    fn default() -> Self {
        Self::new()
    }
}
