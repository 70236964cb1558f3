// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Single-writer / multi-reader snapshot holder
//!
//! Values are immutable once installed. A writer builds the replacement
//! outside the lock; the write lock only covers swapping the `Arc`. Readers
//! clone the `Arc` under a shared lock and copy out of it after release, so a
//! read never sees a half-written value.

use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug)]
pub struct SnapshotCell<T> {
    current: RwLock<Arc<T>>,
}

impl<T> SnapshotCell<T> {
    pub fn new(initial: T) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    /// Install a new snapshot, dropping the previous one once no reader holds it
    pub fn replace(&self, snapshot: T) {
        let next = Arc::new(snapshot);
        let previous = std::mem::replace(&mut *self.current.write(), next);
        drop(previous);
    }

    /// Shared handle to the current snapshot
    pub fn load(&self) -> Arc<T> {
        self.current.read().clone()
    }
}

impl<T: Clone> SnapshotCell<T> {
    /// Copy of the current snapshot
    pub fn read(&self) -> T {
        let snapshot = self.load();
        T::clone(&snapshot)
    }
}

impl<T: Default> Default for SnapshotCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
