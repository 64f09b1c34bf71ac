use std::{hash::Hash, sync::Arc};

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per key, created on first use.
pub struct KeyedLocks<K> {
    inner: Arc<DashMap<K, Arc<Mutex<()>>>>,
}

impl<K: Eq + Hash> KeyedLocks<K> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
        }
    }

    pub async fn lock(&self, key: K) -> OwnedMutexGuard<()> {
        let mutex = self.inner.entry(key).or_default().clone();
        mutex.lock_owned().await
    }

    /// Drop the entry for `key` unless someone is holding or waiting on it.
    pub fn forget(&self, key: &K) {
        self.inner
            .remove_if(key, |_, mutex| Arc::strong_count(mutex) == 1);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K: Eq + Hash> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for KeyedLocks<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
