// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process key-value store.

use crate::db::{KeyValueStore, StoreError};
use dashmap::DashMap;
use futures_util::future::{BoxFuture, FutureExt};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Key-value store backed by a concurrent map.
///
/// Clones share the same entries. Writes can be made to fail on demand so
/// tests can observe how callers handle an unavailable store, either for
/// every write or for one write part-way through an operation.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<DashMap<String, String>>,
    fail_writes: Arc<AtomicBool>,
    /// Writes left until the one that fails; 0 disables.
    fail_countdown: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set`/`remove` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make the `n`th write from now fail once. Later writes succeed.
    pub fn fail_nth_write(&self, n: usize) {
        self.fail_countdown.store(n, Ordering::SeqCst);
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Synchronous read of the raw stored value.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }

        let hit = self
            .fail_countdown
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok_and(|previous| previous == 1);
        if hit {
            return Err(StoreError::Unavailable("injected write failure".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StoreError>> {
        async move { Ok(self.raw(key)) }.boxed()
    }

    fn set<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, Result<(), StoreError>> {
        async move {
            self.check_writable()?;
            self.entries.insert(key.to_string(), value);
            Ok(())
        }
        .boxed()
    }

    fn remove<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StoreError>> {
        async move {
            self.check_writable()?;
            self.entries.remove(key);
            Ok(())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();

        store.set("a", "1".to_string()).await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), Some("1".to_string()));

        store.remove("a").await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), None);

        // Removing again is fine
        store.remove("a").await.unwrap();
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set("k", "\"v\"".to_string()).await.unwrap();
        assert_eq!(other.raw("k"), Some("\"v\"".to_string()));
        assert_eq!(other.len(), 1);
    }

    #[tokio::test]
    async fn test_fail_writes() {
        let store = MemoryStore::new();
        store.set("k", "1".to_string()).await.unwrap();

        store.set_fail_writes(true);
        assert!(matches!(
            store.set("k", "2".to_string()).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.remove("k").await.is_err());

        // Reads still work and see the old value
        assert_eq!(store.get("k").await.unwrap(), Some("1".to_string()));
    }

    #[tokio::test]
    async fn test_fail_nth_write_fails_once() {
        let store = MemoryStore::new();
        store.fail_nth_write(2);

        store.set("a", "1".to_string()).await.unwrap();
        assert!(store.set("b", "2".to_string()).await.is_err());
        store.set("c", "3".to_string()).await.unwrap();
        store.remove("a").await.unwrap();

        assert_eq!(store.raw("b"), None);
        assert_eq!(store.raw("c"), Some("3".to_string()));
    }
}
