//! Cache-aside store for decoded remote results.
//!
//! Entries are keyed by operation name plus the exact request body and hold a
//! type-erased payload together with the instant it was stored. One mutex
//! guards the whole map; critical sections never await.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::gateway::clock::Clock;
use crate::observability::metrics;

/// Shared, type-erased decoded result.
pub type Payload = Arc<dyn Any + Send + Sync>;

/// Exact-match cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    operation: String,
    body: String,
}

impl CacheKey {
    pub fn new(operation: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            body: body.into(),
        }
    }
}

/// A stored payload and its creation time.
#[derive(Clone)]
pub struct CacheEntry {
    payload: Payload,
    created_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(payload: Payload, created_at: DateTime<Utc>) -> Self {
        Self {
            payload,
            created_at,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Recover the concrete payload type, if it matches.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.payload.clone().downcast::<T>().ok()
    }
}

impl fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// Errors from storing an entry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("cache is full ({capacity} entries)")]
    Full { capacity: usize },
}

/// Process-local result cache.
pub struct ResultCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    clock: Arc<dyn Clock>,
    /// Maximum number of keys; zero means unbounded.
    capacity: usize,
}

impl ResultCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            capacity: 0,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.entries.lock().get(key).cloned()
    }

    /// Store `payload` stamped with the current time.
    ///
    /// Returns whether a previous entry was replaced.
    pub fn put(&self, key: CacheKey, payload: Payload) -> Result<bool, CacheError> {
        let entry = CacheEntry::new(payload, self.clock.now());
        self.put_entry(key, entry)
    }

    /// Store a pre-stamped entry.
    pub fn put_entry(&self, key: CacheKey, entry: CacheEntry) -> Result<bool, CacheError> {
        let mut entries = self.entries.lock();
        if self.capacity > 0 && entries.len() >= self.capacity && !entries.contains_key(&key) {
            return Err(CacheError::Full {
                capacity: self.capacity,
            });
        }
        let replaced = entries.insert(key, entry).is_some();
        metrics::record_cache_size(entries.len());
        Ok(replaced)
    }

    /// Remove the entry for `key`. Returns whether one existed.
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        let mut entries = self.entries.lock();
        let removed = entries.remove(key).is_some();
        metrics::record_cache_size(entries.len());
        removed
    }

    /// An entry is stale once its age reaches `ttl`. Entries stamped in the
    /// future are always stale.
    pub fn is_stale(&self, entry: &CacheEntry, ttl: Duration) -> bool {
        self.is_future_dated(entry)
            || (self.clock.now() - entry.created_at)
                .to_std()
                .map_or(true, |age| age >= ttl)
    }

    pub fn is_future_dated(&self, entry: &CacheEntry) -> bool {
        entry.created_at > self.clock.now()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let mut entries = self.entries.lock();
        let removed = entries.len();
        entries.clear();
        metrics::record_cache_size(0);
        removed
    }
}
