//! Bounded snapshot cache and the store that fills it on demand.
//!
//! # Cache Strategy
//! - **Insertion order**: eviction removes the oldest-inserted key (FIFO).
//!   A cache hit does not refresh a key's position.
//! - **Hard ceiling**: after every insert the cache is swept back down to
//!   its capacity.
//! - **No negative caching**: a failed fetch leaves the cache untouched and
//!   the next request for the same key fetches again.

use crate::core::{
    date_key::DateKey,
    error::{Result, ViewerError},
    fetcher::Fetcher,
    snapshot::Snapshot,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

pub const DEFAULT_CACHE_CAPACITY: usize = 10;

#[derive(Debug, Clone)]
pub struct SnapshotCache {
    capacity: usize,
    entries: HashMap<DateKey, Arc<Snapshot>>,
    order: VecDeque<DateKey>,
}

impl SnapshotCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity + 1),
            order: VecDeque::with_capacity(capacity + 1),
        }
    }

    pub fn get(&self, key: &DateKey) -> Option<Arc<Snapshot>> {
        self.entries.get(key).cloned()
    }

    pub fn contains(&self, key: &DateKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert at the newest position, then evict down to capacity.
    /// Returns the evicted keys, oldest first.
    pub fn insert(&mut self, key: DateKey, snapshot: Arc<Snapshot>) -> Vec<DateKey> {
        if self.entries.insert(key.clone(), snapshot).is_none() {
            self.order.push_back(key);
        }
        self.evict()
    }

    fn evict(&mut self) -> Vec<DateKey> {
        let mut evicted = Vec::new();
        while self.entries.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            evicted.push(oldest);
        }
        evicted
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &DateKey> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

/// Resolves snapshots from the cache, fetching on a miss
pub struct SnapshotStore<F> {
    fetcher: F,
    cache: SnapshotCache,
}

impl<F: Fetcher> SnapshotStore<F> {
    pub fn new(fetcher: F, capacity: usize) -> Self {
        Self {
            fetcher,
            cache: SnapshotCache::new(capacity),
        }
    }

    pub async fn resolve(&mut self, key: &DateKey) -> Result<Arc<Snapshot>> {
        if let Some(snapshot) = self.cache.get(key) {
            log::debug!("Snapshot cache hit for {key}");
            return Ok(snapshot);
        }

        log::debug!("Snapshot cache miss for {key}, fetching");
        let snapshot = self.fetch(key).await.map_err(|e| {
            log::warn!("Snapshot fetch for {key} failed: {e}");
            e
        })?;

        let evicted = self.cache.insert(key.clone(), Arc::clone(&snapshot));
        for old in evicted {
            log::debug!("Evicted snapshot {old} from cache");
        }
        Ok(snapshot)
    }

    async fn fetch(&self, key: &DateKey) -> Result<Arc<Snapshot>> {
        let value = self
            .fetcher
            .fetch_snapshot(key)
            .await
            .map_err(|e| ViewerError::fetch(key.clone(), e))?;
        let snapshot = Snapshot::from_value(value).map_err(|e| ViewerError::fetch(key.clone(), e))?;
        Ok(Arc::new(snapshot))
    }

    pub fn is_cached(&self, key: &DateKey) -> bool {
        self.cache.contains(key)
    }

    pub fn cached_keys(&self) -> Vec<DateKey> {
        self.cache.keys().cloned().collect()
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}
