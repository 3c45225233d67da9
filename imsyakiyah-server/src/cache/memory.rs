//! In-memory cache backend.
//!
//! Entries live for the life of the process; there is no TTL because
//! cached schedules are treated as permanently correct.
//!
//! City lists are never evicted: city ids come from list position, so a
//! rescrape after eviction could renumber them if the site reordered its
//! dropdown. Only schedules count against the capacity bound, and an
//! evicted schedule is simply scraped again.

use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use super::error::CacheError;
use super::{CacheKey, CacheStore};

/// Default maximum number of schedule entries.
pub const DEFAULT_CAPACITY: u64 = 10_000;

/// Moka-backed store.
#[derive(Clone)]
pub struct MemoryStore {
    cities: MokaCache<CacheKey, Arc<Vec<u8>>>,
    schedules: MokaCache<CacheKey, Arc<Vec<u8>>>,
}

impl MemoryStore {
    /// Create a store holding at most `max_capacity` schedules.
    pub fn new(max_capacity: u64) -> Self {
        Self {
            cities: MokaCache::builder().build(),
            schedules: MokaCache::builder().max_capacity(max_capacity).build(),
        }
    }

    fn entries(&self, key: &CacheKey) -> &MokaCache<CacheKey, Arc<Vec<u8>>> {
        match key {
            CacheKey::Cities { .. } => &self.cities,
            CacheKey::Schedule { .. } => &self.schedules,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn read(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self
            .entries(key)
            .get(key)
            .await
            .map(|bytes| bytes.as_ref().clone()))
    }

    async fn write(&self, key: &CacheKey, bytes: Vec<u8>) -> Result<(), CacheError> {
        self.entries(key)
            .insert(key.clone(), Arc::new(bytes))
            .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_then_read() {
        let store = MemoryStore::default();
        let key = CacheKey::schedule("2022", 1);

        assert_eq!(store.read(&key).await.unwrap(), None);
        store.write(&key, b"{}".to_vec()).await.unwrap();
        assert_eq!(store.read(&key).await.unwrap(), Some(b"{}".to_vec()));
    }

    #[tokio::test]
    async fn keys_are_distinct_per_namespace() {
        let store = MemoryStore::default();
        store
            .write(&CacheKey::cities(1), b"[]".to_vec())
            .await
            .unwrap();

        assert_eq!(store.read(&CacheKey::schedule("1", 1)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn schedule_pressure_never_evicts_cities() {
        let store = MemoryStore::new(1);
        let cities = CacheKey::cities(15);
        store.write(&cities, b"[1]".to_vec()).await.unwrap();

        for city_id in 0..50 {
            store
                .write(&CacheKey::schedule("2022", city_id), b"{}".to_vec())
                .await
                .unwrap();
        }
        store.schedules.run_pending_tasks().await;
        store.cities.run_pending_tasks().await;

        assert_eq!(store.read(&cities).await.unwrap(), Some(b"[1]".to_vec()));
    }
}
