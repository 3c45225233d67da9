//! Cache-aside layer for scraped data.
//!
//! Nothing scraped is ever invalidated: once an entry is written it is
//! treated as permanently correct. The storage backend sits behind
//! [`CacheStore`] so flat files and memory are interchangeable.
//!
//! Reads never fail. An entry that cannot be read or decoded comes back as
//! [`CacheLookup::Corrupt`], and [`Cache::get_or_populate`] treats it like a
//! miss.

mod error;
mod file;
mod memory;

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

pub use error::CacheError;
pub use file::FileStore;
pub use memory::{DEFAULT_CAPACITY, MemoryStore};

/// Identity of a cached value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// City list for a state.
    Cities { state_id: u32 },
    /// Raw schedule payload for a city and year.
    Schedule { year: String, city_id: u32 },
}

impl CacheKey {
    pub fn cities(state_id: u32) -> Self {
        Self::Cities { state_id }
    }

    pub fn schedule(year: impl Into<String>, city_id: u32) -> Self {
        Self::Schedule {
            year: year.into(),
            city_id,
        }
    }

    /// Group the key belongs to.
    pub fn namespace(&self) -> &'static str {
        match self {
            Self::Cities { .. } => "cities",
            Self::Schedule { .. } => "imsyakiyah",
        }
    }

    /// Name within the namespace.
    pub fn name(&self) -> String {
        match self {
            Self::Cities { state_id } => state_id.to_string(),
            Self::Schedule { year, city_id } => format!("{year}_{city_id}"),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace(), self.name())
    }
}

/// Outcome of reading a key.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup<T> {
    Hit(T),
    Miss,
    /// Present but unreadable or undecodable.
    Corrupt { reason: String },
}

/// Value produced by a populate function, tagged with whether to keep it.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill<T> {
    /// Write to the cache before returning.
    Persist(T),
    /// Return without caching; the next lookup will populate again.
    Transient(T),
}

/// Byte-level storage backend.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read an entry. `Ok(None)` means absent.
    async fn read(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, CacheError>;

    /// Write an entry, replacing any previous value.
    async fn write(&self, key: &CacheKey, bytes: Vec<u8>) -> Result<(), CacheError>;
}

/// Typed JSON cache over a [`CacheStore`].
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn CacheStore>,
}

impl Cache {
    /// Create a cache over the given backend.
    pub fn new(store: impl CacheStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Read and decode an entry.
    pub async fn lookup<T: DeserializeOwned>(&self, key: &CacheKey) -> CacheLookup<T> {
        match self.store.read(key).await {
            Ok(None) => CacheLookup::Miss,
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(value) => CacheLookup::Hit(value),
                Err(e) => CacheLookup::Corrupt {
                    reason: format!("undecodable entry: {e}"),
                },
            },
            Err(e) => CacheLookup::Corrupt {
                reason: e.to_string(),
            },
        }
    }

    /// Encode and write an entry.
    pub async fn put<T: Serialize + Sync>(&self, key: &CacheKey, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.write(key, bytes).await
    }

    /// Return the cached value for `key`, or run `populate` and keep its
    /// result if it asks to be persisted.
    pub async fn get_or_populate<T, E, F, Fut>(&self, key: &CacheKey, populate: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned + Sync,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Fill<T>, E>>,
    {
        match self.lookup(key).await {
            CacheLookup::Hit(value) => {
                debug!(key = %key, "Cache hit");
                return Ok(value);
            }
            CacheLookup::Miss => debug!(key = %key, "Cache miss"),
            CacheLookup::Corrupt { reason } => {
                warn!(key = %key, reason = %reason, "Ignoring unreadable cache entry");
            }
        }

        match populate().await? {
            Fill::Persist(value) => {
                self.put(key, &value).await?;
                info!(key = %key, "Cached scraped value");
                Ok(value)
            }
            Fill::Transient(value) => {
                debug!(key = %key, "Scraped value not cached");
                Ok(value)
            }
        }
    }
}
