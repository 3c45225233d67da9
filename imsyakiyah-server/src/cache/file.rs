//! Flat-file cache backend.
//!
//! One JSON file per key, grouped by namespace:
//! `{root}/cities/{stateId}.json` and `{root}/imsyakiyah/{year}_{cityId}.json`.
//! Writes overwrite the whole file; there is no locking.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use super::error::CacheError;
use super::{CacheKey, CacheStore};

/// Disk store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. Nothing is touched until first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a key to its file, refusing names that could escape the namespace.
    pub fn path_for(&self, key: &CacheKey) -> Result<PathBuf, CacheError> {
        let name = key.name();
        let safe = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if !safe {
            return Err(CacheError::InvalidKey(key.to_string()));
        }

        Ok(self
            .root
            .join(key.namespace())
            .join(format!("{name}.json")))
    }
}

#[async_trait]
impl CacheStore for FileStore {
    async fn read(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, CacheError> {
        // An unmappable key can never have been written.
        let Ok(path) = self.path_for(key) else {
            return Ok(None);
        };

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CacheError::Io { path, source }),
        }
    }

    async fn write(&self, key: &CacheKey, bytes: Vec<u8>) -> Result<(), CacheError> {
        let path = self.path_for(key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| CacheError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| CacheError::Io { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn paths_follow_layout() {
        let store = FileStore::new("/data");

        assert_eq!(
            store.path_for(&CacheKey::cities(15)).unwrap(),
            PathBuf::from("/data/cities/15.json")
        );
        assert_eq!(
            store.path_for(&CacheKey::schedule("2022", 3)).unwrap(),
            PathBuf::from("/data/imsyakiyah/2022_3.json")
        );
    }

    #[test]
    fn rejects_traversal_in_year() {
        let store = FileStore::new("/data");
        let result = store.path_for(&CacheKey::schedule("../../etc", 1));
        assert!(matches!(result, Err(CacheError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn write_then_read() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let key = CacheKey::cities(1);

        store.write(&key, b"[]".to_vec()).await.unwrap();

        assert_eq!(store.read(&key).await.unwrap(), Some(b"[]".to_vec()));
        assert!(dir.path().join("cities").join("1.json").exists());
    }

    #[tokio::test]
    async fn missing_file_reads_as_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.read(&CacheKey::cities(42)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn invalid_key_reads_as_none_but_fails_to_write() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let key = CacheKey::schedule("20/22", 1);

        assert_eq!(store.read(&key).await.unwrap(), None);
        assert!(store.write(&key, b"{}".to_vec()).await.is_err());
    }

    #[tokio::test]
    async fn write_overwrites_whole_file() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let key = CacheKey::schedule("2023", 7);

        store.write(&key, b"{\"long\": true}".to_vec()).await.unwrap();
        store.write(&key, b"{}".to_vec()).await.unwrap();

        assert_eq!(store.read(&key).await.unwrap(), Some(b"{}".to_vec()));
    }
}
