//! Cache error types.

use std::path::PathBuf;

/// Errors raised while writing (or, for the file store, reading) entries.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Filesystem operation failed
    #[error("cache I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be encoded
    #[error("failed to serialize cache entry: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Key cannot be mapped to a storage location
    #[error("invalid cache key: {0}")]
    InvalidKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CacheError::InvalidKey("imsyakiyah/../x_1".into());
        assert_eq!(err.to_string(), "invalid cache key: imsyakiyah/../x_1");

        let err = CacheError::Io {
            path: PathBuf::from("cities/1.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "cache I/O error at cities/1.json: denied");
    }
}
