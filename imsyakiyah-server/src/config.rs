//! Server configuration, read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::cache::DEFAULT_CAPACITY;
use crate::upstream::DEFAULT_BASE_URL;

/// Which cache backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    /// JSON files under the data directory.
    File,
    /// Process memory; lost on restart.
    Memory,
}

/// Invalid configuration value.
#[derive(Debug, thiserror::Error)]
#[error("invalid value for {var}: {value:?} ({reason})")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Configuration for the server binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind: SocketAddr,

    /// Root for cache files.
    pub data_dir: PathBuf,

    /// Static state list.
    pub states_file: PathBuf,

    /// Base URL of the site scraped for cities and schedules.
    pub upstream_url: String,

    /// Outbound request timeout in seconds.
    pub upstream_timeout_secs: u64,

    pub cache_backend: CacheBackend,

    /// Maximum schedule entries for the memory backend.
    pub cache_capacity: u64,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind = match lookup("IMSYAKIYAH_BIND") {
            Some(value) => value.parse().map_err(|e: std::net::AddrParseError| ConfigError {
                var: "IMSYAKIYAH_BIND",
                reason: e.to_string(),
                value,
            })?,
            None => defaults.bind,
        };

        let data_dir = lookup("IMSYAKIYAH_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let states_file = lookup("IMSYAKIYAH_STATES_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("states").join("all.json"));

        let upstream_url = lookup("IMSYAKIYAH_UPSTREAM_URL").unwrap_or(defaults.upstream_url);

        let upstream_timeout_secs = match lookup("IMSYAKIYAH_UPSTREAM_TIMEOUT_SECS") {
            Some(value) => parse_u64("IMSYAKIYAH_UPSTREAM_TIMEOUT_SECS", value)?,
            None => defaults.upstream_timeout_secs,
        };

        let cache_backend = match lookup("IMSYAKIYAH_CACHE").as_deref() {
            None | Some("file") => CacheBackend::File,
            Some("memory") => CacheBackend::Memory,
            Some(other) => {
                return Err(ConfigError {
                    var: "IMSYAKIYAH_CACHE",
                    value: other.to_string(),
                    reason: "expected \"file\" or \"memory\"".to_string(),
                });
            }
        };

        let cache_capacity = match lookup("IMSYAKIYAH_CACHE_CAPACITY") {
            Some(value) => parse_u64("IMSYAKIYAH_CACHE_CAPACITY", value)?,
            None => defaults.cache_capacity,
        };

        Ok(Self {
            bind,
            data_dir,
            states_file,
            upstream_url,
            upstream_timeout_secs,
            cache_backend,
            cache_capacity,
        })
    }
}

fn parse_u64(var: &'static str, value: String) -> Result<u64, ConfigError> {
    value.parse().map_err(|e: std::num::ParseIntError| ConfigError {
        var,
        reason: e.to_string(),
        value,
    })
}

impl Default for ServerConfig {
    fn default() -> Self {
        let data_dir = PathBuf::from(".");
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            states_file: data_dir.join("states").join("all.json"),
            data_dir,
            upstream_url: DEFAULT_BASE_URL.to_string(),
            upstream_timeout_secs: 30,
            cache_backend: CacheBackend::File,
            cache_capacity: DEFAULT_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn default_config() {
        let config = from_vars(&[]).unwrap();

        assert_eq!(config.bind, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.data_dir, PathBuf::from("."));
        assert_eq!(config.states_file, PathBuf::from("./states/all.json"));
        assert_eq!(config.upstream_url, DEFAULT_BASE_URL);
        assert_eq!(config.upstream_timeout_secs, 30);
        assert_eq!(config.cache_backend, CacheBackend::File);
        assert_eq!(config.cache_capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn states_file_follows_data_dir() {
        let config = from_vars(&[("IMSYAKIYAH_DATA_DIR", "/var/lib/imsyakiyah")]).unwrap();
        assert_eq!(
            config.states_file,
            PathBuf::from("/var/lib/imsyakiyah/states/all.json")
        );
    }

    #[test]
    fn custom_config() {
        let config = from_vars(&[
            ("IMSYAKIYAH_BIND", "0.0.0.0:8000"),
            ("IMSYAKIYAH_STATES_FILE", "/etc/states.json"),
            ("IMSYAKIYAH_UPSTREAM_URL", "http://localhost:9000"),
            ("IMSYAKIYAH_UPSTREAM_TIMEOUT_SECS", "5"),
            ("IMSYAKIYAH_CACHE", "memory"),
            ("IMSYAKIYAH_CACHE_CAPACITY", "50"),
        ])
        .unwrap();

        assert_eq!(config.bind.port(), 8000);
        assert_eq!(config.states_file, PathBuf::from("/etc/states.json"));
        assert_eq!(config.upstream_url, "http://localhost:9000");
        assert_eq!(config.upstream_timeout_secs, 5);
        assert_eq!(config.cache_backend, CacheBackend::Memory);
        assert_eq!(config.cache_capacity, 50);
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = from_vars(&[("IMSYAKIYAH_CACHE", "redis")]).unwrap_err();
        assert_eq!(err.var, "IMSYAKIYAH_CACHE");

        let err = from_vars(&[("IMSYAKIYAH_BIND", "nowhere")]).unwrap_err();
        assert_eq!(err.var, "IMSYAKIYAH_BIND");

        let err = from_vars(&[("IMSYAKIYAH_UPSTREAM_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("IMSYAKIYAH_UPSTREAM_TIMEOUT_SECS"));
    }
}
