//! Region store: the static list of states.

use std::io::ErrorKind;
use std::path::Path;

use tracing::info;

use crate::domain::{State, matches_search};
use crate::upstream::Upstream;

use super::error::{LookupError, RegionError};

/// All known states, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct RegionStore {
    states: Vec<State>,
}

impl RegionStore {
    pub fn new(states: Vec<State>) -> Self {
        Self { states }
    }

    /// Load states from a JSON array file.
    pub fn load(path: &Path) -> Result<Self, RegionError> {
        let contents = std::fs::read_to_string(path).map_err(|source| RegionError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let states = serde_json::from_str(&contents).map_err(|source| RegionError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self { states })
    }

    /// Load states from `path`, scraping and writing the file first if it
    /// does not exist yet.
    ///
    /// Ids are assigned 1-based in dropdown order. An existing file is never
    /// rewritten.
    pub async fn load_or_bootstrap(
        path: &Path,
        upstream: &dyn Upstream,
    ) -> Result<Self, RegionError> {
        match Self::load(path) {
            Err(RegionError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {}
            other => return other,
        }

        info!(path = %path.display(), "State list missing, scraping provinces");
        let options = upstream.fetch_states().await?;
        if options.is_empty() {
            return Err(RegionError::Empty);
        }

        let states: Vec<State> = (1u32..)
            .zip(options)
            .map(|(id, option)| State {
                id,
                code: option.code,
                name: option.name,
            })
            .collect();

        let io_err = |source| RegionError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(&states)?;
        std::fs::write(path, json).map_err(io_err)?;

        info!(count = states.len(), "Wrote state list");
        Ok(Self { states })
    }

    /// States whose name contains `search` (case-insensitive), or all states
    /// when `search` is absent or empty.
    pub fn list_states(&self, search: Option<&str>) -> Result<Vec<State>, LookupError> {
        let states: Vec<State> = self
            .states
            .iter()
            .filter(|s| matches_search(&s.name, search))
            .cloned()
            .collect();

        if states.is_empty() {
            return Err(LookupError::StateNotFound);
        }

        Ok(states)
    }

    /// Look up a state by id.
    pub fn find(&self, id: u32) -> Option<&State> {
        self.states.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::{MockUpstream, RegionOption};
    use tempfile::tempdir;

    fn store() -> RegionStore {
        RegionStore::new(vec![
            State {
                id: 15,
                code: "X".to_string(),
                name: "JAWA TENGAH".to_string(),
            },
            State {
                id: 1,
                code: "Y".to_string(),
                name: "PUSAT".to_string(),
            },
        ])
    }

    #[test]
    fn search_filters_by_name() {
        let states = store().list_states(Some("JAWA")).unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].id, 15);
    }

    #[test]
    fn lowercase_search_matches() {
        let states = store().list_states(Some("tengah")).unwrap();
        assert_eq!(states[0].name, "JAWA TENGAH");
    }

    #[test]
    fn no_search_returns_all_in_file_order() {
        let ids: Vec<u32> = store()
            .list_states(None)
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![15, 1]);
    }

    #[test]
    fn no_match_is_not_found() {
        let result = store().list_states(Some("PAPUA"));
        assert!(matches!(result, Err(LookupError::StateNotFound)));
    }

    #[test]
    fn empty_store_is_not_found() {
        let result = RegionStore::default().list_states(None);
        assert!(matches!(result, Err(LookupError::StateNotFound)));
    }

    #[test]
    fn find_by_id() {
        let store = store();
        assert_eq!(store.find(1).map(|s| s.name.as_str()), Some("PUSAT"));
        assert!(store.find(999).is_none());
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("all.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "code": "q2hL%3D%3D", "name": "PUSAT"}, {"id": 2, "code": "7Ta0", "name": "ACEH"}]"#,
        )
        .unwrap();

        let store = RegionStore::load(&path).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.find(2).unwrap().code, "7Ta0");
    }

    #[test]
    fn load_malformed_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("all.json");
        std::fs::write(&path, "{").unwrap();

        assert!(matches!(
            RegionStore::load(&path),
            Err(RegionError::Parse { .. })
        ));
    }

    #[tokio::test]
    async fn bootstrap_scrapes_once_and_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("states").join("all.json");
        let upstream = MockUpstream::new().with_states(vec![
            RegionOption::new("q2hL", "PUSAT"),
            RegionOption::new("7Ta0", "ACEH"),
        ]);

        let store = RegionStore::load_or_bootstrap(&path, &upstream)
            .await
            .unwrap();
        assert_eq!(store.find(2).map(|s| s.name.as_str()), Some("ACEH"));
        assert!(path.exists());

        let reloaded = RegionStore::load_or_bootstrap(&path, &upstream)
            .await
            .unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(upstream.state_fetches(), 1);
    }

    #[tokio::test]
    async fn bootstrap_refuses_empty_scrape() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("all.json");
        let upstream = MockUpstream::new();

        let result = RegionStore::load_or_bootstrap(&path, &upstream).await;
        assert!(matches!(result, Err(RegionError::Empty)));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn bootstrap_keeps_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("all.json");
        std::fs::write(&path, "not json").unwrap();
        let upstream = MockUpstream::new().with_states(vec![RegionOption::new("a", "ACEH")]);

        let result = RegionStore::load_or_bootstrap(&path, &upstream).await;
        assert!(matches!(result, Err(RegionError::Parse { .. })));
        assert_eq!(upstream.state_fetches(), 0);
    }
}
