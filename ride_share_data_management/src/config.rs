use std::path::PathBuf;

use serde::Deserialize;

use crate::DATABASE_PATH;

const MEMORY_URL: &str = "sqlite::memory:";

/// Where the document store lives and how many connections it may hold.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: format!("sqlite://{DATABASE_PATH}"),
            max_connections: 5,
        }
    }
}

impl StoreConfig {
    /// A private store that disappears with its pool. Used by tests.
    pub fn in_memory() -> Self {
        Self {
            url: MEMORY_URL.to_string(),
            max_connections: 1,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:")
    }

    /// Database file path. Relative paths resolve against the project root
    /// when there is one, and against the working directory otherwise.
    pub fn database_file(&self) -> PathBuf {
        let path = self
            .url
            .strip_prefix("sqlite://")
            .or_else(|| self.url.strip_prefix("sqlite:"))
            .unwrap_or(&self.url);
        let path = PathBuf::from(path);

        if path.is_absolute() {
            return path;
        }

        project_root::get_project_root()
            .map(|root| root.join(&path))
            .unwrap_or(path)
    }
}

/// Ride matching behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Report an empty match as "not found" instead of an empty list.
    pub empty_is_not_found: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            empty_is_not_found: true,
        }
    }
}
