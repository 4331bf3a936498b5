//! Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::collector::clarin::DEFAULT_BASE_URL;
use crate::error::Result;
use crate::scheduler::SchedulerConfig;

/// Main configuration: where the store lives, where to scrape from, and
/// how the scheduler explores the column-pair space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrillaConfig {
    /// SQLite database path.
    pub db_path: PathBuf,

    /// Page root of the published grids to scrape.
    pub scraper_base_url: String,

    /// Generation settings.
    pub scheduler: SchedulerConfig,
}

impl Default for GrillaConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("sachagrilla.db"),
            scraper_base_url: DEFAULT_BASE_URL.to_string(),
            scheduler: SchedulerConfig::default(),
        }
    }
}

impl GrillaConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the database path.
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }

    /// Set the scraper page root.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.scraper_base_url = url.into();
        self
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GrillaConfig::default();
        assert_eq!(config.db_path, PathBuf::from("sachagrilla.db"));
        assert!(config.scraper_base_url.contains("claringrilla"));
        assert_eq!(config.scheduler.max_attempts, 10);
    }

    #[test]
    fn test_config_builder() {
        let config = GrillaConfig::new()
            .with_db_path("/tmp/otra.db")
            .with_base_url("http://localhost:8080/grilla/");
        assert_eq!(config.db_path, PathBuf::from("/tmp/otra.db"));
        assert_eq!(config.scraper_base_url, "http://localhost:8080/grilla/");
    }

    #[test]
    fn test_config_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = GrillaConfig::new().with_db_path("datos/juego.db");
        config.to_file(&path).unwrap();

        let loaded = GrillaConfig::from_file(&path).unwrap();
        assert_eq!(loaded.db_path, config.db_path);
        assert_eq!(loaded.scheduler.column_pairs, config.scheduler.column_pairs);
    }

    #[test]
    fn test_missing_config_file_is_an_io_error() {
        let err = GrillaConfig::from_file("/no/existe/config.json").unwrap_err();
        assert!(matches!(err, crate::error::SachagrillaError::Io(_)));
    }
}
