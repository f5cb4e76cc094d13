//! Serializable dashboard configuration.
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! stock Our World in Data setup. Lookup order: explicit path, then
//! `{config_dir}/climadash/config.toml`, then built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::view::YearRange;

/// Upstream CSV published by Our World in Data.
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/owid/co2-data/master/owid-co2-data.csv";

/// The whole-world aggregate partition.
pub const DEFAULT_CATEGORY: &str = "World";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("failed to parse config {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub source: SourceConfig,
    pub view: ViewConfig,
}

/// Where and how the dataset is fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    /// Whole-request timeout. Upstream sets none; 30s keeps a dead network bounded.
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Value of the `country` column to keep.
    pub category: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATASET_URL.to_string(),
            timeout_secs: 30,
            user_agent: format!("climadash/{}", env!("CARGO_PKG_VERSION")),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

/// Year-range defaults and slider bounds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    pub default_start: i32,
    pub default_end: i32,
    pub min_year: i32,
    pub max_year: i32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_start: 1900,
            default_end: 2020,
            min_year: 1750,
            max_year: 2020,
        }
    }
}

impl ViewConfig {
    /// Default selection, clamped into the slider bounds.
    pub fn default_range(&self) -> YearRange {
        let (min, max) = self.bounds();
        YearRange::new(self.default_start, self.default_end).clamped(min, max)
    }

    pub fn bounds(&self) -> (i32, i32) {
        (self.min_year.min(self.max_year), self.max_year.max(self.min_year))
    }
}

impl DashboardConfig {
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content, path)
    }

    /// `{config_dir}/climadash/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("climadash").join("config.toml"))
    }

    /// Resolve configuration. An explicit path must exist; the default path may not.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upstream_dashboard() {
        let config = DashboardConfig::default();
        assert_eq!(config.source.url, DEFAULT_DATASET_URL);
        assert_eq!(config.source.category, "World");
        assert_eq!(config.source.timeout_secs, 30);
        assert_eq!(config.view.default_range(), YearRange::new(1900, 2020));
        assert_eq!(config.view.bounds(), (1750, 2020));
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let toml = r#"
            [source]
            timeout_secs = 5

            [view]
            default_start = 1960
        "#;
        let config = DashboardConfig::from_toml_str(toml, Path::new("inline.toml")).unwrap();
        assert_eq!(config.source.timeout_secs, 5);
        assert_eq!(config.source.url, DEFAULT_DATASET_URL);
        assert_eq!(config.view.default_range(), YearRange::new(1960, 2020));
    }

    #[test]
    fn default_range_is_clamped_to_bounds() {
        let view = ViewConfig {
            default_start: 1600,
            default_end: 2100,
            ..ViewConfig::default()
        };
        assert_eq!(view.default_range(), YearRange::new(1750, 2020));
    }

    #[test]
    fn inverted_bounds_are_normalized() {
        let toml = "[view]\nmin_year = 2020\nmax_year = 1750\n";
        let config = DashboardConfig::from_toml_str(toml, Path::new("inline.toml")).unwrap();
        assert_eq!(config.view.bounds(), (1750, 2020));
        assert_eq!(config.view.default_range(), YearRange::new(1900, 2020));
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let err = DashboardConfig::from_toml_str("[source\nurl=", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn explicit_missing_file_is_a_read_error() {
        let err = DashboardConfig::load(Some(Path::new("/nonexistent/climadash.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[source]\ncategory = \"Europe\"\n").unwrap();
        let config = DashboardConfig::from_file(&path).unwrap();
        assert_eq!(config.source.category, "Europe");
    }
}
