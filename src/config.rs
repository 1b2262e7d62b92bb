//! Layered configuration: built-in defaults, an optional TOML file under
//! the user config directory, then `METAFLUX__*` environment overrides.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Search API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the Semantic Scholar Graph API
    pub base_url: String,
    /// Query used when none is given on the command line
    pub default_query: String,
    /// How many years back the search window reaches
    pub years: u32,
    /// Maximum number of papers per search
    pub limit: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent sent with every request
    pub user_agent: String,
    /// Retry attempts for transient failures
    pub max_retries: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.semanticscholar.org".to_string(),
            default_query: "3D-printed tunable IR metamaterial".to_string(),
            years: 2,
            limit: 25,
            timeout_secs: 30,
            user_agent: format!(
                "metaflux/{} (Academic Research Tool)",
                env!("CARGO_PKG_VERSION")
            ),
            max_retries: 3,
        }
    }
}

/// Output locations for the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Enriched paper database directory (holds `papers.json`)
    pub data_dir: PathBuf,
    /// Downloaded PDFs
    pub papers_dir: PathBuf,
    /// Generated STL files and metadata sidecars
    pub designs_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            papers_dir: PathBuf::from("papers"),
            designs_dir: PathBuf::from("designs"),
        }
    }
}

/// Geometry construction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// Circular segment count for cylinders and tubes
    pub segments: usize,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self { segments: 48 }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub geometry: GeometryConfig,
}

impl Config {
    /// Load configuration from defaults, the optional config file, and
    /// environment variables (e.g. `METAFLUX__SEARCH__LIMIT=50`).
    pub fn load() -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Config::default())?);

        if let Some(path) = Self::config_file() {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix("METAFLUX")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Default config file location (`~/.config/metaflux/config.toml`)
    pub fn config_file() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("metaflux").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.search.default_query.trim().is_empty() {
            return Err(Error::InvalidInput {
                field: "search.default_query".to_string(),
                reason: "query cannot be empty".to_string(),
            });
        }
        if self.search.limit == 0 {
            return Err(Error::InvalidInput {
                field: "search.limit".to_string(),
                reason: "limit must be at least 1".to_string(),
            });
        }
        if self.search.years == 0 {
            return Err(Error::InvalidInput {
                field: "search.years".to_string(),
                reason: "search window must cover at least one year".to_string(),
            });
        }
        if self.geometry.segments < 8 {
            return Err(Error::InvalidInput {
                field: "geometry.segments".to_string(),
                reason: "cylindrical shapes need at least 8 segments".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.search.limit, 25);
        assert_eq!(config.search.years, 2);
        assert_eq!(config.paths.designs_dir, PathBuf::from("designs"));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = Config::default();
        config.search.limit = 0;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidInput { .. })
        ));

        let mut config = Config::default();
        config.geometry.segments = 3;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidInput { .. })
        ));

        let mut config = Config::default();
        config.search.default_query = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidInput { .. })
        ));
    }
}
