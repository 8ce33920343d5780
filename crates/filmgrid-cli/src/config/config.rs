//! `AppConfig` struct and TOML loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use filmgrid_api::tmdb::SearchMovieParams;
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB request defaults.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Log output while the TUI is running.
    #[serde(default)]
    pub log: LogConfig,
}

/// TMDB request defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TmdbConfig {
    /// API base URL; `TMDB_BASE_URL` takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Response language.
    #[serde(default = "default_language")]
    pub language: String,
    /// Include adult titles in results.
    #[serde(default)]
    pub include_adult: bool,
    /// ISO 3166-1 region used to filter release dates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

fn default_language() -> String {
    String::from("en-US")
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            language: default_language(),
            include_adult: false,
            region: None,
        }
    }
}

impl TmdbConfig {
    /// Returns the request template carrying these defaults.
    #[must_use]
    pub fn search_template(&self) -> SearchMovieParams {
        let params = SearchMovieParams::new("")
            .language(&self.language)
            .include_adult(self.include_adult);
        match &self.region {
            Some(region) => params.region(region),
            None => params,
        }
    }
}

/// Log output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// File that receives logs while the TUI owns the terminal.
    /// Logging is off during the TUI when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Renders the config as TOML for display.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize config to TOML")
    }
}
