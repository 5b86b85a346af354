//! Configuration management with YAML support

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::pipeline::{CleanTrial, PhaseSelection, TrialFilter, YearRange};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub filters: FilterConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: String,
}

/// Default filter choices; unset values fall back to the full data range
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub default_from: Option<i32>,

    #[serde(default)]
    pub default_to: Option<i32>,

    #[serde(default)]
    pub default_phases: Vec<String>,
}

/// Text output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,

    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

// Default value functions
fn default_database_path() -> String {
    "~/.local/share/adtrials/aact.db".to_string()
}

fn default_bar_width() -> usize {
    40
}

fn default_list_limit() -> usize {
    25
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            bar_width: default_bar_width(),
            list_limit: default_list_limit(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    /// Searches in order:
    /// 1. Provided path
    /// 2. ./adtrials.yaml (current directory)
    /// 3. ~/.config/adtrials/adtrials.yaml
    pub fn load(path: &str) -> Result<Self> {
        let search_paths = vec![
            shellexpand::tilde(path).to_string(),
            "adtrials.yaml".to_string(),
            shellexpand::tilde("~/.config/adtrials/adtrials.yaml").to_string(),
        ];

        for search_path in &search_paths {
            if std::path::Path::new(search_path).exists() {
                let content = std::fs::read_to_string(search_path)
                    .with_context(|| format!("Failed to read config {}", search_path))?;
                let config: Config = serde_yaml::from_str(&content)
                    .with_context(|| format!("Invalid config {}", search_path))?;
                tracing::debug!(path = %search_path, "loaded config");
                return Ok(config);
            }
        }

        // No config file found, use defaults
        Ok(Config::default())
    }

    /// Get the database path, expanding ~ to home directory
    pub fn database_path(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.database.path).to_string();
        PathBuf::from(expanded)
    }

    /// Resolve the effective filter for a set of trials
    /// Precedence: explicit arguments, then config defaults, then the full
    /// year span and every phase present in the data.
    pub fn resolve_filter(
        &self,
        trials: &[CleanTrial],
        from: Option<i32>,
        to: Option<i32>,
        phases: Vec<String>,
    ) -> TrialFilter {
        // An empty data span leaves the missing side open
        let span = YearRange::spanning(trials).unwrap_or_default();
        let years = YearRange {
            start: from.or(self.filters.default_from).or(span.start),
            end: to.or(self.filters.default_to).or(span.end),
        };

        let phases = if !phases.is_empty() {
            PhaseSelection::only(phases)
        } else if !self.filters.default_phases.is_empty() {
            PhaseSelection::only(self.filters.default_phases.clone())
        } else {
            PhaseSelection::All
        };

        TrialFilter::new(years, phases)
    }
}
