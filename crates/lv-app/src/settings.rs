//! Dashboard settings file and environment overrides

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lv_core::FilterPolicy;
use lv_data::{DatasetConfig, NullConfig, DEFAULT_DATA_PATH};
use lv_views::DashboardCharts;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Settings file looked up in the working directory
pub const SETTINGS_FILE: &str = "leaderviz.json";
/// Environment variable naming another settings file
pub const CONFIG_ENV: &str = "LEADERVIZ_CONFIG";
/// Environment variable naming the dataset
pub const DATA_ENV: &str = "LEADERVIZ_DATA";

/// Everything the dashboard reads at startup; every field is optional in the file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub data_path: Option<PathBuf>,
    pub delimiter: Option<char>,
    /// Tokens read as an unknown GDP value
    pub null_tokens: Option<Vec<String>>,
    pub policy: FilterPolicy,
    pub charts: DashboardCharts,
}

impl DashboardSettings {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid settings file {}", path.display()))
    }

    /// Read the settings named by `explicit`, else `leaderviz.json` if it exists, else defaults.
    ///
    /// An explicitly named file must exist.
    pub fn load(explicit: Option<PathBuf>) -> Result<Self> {
        match explicit {
            Some(path) => {
                info!("Reading settings from {}", path.display());
                Self::from_file(&path)
            }
            None => {
                let path = Path::new(SETTINGS_FILE);
                if path.exists() {
                    info!("Reading settings from {SETTINGS_FILE}");
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Read the settings from the locations the environment points at
    pub fn from_env() -> Result<Self> {
        Self::load(std::env::var_os(CONFIG_ENV).map(PathBuf::from))
    }

    /// Dataset path in priority order: command line, environment, settings, default
    pub fn resolve_data_path(&self, cli: Option<PathBuf>, env: Option<PathBuf>) -> PathBuf {
        cli.or(env)
            .or_else(|| self.data_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
    }

    pub fn dataset_config(&self, path: PathBuf) -> DatasetConfig {
        let mut config = DatasetConfig::new(path);
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if let Some(tokens) = &self.null_tokens {
            config.null_config = NullConfig::with_patterns(tokens.clone());
        }
        config
    }
}
