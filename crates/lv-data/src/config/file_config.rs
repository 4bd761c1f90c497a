//! Dataset file configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::null_handling::NullConfig;

/// Default location of the leader list, relative to the working directory
pub const DEFAULT_DATA_PATH: &str = "data/leaderlist.csv";

/// Configuration for loading the leader dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path to the delimited-text file
    pub path: PathBuf,

    /// Field delimiter
    pub delimiter: char,

    /// Tokens read as an unknown GDP value
    pub null_config: NullConfig,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
            delimiter: ',',
            null_config: NullConfig::default(),
        }
    }
}

impl DatasetConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Get the file name
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string()
    }

    /// Delimiter as the single byte the CSV reader expects
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            tracing::warn!("Non-ASCII delimiter {:?} is not supported, using ','", self.delimiter);
            b','
        }
    }
}
