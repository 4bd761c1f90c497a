use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use lv_core::Dataset;
use tracing::info;

use crate::config::DatasetConfig;
use crate::ingest::{read_dataset, IngestReport};
use crate::DataError;

/// CSV source for the leader list
pub struct CsvLeaderSource {
    config: DatasetConfig,
    name: String,
}

impl CsvLeaderSource {
    pub fn new(config: DatasetConfig) -> Self {
        let name = config.file_name();
        Self { config, name }
    }

    /// Source with default settings for the file at `path`
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(DatasetConfig::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Read and coerce the whole file on a blocking worker
    pub async fn load_with_report(&self) -> Result<(Dataset, IngestReport), DataError> {
        let config = self.config.clone();
        info!("Loading leader list from {:?}", config.path);

        tokio::task::spawn_blocking(move || {
            let file = File::open(&config.path)?;
            read_dataset(BufReader::new(file), &config)
        })
        .await?
    }
}

#[async_trait]
impl lv_core::data::LeaderSource for CsvLeaderSource {
    async fn load(&self) -> anyhow::Result<Dataset> {
        let (dataset, _report) = self.load_with_report().await?;
        Ok(dataset)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lv_core::LeaderSource;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "country,leader,gender,start_year,end_year,start_age,end_age,duration,pcgdp,label,oecd").unwrap();
        writeln!(file, "Norway,Gro Harlem Brundtland,Female,1990,1996,51,57,6,30000,1,1").unwrap();
        writeln!(file, "Norway,Broken,Male,x,1996,51,57,6,30000,0,1").unwrap();
        file.flush().unwrap();

        let source = CsvLeaderSource::from_path(file.path());
        let (dataset, report) = source.load_with_report().await.unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(report.diagnostics.len(), 1);

        let dataset = source.load().await.unwrap();
        assert!(dataset.contains("Gro Harlem Brundtland"));
    }

    #[tokio::test]
    async fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvLeaderSource::from_path(dir.path().join("nope.csv"));
        assert_eq!(source.source_name(), "nope.csv");

        let err = source.load_with_report().await.unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }
}
