//! Dataset ingestion for the leader tenure dashboard

pub mod config;
pub mod ingest;
pub mod schema;
pub mod sources;

use thiserror::Error;
use tokio::task::JoinError;

// Re-exports
pub use config::{DatasetConfig, NullConfig, DEFAULT_DATA_PATH};
pub use ingest::{read_dataset, IngestReport, RowDiagnostic, RowError};
pub use schema::{ColumnLayout, REQUIRED_COLUMNS};
pub use sources::CsvLeaderSource;

/// Errors that stop a dataset from loading at all
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("Required column '{0}' is missing from the header")]
    MissingColumn(&'static str),

    #[error("No group-membership columns found in the header")]
    NoGroupColumns,

    #[error("Dataset error: {0}")]
    Dataset(#[from] lv_core::DatasetError),

    #[error("Join error: {0}")]
    Join(#[from] JoinError),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => DataError::Io(std::io::Error::new(io_err.kind(), error.to_string())),
            _ => DataError::Csv(error.to_string()),
        }
    }
}
