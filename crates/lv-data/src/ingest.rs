//! Row coercion from raw delimited text into leader records

use std::io::Read;

use ahash::{AHashMap, AHashSet};
use csv::{ReaderBuilder, StringRecord};
use lv_core::{Dataset, LeaderRecord};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{DatasetConfig, NullConfig};
use crate::schema::ColumnLayout;
use crate::DataError;

/// Why a single row was left out of the dataset
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    #[error("missing leader name")]
    MissingLeader,

    #[error("leader '{0}' already appeared on an earlier row")]
    DuplicateLeader(String),

    #[error("column '{column}' is empty")]
    MissingField { column: String },

    #[error("column '{column}' is not a number: '{value}'")]
    InvalidNumber { column: String, value: String },

    #[error("column '{column}' is not a whole year: '{value}'")]
    NonIntegralYear { column: String, value: String },

    #[error("start year {start} is after end year {end}")]
    InvertedTenure { start: i32, end: i32 },

    #[error("column '{column}' must be 0 or 1, got '{value}'")]
    InvalidFlag { column: String, value: String },

    #[error("malformed row: {0}")]
    Malformed(String),
}

/// A dropped row and the reason it was dropped
#[derive(Debug, Clone, PartialEq)]
pub struct RowDiagnostic {
    /// 1-based line in the input, when known
    pub line: Option<u64>,
    pub leader: Option<String>,
    pub error: RowError,
}

/// Summary of one ingestion pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    pub rows_read: usize,
    pub diagnostics: Vec<RowDiagnostic>,
}

impl IngestReport {
    pub fn rows_kept(&self) -> usize {
        self.rows_read - self.diagnostics.len()
    }
}

/// Read every row of `reader` into a dataset.
///
/// Rows that fail to coerce are dropped with a diagnostic; only header-level and
/// I/O problems fail the whole read.
pub fn read_dataset<R: Read>(reader: R, config: &DatasetConfig) -> Result<(Dataset, IngestReport), DataError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(config.delimiter_byte())
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let layout = ColumnLayout::from_headers(&headers)?;
    debug!("Resolved column layout: {:?}", layout);

    let mut report = IngestReport::default();
    let mut records = Vec::new();
    let mut seen = AHashSet::new();

    for result in csv_reader.records() {
        report.rows_read += 1;

        let row = match result {
            Ok(row) => row,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
            Err(e) => {
                let line = e.position().map(|p| p.line());
                drop_row(&mut report, line, None, RowError::Malformed(e.to_string()));
                continue;
            }
        };
        let line = row.position().map(|p| p.line());

        match parse_row(&row, &layout, &config.null_config) {
            Ok(record) => {
                if !seen.insert(record.leader.clone()) {
                    let leader = record.leader.clone();
                    drop_row(&mut report, line, Some(leader.clone()), RowError::DuplicateLeader(leader));
                    continue;
                }
                records.push(record);
            }
            Err(error) => {
                let leader = field(&row, layout.leader).map(str::to_string);
                drop_row(&mut report, line, leader, error);
            }
        }
    }

    let skipped = report.diagnostics.len();
    let dataset = Dataset::new(records, layout.group_names())?.with_skipped_rows(skipped);
    info!(
        "Ingested {} leaders from {} rows ({} skipped), groups: {:?}",
        dataset.len(),
        report.rows_read,
        skipped,
        dataset.group_columns()
    );
    Ok((dataset, report))
}

fn drop_row(report: &mut IngestReport, line: Option<u64>, leader: Option<String>, error: RowError) {
    warn!(
        "Skipping row at line {} ({}): {}",
        line.map(|l| l.to_string()).unwrap_or_else(|| "?".to_string()),
        leader.as_deref().unwrap_or("unknown leader"),
        error
    );
    report.diagnostics.push(RowDiagnostic { line, leader, error });
}

/// Coerce one raw row into a record
pub fn parse_row(row: &StringRecord, layout: &ColumnLayout, nulls: &NullConfig) -> Result<LeaderRecord, RowError> {
    let leader = field(row, layout.leader).ok_or(RowError::MissingLeader)?.to_string();

    let start_year = year(row, layout.start_year, "start_year")?;
    let end_year = year(row, layout.end_year, "end_year")?;
    if start_year > end_year {
        return Err(RowError::InvertedTenure { start: start_year, end: end_year });
    }

    let duration = number(row, layout.duration, "duration")?;
    if (duration - f64::from(end_year - start_year)).abs() > f64::EPSILON {
        debug!(
            "Leader '{}' has duration {} for years {}-{}",
            leader, duration, start_year, end_year
        );
    }

    let pcgdp = match row.get(layout.pcgdp) {
        None => None,
        Some(raw) if nulls.is_null(raw) => None,
        Some(raw) => Some(parse_number(raw, "pcgdp")?),
    };

    let mut groups = AHashMap::with_capacity(layout.groups.len());
    for (name, idx) in &layout.groups {
        groups.insert(name.clone(), flag(row, *idx, name)?);
    }

    Ok(LeaderRecord {
        leader,
        country: field(row, layout.country).unwrap_or_default().to_string(),
        gender: field(row, layout.gender).unwrap_or_default().to_string(),
        start_year,
        end_year,
        start_age: number(row, layout.start_age, "start_age")?,
        end_age: number(row, layout.end_age, "end_age")?,
        duration,
        pcgdp,
        label: u8::from(flag(row, layout.label, "label")?),
        groups,
    })
}

/// Trimmed, non-empty field text
fn field(row: &StringRecord, idx: usize) -> Option<&str> {
    row.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_number(raw: &str, column: &str) -> Result<f64, RowError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RowError::InvalidNumber {
            column: column.to_string(),
            value: raw.to_string(),
        })
}

fn number(row: &StringRecord, idx: usize, column: &str) -> Result<f64, RowError> {
    let raw = field(row, idx).ok_or_else(|| RowError::MissingField { column: column.to_string() })?;
    parse_number(raw, column)
}

fn year(row: &StringRecord, idx: usize, column: &str) -> Result<i32, RowError> {
    let value = number(row, idx, column)?;
    if value.fract() != 0.0 || value.abs() > f64::from(i32::MAX) {
        return Err(RowError::NonIntegralYear {
            column: column.to_string(),
            value: value.to_string(),
        });
    }
    Ok(value as i32)
}

fn flag(row: &StringRecord, idx: usize, column: &str) -> Result<bool, RowError> {
    let value = number(row, idx, column)?;
    if value == 1.0 {
        Ok(true)
    } else if value == 0.0 {
        Ok(false)
    } else {
        Err(RowError::InvalidFlag {
            column: column.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "country,leader,gender,start_year,end_year,start_age,end_age,duration,pcgdp,label,oecd,eu27";

    fn read(body: &str) -> (Dataset, IngestReport) {
        let input = format!("{HEADER}\n{body}");
        read_dataset(input.as_bytes(), &DatasetConfig::default()).unwrap()
    }

    #[test]
    fn test_parses_all_fields() {
        let (dataset, report) = read("Canada,Kim Campbell,Female,1993,1993,46,46,0,21000.5,1,1,0\n");
        assert_eq!(report.rows_read, 1);
        assert!(report.diagnostics.is_empty());

        let record = dataset.get("Kim Campbell").unwrap();
        assert_eq!(record.country, "Canada");
        assert_eq!(record.gender, "Female");
        assert_eq!((record.start_year, record.end_year), (1993, 1993));
        assert_eq!(record.pcgdp, Some(21000.5));
        assert_eq!(record.label, 1);
        assert!(record.in_group("oecd"));
        assert!(!record.in_group("eu27"));
        assert_eq!(dataset.group_columns(), ["oecd".to_string(), "eu27".to_string()]);
    }

    #[test]
    fn test_na_gdp_is_unknown_not_an_error() {
        let (dataset, report) = read("Chile,A,Female,2006,2010,54,58,4,NA,0,1,0\n");
        assert!(report.diagnostics.is_empty());
        assert_eq!(dataset.get("A").unwrap().pcgdp, None);
    }

    #[test]
    fn test_bad_rows_are_dropped_without_stopping() {
        let (dataset, report) = read(concat!(
            "X,A,Male,1990,1995,50,55,5,1000,0,1,0\n",
            "X,B,Male,19x0,1995,50,55,5,1000,0,1,0\n",
            "X,,Male,1990,1995,50,55,5,1000,0,1,0\n",
            "X,A,Female,1990,1995,50,55,5,1000,0,1,0\n",
            "X,C,Male,1990,1995,50,55,,1000,0,1,0\n",
            "X,D,Male,1999,1995,50,55,5,1000,0,1,0\n",
            "X,E,Male,1990,1995,50,55,5,lots,0,1,0\n",
            "X,F,Male,1990,1995,50,55,5,1000,0,2,0\n",
            "X,G,Female,1990,1995,50,55,5,,0,1,0\n",
        ));

        assert_eq!(report.rows_read, 9);
        assert_eq!(report.rows_kept(), 2);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.skipped_rows(), 7);
        assert_eq!(dataset.get("A").unwrap().gender, "Male");
        assert_eq!(dataset.get("G").unwrap().pcgdp, None);

        let errors: Vec<&RowError> = report.diagnostics.iter().map(|d| &d.error).collect();
        assert!(matches!(errors[0], RowError::InvalidNumber { column, .. } if column == "start_year"));
        assert_eq!(errors[1], &RowError::MissingLeader);
        assert_eq!(errors[2], &RowError::DuplicateLeader("A".into()));
        assert!(matches!(errors[3], RowError::MissingField { column } if column == "duration"));
        assert_eq!(errors[4], &RowError::InvertedTenure { start: 1999, end: 1995 });
        assert!(matches!(errors[5], RowError::InvalidNumber { column, .. } if column == "pcgdp"));
        assert!(matches!(errors[6], RowError::InvalidFlag { column, .. } if column == "oecd"));
        assert_eq!(report.diagnostics[0].line, Some(3));
    }

    #[test]
    fn test_fractional_year_rejected() {
        let (_, report) = read("X,A,Male,1990.5,1995,50,55,5,1000,0,1,0\n");
        assert!(matches!(report.diagnostics[0].error, RowError::NonIntegralYear { .. }));
    }

    #[test]
    fn test_records_sorted_by_label() {
        let (dataset, _) = read(concat!(
            "X,A,Male,1990,1995,50,55,5,1000,1,1,0\n",
            "X,B,Male,1990,1995,50,55,5,1000,0,1,0\n",
            "X,C,Male,1990,1995,50,55,5,1000,1,1,0\n",
        ));
        let order: Vec<&str> = dataset.records().iter().map(|r| r.leader.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_semicolon_delimiter() {
        let input = format!("{}\nX;A;Male;1990;1995;50;55;5;NA;0;1;1\n", HEADER.replace(',', ";"));
        let config = DatasetConfig {
            delimiter: ';',
            ..DatasetConfig::default()
        };
        let (dataset, _) = read_dataset(input.as_bytes(), &config).unwrap();
        assert!(dataset.get("A").unwrap().in_group("eu27"));
    }

    #[test]
    fn test_missing_header_column_is_fatal() {
        let input = "country,leader,gender\nX,A,Male\n";
        let err = read_dataset(input.as_bytes(), &DatasetConfig::default()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn("start_year")));
    }
}
