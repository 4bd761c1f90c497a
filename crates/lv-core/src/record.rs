//! Leader records and the loaded dataset

use std::sync::Arc;

use ahash::AHashMap;
use thiserror::Error;

/// Stable identity of a record, used as the join key by every view
pub type LeaderKey = String;

/// One leader's term after parsing and coercion
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderRecord {
    pub leader: LeaderKey,
    pub country: String,
    pub gender: String,
    pub start_year: i32,
    pub end_year: i32,
    pub start_age: f64,
    pub end_age: f64,
    pub duration: f64,
    /// GDP per capita, `None` when the source reports it as unknown
    pub pcgdp: Option<f64>,
    /// 0/1 flag marking the highlighted sub-population
    pub label: u8,
    /// Group-membership flags keyed by group column name
    pub groups: AHashMap<String, bool>,
}

impl LeaderRecord {
    /// Whether this record belongs to the label-highlighted sub-population
    pub fn is_labelled(&self) -> bool {
        self.label == 1
    }

    /// Whether this record is flagged as a member of `group`
    pub fn in_group(&self, group: &str) -> bool {
        self.groups.get(group).copied().unwrap_or(false)
    }

    /// Whether the term has a positive duration (zero-length terms are never shown)
    pub fn has_tenure(&self) -> bool {
        self.duration > 0.0
    }
}

/// Dataset invariant violations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    #[error("duplicate leader '{0}'")]
    DuplicateLeader(String),

    #[error("record has an empty leader name")]
    EmptyLeader,
}

/// The full ingested record set
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Arc<LeaderRecord>>,
    group_columns: Vec<String>,
    index: AHashMap<LeaderKey, usize>,
    skipped_rows: usize,
}

impl Dataset {
    /// Build a dataset, sorting records by label ascending.
    ///
    /// The sort is stable, so records keep their input order within a label and
    /// label-1 records end up last (drawn on top).
    pub fn new(mut records: Vec<LeaderRecord>, group_columns: Vec<String>) -> Result<Self, DatasetError> {
        records.sort_by_key(|r| r.label);

        let mut index = AHashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            if record.leader.is_empty() {
                return Err(DatasetError::EmptyLeader);
            }
            if index.insert(record.leader.clone(), pos).is_some() {
                return Err(DatasetError::DuplicateLeader(record.leader.clone()));
            }
        }

        Ok(Self {
            records: records.into_iter().map(Arc::new).collect(),
            group_columns,
            index,
            skipped_rows: 0,
        })
    }

    /// Record how many input rows were dropped while building this dataset
    pub fn with_skipped_rows(mut self, skipped: usize) -> Self {
        self.skipped_rows = skipped;
        self
    }

    pub fn records(&self) -> &[Arc<LeaderRecord>] {
        &self.records
    }

    /// Group-membership column names, in header order
    pub fn group_columns(&self) -> &[String] {
        &self.group_columns
    }

    pub fn has_group(&self, group: &str) -> bool {
        self.group_columns.iter().any(|g| g == group)
    }

    pub fn get(&self, leader: &str) -> Option<&Arc<LeaderRecord>> {
        self.index.get(leader).map(|&pos| &self.records[pos])
    }

    pub fn contains(&self, leader: &str) -> bool {
        self.index.contains_key(leader)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Compact record builder for tests
    pub fn leader(name: &str, gender: &str, label: u8, duration: f64, pcgdp: Option<f64>, groups: &[(&str, bool)]) -> LeaderRecord {
        LeaderRecord {
            leader: name.to_string(),
            country: format!("{name}-land"),
            gender: gender.to_string(),
            start_year: 1990,
            end_year: 1990 + duration.max(0.0) as i32,
            start_age: 50.0,
            end_age: 50.0 + duration.max(0.0),
            duration,
            pcgdp,
            label,
            groups: groups.iter().map(|(g, v)| (g.to_string(), *v)).collect(),
        }
    }
}
