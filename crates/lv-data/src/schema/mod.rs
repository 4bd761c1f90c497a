use csv::StringRecord;

use crate::DataError;

/// Columns every leader list must provide
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "country",
    "leader",
    "gender",
    "start_year",
    "end_year",
    "start_age",
    "end_age",
    "duration",
    "pcgdp",
    "label",
];

/// Position of every column the ingester reads, resolved from the header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub country: usize,
    pub leader: usize,
    pub gender: usize,
    pub start_year: usize,
    pub end_year: usize,
    pub start_age: usize,
    pub end_age: usize,
    pub duration: usize,
    pub pcgdp: usize,
    pub label: usize,
    /// Group-membership columns as (name, position), in header order
    pub groups: Vec<(String, usize)>,
}

impl ColumnLayout {
    /// Resolve the layout from a header row.
    ///
    /// Every column that is not one of [`REQUIRED_COLUMNS`] is taken to be a
    /// group-membership flag.
    pub fn from_headers(headers: &StringRecord) -> Result<Self, DataError> {
        let names: Vec<&str> = headers.iter().map(str::trim).collect();
        let find = |column: &'static str| {
            names
                .iter()
                .position(|name| *name == column)
                .ok_or(DataError::MissingColumn(column))
        };

        let groups: Vec<(String, usize)> = names
            .iter()
            .enumerate()
            .filter(|(_, name)| !name.is_empty() && !REQUIRED_COLUMNS.contains(*name))
            .map(|(idx, name)| (name.to_string(), idx))
            .collect();

        let layout = Self {
            country: find("country")?,
            leader: find("leader")?,
            gender: find("gender")?,
            start_year: find("start_year")?,
            end_year: find("end_year")?,
            start_age: find("start_age")?,
            end_age: find("end_age")?,
            duration: find("duration")?,
            pcgdp: find("pcgdp")?,
            label: find("label")?,
            groups,
        };

        if layout.groups.is_empty() {
            return Err(DataError::NoGroupColumns);
        }
        Ok(layout)
    }

    pub fn group_names(&self) -> Vec<String> {
        self.groups.iter().map(|(name, _)| name.clone()).collect()
    }
}
