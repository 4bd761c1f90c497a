pub mod csv_source;

pub use csv_source::CsvLeaderSource;
