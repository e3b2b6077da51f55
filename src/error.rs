//! Error types for loading life tables and answering expectancy queries

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Result type for life expectancy operations
pub type Result<T> = std::result::Result<T, LifeExpectancyError>;

/// Errors raised while loading a life table or querying it
///
/// Every variant carries enough context (archive path, part name, cell or row
/// address, offending text) to diagnose the input without re-running.
#[derive(Debug, Error)]
pub enum LifeExpectancyError {
    /// Input path does not resolve to an existing file
    #[error("workbook not found: {}", path.display())]
    ContainerNotFound { path: PathBuf },

    /// File exists but is not a readable zip archive
    #[error("{} is not a valid XLSX archive: {source}", path.display())]
    InvalidArchive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// A part is present but could not be decompressed
    #[error("failed to read from archive {}: {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// A required internal part is absent from the archive
    #[error("missing required part {part} in {}", path.display())]
    MissingRequiredPart { path: PathBuf, part: String },

    /// Malformed XML inside a part
    #[error("malformed XML in {part}: {source}")]
    Xml {
        part: String,
        #[source]
        source: quick_xml::Error,
    },

    /// Cell references a shared string beyond the table's bounds
    #[error("cell {cell}: shared string index {index} is out of bounds (table has {len} entries)")]
    SharedStringIndexOutOfBounds {
        cell: String,
        index: usize,
        len: usize,
    },

    /// Raw cell text that should be numeric is not
    #[error("cell {cell} contains a non-numeric value: {raw:?}")]
    InvalidCellValue { cell: String, raw: String },

    /// Column A text has no digit run to read the age from
    #[error("row {row}: unable to parse age label {label:?}")]
    MalformedAgeLabel { row: String, label: String },

    /// No data rows were found
    #[error("at least one entry is required to build the life expectancy table")]
    EmptyTable,

    /// Gender is not one of the supported names
    #[error("gender must be one of 'male', 'female', or 'total', got {0:?}")]
    InvalidGender(String),

    /// Clamped age has no entry in the table (gap in the source data)
    #[error("no life expectancy data available for age {age}")]
    MissingAgeEntry { age: u32 },

    /// Birthdate lies after the current date
    #[error("birthdate {birthdate} cannot be in the future (today is {today})")]
    BirthdateInFuture { birthdate: NaiveDate, today: NaiveDate },

    /// File I/O outside the archive
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON export or import failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
