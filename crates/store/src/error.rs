//! Error types for the store crate.
//!
//! Two families of errors live here:
//! - `StoreError` for record store operations and CSV I/O
//! - `ImportError` for product CSV imports, which must report every
//!   problem in a file at once rather than stopping at the first one

use thiserror::Error;

/// Errors raised by the record store and the CSV writers.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record with this id exists in the collection
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// A record with this id already exists
    #[error("{entity} {id} already exists")]
    Duplicate { entity: &'static str, id: String },

    /// A record failed a field-level check before being stored
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    /// Underlying CSV reader/writer failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error while reading or writing a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single rejected row of a product import.
///
/// `line` is the 1-based line number in the file, header included,
/// so the first data row is line 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub line: usize,
    pub messages: Vec<String>,
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.messages.join("; "))
    }
}

/// Errors that reject a product CSV import.
///
/// None of these apply any rows: an import either lands in full or not at all.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The header row lacks one or more required columns
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The file has no header row at all
    #[error("File is empty")]
    Empty,

    /// A header row with no products under it
    #[error("File has no product rows")]
    NoRows,

    /// One or more rows failed validation
    #[error("{} row(s) failed validation", .0.len())]
    InvalidRows(Vec<RowError>),

    /// The file could not be read as CSV
    #[error("Malformed CSV: {0}")]
    Malformed(#[from] csv::Error),

    /// The file could not be opened or read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ImportError {
    /// Human-readable messages, one per problem, for display to the user.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ImportError::MissingColumns(columns) => columns
                .iter()
                .map(|c| format!("Missing required column: {}", c))
                .collect(),
            ImportError::InvalidRows(rows) => rows.iter().map(|r| r.to_string()).collect(),
            other => vec![other.to_string()],
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, StoreError>;
