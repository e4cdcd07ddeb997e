//! Error types for workbook loading.

use std::path::PathBuf;

/// Result type for loader operations
pub type LoadResult<T> = Result<T, LoadError>;

/// Why a dataset could not be loaded.
///
/// Every variant is fatal for a render: the page shows the message instead
/// of a partial table.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The workbook file is missing or unreadable.
    #[error("Failed to open workbook {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a readable spreadsheet.
    #[error("Failed to read workbook {}: {message}", .path.display())]
    Workbook { path: PathBuf, message: String },

    #[error("Sheet '{sheet}' not found (available: {})", .available.join(", "))]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    #[error("Invalid column range '{range}': {reason}")]
    InvalidColumnRange { range: String, reason: String },

    /// A required header is absent from the configured column range.
    #[error("Column '{column}' not found in range {range}")]
    MissingColumn { column: &'static str, range: String },

    /// A required cell is blank. `row` is the 1-based spreadsheet row.
    #[error("Row {row}: missing value for column '{column}'")]
    MissingValue { row: u32, column: &'static str },

    #[error("Row {row}: invalid value '{value}' for column '{column}'")]
    InvalidValue {
        row: u32,
        column: &'static str,
        value: String,
    },
}

impl LoadError {
    /// Short machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            LoadError::Open { .. } => "SOURCE_UNAVAILABLE",
            LoadError::Workbook { .. } => "SOURCE_UNREADABLE",
            LoadError::SheetNotFound { .. } => "SHEET_NOT_FOUND",
            LoadError::InvalidColumnRange { .. } => "INVALID_COLUMN_RANGE",
            LoadError::MissingColumn { .. } => "MISSING_COLUMN",
            LoadError::MissingValue { .. } | LoadError::InvalidValue { .. } => "INVALID_DATA",
        }
    }
}
