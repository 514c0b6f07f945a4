use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tools load, transform, or emit order data.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when CSV parsing or serialization fails.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when a rule file cannot be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the spreadsheet reader, including unsupported
    /// file extensions.
    #[error("spreadsheet read error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// Raised when one of the order patterns fails to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when a spreadsheet contains no worksheet to read from.
    #[error("workbook {0} contains no worksheets")]
    EmptyWorkbook(PathBuf),

    /// Raised when no header matches the configured column.
    #[error("no column matching '{marker}' (available: {available:?})")]
    MissingColumn {
        marker: String,
        available: Vec<String>,
    },

    /// Raised when a decomposition rule cannot be applied.
    #[error("invalid decomposition rule: {0}")]
    InvalidRule(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
