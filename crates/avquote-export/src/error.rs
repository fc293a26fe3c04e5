//! # Export Error Types

use std::path::PathBuf;

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Failures while building or saving a proposal workbook.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The spreadsheet writer rejected a cell, sheet name or save.
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),

    /// The output location could not be prepared.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
