//! Error types for synchronization jobs

use sheetbridge_docx::DocxError;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type for synchronization operations
pub type SyncResult<T> = std::result::Result<T, SyncError>;

/// Errors that end a single job
///
/// Range, anchor, table and column errors are raised before the target
/// document is touched; a job that fails with one of them saves nothing.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Range string is not `<COL><ROW>:<COL><ROW>`
    #[error("Invalid range format '{0}': expected something like 'B2:L14'")]
    InvalidRangeFormat(String),

    /// No paragraph contains the anchor label
    #[error("No paragraph contains the anchor label '{0}'")]
    AnchorNotFound(String),

    /// The anchor paragraph is not followed by a table
    #[error("No table follows the paragraph anchored by '{0}'")]
    TableNotFound(String),

    /// Source and target disagree on the number of columns
    #[error("Column mismatch: table has {table} columns, data has {data}")]
    ColumnMismatch { table: usize, data: usize },

    /// Named sheet is not in the workbook
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Reading the local workbook failed
    #[error("Workbook error: {0}")]
    Xlsx(#[from] sheetbridge_xlsx::XlsxError),

    /// Reading or writing the document failed
    #[error("Document error: {0}")]
    Docx(DocxError),

    /// The remote source could not be set up
    #[error("Remote source error: {0}")]
    Remote(#[from] sheetbridge_remote::RemoteError),

    /// The job configuration is unusable
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Core error
    #[error("Core error: {0}")]
    Core(sheetbridge_core::Error),
}

impl From<DocxError> for SyncError {
    fn from(err: DocxError) -> Self {
        match err {
            DocxError::AnchorNotFound(label) => SyncError::AnchorNotFound(label),
            DocxError::TableNotFound(label) => SyncError::TableNotFound(label),
            other => SyncError::Docx(other),
        }
    }
}

impl From<sheetbridge_core::Error> for SyncError {
    fn from(err: sheetbridge_core::Error) -> Self {
        match err {
            sheetbridge_core::Error::InvalidRangeFormat(range) => {
                SyncError::InvalidRangeFormat(range)
            }
            sheetbridge_core::Error::SheetNotFound(name) => SyncError::SheetNotFound(name),
            other => SyncError::Core(other),
        }
    }
}
