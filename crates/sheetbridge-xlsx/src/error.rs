//! Errors from reading a workbook

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for workbook reading
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Why a workbook could not be read
#[derive(Debug, Error)]
pub enum XlsxError {
    #[error("cannot open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not a ZIP archive, or an entry cannot be inflated
    #[error("not a ZIP package: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("bad XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A part every workbook must have is absent
    #[error("package has no '{0}' part")]
    MissingPart(String),

    /// A part is well-formed XML but its content makes no sense
    #[error("malformed workbook: {0}")]
    Malformed(String),
}
