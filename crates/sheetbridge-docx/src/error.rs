//! DOCX error types

use thiserror::Error;

/// Result type for DOCX operations
pub type DocxResult<T> = std::result::Result<T, DocxError>;

/// Errors that can occur while reading, editing or writing a document
#[derive(Debug, Error)]
pub enum DocxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Invalid file format
    #[error("Invalid DOCX format: {0}")]
    InvalidFormat(String),

    /// Missing required part
    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// No body paragraph contains the anchor label
    #[error("No paragraph contains the anchor label '{0}'")]
    AnchorNotFound(String),

    /// The anchor paragraph is not followed by a table
    #[error("No table follows the paragraph anchored by '{0}'")]
    TableNotFound(String),

    /// The temporary file could not replace the destination
    #[error("Failed to replace {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
