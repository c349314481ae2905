//! # sheetbridge-docx
//!
//! DOCX (WordprocessingML) support for sheetbridge: open a package, find a
//! table by the paragraph above it, resize and rewrite it, apply cell
//! formats, and save the package back in one atomic step.
//!
//! ```no_run
//! use sheetbridge_docx::{locate_table, Document};
//!
//! let mut doc = Document::open("report.docx")?;
//! let mut table = locate_table(&mut doc, "Quarterly sales")?;
//! if let Some(mut cell) = table.cell_mut(1, 0) {
//!     cell.set_text("North");
//! }
//! doc.save("report.docx")?;
//! # Ok::<(), sheetbridge_docx::DocxError>(())
//! ```

pub mod error;
pub mod format;
pub mod locate;
pub mod package;
pub mod table;
pub mod text;
pub mod xml;

pub use error::{DocxError, DocxResult};
pub use format::{apply_font, apply_format};
pub use locate::{find_anchor, locate_table, table_after};
pub use package::Document;
pub use table::{Cell, RunFont, Table, DEFAULT_TEXT_WIDTH};
pub use xml::{XmlDocument, XmlElement, XmlNode};
