//! # sheetbridge
//!
//! Keeps tables in DOCX documents in step with spreadsheet ranges.
//!
//! A job reads a rectangular range from a local XLSX workbook or a remote
//! spreadsheet, finds the table that follows an anchor paragraph in the
//! document, and rewrites it in place: rows are added or removed to fit the
//! data, horizontally merged rows are left as they are, and every other cell
//! gets its new value (and, optionally, the source cell's format). Money
//! columns can be rendered as `$1,234.50`, and a table can also be built from
//! scratch instead of reconciled.
//!
//! ## Features
//!
//! - Table lookup by anchor paragraph text
//! - Range detection from a start cell
//! - Local XLSX (values, date aware) and remote (values + effective formats) sources
//! - Structure-preserving reconciliation with merged-row skipping
//! - Cell formatting: fill, borders, fonts, alignment, wrap, rotation
//! - JSON configuration store and batch runs
//!
//! ## Example
//!
//! ```rust,no_run
//! use sheetbridge::prelude::*;
//! use sheetbridge::source::{RangeSelection, WorkbookSource};
//!
//! let source = WorkbookSource::new("data.xlsx", "Sales", RangeSelection::Explicit("B2:D14".into()));
//! let data = source.extract()?.block;
//!
//! let mut document = Document::open("report.docx")?;
//! {
//!     let mut table = locate_table(&mut document, "Quarterly sales")?;
//!     table.reconcile(&data)?;
//!     format_money_columns(&mut table, &[2], 1);
//! }
//! document.save("report.docx")?;
//! # Ok::<(), SyncError>(())
//! ```

pub mod batch;
pub mod build;
pub mod config;
pub mod detect;
pub mod error;
pub mod job;
pub mod money;
pub mod prelude;
pub mod reconcile;
pub mod source;

pub use batch::{run_batch, run_records, BatchReport, JobOutcome};
pub use build::{build_table, build_table_after};
pub use config::{
    ConfigError, ConfigStore, ConfigurationRecord, JsonFileStore, MemoryStore, RangeSpec,
    RecordId, SourceLocation, StoredRecord, SyncMode, TableFont,
};
pub use detect::detect_range;
pub use error::{SyncError, SyncResult};
pub use job::{run_job, run_job_with_source, JobSummary};
pub use money::{format_currency, format_money_columns, parse_money_columns};
pub use reconcile::{reconcile, ReconcileOptions, ReconcileReport, TableReconcileExt};
pub use source::{Extraction, RangeSelection, RemoteSource, TabularSource, WorkbookSource};

// Re-export the types a job is made of
pub use sheetbridge_core::{CellAddress, CellFormat, CellRange, CellValue, SourceCell, TabularBlock};
pub use sheetbridge_docx::{locate_table, Document, Table};
