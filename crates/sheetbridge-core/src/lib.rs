//! # sheetbridge-core
//!
//! Core data structures shared by the sheetbridge crates.
//!
//! This crate provides:
//! - [`CellAddress`] and [`CellRange`] - A1-style addressing, including the strict
//!   `<COL><ROW>:<COL><ROW>` range form used by job configurations
//! - [`CellValue`] - Raw scalar values read from a local workbook
//! - [`Workbook`], [`Worksheet`] - A sparse value grid per sheet
//! - [`CellFormat`] - A cell's resolved appearance and display value
//! - [`TabularBlock`] - A rectangular block of cells handed from a source to a document
//!
//! ## Example
//!
//! ```rust
//! use sheetbridge_core::{CellRange, CellValue, TabularBlock, Worksheet};
//!
//! let mut sheet = Worksheet::new("Data");
//! sheet.set_value("B2", "Name").unwrap();
//! sheet.set_value("C2", 42.0).unwrap();
//!
//! let range = CellRange::parse_strict("B2:C2").unwrap();
//! let block: TabularBlock<CellValue> = sheet.read_range(&range);
//! assert_eq!(block.column_count(), 2);
//! ```

pub mod block;
pub mod cell;
pub mod error;
pub mod format;
pub mod workbook;
pub mod worksheet;

pub use block::{SourceCell, TabularBlock};
pub use cell::{CellAddress, CellRange, CellValue};
pub use error::{Error, Result};
pub use format::{
    Alignment, BorderEdge, BorderLineStyle, Borders, CellFormat, Color, FontFormat,
    HorizontalAlignment, Side, TextFormat, VerticalAlignment,
};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;
