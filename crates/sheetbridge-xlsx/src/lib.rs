//! # sheetbridge-xlsx
//!
//! XLSX (Office Open XML) reader for sheetbridge.
//!
//! Only cell values are read. Numbers stored under a date or time number
//! format come back as [`CellValue::DateTime`](sheetbridge_core::CellValue).

pub mod error;
pub mod reader;

mod date;
mod styles;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
