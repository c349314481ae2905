//! End-to-end tests for sheetbridge.
//!
//! Jobs run against workbook and document packages written to temp
//! directories; remote sources are driven through canned transports.

mod common;
mod jobs;
mod remote;

pub use common::*;
