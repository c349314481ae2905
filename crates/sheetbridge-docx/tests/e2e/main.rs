//! End-to-end tests for sheetbridge-docx.
//!
//! Each test writes a small document package to a temp directory, edits it
//! through `Document`, saves, and reopens the result.

mod common;
mod editing;

pub use common::*;
