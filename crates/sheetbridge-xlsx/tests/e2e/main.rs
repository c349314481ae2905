//! End-to-end tests for sheetbridge-xlsx.
//!
//! Each test builds the exact package it needs with `zip`, writes it to a
//! temp directory, then reads it back with `XlsxReader` and asserts.

mod common;
mod reading;

pub use common::*;
