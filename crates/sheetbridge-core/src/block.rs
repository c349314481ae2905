//! Rectangular blocks of source cells

use std::borrow::Cow;

use crate::cell::CellValue;
use crate::error::{Error, Result};
use crate::format::CellFormat;

/// A rectangular, ordered sequence of rows
///
/// Every row has exactly [`column_count`](Self::column_count) cells. Row order
/// is the source's top-to-bottom order.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularBlock<T> {
    rows: Vec<Vec<T>>,
    columns: usize,
}

impl<T> TabularBlock<T> {
    /// Create an empty block with a fixed width
    pub fn new(columns: usize) -> Self {
        Self {
            rows: Vec::new(),
            columns,
        }
    }

    /// Build a block from rows, rejecting ragged input
    ///
    /// The width is taken from the first row; an empty input is a 0x0 block.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        let mut block = Self::new(columns);
        for row in rows {
            block.push_row(row)?;
        }
        Ok(block)
    }

    /// Build a `rows` x `columns` block where every cell comes from `fill`
    pub fn filled(rows: usize, columns: usize, mut fill: impl FnMut() -> T) -> Self {
        Self::from_fn(rows, columns, |_, _| fill())
    }

    /// Build a `rows` x `columns` block from each cell's (row, column) offset
    pub fn from_fn(rows: usize, columns: usize, mut cell: impl FnMut(usize, usize) -> T) -> Self {
        Self {
            rows: (0..rows)
                .map(|row| (0..columns).map(|col| cell(row, col)).collect())
                .collect(),
            columns,
        }
    }

    /// Append a row, which must match the block's width
    pub fn push_row(&mut self, row: Vec<T>) -> Result<()> {
        if row.len() != self.columns {
            return Err(Error::RaggedRow {
                row: self.rows.len(),
                expected: self.columns,
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (uniform across rows)
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Check if the block has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> &[Vec<T>] {
        &self.rows
    }

    /// One row
    pub fn row(&self, index: usize) -> Option<&[T]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// One cell
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Transform every cell, keeping the shape
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> TabularBlock<U> {
        TabularBlock {
            rows: self
                .rows
                .into_iter()
                .map(|row| row.into_iter().map(&mut f).collect())
                .collect(),
            columns: self.columns,
        }
    }
}

/// A cell that a source can hand to a document table
pub trait SourceCell {
    /// The text written into the document cell
    fn text(&self) -> Cow<'_, str>;

    /// The cell's resolved format, when the source provides one
    fn format(&self) -> Option<&CellFormat> {
        None
    }

    /// A full format for this cell; raw values get the default appearance
    fn to_format(&self) -> CellFormat {
        match self.format() {
            Some(format) => format.clone(),
            None => CellFormat::with_value(self.text()),
        }
    }
}

impl SourceCell for CellValue {
    fn text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Empty => Cow::Borrowed(""),
            CellValue::String(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.to_string()),
        }
    }
}

impl SourceCell for CellFormat {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.value)
    }

    fn format(&self) -> Option<&CellFormat> {
        Some(self)
    }
}

impl SourceCell for String {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl SourceCell for &str {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}
