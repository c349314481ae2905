//! Worksheet type

use std::collections::BTreeMap;

use crate::block::TabularBlock;
use crate::cell::{CellAddress, CellRange, CellValue};
use crate::error::Result;

static EMPTY: CellValue = CellValue::Empty;

/// A single sheet of a workbook: a sparse grid of values
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Non-empty cells keyed by (row, col)
    cells: BTreeMap<(u32, u16), CellValue>,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a cell value by A1 address
    pub fn get_value(&self, address: &str) -> Result<&CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.value_at(addr.row, addr.col))
    }

    /// Get a cell value by indices; missing cells are [`CellValue::Empty`]
    pub fn value_at(&self, row: u32, col: u16) -> &CellValue {
        self.cells.get(&(row, col)).unwrap_or(&EMPTY)
    }

    /// Set a cell value by A1 address
    pub fn set_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_value_at(addr.row, addr.col, value);
        Ok(())
    }

    /// Set a cell value by indices; setting [`CellValue::Empty`] clears the cell
    pub fn set_value_at<V: Into<CellValue>>(&mut self, row: u32, col: u16, value: V) {
        match value.into() {
            CellValue::Empty => {
                self.cells.remove(&(row, col));
            }
            value => {
                self.cells.insert((row, col), value);
            }
        }
    }

    /// Number of stored (non-empty) cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Read a rectangular range into a block, row by row
    pub fn read_range(&self, range: &CellRange) -> TabularBlock<CellValue> {
        TabularBlock::from_fn(
            range.row_count() as usize,
            range.col_count() as usize,
            |row, col| {
                self.value_at(range.start.row + row as u32, range.start.col + col as u16)
                    .clone()
            },
        )
    }
}
