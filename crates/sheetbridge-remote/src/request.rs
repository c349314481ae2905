//! Request scoping: 1-based grid bounds and A1 range notation

use sheetbridge_core::{CellAddress, CellRange};

use crate::error::{RemoteError, RemoteResult};

/// Fields requested for every cell: the display text and the resolved format
pub const GRID_FIELDS: &str =
    "sheets(data(rowData(values(formattedValue,effectiveFormat))))";

/// A rectangular block of a sheet, 1-based and inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    pub start_row: u32,
    pub end_row: u32,
    pub start_col: u32,
    pub end_col: u32,
}

impl GridBounds {
    /// Create bounds, rejecting zero indices and inverted ranges
    pub fn new(start_row: u32, end_row: u32, start_col: u32, end_col: u32) -> RemoteResult<Self> {
        if start_row == 0 || start_col == 0 {
            return Err(RemoteError::InvalidBounds(
                "rows and columns are 1-based".into(),
            ));
        }
        if end_row < start_row || end_col < start_col {
            return Err(RemoteError::InvalidBounds(format!(
                "rows {}..={}, columns {}..={} do not form a rectangle",
                start_row, end_row, start_col, end_col
            )));
        }
        if end_col > u32::from(sheetbridge_core::MAX_COLS) {
            return Err(RemoteError::InvalidBounds(format!(
                "column {} is past the last sheet column",
                end_col
            )));
        }
        Ok(Self {
            start_row,
            end_row,
            start_col,
            end_col,
        })
    }

    /// Bounds covering a parsed range
    pub fn from_range(range: &CellRange) -> Self {
        Self {
            start_row: range.start.row + 1,
            end_row: range.end.row + 1,
            start_col: u32::from(range.start.col) + 1,
            end_col: u32::from(range.end.col) + 1,
        }
    }

    /// Number of rows covered
    pub fn row_count(&self) -> usize {
        (self.end_row - self.start_row + 1) as usize
    }

    /// Number of columns covered
    pub fn col_count(&self) -> usize {
        (self.end_col - self.start_col + 1) as usize
    }

    /// The A1 range on `sheet_name`, e.g. `'Q1 Sales'!B2:L14`
    pub fn to_a1(&self, sheet_name: &str) -> String {
        // new() caps columns at MAX_COLS, so the conversions cannot truncate
        let corner = |row: u32, col: u32| {
            CellAddress::new(row - 1, (col - 1) as u16).to_a1_string()
        };
        format!(
            "{}!{}:{}",
            quote_sheet_name(sheet_name),
            corner(self.start_row, self.start_col),
            corner(self.end_row, self.end_col)
        )
    }
}

/// Quote a sheet name for A1 notation when it is not a plain identifier
///
/// Embedded single quotes are doubled.
pub fn quote_sheet_name(name: &str) -> String {
    let plain = !name.is_empty()
        && name.chars().all(|c| c.is_alphanumeric() || c == '_')
        && !name.starts_with(|c: char| c.is_ascii_digit());
    if plain {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "''"))
    }
}
