//! Range detection from a starting cell

use sheetbridge_core::{CellAddress, CellRange, Worksheet};

/// Infer the data range that starts at `start`
///
/// The right edge is the last non-blank cell walking right along the start
/// row; the bottom edge is the last non-blank cell walking down the start
/// column. The two walks are independent. A blank start cell yields the
/// single-cell range.
pub fn detect_range(sheet: &Worksheet, start: CellAddress) -> CellRange {
    let filled = |addr: &CellAddress| !sheet.value_at(addr.row, addr.col).is_blank();

    let mut end_col = start.col;
    let mut end_row = start.row;

    if filled(&start) {
        let mut cursor = start;
        while let Some(next) = cursor.right().filter(|a| filled(a)) {
            cursor = next;
        }
        end_col = cursor.col;

        let mut cursor = start;
        while let Some(next) = cursor.down().filter(|a| filled(a)) {
            cursor = next;
        }
        end_row = cursor.row;
    }

    let range = CellRange::new(start, CellAddress::new(end_row, end_col));
    log::debug!("detected range {} from {}", range, start);
    range
}
