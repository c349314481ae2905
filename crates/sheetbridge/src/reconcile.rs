//! Structural reconciliation of a document table with a block of source data
//!
//! A pass runs four steps, each finishing before the next starts:
//!
//! 1. merge detection on the table as it was found
//! 2. row resize to the data's row count
//! 3. column normalisation of the rows added in step 2
//! 4. cell writes, skipping the rows marked in step 1
//!
//! Step 4 walks table and data with one shared row index, so a merged table
//! row swallows the data row at the same index.
//!
//! # Example
//!
//! ```rust,ignore
//! use sheetbridge::prelude::*;
//!
//! let mut doc = Document::open("report.docx")?;
//! let mut table = locate_table(&mut doc, "Quarterly sales")?;
//! let report = table.reconcile(&block)?;
//! println!("{} rows written", report.rows_written);
//! ```

use sheetbridge_core::{SourceCell, TabularBlock};
use sheetbridge_docx::{apply_format, Table};

use crate::error::{SyncError, SyncResult};

/// Options for a reconciliation pass
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    /// Apply each source cell's format to the cell it is written to
    pub apply_format: bool,
}

/// What a reconciliation pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Table rows found merged before resizing, by index
    pub merged_rows: Vec<usize>,
    /// Rows added to reach the data's row count
    pub rows_appended: usize,
    /// Rows removed from the end to reach the data's row count
    pub rows_removed: usize,
    /// Rows whose cells were written
    pub rows_written: usize,
    /// Data rows dropped because their table row is merged
    pub rows_skipped: usize,
    /// Cells written
    pub cells_written: usize,
    /// Data cells with no table cell to go to
    pub overflow_cells: usize,
}

/// Extension trait for [`Table`] to add reconciliation methods
pub trait TableReconcileExt {
    /// Reconcile with default options
    fn reconcile<C: SourceCell>(&mut self, data: &TabularBlock<C>) -> SyncResult<ReconcileReport>;

    /// Reconcile with custom options
    fn reconcile_with_options<C: SourceCell>(
        &mut self,
        data: &TabularBlock<C>,
        options: &ReconcileOptions,
    ) -> SyncResult<ReconcileReport>;
}

impl TableReconcileExt for Table<'_> {
    fn reconcile<C: SourceCell>(&mut self, data: &TabularBlock<C>) -> SyncResult<ReconcileReport> {
        reconcile(self, data, &ReconcileOptions::default())
    }

    fn reconcile_with_options<C: SourceCell>(
        &mut self,
        data: &TabularBlock<C>,
        options: &ReconcileOptions,
    ) -> SyncResult<ReconcileReport> {
        reconcile(self, data, options)
    }
}

/// Make `table` hold exactly `data`, leaving merged rows untouched
///
/// Fails with [`SyncError::ColumnMismatch`] before any change when the column
/// counts differ, even when the block has no rows.
pub fn reconcile<C: SourceCell>(
    table: &mut Table<'_>,
    data: &TabularBlock<C>,
    options: &ReconcileOptions,
) -> SyncResult<ReconcileReport> {
    let columns = table.column_count();
    if data.column_count() != columns {
        return Err(SyncError::ColumnMismatch {
            table: columns,
            data: data.column_count(),
        });
    }

    let mut report = ReconcileReport::default();

    let merged = table.merged_rows();
    report.merged_rows = merged
        .iter()
        .enumerate()
        .filter_map(|(i, &m)| m.then_some(i))
        .collect();
    log::debug!("merged rows: {:?}", report.merged_rows);

    let existing = table.row_count();
    let wanted = data.row_count();
    if wanted > existing {
        // new rows copy the last plain row; a merged template would carry its spans along
        let template = merged.iter().rposition(|m| !m);
        for _ in existing..wanted {
            table.append_row(template);
        }
        for row in existing..wanted {
            table.normalize_row(row, columns);
        }
        report.rows_appended = wanted - existing;
        log::debug!("appended {} rows", report.rows_appended);
    } else if wanted < existing {
        table.truncate_rows(wanted);
        report.rows_removed = existing - wanted;
        log::debug!("removed {} rows", report.rows_removed);
    }

    let rows = table.row_count().min(wanted);
    for (i, values) in data.rows().iter().enumerate().take(rows) {
        if merged.get(i).copied().unwrap_or(false) {
            log::debug!("row {} is merged; its data row is dropped", i);
            report.rows_skipped += 1;
            continue;
        }

        for (j, value) in values.iter().enumerate() {
            let Some(mut cell) = table.cell_mut(i, j) else {
                log::warn!("row {} has no column {}; value skipped", i, j);
                report.overflow_cells += 1;
                continue;
            };
            cell.set_text(&value.text());
            if options.apply_format {
                if let Some(format) = value.format() {
                    apply_format(&mut cell, format);
                }
            }
            report.cells_written += 1;
        }
        report.rows_written += 1;
    }

    Ok(report)
}
