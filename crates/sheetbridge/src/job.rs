//! Running one configured synchronization job

use std::path::PathBuf;

use sheetbridge_docx::{locate_table, Document, Table};
use sheetbridge_remote::SheetsClient;

use crate::build::build_table_after;
use crate::config::{ConfigError, ConfigurationRecord, RangeSpec, SourceLocation, SyncMode};
use crate::error::SyncResult;
use crate::money::format_money_columns;
use crate::reconcile::{reconcile, ReconcileOptions, ReconcileReport};
use crate::source::{Extraction, RemoteSource, TabularSource, WorkbookSource};

/// What a finished job did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobSummary {
    /// Where the document was saved
    pub output: PathBuf,
    pub rows: usize,
    pub columns: usize,
    /// Present for reconcile jobs
    pub reconcile: Option<ReconcileReport>,
    /// Money cells found holding an amount
    pub money_cells: usize,
    /// Set when the source fell back to placeholder cells
    pub degraded: Option<String>,
}

/// Run a job against the source its record names
///
/// Remote sources take their credentials from the environment.
pub fn run_job(record: &ConfigurationRecord) -> SyncResult<JobSummary> {
    record.validate()?;
    match &record.source {
        SourceLocation::Workbook { path } => {
            let source = WorkbookSource::new(path, &record.sheet, record.range_selection()?);
            run_job_with_source(record, &source)
        }
        SourceLocation::Remote { spreadsheet_id } => {
            let client = SheetsClient::from_env()?;
            let RangeSpec::Explicit(range) = &record.range else {
                return Err(ConfigError::Invalid {
                    field: "range",
                    reason: "range detection needs a local workbook".into(),
                }
                .into());
            };
            let source = RemoteSource::with_range(client, spreadsheet_id, &record.sheet, range)?;
            run_job_with_source(record, &source)
        }
    }
}

/// Run a job with an already constructed source
///
/// Data is extracted before the document is opened, and the document is
/// saved once, only after every step has succeeded.
pub fn run_job_with_source<S: TabularSource>(
    record: &ConfigurationRecord,
    source: &S,
) -> SyncResult<JobSummary> {
    log::info!(
        "syncing '{}' in {} from sheet '{}'",
        record.anchor,
        record.target.display(),
        record.sheet
    );

    let Extraction { block, degraded } = source.extract()?;
    if let Some(reason) = &degraded {
        log::warn!("'{}' gets placeholder cells: {}", record.anchor, reason);
    }

    let mut document = Document::open(&record.target)?;
    let mut summary = JobSummary {
        output: record.output_path().to_path_buf(),
        rows: block.row_count(),
        columns: block.column_count(),
        degraded,
        ..JobSummary::default()
    };

    {
        let mut table = match record.mode {
            SyncMode::Reconcile => {
                let mut table = locate_table(&mut document, &record.anchor)?;
                let options = ReconcileOptions {
                    apply_format: record.transfer_format,
                };
                summary.reconcile = Some(reconcile(&mut table, &block, &options)?);
                table
            }
            SyncMode::Build => build_table_after(&mut document, &record.anchor, &block)?,
        };
        summary.money_cells = finish_table(&mut table, record);
    }

    document.save(record.output_path())?;
    log::info!(
        "'{}': {} rows written to {}",
        record.anchor,
        summary.rows,
        summary.output.display()
    );
    Ok(summary)
}

/// Table-wide settings applied once the data is in place
fn finish_table(table: &mut Table<'_>, record: &ConfigurationRecord) -> usize {
    if let Some(font) = &record.table_font {
        table.set_font(&font.family, font.size);
    }
    if record.grid_borders {
        table.set_grid_borders();
    }

    let columns = record.money_column_indices();
    if columns.is_empty() {
        return 0;
    }
    format_money_columns(table, &columns, record.header_row_count())
}
