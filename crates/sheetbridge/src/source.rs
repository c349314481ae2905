//! Tabular sources: where a job's data block comes from

use std::path::PathBuf;

use sheetbridge_core::{CellAddress, CellFormat, CellRange, CellValue, SourceCell, TabularBlock, Workbook};
use sheetbridge_remote::{GridBounds, SheetsClient};
use sheetbridge_xlsx::XlsxReader;

use crate::detect::detect_range;
use crate::error::SyncResult;

/// The rows a source produced
#[derive(Debug, Clone)]
pub struct Extraction<C> {
    pub block: TabularBlock<C>,
    /// Why the block holds placeholders instead of source data, if it does
    pub degraded: Option<String>,
}

impl<C> Extraction<C> {
    pub fn complete(block: TabularBlock<C>) -> Self {
        Self {
            block,
            degraded: None,
        }
    }
}

/// Something that can produce a rectangular block of cells
pub trait TabularSource {
    type Cell: SourceCell;

    fn extract(&self) -> SyncResult<Extraction<Self::Cell>>;
}

/// Which cells of a sheet to read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeSelection {
    /// A literal `<COL><ROW>:<COL><ROW>` range
    Explicit(String),
    /// Detect the range from this start cell
    DetectFrom(CellAddress),
}

/// A sheet of a local XLSX workbook; values only
#[derive(Debug, Clone)]
pub struct WorkbookSource {
    path: PathBuf,
    sheet: String,
    range: RangeSelection,
}

impl WorkbookSource {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(path: P, sheet: S, range: RangeSelection) -> Self {
        Self {
            path: path.into(),
            sheet: sheet.into(),
            range,
        }
    }

    /// Read from an already loaded workbook
    pub fn extract_from(&self, workbook: &Workbook) -> SyncResult<TabularBlock<CellValue>> {
        let sheet = workbook.worksheet_by_name(&self.sheet)?;
        let range = match &self.range {
            RangeSelection::Explicit(range) => CellRange::parse_strict(range)?,
            RangeSelection::DetectFrom(start) => detect_range(sheet, *start),
        };

        log::debug!("reading {}!{}", self.sheet, range);
        Ok(sheet.read_range(&range))
    }
}

impl TabularSource for WorkbookSource {
    type Cell = CellValue;

    fn extract(&self) -> SyncResult<Extraction<CellValue>> {
        // a bad range fails before the workbook is opened
        if let RangeSelection::Explicit(range) = &self.range {
            CellRange::parse_strict(range)?;
        }

        let workbook = XlsxReader::read_file(&self.path)?;
        Ok(Extraction::complete(self.extract_from(&workbook)?))
    }
}

/// A range of a remote spreadsheet, with each cell's effective format
///
/// Request failures never propagate: the block is then filled with default
/// formats at the requested size and the failure text is kept in
/// [`Extraction::degraded`].
#[derive(Debug)]
pub struct RemoteSource {
    client: SheetsClient,
    spreadsheet_id: String,
    sheet: String,
    bounds: GridBounds,
}

impl RemoteSource {
    pub fn new<I: Into<String>, S: Into<String>>(
        client: SheetsClient,
        spreadsheet_id: I,
        sheet: S,
        bounds: GridBounds,
    ) -> Self {
        Self {
            client,
            spreadsheet_id: spreadsheet_id.into(),
            sheet: sheet.into(),
            bounds,
        }
    }

    /// Build from a strict range string such as `B2:L14`
    pub fn with_range<I: Into<String>, S: Into<String>>(
        client: SheetsClient,
        spreadsheet_id: I,
        sheet: S,
        range: &str,
    ) -> SyncResult<Self> {
        let range = CellRange::parse_strict(range)?;
        Ok(Self::new(client, spreadsheet_id, sheet, GridBounds::from_range(&range)))
    }

    pub fn bounds(&self) -> &GridBounds {
        &self.bounds
    }
}

impl TabularSource for RemoteSource {
    type Cell = CellFormat;

    fn extract(&self) -> SyncResult<Extraction<CellFormat>> {
        match self
            .client
            .fetch_grid(&self.spreadsheet_id, &self.sheet, &self.bounds)
        {
            Ok(block) => Ok(Extraction::complete(block)),
            Err(err) => {
                log::warn!(
                    "reading {} from {} failed, using default cells: {}",
                    self.bounds.to_a1(&self.sheet),
                    self.spreadsheet_id,
                    err
                );
                Ok(Extraction {
                    block: TabularBlock::filled(
                        self.bounds.row_count(),
                        self.bounds.col_count(),
                        CellFormat::default,
                    ),
                    degraded: Some(err.to_string()),
                })
            }
        }
    }
}
