//! Workbook type

use crate::error::{Error, Result};
use crate::worksheet::Worksheet;

/// An ordered collection of worksheets
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    worksheets: Vec<Worksheet>,
}

impl Workbook {
    /// Create a workbook with no sheets
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a worksheet and return its index
    pub fn add_worksheet(&mut self, sheet: Worksheet) -> usize {
        self.worksheets.push(sheet);
        self.worksheets.len() - 1
    }

    /// Number of sheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no sheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.worksheets.iter().map(Worksheet::name)
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a worksheet by its exact name
    pub fn worksheet_by_name(&self, name: &str) -> Result<&Worksheet> {
        self.worksheets
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }
}
