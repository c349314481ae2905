//! Job configuration records and their stores

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sheetbridge_core::CellAddress;
use thiserror::Error;

use crate::money::parse_money_columns;
use crate::source::RangeSelection;

/// Identifier handed out by a store
pub type RecordId = u64;

/// Errors raised by configuration stores and record validation
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field is empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A field holds an unusable value
    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("No configuration with id {0}")]
    NotFound(RecordId),

    #[error("Failed to replace {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Where a job reads its data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceLocation {
    /// A local XLSX workbook
    Workbook { path: PathBuf },
    /// A remote spreadsheet, by id
    Remote { spreadsheet_id: String },
}

/// Which cells of the sheet a job reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeSpec {
    /// Literal range such as `B2:L14`
    Explicit(String),
    /// Start cell for range detection, such as `B2`
    DetectFrom(String),
}

/// What a job does with the target document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Rewrite the table that follows the anchor
    #[default]
    Reconcile,
    /// Insert a new table right after the anchor
    Build,
}

/// Font forced onto every run of the target table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableFont {
    pub family: String,
    /// Size in points
    pub size: f64,
}

/// One synchronization job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationRecord {
    pub source: SourceLocation,
    pub sheet: String,
    pub range: RangeSpec,
    /// Document holding the table
    pub target: PathBuf,
    /// Text of the paragraph above the table
    pub anchor: String,
    /// Where to save; the target is overwritten when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Comma-separated 1-based money columns, e.g. `"2,3"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub money_columns: Option<String>,
    /// Rows at the top of the table left out of money formatting (default 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_rows: Option<usize>,
    #[serde(default)]
    pub mode: SyncMode,
    /// Apply source cell formats while writing
    #[serde(default)]
    pub transfer_format: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_font: Option<TableFont>,
    /// Single black borders around and inside the table
    #[serde(default)]
    pub grid_borders: bool,
}

impl ConfigurationRecord {
    /// A reconcile job with every optional field unset
    pub fn new<S, A, T>(source: SourceLocation, sheet: S, range: RangeSpec, target: T, anchor: A) -> Self
    where
        S: Into<String>,
        A: Into<String>,
        T: Into<PathBuf>,
    {
        Self {
            source,
            sheet: sheet.into(),
            range,
            target: target.into(),
            anchor: anchor.into(),
            output: None,
            money_columns: None,
            header_rows: None,
            mode: SyncMode::default(),
            transfer_format: false,
            table_font: None,
            grid_borders: false,
        }
    }

    /// Check the record can drive a job
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.source {
            SourceLocation::Workbook { path } if path.as_os_str().is_empty() => {
                return Err(ConfigError::MissingField("source path"));
            }
            SourceLocation::Remote { spreadsheet_id } if spreadsheet_id.trim().is_empty() => {
                return Err(ConfigError::MissingField("spreadsheet id"));
            }
            _ => {}
        }
        if self.sheet.trim().is_empty() {
            return Err(ConfigError::MissingField("sheet"));
        }
        if self.target.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("target"));
        }
        if self.anchor.is_empty() {
            return Err(ConfigError::MissingField("anchor"));
        }

        match (&self.range, &self.source) {
            (RangeSpec::Explicit(range), _) if range.trim().is_empty() => {
                return Err(ConfigError::MissingField("range"));
            }
            (RangeSpec::DetectFrom(_), SourceLocation::Remote { .. }) => {
                return Err(ConfigError::Invalid {
                    field: "range",
                    reason: "range detection needs a local workbook".into(),
                });
            }
            (RangeSpec::DetectFrom(start), _) => {
                CellAddress::parse(start).map_err(|e| ConfigError::Invalid {
                    field: "range",
                    reason: e.to_string(),
                })?;
            }
            _ => {}
        }

        if let Some(font) = &self.table_font {
            if font.family.trim().is_empty() || !(font.size > 0.0 && font.size.is_finite()) {
                return Err(ConfigError::Invalid {
                    field: "table font",
                    reason: format!("'{}' at {}pt", font.family, font.size),
                });
            }
        }
        Ok(())
    }

    /// Where the job saves the document
    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.target)
    }

    /// 0-based money column indices
    pub fn money_column_indices(&self) -> Vec<usize> {
        self.money_columns
            .as_deref()
            .map(parse_money_columns)
            .unwrap_or_default()
    }

    /// Header rows left out of money formatting
    pub fn header_row_count(&self) -> usize {
        self.header_rows.unwrap_or(1)
    }

    /// The range as a source selection
    ///
    /// Explicit ranges are passed through unparsed so that a malformed one
    /// surfaces as an invalid range when the job runs.
    pub fn range_selection(&self) -> Result<RangeSelection, ConfigError> {
        match &self.range {
            RangeSpec::Explicit(range) => Ok(RangeSelection::Explicit(range.clone())),
            RangeSpec::DetectFrom(start) => CellAddress::parse(start)
                .map(RangeSelection::DetectFrom)
                .map_err(|e| ConfigError::Invalid {
                    field: "range",
                    reason: e.to_string(),
                }),
        }
    }
}

/// A record together with its store id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: RecordId,
    #[serde(flatten)]
    pub record: ConfigurationRecord,
}

/// Create/read/update/delete access to job configurations
pub trait ConfigStore {
    fn create(&mut self, record: ConfigurationRecord) -> Result<RecordId, ConfigError>;

    fn get(&self, id: RecordId) -> Result<ConfigurationRecord, ConfigError>;

    /// Every record, in id order
    fn list(&self) -> Result<Vec<StoredRecord>, ConfigError>;

    fn update(&mut self, id: RecordId, record: ConfigurationRecord) -> Result<(), ConfigError>;

    fn delete(&mut self, id: RecordId) -> Result<(), ConfigError>;
}

/// Store contents, as kept in memory and on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Records {
    next_id: RecordId,
    records: Vec<StoredRecord>,
}

impl Default for Records {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: Vec::new(),
        }
    }
}

impl Records {
    fn create(&mut self, record: ConfigurationRecord) -> Result<RecordId, ConfigError> {
        record.validate()?;
        let id = self.next_id;
        self.next_id += 1;
        self.records.push(StoredRecord { id, record });
        Ok(id)
    }

    fn get(&self, id: RecordId) -> Result<ConfigurationRecord, ConfigError> {
        self.records
            .iter()
            .find(|stored| stored.id == id)
            .map(|stored| stored.record.clone())
            .ok_or(ConfigError::NotFound(id))
    }

    fn update(&mut self, id: RecordId, record: ConfigurationRecord) -> Result<(), ConfigError> {
        record.validate()?;
        let stored = self
            .records
            .iter_mut()
            .find(|stored| stored.id == id)
            .ok_or(ConfigError::NotFound(id))?;
        stored.record = record;
        Ok(())
    }

    fn delete(&mut self, id: RecordId) -> Result<(), ConfigError> {
        let index = self
            .records
            .iter()
            .position(|stored| stored.id == id)
            .ok_or(ConfigError::NotFound(id))?;
        self.records.remove(index);
        Ok(())
    }
}

/// In-memory store, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Records,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryStore {
    fn create(&mut self, record: ConfigurationRecord) -> Result<RecordId, ConfigError> {
        self.records.create(record)
    }

    fn get(&self, id: RecordId) -> Result<ConfigurationRecord, ConfigError> {
        self.records.get(id)
    }

    fn list(&self) -> Result<Vec<StoredRecord>, ConfigError> {
        Ok(self.records.records.clone())
    }

    fn update(&mut self, id: RecordId, record: ConfigurationRecord) -> Result<(), ConfigError> {
        self.records.update(id, record)
    }

    fn delete(&mut self, id: RecordId) -> Result<(), ConfigError> {
        self.records.delete(id)
    }
}

/// Store backed by one JSON file, rewritten atomically after every change
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    records: Records,
}

impl JsonFileStore {
    /// Open a store; a missing file is an empty store
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ConfigError> {
        let path = path.into();
        let records = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Records::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), ConfigError> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(temp.as_file_mut(), &self.records)?;
        temp.as_file_mut().write_all(b"\n")?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| ConfigError::Persist {
            path: self.path.display().to_string(),
            source: e.error,
        })?;
        log::debug!("wrote {} records to {}", self.records.records.len(), self.path.display());
        Ok(())
    }
}

impl ConfigStore for JsonFileStore {
    fn create(&mut self, record: ConfigurationRecord) -> Result<RecordId, ConfigError> {
        let id = self.records.create(record)?;
        self.save()?;
        Ok(id)
    }

    fn get(&self, id: RecordId) -> Result<ConfigurationRecord, ConfigError> {
        self.records.get(id)
    }

    fn list(&self) -> Result<Vec<StoredRecord>, ConfigError> {
        Ok(self.records.records.clone())
    }

    fn update(&mut self, id: RecordId, record: ConfigurationRecord) -> Result<(), ConfigError> {
        self.records.update(id, record)?;
        self.save()
    }

    fn delete(&mut self, id: RecordId) -> Result<(), ConfigError> {
        self.records.delete(id)?;
        self.save()
    }
}
