//! Prelude module - common imports for sheetbridge users
//!
//! ```rust
//! use sheetbridge::prelude::*;
//! ```

// Core types
pub use crate::{CellAddress, CellFormat, CellRange, CellValue, SourceCell, TabularBlock};

// Documents
pub use crate::{locate_table, Document, Table};

// Jobs and configuration
pub use crate::{run_batch, run_job, ConfigStore, ConfigurationRecord, JsonFileStore};

// Operations
pub use crate::{
    build_table, build_table_after, detect_range, format_money_columns, reconcile,
    ReconcileOptions, ReconcileReport, TabularSource,
};

// Errors
pub use crate::{SyncError, SyncResult};

// Extension traits
pub use crate::TableReconcileExt;
