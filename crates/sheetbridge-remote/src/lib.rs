//! # sheetbridge-remote
//!
//! Reads a rectangular range from a remote spreadsheet service (Google Sheets
//! API v4) together with each cell's effective format, and converts the
//! response into a [`TabularBlock`] of [`CellFormat`].
//!
//! ```no_run
//! use sheetbridge_remote::{GridBounds, SheetsClient};
//!
//! let client = SheetsClient::from_env()?;
//! let bounds = GridBounds::new(2, 14, 2, 12)?;
//! let block = client.fetch_grid("1AbC...", "Sales", &bounds)?;
//! println!("{} rows", block.row_count());
//! # Ok::<(), sheetbridge_remote::RemoteError>(())
//! ```
//!
//! [`TabularBlock`]: sheetbridge_core::TabularBlock
//! [`CellFormat`]: sheetbridge_core::CellFormat

pub mod client;
pub mod error;
pub mod request;
pub mod transport;
pub mod wire;

pub use client::{Credentials, SheetsClient, DEFAULT_BASE_URL};
pub use error::{RemoteError, RemoteResult};
pub use request::{quote_sheet_name, GridBounds, GRID_FIELDS};
pub use transport::{HttpRequest, HttpTransport, Transport};
