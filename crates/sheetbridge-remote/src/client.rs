//! Spreadsheet API client

use std::env;
use std::time::Duration;

use sheetbridge_core::{CellFormat, TabularBlock};

use crate::error::{RemoteError, RemoteResult};
use crate::request::{GridBounds, GRID_FIELDS};
use crate::transport::{HttpRequest, HttpTransport, Transport};
use crate::wire::Spreadsheet;

/// Public endpoint of the Sheets API
pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";

const API_KEY_VAR: &str = "SHEETBRIDGE_API_KEY";
const ACCESS_TOKEN_VAR: &str = "SHEETBRIDGE_ACCESS_TOKEN";
const BASE_URL_VAR: &str = "SHEETBRIDGE_SHEETS_URL";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How requests are authorized
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// `key=` query parameter, for sheets readable by link
    ApiKey(String),
    /// OAuth access token obtained elsewhere, sent as `Authorization: Bearer`
    BearerToken(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("ApiKey(..)"),
            Credentials::BearerToken(_) => f.write_str("BearerToken(..)"),
        }
    }
}

impl Credentials {
    /// Read credentials from the environment, preferring an access token
    pub fn from_env() -> RemoteResult<Self> {
        let non_empty = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());

        if let Some(token) = non_empty(ACCESS_TOKEN_VAR) {
            return Ok(Credentials::BearerToken(token));
        }
        if let Some(key) = non_empty(API_KEY_VAR) {
            return Ok(Credentials::ApiKey(key));
        }
        Err(RemoteError::Credentials(format!(
            "set {} or {}",
            ACCESS_TOKEN_VAR, API_KEY_VAR
        )))
    }
}

/// Reads cell values and effective formats from the Sheets API
pub struct SheetsClient {
    base_url: String,
    credentials: Credentials,
    transport: Box<dyn Transport>,
}

impl std::fmt::Debug for SheetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl SheetsClient {
    /// Create a client with the default HTTP transport
    pub fn new(credentials: Credentials) -> RemoteResult<Self> {
        Ok(Self::with_transport(
            credentials,
            Box::new(HttpTransport::new(REQUEST_TIMEOUT)?),
        ))
    }

    /// Create a client over any transport
    pub fn with_transport(credentials: Credentials, transport: Box<dyn Transport>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials,
            transport,
        }
    }

    /// Create a client from environment credentials, honoring a base URL override
    pub fn from_env() -> RemoteResult<Self> {
        let client = Self::new(Credentials::from_env()?)?;
        Ok(match env::var(BASE_URL_VAR) {
            Ok(url) if !url.trim().is_empty() => client.with_base_url(url.trim()),
            _ => client,
        })
    }

    /// Point the client at another endpoint (a proxy or a local stand-in)
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The request for one range, scoped to exactly `bounds`
    pub fn grid_request(
        &self,
        spreadsheet_id: &str,
        sheet_name: &str,
        bounds: &GridBounds,
    ) -> RemoteResult<HttpRequest> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| RemoteError::Url(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| RemoteError::Url(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", spreadsheet_id]);

        let mut query = vec![
            ("ranges".to_string(), bounds.to_a1(sheet_name)),
            ("includeGridData".to_string(), "true".to_string()),
            ("fields".to_string(), GRID_FIELDS.to_string()),
        ];
        let bearer_token = match &self.credentials {
            Credentials::ApiKey(key) => {
                query.push(("key".to_string(), key.clone()));
                None
            }
            Credentials::BearerToken(token) => Some(token.clone()),
        };

        Ok(HttpRequest {
            url: url.to_string(),
            query,
            bearer_token,
        })
    }

    /// Read one range with a single request
    ///
    /// The result always covers `bounds` exactly: rows and trailing cells
    /// the service leaves out (it omits empty ones) are default formats.
    pub fn fetch_grid(
        &self,
        spreadsheet_id: &str,
        sheet_name: &str,
        bounds: &GridBounds,
    ) -> RemoteResult<TabularBlock<CellFormat>> {
        let request = self.grid_request(spreadsheet_id, sheet_name, bounds)?;
        log::debug!("GET {} ranges={}", request.url, bounds.to_a1(sheet_name));

        let body = self.transport.get(&request)?;
        let spreadsheet: Spreadsheet = serde_json::from_str(&body)?;
        grid_block(spreadsheet, bounds)
    }
}

/// Convert the first grid of a response into a block the size of `bounds`
fn grid_block(
    spreadsheet: Spreadsheet,
    bounds: &GridBounds,
) -> RemoteResult<TabularBlock<CellFormat>> {
    let grid = spreadsheet
        .sheets
        .into_iter()
        .next()
        .and_then(|sheet| sheet.data.into_iter().next())
        .ok_or_else(|| RemoteError::MissingData("response has no sheet data".into()))?;

    let columns = bounds.col_count();
    let mut rows: Vec<Vec<CellFormat>> = grid
        .row_data
        .iter()
        .take(bounds.row_count())
        .map(|row| {
            (0..columns)
                .map(|i| {
                    row.values
                        .get(i)
                        .map_or_else(CellFormat::default, |cell| cell.to_cell_format())
                })
                .collect()
        })
        .collect();

    if rows.len() < bounds.row_count() {
        log::debug!(
            "padding {} empty trailing rows",
            bounds.row_count() - rows.len()
        );
        rows.resize_with(bounds.row_count(), || {
            (0..columns).map(|_| CellFormat::default()).collect()
        });
    }

    TabularBlock::from_rows(rows).map_err(|e| RemoteError::MissingData(e.to_string()))
}
