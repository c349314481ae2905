//! Remote jobs driven through canned transports

use pretty_assertions::assert_eq;
use sheetbridge::config::{RangeSpec, SourceLocation};
use sheetbridge::{locate_table, run_job_with_source, ConfigurationRecord, Document, RemoteSource};
use sheetbridge_remote::{Credentials, HttpRequest, RemoteError, RemoteResult, SheetsClient, Transport};
use tempfile::TempDir;

use crate::{paragraph, table, write_document};

const GRID: &str = r#"{
  "sheets": [{
    "data": [{
      "rowData": [
        {"values": [
          {"formattedValue": "Region", "effectiveFormat": {
            "backgroundColor": {"red": 0.8, "green": 0.8, "blue": 0.8},
            "textFormat": {"bold": true, "fontFamily": "Arial", "fontSize": 10}
          }},
          {"formattedValue": "Total"}
        ]},
        {"values": [
          {"formattedValue": "North"},
          {"formattedValue": "1,250.5", "effectiveFormat": {"horizontalAlignment": "RIGHT"}}
        ]}
      ]
    }]
  }]
}"#;

enum Canned {
    Body(&'static str),
    Unavailable,
}

impl Transport for Canned {
    fn get(&self, _request: &HttpRequest) -> RemoteResult<String> {
        match self {
            Canned::Body(body) => Ok(body.to_string()),
            Canned::Unavailable => Err(RemoteError::Status {
                status: 503,
                body: "backend unavailable".into(),
            }),
        }
    }
}

fn source(response: Canned, range: &str) -> RemoteSource {
    let client = SheetsClient::with_transport(Credentials::ApiKey("key".into()), Box::new(response));
    RemoteSource::with_range(client, "spreadsheet-id", "Sales", range).unwrap()
}

fn record(document: &std::path::Path, range: &str) -> ConfigurationRecord {
    ConfigurationRecord::new(
        SourceLocation::Remote {
            spreadsheet_id: "spreadsheet-id".into(),
        },
        "Sales",
        RangeSpec::Explicit(range.into()),
        document,
        "Sales",
    )
}

#[test]
fn test_remote_job_transfers_formats() {
    let dir = TempDir::new().unwrap();
    let body = format!("{}{}", paragraph("Sales"), table(&[&["x", "y"]]));
    let document = write_document(dir.path(), &body);

    let mut record = record(&document, "A1:B3");
    record.transfer_format = true;
    record.money_columns = Some("2".into());
    let summary = run_job_with_source(&record, &source(Canned::Body(GRID), "A1:B3")).unwrap();

    assert_eq!(summary.degraded, None);
    assert_eq!(summary.rows, 3);
    // the missing third row arrives as empty cells
    assert_eq!(summary.money_cells, 1);

    let mut doc = Document::open(&document).unwrap();
    let table = locate_table(&mut doc, "Sales").unwrap();
    assert_eq!(
        table.texts(),
        vec![
            vec!["Region", "Total"],
            vec!["North", "$1,250.50"],
            vec!["", ""],
        ]
    );

    let header = table.element().path(&["w:tr", "w:tc", "w:tcPr", "w:shd"]).unwrap();
    assert_eq!(header.attr("w:fill"), Some("CCCCCC"));
    let bold = table
        .element()
        .path(&["w:tr", "w:tc", "w:p", "w:r", "w:rPr", "w:b"])
        .unwrap();
    assert_eq!(bold.attr("w:val"), None);
}

#[test]
fn test_failed_fetch_degrades_to_blank_cells() {
    let dir = TempDir::new().unwrap();
    let body = format!(
        "{}{}",
        paragraph("Sales"),
        table(&[&["Region", "Total"], &["North", "10"]])
    );
    let document = write_document(dir.path(), &body);

    let record = record(&document, "B2:C4");
    let summary = run_job_with_source(&record, &source(Canned::Unavailable, "B2:C4")).unwrap();

    let reason = summary.degraded.unwrap();
    assert!(reason.contains("503"), "{}", reason);
    assert_eq!(summary.reconcile.unwrap().rows_appended, 1);

    let mut doc = Document::open(&document).unwrap();
    let table = locate_table(&mut doc, "Sales").unwrap();
    assert_eq!(table.texts(), vec![vec!["", ""], vec!["", ""], vec!["", ""]]);
}
