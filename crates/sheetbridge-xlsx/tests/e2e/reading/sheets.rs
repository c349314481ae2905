//! Tests for sheet discovery.

use crate::XlsxFixture;
use sheetbridge_core::Error as CoreError;
use sheetbridge_xlsx::{XlsxError, XlsxReader};

#[test]
fn test_sheets_in_workbook_order() {
    let (_dir, path) = XlsxFixture::new()
        .sheet("Summary", "")
        .sheet("Q1 & Q2", r#"<row r="1"><c r="A1"><v>1</v></c></row>"#)
        .write();

    let workbook = XlsxReader::read_file(&path).expect("read workbook");
    assert_eq!(workbook.sheet_names().collect::<Vec<_>>(), ["Summary", "Q1 & Q2"]);
    assert_eq!(workbook.worksheet_by_name("Q1 & Q2").unwrap().cell_count(), 1);
    assert!(matches!(
        workbook.worksheet_by_name("Missing"),
        Err(CoreError::SheetNotFound(_))
    ));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = XlsxReader::read_file(dir.path().join("absent.xlsx")).unwrap_err();
    assert!(matches!(err, XlsxError::Open { ref path, .. } if path.ends_with("absent.xlsx")));
}
