//! Tests for date-aware reading of number cells.

use crate::XlsxFixture;
use chrono::NaiveDate;
use sheetbridge_core::CellValue;
use sheetbridge_xlsx::XlsxReader;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <numFmts count="1"><numFmt numFmtId="164" formatCode="yyyy\-mm\-dd\ hh:mm"/></numFmts>
  <cellXfs count="4">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
    <xf numFmtId="14" fontId="0" fillId="0" borderId="0" applyNumberFormat="1"/>
    <xf numFmtId="164" fontId="0" fillId="0" borderId="0" applyNumberFormat="1"/>
    <xf numFmtId="4" fontId="0" fillId="0" borderId="0" applyNumberFormat="1"/>
  </cellXfs>
</styleSheet>"#;

const ROWS: &str = r#"<row r="1"><c r="A1" s="1"><v>45292</v></c><c r="B1" s="2"><v>45292.75</v></c><c r="C1" s="3"><v>45292</v></c><c r="D1"><v>45292</v></c></row>
<row r="2"><c r="A2" t="d"><v>2024-03-05T00:00:00</v></c></row>"#;

#[test]
fn test_date_styles_produce_datetimes() {
    let (_dir, path) = XlsxFixture::new().styles(STYLES).sheet("Data", ROWS).write();
    let workbook = XlsxReader::read_file(&path).expect("read workbook");
    let sheet = workbook.worksheet(0).unwrap();

    let jan_first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    assert_eq!(
        sheet.value_at(0, 0),
        &CellValue::DateTime(jan_first.and_hms_opt(0, 0, 0).unwrap())
    );
    assert_eq!(sheet.value_at(0, 0).to_string(), "2024-01-01");
    assert_eq!(
        sheet.value_at(0, 1),
        &CellValue::DateTime(jan_first.and_hms_opt(18, 0, 0).unwrap())
    );
    assert_eq!(sheet.value_at(0, 1).to_string(), "2024-01-01 18:00:00");

    // number formats and unstyled cells stay numeric
    assert_eq!(sheet.value_at(0, 2), &CellValue::Number(45292.0));
    assert_eq!(sheet.value_at(0, 3), &CellValue::Number(45292.0));

    assert_eq!(sheet.value_at(1, 0).to_string(), "2024-03-05");
}

#[test]
fn test_1904_date_system() {
    let (_dir, path) = XlsxFixture::new()
        .date_1904()
        .styles(STYLES)
        .sheet("Data", r#"<row r="1"><c r="A1" s="1"><v>43830</v></c></row>"#)
        .write();
    let workbook = XlsxReader::read_file(&path).expect("read workbook");

    assert_eq!(workbook.worksheet(0).unwrap().value_at(0, 0).to_string(), "2024-01-01");
}
