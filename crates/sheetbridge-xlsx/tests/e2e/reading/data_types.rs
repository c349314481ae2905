//! Tests for reading cell value types.

use crate::XlsxFixture;
use pretty_assertions::assert_eq;
use sheetbridge_core::{CellRange, CellValue};
use sheetbridge_xlsx::XlsxReader;

#[test]
fn test_number_string_bool_error() {
    let (_dir, path) = XlsxFixture::new()
        .shared_strings(&["Name", "  padded  "])
        .sheet(
            "Data",
            r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1"><v>42</v></c><c r="C1"><v>3.5</v></c></row>
               <row r="2"><c r="A2" t="s"><v>1</v></c><c r="B2" t="b"><v>0</v></c><c r="C2" t="e"><v>#DIV/0!</v></c></row>
               <row r="3"><c r="A3" t="str"><f>A1&amp;"!"</f><v>Name!</v></c><c r="B3" t="inlineStr"><is><t>inline</t></is></c></row>"#,
        )
        .write();

    let workbook = XlsxReader::read_file(&path).expect("read workbook");
    let sheet = workbook.worksheet_by_name("Data").expect("sheet");

    assert_eq!(sheet.value_at(0, 0), &CellValue::String("Name".into()));
    assert_eq!(sheet.value_at(0, 1), &CellValue::Number(42.0));
    assert_eq!(sheet.value_at(0, 2), &CellValue::Number(3.5));
    assert_eq!(sheet.value_at(1, 0), &CellValue::String("  padded  ".into()));
    assert_eq!(sheet.value_at(1, 1), &CellValue::Boolean(false));
    assert_eq!(sheet.value_at(1, 2), &CellValue::Error("#DIV/0!".into()));
    assert_eq!(sheet.value_at(2, 0), &CellValue::String("Name!".into()));
    assert_eq!(sheet.value_at(2, 1), &CellValue::String("inline".into()));
}

#[test]
fn test_rich_text_shared_string_skips_phonetic_runs() {
    let (_dir, path) = XlsxFixture::new()
        .shared_strings_xml(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="2" uniqueCount="2"><si><r><rPr><b/></rPr><t>Bold</t></r><r><t xml:space="preserve"> part</t></r></si><si><t>東京</t><rPh sb="0" eb="2"><t>トウキョウ</t></rPh></si></sst>"#,
        )
        .sheet(
            "Data",
            r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row>"#,
        )
        .write();

    let workbook = XlsxReader::read_file(&path).expect("read workbook");
    let sheet = workbook.worksheet(0).unwrap();
    assert_eq!(sheet.value_at(0, 0), &CellValue::String("Bold part".into()));
    assert_eq!(sheet.value_at(0, 1), &CellValue::String("東京".into()));
}

#[test]
fn test_read_range_band() {
    let (_dir, path) = XlsxFixture::new()
        .shared_strings(&["Item", "Total", "A", "B"])
        .sheet(
            "Data",
            r#"<row r="2"><c r="B2" t="s"><v>0</v></c><c r="C2" t="s"><v>1</v></c><c r="D2"><v>9</v></c></row>
               <row r="3"><c r="B3" t="s"><v>2</v></c><c r="C3"><v>100</v></c></row>
               <row r="4"><c r="B4" t="s"><v>3</v></c><c r="C4"><v>2000.5</v></c></row>"#,
        )
        .write();

    let workbook = XlsxReader::read_file(&path).expect("read workbook");
    let sheet = workbook.worksheet(0).unwrap();
    let block = sheet.read_range(&CellRange::parse_strict("B2:C4").unwrap());

    let rendered: Vec<Vec<String>> = block
        .rows()
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();
    assert_eq!(
        rendered,
        vec![
            vec!["Item".to_string(), "Total".to_string()],
            vec!["A".to_string(), "100".to_string()],
            vec!["B".to_string(), "2000.5".to_string()],
        ]
    );
}

#[test]
fn test_escaped_characters_in_strings() {
    let (_dir, path) = XlsxFixture::new()
        .shared_strings(&["line1_x000a_line2", "a & b"])
        .sheet(
            "Data",
            r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row>"#,
        )
        .write();

    let workbook = XlsxReader::read_file(&path).expect("read workbook");
    let sheet = workbook.worksheet(0).unwrap();
    assert_eq!(sheet.value_at(0, 0), &CellValue::String("line1\nline2".into()));
    assert_eq!(sheet.value_at(0, 1), &CellValue::String("a & b".into()));
}

#[test]
fn test_shared_string_index_out_of_bounds() {
    let (_dir, path) = XlsxFixture::new()
        .shared_strings(&["only"])
        .sheet("Data", r#"<row r="1"><c r="A1" t="s"><v>5</v></c></row>"#)
        .write();

    let err = XlsxReader::read_file(&path).unwrap_err();
    assert!(err.to_string().contains("out of bounds"), "{err}");
}
