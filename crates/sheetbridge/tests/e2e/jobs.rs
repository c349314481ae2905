//! Local workbook jobs, from record to saved document

use pretty_assertions::assert_eq;
use sheetbridge::config::{RangeSpec, SourceLocation, SyncMode, TableFont};
use sheetbridge::{
    locate_table, run_batch, run_job, ConfigStore, ConfigurationRecord, Document, JsonFileStore,
    SyncError,
};
use tempfile::TempDir;

use crate::{
    merged_row, paragraph, row, table, table_from_rows, write_document, write_workbook, Cell,
};

fn sales_rows() -> Vec<Vec<Cell<'static>>> {
    vec![
        vec![Cell::Text("Region"), Cell::Text("Total")],
        vec![Cell::Text("North"), Cell::Number(100.0)],
        vec![Cell::Text("South"), Cell::Number(2000.5)],
        vec![Cell::Text("East"), Cell::Number(30.0)],
    ]
}

fn record(workbook: &std::path::Path, document: &std::path::Path, range: RangeSpec) -> ConfigurationRecord {
    ConfigurationRecord::new(
        SourceLocation::Workbook {
            path: workbook.to_path_buf(),
        },
        "Data",
        range,
        document,
        "Sales",
    )
}

fn texts(path: &std::path::Path, anchor: &str) -> Vec<Vec<String>> {
    let mut doc = Document::open(path).unwrap();
    let table = locate_table(&mut doc, anchor).unwrap();
    table.texts()
}

#[test]
fn test_job_grows_table_and_formats_money() {
    let dir = TempDir::new().unwrap();
    let workbook = write_workbook(dir.path(), "Data", &sales_rows());
    let body = format!(
        "{}{}{}",
        paragraph("Sales"),
        table(&[&["Region", "Total"], &["old", "0"]]),
        paragraph("Notes")
    );
    let document = write_document(dir.path(), &body);

    let mut record = record(&workbook, &document, RangeSpec::Explicit("A1:B4".into()));
    record.money_columns = Some("2".into());
    let summary = run_job(&record).unwrap();

    assert_eq!(summary.rows, 4);
    assert_eq!(summary.columns, 2);
    assert_eq!(summary.money_cells, 3);
    let report = summary.reconcile.unwrap();
    assert_eq!(report.rows_appended, 2);
    assert_eq!(report.rows_written, 4);

    assert_eq!(
        texts(&document, "Sales"),
        vec![
            vec!["Region", "Total"],
            vec!["North", "$100.00"],
            vec!["South", "$2,000.50"],
            vec!["East", "$30.00"],
        ]
    );
}

#[test]
fn test_money_columns_without_header_rows() {
    let dir = TempDir::new().unwrap();
    let workbook = write_workbook(
        dir.path(),
        "Data",
        &[
            vec![Cell::Text("A"), Cell::Number(100.0)],
            vec![Cell::Text("B"), Cell::Number(2000.5)],
            vec![Cell::Text("C"), Cell::Number(30.0)],
        ],
    );
    let body = format!("{}{}", paragraph("Sales"), table(&[&["x", "y"]]));
    let document = write_document(dir.path(), &body);

    let mut record = record(&workbook, &document, RangeSpec::Explicit("A1:B3".into()));
    record.money_columns = Some("2".into());
    record.header_rows = Some(0);
    run_job(&record).unwrap();

    assert_eq!(
        texts(&document, "Sales"),
        vec![
            vec!["A", "$100.00"],
            vec!["B", "$2,000.50"],
            vec!["C", "$30.00"],
        ]
    );
}

#[test]
fn test_detected_range_and_separate_output() {
    let dir = TempDir::new().unwrap();
    let mut rows = sales_rows();
    rows.push(vec![Cell::Blank, Cell::Blank]);
    rows.push(vec![Cell::Text("stray"), Cell::Number(1.0)]);
    let workbook = write_workbook(dir.path(), "Data", &rows);
    let body = format!(
        "{}{}",
        paragraph("Sales"),
        table(&[&["1", "2"], &["3", "4"], &["5", "6"], &["7", "8"], &["9", "10"]])
    );
    let document = write_document(dir.path(), &body);
    let output = dir.path().join("out.docx");

    let mut record = record(&workbook, &document, RangeSpec::DetectFrom("A1".into()));
    record.output = Some(output.clone());
    let summary = run_job(&record).unwrap();

    assert_eq!(summary.output, output);
    assert_eq!(summary.reconcile.unwrap().rows_removed, 1);
    assert_eq!(texts(&output, "Sales").len(), 4);
    assert_eq!(texts(&output, "Sales")[3], vec!["East", "30"]);
    // the target is left as it was
    assert_eq!(texts(&document, "Sales")[0], vec!["1", "2"]);
}

#[test]
fn test_merged_row_swallows_data_row() {
    let dir = TempDir::new().unwrap();
    let workbook = write_workbook(dir.path(), "Data", &sales_rows());
    let rows = [
        row(&["a", "b"]),
        merged_row("Subtotal", 2),
        row(&["c", "d"]),
        row(&["e", "f"]),
    ];
    let body = format!("{}{}", paragraph("Sales"), table_from_rows(2, &rows));
    let document = write_document(dir.path(), &body);

    let summary = run_job(&record(&workbook, &document, RangeSpec::Explicit("A1:B4".into()))).unwrap();
    let report = summary.reconcile.unwrap();
    assert_eq!(report.merged_rows, vec![1]);
    assert_eq!(report.rows_skipped, 1);

    assert_eq!(
        texts(&document, "Sales"),
        vec![
            vec!["Region", "Total"],
            vec!["Subtotal"],
            vec!["South", "2000.5"],
            vec!["East", "30"],
        ]
    );
}

#[test]
fn test_column_mismatch_leaves_document_unsaved() {
    let dir = TempDir::new().unwrap();
    let workbook = write_workbook(dir.path(), "Data", &sales_rows());
    let body = format!("{}{}", paragraph("Sales"), table(&[&["a", "b", "c"]]));
    let document = write_document(dir.path(), &body);
    let output = dir.path().join("out.docx");

    let mut record = record(&workbook, &document, RangeSpec::Explicit("A1:B4".into()));
    record.output = Some(output.clone());
    let err = run_job(&record).unwrap_err();

    assert!(matches!(err, SyncError::ColumnMismatch { table: 3, data: 2 }));
    assert!(!output.exists());
}

#[test]
fn test_job_errors_name_their_cause() {
    let dir = TempDir::new().unwrap();
    let workbook = write_workbook(dir.path(), "Data", &sales_rows());
    let document = write_document(dir.path(), &paragraph("Sales"));

    let bad_range = record(&workbook, &document, RangeSpec::Explicit("A1-B4".into()));
    assert!(matches!(run_job(&bad_range), Err(SyncError::InvalidRangeFormat(_))));

    let mut missing_sheet = record(&workbook, &document, RangeSpec::Explicit("A1:B4".into()));
    missing_sheet.sheet = "Costs".into();
    assert!(matches!(run_job(&missing_sheet), Err(SyncError::SheetNotFound(_))));

    let no_table = record(&workbook, &document, RangeSpec::Explicit("A1:B4".into()));
    assert!(matches!(run_job(&no_table), Err(SyncError::TableNotFound(_))));

    let mut no_anchor = record(&workbook, &document, RangeSpec::Explicit("A1:B4".into()));
    no_anchor.anchor = "Costs".into();
    assert!(matches!(run_job(&no_anchor), Err(SyncError::AnchorNotFound(_))));
}

#[test]
fn test_build_mode_inserts_table_after_anchor() {
    let dir = TempDir::new().unwrap();
    let workbook = write_workbook(dir.path(), "Data", &sales_rows());
    let body = format!("{}{}", paragraph("Sales"), paragraph("Closing remarks"));
    let document = write_document(dir.path(), &body);

    let mut record = record(&workbook, &document, RangeSpec::Explicit("A1:B4".into()));
    record.mode = SyncMode::Build;
    record.grid_borders = true;
    record.table_font = Some(TableFont {
        family: "Arial".into(),
        size: 9.0,
    });
    let summary = run_job(&record).unwrap();
    assert!(summary.reconcile.is_none());

    let mut doc = Document::open(&document).unwrap();
    let body = doc.body().unwrap();
    let names: Vec<&str> = body.elements().map(|el| el.name.as_str()).collect();
    assert_eq!(names, vec!["w:p", "w:tbl", "w:p", "w:sectPr"]);

    let table = locate_table(&mut doc, "Sales").unwrap();
    assert_eq!(table.row_count(), 4);
    assert_eq!(table.grid_widths(), vec![4680, 4680]);
    assert_eq!(table.cell_text(2, 1).as_deref(), Some("2000.5"));
    let font = table.table_font().unwrap();
    assert_eq!(font.family.as_deref(), Some("Arial"));
    assert!(table.element().path(&["w:tblPr", "w:tblBorders"]).is_some());
}

#[test]
fn test_batch_from_json_store() {
    let dir = TempDir::new().unwrap();
    let workbook = write_workbook(dir.path(), "Data", &sales_rows());
    let body = format!(
        "{}{}",
        paragraph("Sales"),
        table(&[&["a", "b"], &["c", "d"], &["e", "f"], &["g", "h"]])
    );
    let document = write_document(dir.path(), &body);

    let mut store = JsonFileStore::open(dir.path().join("jobs.json")).unwrap();
    let good = store
        .create(record(&workbook, &document, RangeSpec::Explicit("A1:B4".into())))
        .unwrap();
    let mut broken = record(&workbook, &document, RangeSpec::Explicit("A1:B4".into()));
    broken.anchor = "Costs".into();
    let bad = store.create(broken).unwrap();

    // reopening reads what the first handle persisted
    let store = JsonFileStore::open(dir.path().join("jobs.json")).unwrap();
    let report = run_batch(&store).unwrap();

    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 1);
    let failed: Vec<u64> = report.failures().map(|(outcome, _)| outcome.id).collect();
    assert_eq!(failed, vec![bad]);
    assert!(report.outcomes.iter().any(|o| o.id == good && o.is_success()));
    assert_eq!(texts(&document, "Sales")[1], vec!["North", "100"]);
}
