//! Locating, editing and saving tables

use std::io::Read;

use pretty_assertions::assert_eq;
use sheetbridge_core::{Borders, BorderLineStyle, CellFormat, Color, HorizontalAlignment};
use sheetbridge_docx::{apply_format, locate_table, Document, DocxError, Table};

use crate::{paragraph, table, DocxFixture};

#[test]
fn test_edit_table_and_reopen() {
    let body = format!(
        "{}{}{}{}",
        paragraph("Intro"),
        paragraph("Sales"),
        paragraph(""),
        table(&[&["Region", "Total"], &["old", "0"]])
    );
    let (_dir, path) = DocxFixture::new(&body).write();

    let mut doc = Document::open(&path).unwrap();
    {
        let mut table = locate_table(&mut doc, "Sales").unwrap();
        table.append_row(Some(1));
        table.cell_mut(1, 0).unwrap().set_text("North");
        table.cell_mut(2, 0).unwrap().set_text("South");
        let mut cell = table.cell_mut(0, 0).unwrap();
        apply_format(
            &mut cell,
            &CellFormat::new()
                .bold(true)
                .background(Color::rgb(0xEE, 0xEE, 0xEE))
                .horizontal_alignment(HorizontalAlignment::Center),
        );
    }
    doc.save(&path).unwrap();

    let mut reopened = Document::open(&path).unwrap();
    let table = locate_table(&mut reopened, "Sales").unwrap();
    assert_eq!(
        table.texts(),
        vec![
            vec!["Region", "Total"],
            vec!["North", "0"],
            vec!["South", ""],
        ]
    );
    let header = table.element().path(&["w:tr", "w:tc", "w:tcPr", "w:shd"]).unwrap();
    assert_eq!(header.attr("w:fill"), Some("EEEEEE"));
}

#[test]
fn test_missing_anchor_and_table() {
    let (_dir, path) = DocxFixture::new(&paragraph("Sales")).write();
    let mut doc = Document::open(&path).unwrap();

    assert!(matches!(
        locate_table(&mut doc, "Costs"),
        Err(DocxError::AnchorNotFound(ref label)) if label == "Costs"
    ));
    assert!(matches!(
        locate_table(&mut doc, "Sales"),
        Err(DocxError::TableNotFound(_))
    ));
}

#[test]
fn test_build_new_table_with_borders() {
    let (_dir, path) = DocxFixture::new(&paragraph("Summary")).write();
    let mut doc = Document::open(&path).unwrap();

    let width = doc.text_width();
    assert_eq!(width, 9360);
    let index = doc.append_body_element(Table::create(&[width / 2, width / 2])).unwrap();
    {
        let mut table = doc.table_at(index).unwrap();
        table.set_style("TableGrid");
        table.set_grid_borders();
        table.append_row(None);
        let mut cell = table.cell_mut(0, 1).unwrap();
        cell.set_text("42");
        apply_format(
            &mut cell,
            &CellFormat::new().borders(Borders::all(BorderLineStyle::SolidThick, Color::BLACK)),
        );
    }
    doc.save(&path).unwrap();

    let mut reopened = Document::open(&path).unwrap();
    let table = locate_table(&mut reopened, "Summary").unwrap();
    assert_eq!(table.texts(), vec![vec!["", "42"]]);
    let top = table
        .element()
        .descendants()
        .into_iter()
        .find(|el| el.is("w:tcBorders"))
        .and_then(|b| b.child("w:top"))
        .unwrap();
    assert_eq!(top.attr("w:sz"), Some("18"));
}

#[test]
fn test_untouched_parts_survive_save() {
    let fixture = DocxFixture::new(&format!("{}{}", paragraph("Sales"), table(&[&["a"]])));
    let (_dir, path) = fixture.write();

    let doc = Document::open(&path).unwrap();
    doc.save(&path).unwrap();

    let mut archive = zip::ZipArchive::new(std::fs::File::open(&path).unwrap()).unwrap();
    let mut styles = String::new();
    archive
        .by_name("word/styles.xml")
        .unwrap()
        .read_to_string(&mut styles)
        .unwrap();
    assert!(styles.contains("<w:styles"));
    assert_eq!(archive.len(), 4);
}
