//! Fresh tables built entirely from formatted source cells

use sheetbridge_core::{SourceCell, TabularBlock};
use sheetbridge_docx::{apply_format, find_anchor, Document, Table, XmlElement};

use crate::error::{SyncError, SyncResult};

/// Table style referenced by built tables
pub const BUILT_TABLE_STYLE: &str = "TableGrid";

/// Append a new table sized to `data` at the end of the body
///
/// The table goes ahead of the final section properties, uses a fixed
/// layout with equal columns across the text width, and every cell carries
/// its value and full format.
pub fn build_table<'d, C: SourceCell>(
    document: &'d mut Document,
    data: &TabularBlock<C>,
) -> SyncResult<Table<'d>> {
    let element = table_element(data, document.text_width());
    let index = document.append_body_element(element)?;
    log::info!(
        "built {}x{} table at the end of the body",
        data.row_count(),
        data.column_count()
    );
    Ok(document.table_at(index)?)
}

/// Like [`build_table`], but placed directly after the paragraph anchored by `anchor_label`
pub fn build_table_after<'d, C: SourceCell>(
    document: &'d mut Document,
    anchor_label: &str,
    data: &TabularBlock<C>,
) -> SyncResult<Table<'d>> {
    let anchor = find_anchor(document.body()?, anchor_label)
        .ok_or_else(|| SyncError::AnchorNotFound(anchor_label.to_string()))?;

    let element = table_element(data, document.text_width());
    let index = document.insert_body_element(anchor + 1, element)?;
    log::info!(
        "built {}x{} table after '{}'",
        data.row_count(),
        data.column_count(),
        anchor_label
    );
    Ok(document.table_at(index)?)
}

fn table_element<C: SourceCell>(data: &TabularBlock<C>, text_width: u32) -> XmlElement {
    let columns = data.column_count();
    let widths = match u32::try_from(columns) {
        Ok(n) if n > 0 => vec![text_width / n; columns],
        _ => Vec::new(),
    };

    let mut element = Table::create(&widths);
    let mut table = Table::new(&mut element);
    table.set_style(BUILT_TABLE_STYLE);
    table.set_alignment("left");
    table.set_fixed_layout();

    for (i, row) in data.rows().iter().enumerate() {
        table.append_row(None);
        for (j, value) in row.iter().enumerate() {
            if let Some(mut cell) = table.cell_mut(i, j) {
                cell.set_text(&value.text());
                apply_format(&mut cell, &value.to_format());
            }
        }
    }
    element
}
