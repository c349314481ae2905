//! Finding a table by the text of the paragraph above it

use crate::error::{DocxError, DocxResult};
use crate::package::Document;
use crate::table::Table;
use crate::text::paragraph_text;
use crate::xml::XmlElement;

/// Index among the body's children of the first paragraph containing `label`
///
/// Only body-level paragraphs are scanned; the match is a case-sensitive
/// substring test.
pub fn find_anchor(body: &XmlElement, label: &str) -> Option<usize> {
    body.children.iter().position(|node| {
        node.as_element()
            .map_or(false, |el| el.is("w:p") && paragraph_text(el).contains(label))
    })
}

/// Index of the first table among the body's children after `anchor`
pub fn table_after(body: &XmlElement, anchor: usize) -> Option<usize> {
    body.children
        .iter()
        .enumerate()
        .skip(anchor + 1)
        .find(|(_, node)| node.as_element().map_or(false, |el| el.is("w:tbl")))
        .map(|(index, _)| index)
}

/// Locate the table that follows the paragraph anchored by `label`
///
/// The first matching paragraph wins even when a later one would be followed
/// by a table.
pub fn locate_table<'d>(document: &'d mut Document, label: &str) -> DocxResult<Table<'d>> {
    let body = document.body_mut()?;
    let anchor =
        find_anchor(body, label).ok_or_else(|| DocxError::AnchorNotFound(label.to_string()))?;
    let index =
        table_after(body, anchor).ok_or_else(|| DocxError::TableNotFound(label.to_string()))?;
    log::debug!("anchor '{}' at body child {}, table at {}", label, anchor, index);

    match body.children[index].as_element_mut() {
        Some(tbl) => Ok(Table::new(tbl)),
        None => Err(DocxError::TableNotFound(label.to_string())),
    }
}
