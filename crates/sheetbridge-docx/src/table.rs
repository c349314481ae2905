//! Table view over a `w:tbl` element

use crate::text::{cell_text, set_cell_text};
use crate::xml::{XmlElement, XmlNode};

/// Child order of `w:tblPr`
pub(crate) const TBL_PR_ORDER: &[&str] = &[
    "w:tblStyle",
    "w:tblpPr",
    "w:tblOverlap",
    "w:bidiVisual",
    "w:tblStyleRowBandSize",
    "w:tblStyleColBandSize",
    "w:tblW",
    "w:jc",
    "w:tblCellSpacing",
    "w:tblInd",
    "w:tblBorders",
    "w:shd",
    "w:tblLayout",
    "w:tblCellMar",
    "w:tblLook",
    "w:tblCaption",
    "w:tblDescription",
];

/// Child order of `w:tbl`
const TBL_ORDER: &[&str] = &["w:tblPr", "w:tblGrid", "w:tr"];

/// Child order of `w:tblBorders`
const TBL_BORDERS_ORDER: &[&str] = &[
    "w:top", "w:left", "w:start", "w:bottom", "w:right", "w:end", "w:insideH", "w:insideV",
];

/// Width of the text area when the section does not say, in twips (6.5")
pub const DEFAULT_TEXT_WIDTH: u32 = 9360;

/// A mutable view over one table in the document tree
#[derive(Debug)]
pub struct Table<'a> {
    element: &'a mut XmlElement,
}

/// A mutable view over one `w:tc`
#[derive(Debug)]
pub struct Cell<'a> {
    element: &'a mut XmlElement,
}

impl<'a> Cell<'a> {
    /// Wrap a `w:tc` element
    pub fn new(element: &'a mut XmlElement) -> Self {
        Self { element }
    }

    /// The cell's text, paragraphs joined by newlines
    pub fn text(&self) -> String {
        cell_text(self.element)
    }

    /// Replace the cell's text, keeping its formatting
    pub fn set_text(&mut self, text: &str) {
        set_cell_text(self.element, text);
    }

    /// Horizontal span in grid columns
    pub fn grid_span(&self) -> u32 {
        grid_span(self.element)
    }

    /// The underlying element
    pub fn element(&self) -> &XmlElement {
        self.element
    }

    /// The underlying mutable element
    pub fn element_mut(&mut self) -> &mut XmlElement {
        self.element
    }
}

fn grid_span(tc: &XmlElement) -> u32 {
    tc.path(&["w:tcPr", "w:gridSpan"])
        .and_then(|span| span.attr("w:val"))
        .and_then(|v| v.parse().ok())
        .unwrap_or(1)
        .max(1)
}

fn grid_before(tr: &XmlElement) -> usize {
    tr.path(&["w:trPr", "w:gridBefore"])
        .and_then(|before| before.attr("w:val"))
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

/// Font of a run, as found on its properties
#[derive(Debug, Clone, PartialEq)]
pub struct RunFont {
    /// `w:rFonts` ASCII family
    pub family: Option<String>,
    /// Size in points
    pub size: Option<f64>,
}

impl<'a> Table<'a> {
    /// Wrap a `w:tbl` element
    pub fn new(element: &'a mut XmlElement) -> Self {
        Self { element }
    }

    /// Create an empty table element with a grid of the given column widths (twips)
    pub fn create(column_widths: &[u32]) -> XmlElement {
        let total: u32 = column_widths.iter().sum();
        let tbl_pr = XmlElement::new("w:tblPr")
            .with_child(
                XmlElement::new("w:tblW")
                    .with_attr("w:w", total.to_string())
                    .with_attr("w:type", "dxa"),
            )
            .with_child(XmlElement::new("w:tblLook").with_attr("w:val", "04A0"));

        let mut grid = XmlElement::new("w:tblGrid");
        for width in column_widths {
            grid.push(XmlElement::new("w:gridCol").with_attr("w:w", width.to_string()));
        }

        XmlElement::new("w:tbl").with_child(tbl_pr).with_child(grid)
    }

    /// The underlying element
    pub fn element(&self) -> &XmlElement {
        self.element
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.element.children_named("w:tr").count()
    }

    /// Grid column widths from `w:tblGrid`
    pub fn grid_widths(&self) -> Vec<u32> {
        self.element
            .child("w:tblGrid")
            .map(|grid| {
                grid.children_named("w:gridCol")
                    .map(|col| col.attr("w:w").and_then(|w| w.parse().ok()).unwrap_or(0))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of logical columns
    ///
    /// This is the number of grid columns; a table without a grid falls back
    /// to its widest row measured in grid units.
    pub fn column_count(&self) -> usize {
        let grid = self.grid_widths().len();
        if grid > 0 {
            return grid;
        }
        self.element
            .children_named("w:tr")
            .map(|tr| tr.children_named("w:tc").map(|tc| grid_span(tc) as usize).sum())
            .max()
            .unwrap_or(0)
    }

    /// Number of `w:tc` elements in a row
    pub fn cell_count(&self, row: usize) -> Option<usize> {
        self.row(row).map(|tr| tr.children_named("w:tc").count())
    }

    /// Whether a row holds a cell spanning more than one column
    pub fn is_row_merged(&self, row: usize) -> bool {
        self.row(row)
            .map(|tr| tr.children_named("w:tc").any(|tc| grid_span(tc) > 1))
            .unwrap_or(false)
    }

    /// Merge flag of every row, top to bottom
    pub fn merged_rows(&self) -> Vec<bool> {
        (0..self.row_count()).map(|i| self.is_row_merged(i)).collect()
    }

    /// Text of every cell, row by row
    pub fn texts(&self) -> Vec<Vec<String>> {
        self.element
            .children_named("w:tr")
            .map(|tr| tr.children_named("w:tc").map(cell_text).collect())
            .collect()
    }

    /// Text of one cell by position in its row
    pub fn cell_text(&self, row: usize, col: usize) -> Option<String> {
        self.row(row)
            .and_then(|tr| tr.children_named("w:tc").nth(col))
            .map(cell_text)
    }

    /// One cell by position in its row
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<Cell<'_>> {
        self.row_mut(row)
            .and_then(|tr| tr.children_named_mut("w:tc").nth(col))
            .map(Cell::new)
    }

    /// The cell covering grid column `col` of a row
    ///
    /// Spans and the row's `w:gridBefore` are counted, so a cell spanning two
    /// columns answers for both. Columns skipped by `w:gridBefore` have no cell.
    pub fn grid_cell_mut(&mut self, row: usize, col: usize) -> Option<Cell<'_>> {
        let tr = self.row_mut(row)?;
        let mut end = grid_before(tr);
        if col < end {
            return None;
        }
        tr.children_named_mut("w:tc")
            .find(|tc| {
                end += grid_span(tc) as usize;
                col < end
            })
            .map(Cell::new)
    }

    /// Every cell in the table, row by row
    pub fn cells_mut(&mut self) -> impl Iterator<Item = Cell<'_>> {
        self.element
            .children_named_mut("w:tr")
            .flat_map(|tr| tr.children_named_mut("w:tc"))
            .map(Cell::new)
    }

    fn row(&self, index: usize) -> Option<&XmlElement> {
        self.element.children_named("w:tr").nth(index)
    }

    fn row_mut(&mut self, index: usize) -> Option<&mut XmlElement> {
        self.element.children_named_mut("w:tr").nth(index)
    }

    /// Append a row with empty text, shaped like `template` or, without one, like the grid
    ///
    /// Vertical merges are not continued into the new row.
    pub fn append_row(&mut self, template: Option<usize>) {
        let row = match template.and_then(|i| self.row(i)) {
            Some(tr) => {
                let mut tr = tr.clone();
                for tc in tr.children_named_mut("w:tc") {
                    if let Some(tc_pr) = tc.child_mut("w:tcPr") {
                        tc_pr.remove_children("w:vMerge");
                    }
                    set_cell_text(tc, "");
                }
                tr
            }
            None => self.grid_row(),
        };

        // directly after the last row, so trailing bookmarks stay behind it
        let last_row = self
            .element
            .children
            .iter()
            .rposition(|node| node.as_element().map_or(false, |el| el.is("w:tr")));
        match last_row {
            Some(index) => self.element.children.insert(index + 1, XmlNode::Element(row)),
            None => {
                self.element.insert_ordered(row, TBL_ORDER);
            }
        }
    }

    /// A fresh row with one empty cell per grid column
    fn grid_row(&self) -> XmlElement {
        let mut tr = XmlElement::new("w:tr");
        for width in self.grid_widths() {
            tr.push(new_cell(width));
        }
        tr
    }

    /// Make a row hold exactly `columns` cells
    ///
    /// Missing cells are copies of the row's last cell with empty text, or
    /// fresh cells sized from the grid; extra cells are removed from the end.
    pub fn normalize_row(&mut self, row: usize, columns: usize) {
        let widths = self.grid_widths();
        let Some(tr) = self.row_mut(row) else {
            return;
        };

        let mut count = tr.children_named("w:tc").count();
        while count > columns {
            let Some(last) = tr
                .children
                .iter()
                .rposition(|node| node.as_element().map_or(false, |el| el.is("w:tc")))
            else {
                break;
            };
            tr.children.remove(last);
            count -= 1;
        }

        while count < columns {
            let cell = match tr.children_named("w:tc").last() {
                Some(last) => {
                    let mut cell = last.clone();
                    if let Some(tc_pr) = cell.child_mut("w:tcPr") {
                        tc_pr.remove_children("w:gridSpan");
                        tc_pr.remove_children("w:vMerge");
                    }
                    set_cell_text(&mut cell, "");
                    cell
                }
                None => new_cell(widths.get(count).copied().unwrap_or(0)),
            };
            tr.push(cell);
            count += 1;
        }
    }

    /// Remove rows from the end until `rows` remain
    pub fn truncate_rows(&mut self, rows: usize) {
        let mut count = self.row_count();
        while count > rows {
            let Some(last) = self
                .element
                .children
                .iter()
                .rposition(|node| node.as_element().map_or(false, |el| el.is("w:tr")))
            else {
                break;
            };
            self.element.children.remove(last);
            count -= 1;
        }
    }

    fn tbl_pr_mut(&mut self) -> &mut XmlElement {
        self.element.child_ordered_mut("w:tblPr", TBL_ORDER)
    }

    /// Reference a table style by id (e.g. `TableGrid`)
    pub fn set_style(&mut self, style_id: &str) {
        self.tbl_pr_mut().set_child_ordered(
            XmlElement::new("w:tblStyle").with_attr("w:val", style_id),
            TBL_PR_ORDER,
        );
    }

    /// Align the table on the page (`left`, `center`, `right`)
    pub fn set_alignment(&mut self, jc: &str) {
        self.tbl_pr_mut()
            .set_child_ordered(XmlElement::new("w:jc").with_attr("w:val", jc), TBL_PR_ORDER);
    }

    /// Keep column widths fixed instead of fitting them to content
    pub fn set_fixed_layout(&mut self) {
        self.tbl_pr_mut().set_child_ordered(
            XmlElement::new("w:tblLayout").with_attr("w:type", "fixed"),
            TBL_PR_ORDER,
        );
    }

    /// Single black borders around and inside the table
    pub fn set_grid_borders(&mut self) {
        let mut borders = XmlElement::new("w:tblBorders");
        for side in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
            borders.insert_ordered(
                XmlElement::new(side)
                    .with_attr("w:val", "single")
                    .with_attr("w:sz", "4")
                    .with_attr("w:space", "0")
                    .with_attr("w:color", "000000"),
                TBL_BORDERS_ORDER,
            );
        }
        self.tbl_pr_mut().set_child_ordered(borders, TBL_PR_ORDER);
    }

    /// Set the run font of every cell
    pub fn set_font(&mut self, family: &str, size: f64) {
        for mut cell in self.cells_mut() {
            crate::format::apply_font(&mut cell, family, size);
        }
    }

    /// The first explicit run font in the table, in reading order
    pub fn table_font(&self) -> Option<RunFont> {
        self.element
            .descendants()
            .into_iter()
            .filter(|el| el.is("w:r"))
            .filter_map(|r| r.child("w:rPr"))
            .map(|r_pr| RunFont {
                family: r_pr
                    .child("w:rFonts")
                    .and_then(|f| f.attr("w:ascii").or_else(|| f.attr("w:hAnsi")))
                    .map(str::to_string),
                size: r_pr
                    .child("w:sz")
                    .and_then(|sz| sz.attr("w:val"))
                    .and_then(|v| v.parse::<f64>().ok())
                    .map(|half_points| half_points / 2.0),
            })
            .find(|font| font.family.is_some() || font.size.is_some())
    }
}

fn new_cell(width: u32) -> XmlElement {
    XmlElement::new("w:tc")
        .with_child(
            XmlElement::new("w:tcPr").with_child(
                XmlElement::new("w:tcW")
                    .with_attr("w:w", width.to_string())
                    .with_attr("w:type", "dxa"),
            ),
        )
        .with_child(XmlElement::new("w:p"))
}
