//! XLSX reader

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::date::{parse_iso, serial_to_datetime};
use crate::error::{XlsxError, XlsxResult};
use crate::styles::{read_date_styles, DateStyles};
use sheetbridge_core::{CellAddress, CellValue, Workbook, Worksheet, MAX_COLS};

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format to encode special characters in XML:
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore (escaped underscore)
fn decode_excel_escapes(s: &str) -> String {
    if !s.contains("_x") {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }
    result.push_str(rest);

    result
}

/// Workbook-level settings read from `xl/workbook.xml`
struct WorkbookInfo {
    /// (sheet name, relationship id) in workbook order
    sheets: Vec<(String, String)>,
    /// 1904 date system
    date_1904: bool,
}

/// Per-workbook lookup tables shared by every worksheet
struct SheetContext<'a> {
    shared_strings: &'a [String],
    date_styles: &'a DateStyles,
    date_1904: bool,
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| XlsxError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::read(file)
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = zip::ZipArchive::new(reader)?;

        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::MissingPart("[Content_Types].xml".into()));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let date_styles = Self::read_styles(&mut archive)?;
        let info = Self::read_workbook_xml(&mut archive)?;
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        let ctx = SheetContext {
            shared_strings: &shared_strings,
            date_styles: &date_styles,
            date_1904: info.date_1904,
        };

        let mut workbook = Workbook::empty();
        for (name, r_id) in &info.sheets {
            match sheet_paths.get(r_id) {
                Some(path) => {
                    let mut worksheet = Worksheet::new(name.as_str());
                    Self::read_worksheet(&mut archive, path, &mut worksheet, &ctx)?;
                    workbook.add_worksheet(worksheet);
                }
                // chartsheets and dialog sheets have no cell data
                None => log::debug!("skipping sheet '{}' without a worksheet part", name),
            }
        }

        Ok(workbook)
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        // leading and trailing spaces are part of the string
        xml_reader.trim_text(false);

        let mut buf = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"rPh" => in_phonetic = true,
                    b"t" if in_si && !in_phonetic => in_t = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.local_name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current_string));
                        current_string.clear();
                        in_si = false;
                    }
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    if let Ok(text) = e.unescape() {
                        current_string.push_str(&text);
                    }
                }
                Ok(Event::CData(e)) if in_t => {
                    current_string.push_str(&String::from_utf8_lossy(&e));
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    fn read_styles<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> XlsxResult<DateStyles> {
        match archive.by_name("xl/styles.xml") {
            Ok(file) => read_date_styles(file),
            Err(_) => Ok(DateStyles::default()),
        }
    }

    /// Read workbook.xml to get sheet names, rIds and the date system
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<WorkbookInfo> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut info = WorkbookInfo {
            sheets: Vec::new(),
            date_1904: false,
        };

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"sheet" => {
                        let name = attr_value(&e, b"name");
                        let r_id = attr_value(&e, b"r:id");
                        if let (Some(name), Some(r_id)) = (name, r_id) {
                            info.sheets.push((name, r_id));
                        }
                    }
                    b"workbookPr" => {
                        info.date_1904 = attr_value(&e, b"date1904")
                            .map_or(false, |v| v == "1" || v == "true");
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(info)
    }

    /// Read workbook.xml.rels to get sheet file paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let id = attr_value(&e, b"Id");
                    let target = attr_value(&e, b"Target");
                    let rel_type = attr_value(&e, b"Type");

                    // Only include worksheet relationships
                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Target is relative to xl/ folder
                            let full_path = match target.strip_prefix('/') {
                                Some(absolute) => absolute.to_string(),
                                None => format!("xl/{}", target),
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read a worksheet's cell values from the archive
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        worksheet: &mut Worksheet,
        ctx: &SheetContext<'_>,
    ) -> XlsxResult<()> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(false);

        let mut buf = Vec::new();

        // Position tracking for cells and rows without an `r` attribute
        let mut current_row: u32 = 0;
        let mut next_row: u32 = 0;
        let mut next_col: u16 = 0;

        // Current cell state
        let mut cell_pos: Option<(u32, u16)> = None;
        let mut cell_type: Option<String> = None;
        let mut cell_style: u32 = 0;
        let mut value = String::new();
        let mut inline_text = String::new();
        let mut has_value = false;
        let mut in_value = false;
        let mut in_inline_str = false;
        let mut in_inline_text = false;
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"row" => {
                        current_row = Self::row_index(&e, next_row)?;
                        next_row = current_row + 1;
                        next_col = 0;
                    }
                    b"c" => {
                        let (row, col) = Self::cell_position(&e, current_row, next_col)?;
                        next_col = col.saturating_add(1);
                        cell_pos = Some((row, col));
                        cell_type = attr_value(&e, b"t");
                        cell_style = attr_value(&e, b"s")
                            .and_then(|s| s.parse().ok())
                            .unwrap_or(0);
                        value.clear();
                        inline_text.clear();
                        has_value = false;
                    }
                    b"v" if cell_pos.is_some() => {
                        in_value = true;
                        has_value = true;
                    }
                    b"is" if cell_pos.is_some() => {
                        in_inline_str = true;
                        has_value = true;
                    }
                    b"rPh" if in_inline_str => in_phonetic = true,
                    b"t" if in_inline_str && !in_phonetic => in_inline_text = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                    // an empty row still occupies its row number
                    b"row" => {
                        current_row = Self::row_index(&e, next_row)?;
                        next_row = current_row + 1;
                    }
                    // a valueless cell (style only) still advances the column
                    b"c" => {
                        let (_, col) = Self::cell_position(&e, current_row, next_col)?;
                        next_col = col.saturating_add(1);
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) if in_value || in_inline_text => {
                    let text = e.unescape()?;
                    if in_value {
                        value.push_str(&text);
                    } else {
                        inline_text.push_str(&text);
                    }
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"c" => {
                        if let Some((row, col)) = cell_pos.take() {
                            if has_value {
                                let raw = if is_inline_string(cell_type.as_deref()) {
                                    inline_text.as_str()
                                } else {
                                    value.as_str()
                                };
                                let cell_value = Self::process_cell(
                                    cell_type.as_deref(),
                                    raw,
                                    cell_style,
                                    ctx,
                                )?;
                                worksheet.set_value_at(row, col, cell_value);
                            }
                        }
                    }
                    b"v" => in_value = false,
                    b"is" => in_inline_str = false,
                    b"rPh" => in_phonetic = false,
                    b"t" => in_inline_text = false,
                    b"sheetData" => break,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// The 0-based index of a `<row>`, falling back to the next sequential row
    fn row_index(e: &BytesStart<'_>, next_row: u32) -> XlsxResult<u32> {
        match attr_value(e, b"r") {
            Some(r) => {
                let r: u32 = r
                    .parse()
                    .map_err(|_| XlsxError::Malformed(format!("Invalid row number '{}'", r)))?;
                Ok(r.saturating_sub(1)) // 1-based to 0-based
            }
            None => Ok(next_row),
        }
    }

    /// The position of a `<c>`, falling back to the next column in the row
    fn cell_position(
        e: &BytesStart<'_>,
        current_row: u32,
        next_col: u16,
    ) -> XlsxResult<(u32, u16)> {
        match attr_value(e, b"r") {
            Some(cell_ref) => {
                let addr = CellAddress::parse(&cell_ref).map_err(|e| {
                    XlsxError::Malformed(format!("Invalid cell reference '{}': {}", cell_ref, e))
                })?;
                Ok((addr.row, addr.col))
            }
            None if next_col < MAX_COLS => Ok((current_row, next_col)),
            None => Err(XlsxError::Malformed(format!(
                "Too many cells in row {}",
                current_row + 1
            ))),
        }
    }

    /// Turn a cell's raw text into a value according to its type and style
    fn process_cell(
        cell_type: Option<&str>,
        value: &str,
        style_idx: u32,
        ctx: &SheetContext<'_>,
    ) -> XlsxResult<CellValue> {
        let cell_value = match cell_type {
            // Shared string
            Some("s") => {
                let idx: usize = value.trim().parse().map_err(|_| {
                    XlsxError::Malformed(format!("Invalid shared string index: {}", value))
                })?;
                let s = ctx.shared_strings.get(idx).ok_or_else(|| {
                    XlsxError::Malformed(format!("Shared string index {} out of bounds", idx))
                })?;
                CellValue::String(s.clone())
            }

            // Boolean
            Some("b") => {
                let value = value.trim();
                CellValue::Boolean(value == "1" || value.eq_ignore_ascii_case("true"))
            }

            // Error
            Some("e") => CellValue::Error(value.trim().to_string()),

            // Inline string and formula string results
            Some("inlineStr") | Some("str") => CellValue::String(decode_excel_escapes(value)),

            // ISO 8601 date
            Some("d") => match parse_iso(value.trim()) {
                Some(dt) => CellValue::DateTime(dt),
                None => CellValue::String(value.to_string()),
            },

            // Number (default type or explicit "n")
            None | Some("n") => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    CellValue::Empty
                } else {
                    match trimmed.parse::<f64>() {
                        Ok(n) if ctx.date_styles.is_date(style_idx) => {
                            match serial_to_datetime(n, ctx.date_1904) {
                                Some(dt) => CellValue::DateTime(dt),
                                None => CellValue::Number(n),
                            }
                        }
                        Ok(n) => CellValue::Number(n),
                        Err(_) => CellValue::String(value.to_string()),
                    }
                }
            }

            // Unknown type - treat as string
            Some(_) => CellValue::String(value.to_string()),
        };

        Ok(cell_value)
    }
}

/// Whether the cell's text lives in `<is>` rather than `<v>`
fn is_inline_string(cell_type: Option<&str>) -> bool {
    cell_type == Some("inlineStr")
}

/// Read and unescape one attribute by its qualified name
fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|s| s.to_string()))
}
