//! Number format lookup from `xl/styles.xml`
//!
//! Only what is needed to tell dates from plain numbers is parsed: the
//! custom `numFmts` table and the `numFmtId` of every `cellXfs` entry.

use std::collections::HashMap;
use std::io::{BufReader, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};

/// Which cell style indexes (`s` attribute) render as a date or time
#[derive(Debug, Clone, Default)]
pub(crate) struct DateStyles {
    flags: Vec<bool>,
}

impl DateStyles {
    /// Check whether a cell style index uses a date/time number format
    pub(crate) fn is_date(&self, style_idx: u32) -> bool {
        self.flags.get(style_idx as usize).copied().unwrap_or(false)
    }
}

/// Parse styles.xml into date style flags
pub(crate) fn read_date_styles<R: Read>(reader: R) -> XlsxResult<DateStyles> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut custom: HashMap<u32, String> = HashMap::new();
    let mut xf_ids: Vec<u32> = Vec::new();
    let mut in_cell_xfs = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"cellXfs" => in_cell_xfs = true,
                b"xf" if in_cell_xfs => xf_ids.push(num_fmt_id(&e)),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"numFmt" => {
                    let mut code = None;
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"formatCode" {
                            code = attr.unescape_value().ok().map(|s| s.to_string());
                        }
                    }
                    if let Some(code) = code {
                        custom.insert(num_fmt_id(&e), code);
                    }
                }
                b"xf" if in_cell_xfs => xf_ids.push(num_fmt_id(&e)),
                _ => {}
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"cellXfs" => in_cell_xfs = false,
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let flags = xf_ids
        .into_iter()
        .map(|id| match custom.get(&id) {
            Some(code) => is_date_format_code(code),
            None => is_builtin_date(id),
        })
        .collect();

    Ok(DateStyles { flags })
}

fn num_fmt_id(e: &BytesStart<'_>) -> u32 {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"numFmtId")
        .and_then(|attr| attr.unescape_value().ok().and_then(|s| s.parse().ok()))
        .unwrap_or(0)
}

/// Built-in number format ids that are dates or times
fn is_builtin_date(id: u32) -> bool {
    matches!(id, 14..=22 | 27..=36 | 45..=47 | 50..=58)
}

/// Decide whether a custom format code renders a date or time
///
/// Quoted literals, escaped characters and bracketed sections (colors,
/// conditions, locales) are ignored; elapsed-time sections like `[h]` count.
pub(crate) fn is_date_format_code(code: &str) -> bool {
    // only the first (positive) section matters
    let section = code.split(';').next().unwrap_or("");
    let mut chars = section.chars();
    let mut found = false;

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                for q in chars.by_ref() {
                    if q == '"' {
                        break;
                    }
                }
            }
            '\\' | '_' | '*' => {
                chars.next();
            }
            '[' => {
                let inner: String = chars.by_ref().take_while(|&b| b != ']').collect();
                let lower = inner.to_ascii_lowercase();
                if !lower.is_empty() && lower.chars().all(|b| matches!(b, 'h' | 'm' | 's')) {
                    found = true;
                }
            }
            // numeric placeholders rule out a date
            '0' | '#' | '?' | '@' => return false,
            _ => {
                if matches!(c.to_ascii_lowercase(), 'y' | 'm' | 'd' | 'h' | 's') {
                    found = true;
                }
            }
        }
    }

    found
}
