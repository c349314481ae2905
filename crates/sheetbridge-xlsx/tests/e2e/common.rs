//! Common utilities for E2E tests.

use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;
use zip::write::SimpleFileOptions;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

/// A workbook fixture assembled part by part
#[derive(Default)]
pub struct XlsxFixture {
    sheets: Vec<(String, String)>,
    shared_strings: Vec<String>,
    shared_strings_xml: Option<String>,
    styles: Option<String>,
    date_1904: bool,
}

impl XlsxFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sheet whose `<sheetData>` content is `rows_xml`
    pub fn sheet(mut self, name: &str, rows_xml: &str) -> Self {
        self.sheets.push((name.to_string(), rows_xml.to_string()));
        self
    }

    /// Set the shared strings table
    pub fn shared_strings(mut self, strings: &[&str]) -> Self {
        self.shared_strings = strings.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set the full sharedStrings.xml body, for rich text cases
    pub fn shared_strings_xml(mut self, xml: &str) -> Self {
        self.shared_strings_xml = Some(xml.to_string());
        self
    }

    /// Set the full styles.xml body
    pub fn styles(mut self, styles_xml: &str) -> Self {
        self.styles = Some(styles_xml.to_string());
        self
    }

    /// Use the 1904 date system
    pub fn date_1904(mut self) -> Self {
        self.date_1904 = true;
        self
    }

    /// Build the package bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let cursor = std::io::Cursor::new(&mut buf);
            let mut zip = zip::ZipWriter::new(cursor);
            let options = SimpleFileOptions::default();

            let mut put = |name: &str, body: &str| {
                zip.start_file(name, options).expect("start file");
                zip.write_all(body.as_bytes()).expect("write part");
            };

            put("[Content_Types].xml", CONTENT_TYPES);
            put("_rels/.rels", ROOT_RELS);

            let mut sheets = String::new();
            let mut rels = String::new();
            for (i, (name, rows)) in self.sheets.iter().enumerate() {
                sheets.push_str(&format!(
                    r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                    escape(name),
                    i + 1,
                    i + 1
                ));
                rels.push_str(&format!(
                    r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                    i + 1,
                    i + 1
                ));
                put(
                    &format!("xl/worksheets/sheet{}.xml", i + 1),
                    &format!(
                        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
                        rows
                    ),
                );
            }

            let workbook_pr = if self.date_1904 {
                r#"<workbookPr date1904="1"/>"#
            } else {
                r#"<workbookPr/>"#
            };
            put(
                "xl/workbook.xml",
                &format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">{}<sheets>{}</sheets></workbook>"#,
                    workbook_pr, sheets
                ),
            );
            put(
                "xl/_rels/workbook.xml.rels",
                &format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
                    rels
                ),
            );

            if let Some(xml) = &self.shared_strings_xml {
                put("xl/sharedStrings.xml", xml);
            } else if !self.shared_strings.is_empty() {
                let items: String = self
                    .shared_strings
                    .iter()
                    .map(|s| format!(r#"<si><t xml:space="preserve">{}</t></si>"#, escape(s)))
                    .collect();
                put(
                    "xl/sharedStrings.xml",
                    &format!(
                        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">{1}</sst>"#,
                        self.shared_strings.len(),
                        items
                    ),
                );
            }

            if let Some(styles) = &self.styles {
                put("xl/styles.xml", styles);
            }

            zip.finish().expect("finish zip");
        }
        buf
    }

    /// Write the package into a fresh temp directory
    pub fn write(&self) -> (TempDir, PathBuf) {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("fixture.xlsx");
        std::fs::write(&path, self.to_bytes()).expect("write fixture");
        (dir, path)
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
