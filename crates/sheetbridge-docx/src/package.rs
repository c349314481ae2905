//! DOCX package reading and writing

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, Write};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

use crate::error::{DocxError, DocxResult};
use crate::table::{Table, DEFAULT_TEXT_WIDTH};
use crate::xml::{XmlDocument, XmlElement, XmlNode};

const DEFAULT_MAIN_PART: &str = "word/document.xml";

const OFFICE_DOCUMENT_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";

/// A package entry other than the main document part, kept byte for byte
#[derive(Debug, Clone)]
struct PackagePart {
    name: String,
    data: Vec<u8>,
    stored: bool,
}

/// An opened document: the parsed main part plus every other part verbatim
#[derive(Debug, Clone)]
pub struct Document {
    parts: Vec<PackagePart>,
    main_path: String,
    main_stored: bool,
    main: XmlDocument,
}

impl Document {
    /// Open a document from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> DocxResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Read a document from a reader
    pub fn from_reader<R: Read + Seek>(reader: R) -> DocxResult<Self> {
        let mut archive = zip::ZipArchive::new(reader)?;

        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(DocxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let main_path = Self::main_part_path(&mut archive)?;

        let mut parts = Vec::with_capacity(archive.len());
        let mut main = None;
        let mut main_stored = false;

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let stored = file.compression() == CompressionMethod::Stored;
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;

            if name == main_path {
                main = Some(XmlDocument::parse(&data)?);
                main_stored = stored;
            } else {
                parts.push(PackagePart { name, data, stored });
            }
        }

        let main = main.ok_or_else(|| DocxError::MissingPart(main_path.clone()))?;
        if !main.root.is("w:document") {
            return Err(DocxError::InvalidFormat(format!(
                "main part root is <{}>, expected <w:document>",
                main.root.name
            )));
        }

        Ok(Self {
            parts,
            main_path,
            main_stored,
            main,
        })
    }

    /// Find the main document part through the package relationships
    fn main_part_path<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> DocxResult<String> {
        let file = match archive.by_name("_rels/.rels") {
            Ok(f) => f,
            Err(_) => return Ok(DEFAULT_MAIN_PART.to_string()),
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);
        let mut buf = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut target = None;
                    let mut rel_type = None;
                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Target" => {
                                target = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"Type" => {
                                rel_type = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            _ => {}
                        }
                    }
                    if let (Some(target), Some(OFFICE_DOCUMENT_REL)) = (target, rel_type.as_deref())
                    {
                        return Ok(target.trim_start_matches('/').to_string());
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(DocxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(DEFAULT_MAIN_PART.to_string())
    }

    /// The `w:document` root element
    pub fn root(&self) -> &XmlElement {
        &self.main.root
    }

    /// The `w:body` element
    pub fn body(&self) -> DocxResult<&XmlElement> {
        self.main
            .root
            .child("w:body")
            .ok_or_else(|| DocxError::MissingPart("w:body".into()))
    }

    /// The mutable `w:body` element
    pub fn body_mut(&mut self) -> DocxResult<&mut XmlElement> {
        self.main
            .root
            .child_mut("w:body")
            .ok_or_else(|| DocxError::MissingPart("w:body".into()))
    }

    /// Insert an element into the body at a child index
    pub fn insert_body_element(&mut self, index: usize, element: XmlElement) -> DocxResult<usize> {
        let body = self.body_mut()?;
        let index = index.min(body.children.len());
        body.children.insert(index, XmlNode::Element(element));
        Ok(index)
    }

    /// Append an element to the body, ahead of the final section properties
    pub fn append_body_element(&mut self, element: XmlElement) -> DocxResult<usize> {
        let body = self.body_mut()?;
        let index = body
            .children
            .iter()
            .rposition(|node| node.as_element().map_or(false, |el| el.is("w:sectPr")))
            .unwrap_or(body.children.len());
        body.children.insert(index, XmlNode::Element(element));
        Ok(index)
    }

    /// The table at a body child index
    pub fn table_at(&mut self, index: usize) -> DocxResult<Table<'_>> {
        self.body_mut()?
            .children
            .get_mut(index)
            .and_then(XmlNode::as_element_mut)
            .filter(|el| el.is("w:tbl"))
            .map(Table::new)
            .ok_or_else(|| DocxError::InvalidFormat(format!("body child {} is not a table", index)))
    }

    /// Width of the text area of the final section in twips
    ///
    /// Page width minus the left and right margins, or
    /// [`DEFAULT_TEXT_WIDTH`] when the section does not say.
    pub fn text_width(&self) -> u32 {
        let Ok(body) = self.body() else {
            return DEFAULT_TEXT_WIDTH;
        };
        let twips = |el: Option<&XmlElement>, key: &str| -> Option<i64> {
            el.and_then(|el| el.attr(key)).and_then(|v| v.parse().ok())
        };

        let sect_pr = body.child("w:sectPr");
        let page = sect_pr.and_then(|s| s.child("w:pgSz"));
        let margins = sect_pr.and_then(|s| s.child("w:pgMar"));

        match twips(page, "w:w") {
            Some(width) => {
                let left = twips(margins, "w:left").unwrap_or(0);
                let right = twips(margins, "w:right").unwrap_or(0);
                u32::try_from(width - left - right)
                    .ok()
                    .filter(|w| *w > 0)
                    .unwrap_or(DEFAULT_TEXT_WIDTH)
            }
            None => DEFAULT_TEXT_WIDTH,
        }
    }

    /// Path of the main part inside the package
    pub fn main_part_name(&self) -> &str {
        &self.main_path
    }

    /// Write the package to any seekable writer
    pub fn write<W: Write + Seek>(&self, writer: W) -> DocxResult<()> {
        let mut zip = zip::ZipWriter::new(writer);
        let options = |stored: bool| {
            SimpleFileOptions::default().compression_method(if stored {
                CompressionMethod::Stored
            } else {
                CompressionMethod::Deflated
            })
        };

        // [Content_Types].xml stays first, the way Office writes it
        let (first, rest): (Vec<&PackagePart>, Vec<&PackagePart>) = self
            .parts
            .iter()
            .partition(|part| part.name == "[Content_Types].xml");

        for part in first {
            zip.start_file(part.name.as_str(), options(part.stored))?;
            zip.write_all(&part.data)?;
        }

        zip.start_file(self.main_path.as_str(), options(self.main_stored))?;
        zip.write_all(self.main.to_xml_string().as_bytes())?;

        for part in rest {
            zip.start_file(part.name.as_str(), options(part.stored))?;
            zip.write_all(&part.data)?;
        }

        zip.finish()?;
        Ok(())
    }

    /// Serialize the package into memory
    pub fn to_bytes(&self) -> DocxResult<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.write(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Save to a path as one atomic step
    ///
    /// The package is written to a temporary file in the destination's
    /// directory, then renamed over the destination.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> DocxResult<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        self.write(temp.as_file_mut())?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| DocxError::Persist {
            path: path.display().to_string(),
            source: e.error,
        })?;

        log::info!("saved {}", path.display());
        Ok(())
    }
}
