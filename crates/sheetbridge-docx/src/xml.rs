//! A small mutable XML tree
//!
//! The document part is parsed into owned elements so tables can be resized
//! and restyled in place. Everything the tree does not interpret (comments,
//! processing instructions, whitespace, unknown elements) is kept and written
//! back unchanged.

use std::fmt::Write as FmtWrite;

use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{DocxError, DocxResult};

/// A node in the tree
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// Element
    Element(XmlElement),
    /// Unescaped character data
    Text(String),
    /// CDATA section content
    CData(String),
    /// Comment content (raw)
    Comment(String),
    /// Processing instruction content (raw)
    ProcessingInstruction(String),
}

impl XmlNode {
    /// The element, if this node is one
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(el) => Some(el),
            _ => None,
        }
    }

    /// The mutable element, if this node is one
    pub fn as_element_mut(&mut self) -> Option<&mut XmlElement> {
        match self {
            XmlNode::Element(el) => Some(el),
            _ => None,
        }
    }
}

/// An element with its qualified name, attributes in document order and children
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    /// Qualified name (e.g. `w:tbl`)
    pub name: String,
    /// Attributes as (qualified name, unescaped value)
    pub attributes: Vec<(String, String)>,
    /// Child nodes
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Create an element with no attributes or children
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder: add an attribute
    pub fn with_attr<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder: add a child element
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Builder: add a text child
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// Check the qualified name
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    /// Get an attribute value
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attr<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Remove an attribute
    pub fn remove_attr(&mut self, key: &str) {
        self.attributes.retain(|(k, _)| k != key);
    }

    /// Child elements in order
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// Mutable child elements in order
    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(XmlNode::as_element_mut)
    }

    /// First child element with the given name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|el| el.is(name))
    }

    /// First mutable child element with the given name
    pub fn child_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        self.elements_mut().find(|el| el.is(name))
    }

    /// Child elements with the given name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.elements().filter(move |el| el.is(name))
    }

    /// Mutable child elements with the given name
    pub fn children_named_mut<'a>(
        &'a mut self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a mut XmlElement> {
        self.elements_mut().filter(move |el| el.is(name))
    }

    /// Follow a path of child names (e.g. `["w:tcPr", "w:gridSpan"]`)
    pub fn path(&self, names: &[&str]) -> Option<&XmlElement> {
        names.iter().try_fold(self, |el, name| el.child(name))
    }

    /// Append a child element
    pub fn push(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    /// Remove every child element with the given name
    pub fn remove_children(&mut self, name: &str) {
        self.children
            .retain(|node| !matches!(node, XmlNode::Element(el) if el.is(name)));
    }

    /// Every descendant element in document order, depth first
    pub fn descendants(&self) -> Vec<&XmlElement> {
        let mut out = Vec::new();
        collect_descendants(self, &mut out);
        out
    }

    /// Insert a child at the position a schema sequence dictates
    ///
    /// `order` lists the allowed child names in schema order. The child goes
    /// before the first existing element that ranks after it. Names missing
    /// from `order` rank last.
    pub fn insert_ordered(&mut self, child: XmlElement, order: &[&str]) -> usize {
        let rank = |name: &str| order.iter().position(|n| *n == name).unwrap_or(usize::MAX);
        let new_rank = rank(&child.name);
        let index = self
            .children
            .iter()
            .position(|node| matches!(node, XmlNode::Element(el) if rank(&el.name) > new_rank))
            .unwrap_or(self.children.len());
        self.children.insert(index, XmlNode::Element(child));
        index
    }

    /// Replace the first child with the same name, or insert it in schema order
    pub fn set_child_ordered(&mut self, child: XmlElement, order: &[&str]) {
        match self.child_mut(&child.name) {
            Some(existing) => *existing = child,
            None => {
                self.insert_ordered(child, order);
            }
        }
    }

    /// Get the first child with the given name, inserting an empty one in schema order
    pub fn child_ordered_mut(&mut self, name: &str, order: &[&str]) -> &mut XmlElement {
        let index = match self.child_index(name) {
            Some(index) => index,
            None => self.insert_ordered(XmlElement::new(name), order),
        };
        match &mut self.children[index] {
            XmlNode::Element(el) => el,
            // child_index and insert_ordered only return element positions
            _ => unreachable!("child index points at an element"),
        }
    }

    /// Index into `children` of the first element with the given name
    pub fn child_index(&self, name: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|node| matches!(node, XmlNode::Element(el) if el.is(name)))
    }

    /// Serialize this element and its subtree
    pub fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", key, escape(value.as_str()));
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                XmlNode::Element(el) => el.write_to(out),
                XmlNode::Text(text) => out.push_str(&partial_escape(text.as_str())),
                XmlNode::CData(text) => {
                    out.push_str("<![CDATA[");
                    out.push_str(text);
                    out.push_str("]]>");
                }
                XmlNode::Comment(text) => {
                    out.push_str("<!--");
                    out.push_str(text);
                    out.push_str("-->");
                }
                XmlNode::ProcessingInstruction(text) => {
                    out.push_str("<?");
                    out.push_str(text);
                    out.push_str("?>");
                }
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

fn collect_descendants<'a>(el: &'a XmlElement, out: &mut Vec<&'a XmlElement>) {
    for child in el.elements() {
        out.push(child);
        collect_descendants(child, out);
    }
}

/// A parsed XML part: its declaration and root element
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    /// Declaration content between `<?` and `?>`, if present
    pub declaration: Option<String>,
    /// Root element
    pub root: XmlElement,
}

impl XmlDocument {
    /// Parse a part
    pub fn parse(bytes: &[u8]) -> DocxResult<Self> {
        let mut reader = Reader::from_reader(bytes);
        reader.trim_text(false);

        let mut buf = Vec::new();
        let mut declaration = None;
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Decl(decl) => {
                    declaration = Some(String::from_utf8_lossy(&decl).into_owned());
                }
                Event::Start(e) => stack.push(element_from(&e)?),
                Event::Empty(e) => {
                    let el = element_from(&e)?;
                    attach(&mut stack, &mut root, XmlNode::Element(el))?;
                }
                Event::End(_) => {
                    let el = stack.pop().ok_or_else(|| {
                        DocxError::InvalidFormat("unbalanced closing tag".into())
                    })?;
                    attach(&mut stack, &mut root, XmlNode::Element(el))?;
                }
                Event::Text(e) => {
                    if !stack.is_empty() {
                        let text = e.unescape()?.into_owned();
                        attach(&mut stack, &mut root, XmlNode::Text(text))?;
                    }
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    attach(&mut stack, &mut root, XmlNode::CData(text))?;
                }
                Event::Comment(e) => {
                    if !stack.is_empty() {
                        let text = String::from_utf8_lossy(&e).into_owned();
                        attach(&mut stack, &mut root, XmlNode::Comment(text))?;
                    }
                }
                Event::PI(e) => {
                    if !stack.is_empty() {
                        let text = String::from_utf8_lossy(&e).into_owned();
                        attach(&mut stack, &mut root, XmlNode::ProcessingInstruction(text))?;
                    }
                }
                Event::DocType(_) => {}
                Event::Eof => break,
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(DocxError::InvalidFormat("unclosed element".into()));
        }
        let root = root.ok_or_else(|| DocxError::InvalidFormat("no root element".into()))?;

        Ok(Self { declaration, root })
    }

    /// Serialize the part
    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        if let Some(decl) = &self.declaration {
            out.push_str("<?");
            out.push_str(decl);
            out.push_str("?>");
            // Word writes the declaration on its own line
            out.push_str("\r\n");
        }
        self.root.write_to(&mut out);
        out
    }
}

fn element_from(e: &BytesStart<'_>) -> DocxResult<XmlElement> {
    let mut el = XmlElement::new(String::from_utf8_lossy(e.name().as_ref()).into_owned());
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        el.attributes.push((key, value));
    }
    Ok(el)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    node: XmlNode,
) -> DocxResult<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(node);
            Ok(())
        }
        None => match node {
            XmlNode::Element(el) if root.is_none() => {
                *root = Some(el);
                Ok(())
            }
            XmlNode::Element(_) => Err(DocxError::InvalidFormat(
                "more than one root element".into(),
            )),
            _ => Ok(()),
        },
    }
}
