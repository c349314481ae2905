//! Paragraph and cell text

use crate::xml::{XmlElement, XmlNode};

/// Subtrees whose text is not part of the visible paragraph
const SKIPPED: &[&str] = &[
    "w:pPr",
    "w:rPr",
    "w:del",
    "w:delText",
    "w:drawing",
    "w:pict",
    "w:object",
    "mc:AlternateContent",
    "w:fldChar",
    "w:instrText",
];

/// Visible text of a paragraph
///
/// `w:t` contributes its text, `w:tab` a tab, `w:br` and `w:cr` a newline.
/// Deleted text and drawings are ignored.
pub fn paragraph_text(p: &XmlElement) -> String {
    let mut out = String::new();
    collect_text(p, &mut out);
    out
}

fn collect_text(el: &XmlElement, out: &mut String) {
    for node in &el.children {
        let XmlNode::Element(child) = node else {
            continue;
        };
        match child.name.as_str() {
            "w:t" => {
                for text in &child.children {
                    if let XmlNode::Text(s) | XmlNode::CData(s) = text {
                        out.push_str(s);
                    }
                }
            }
            "w:tab" => out.push('\t'),
            "w:br" | "w:cr" => out.push('\n'),
            name if SKIPPED.contains(&name) => {}
            _ => collect_text(child, out),
        }
    }
}

/// Paragraphs that belong to a cell (or body), including those inside content controls
pub fn paragraphs(container: &XmlElement) -> Vec<&XmlElement> {
    let mut out = Vec::new();
    for child in container.elements() {
        match child.name.as_str() {
            "w:p" => out.push(child),
            "w:sdt" => {
                if let Some(content) = child.child("w:sdtContent") {
                    out.extend(paragraphs(content));
                }
            }
            _ => {}
        }
    }
    out
}

/// Text of a cell: its paragraphs joined by newlines
pub fn cell_text(tc: &XmlElement) -> String {
    paragraphs(tc)
        .into_iter()
        .map(paragraph_text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace a cell's content with a single paragraph holding `text`
///
/// The cell properties, the first paragraph's properties and the first run's
/// properties are kept, so the new text looks like the old one. `\n` becomes
/// a line break and `\t` a tab.
pub fn set_cell_text(tc: &mut XmlElement, text: &str) {
    let first_p = tc.children_named("w:p").next().cloned();
    let p_pr = first_p.as_ref().and_then(|p| p.child("w:pPr").cloned());
    let r_pr = first_p.as_ref().and_then(first_run_properties);

    let mut paragraph = first_p.unwrap_or_else(|| XmlElement::new("w:p"));
    paragraph.children.clear();
    if let Some(p_pr) = p_pr {
        paragraph.push(p_pr);
    }
    if let Some(run) = build_run(text, r_pr) {
        paragraph.push(run);
    }

    // everything but the cell properties is content and goes
    tc.children
        .retain(|node| matches!(node, XmlNode::Element(el) if el.is("w:tcPr")));
    tc.push(paragraph);
}

/// The `w:rPr` of the first run in a paragraph, searching inside hyperlinks and fields
fn first_run_properties(p: &XmlElement) -> Option<XmlElement> {
    p.descendants()
        .into_iter()
        .find(|el| el.is("w:r"))
        .and_then(|r| r.child("w:rPr").cloned())
}

fn build_run(text: &str, r_pr: Option<XmlElement>) -> Option<XmlElement> {
    if text.is_empty() && r_pr.is_none() {
        return None;
    }

    let mut run = XmlElement::new("w:r");
    if let Some(r_pr) = r_pr {
        run.push(r_pr);
    }

    let mut segment = String::new();
    for c in text.chars() {
        match c {
            '\n' | '\t' => {
                push_text(&mut run, &mut segment);
                run.push(XmlElement::new(if c == '\n' { "w:br" } else { "w:tab" }));
            }
            '\r' => {}
            _ => segment.push(c),
        }
    }
    push_text(&mut run, &mut segment);

    Some(run)
}

fn push_text(run: &mut XmlElement, segment: &mut String) {
    if segment.is_empty() {
        return;
    }
    let mut t = XmlElement::new("w:t");
    if segment.starts_with(char::is_whitespace) || segment.ends_with(char::is_whitespace) {
        t.set_attr("xml:space", "preserve");
    }
    t.children.push(XmlNode::Text(std::mem::take(segment)));
    run.push(t);
}
