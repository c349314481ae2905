//! Cell formatting: spreadsheet formats onto document cell properties

use sheetbridge_core::{
    BorderEdge, BorderLineStyle, CellFormat, Color, HorizontalAlignment, Side,
    VerticalAlignment,
};

use crate::table::Cell;
use crate::xml::XmlElement;

/// Child order of `w:tcPr`
const TC_PR_ORDER: &[&str] = &[
    "w:cnfStyle",
    "w:tcW",
    "w:gridSpan",
    "w:hMerge",
    "w:vMerge",
    "w:tcBorders",
    "w:shd",
    "w:noWrap",
    "w:tcMar",
    "w:textDirection",
    "w:tcFitText",
    "w:vAlign",
    "w:hideMark",
    "w:headers",
    "w:cellIns",
    "w:cellDel",
    "w:cellMerge",
    "w:tcPrChange",
];

/// Child order of `w:tcBorders`
const TC_BORDERS_ORDER: &[&str] = &[
    "w:top", "w:left", "w:start", "w:bottom", "w:right", "w:end", "w:insideH", "w:insideV",
    "w:tl2br", "w:tr2bl",
];

/// Child order of `w:pPr`
const P_PR_ORDER: &[&str] = &[
    "w:pStyle",
    "w:keepNext",
    "w:keepLines",
    "w:pageBreakBefore",
    "w:framePr",
    "w:widowControl",
    "w:numPr",
    "w:suppressLineNumbers",
    "w:pBdr",
    "w:shd",
    "w:tabs",
    "w:suppressAutoHyphens",
    "w:kinsoku",
    "w:wordWrap",
    "w:overflowPunct",
    "w:topLinePunct",
    "w:autoSpaceDE",
    "w:autoSpaceDN",
    "w:bidi",
    "w:adjustRightInd",
    "w:snapToGrid",
    "w:spacing",
    "w:ind",
    "w:contextualSpacing",
    "w:mirrorIndents",
    "w:suppressOverlap",
    "w:jc",
    "w:textDirection",
    "w:textAlignment",
    "w:textboxTightWrap",
    "w:outlineLvl",
    "w:divId",
    "w:cnfStyle",
    "w:rPr",
    "w:sectPr",
    "w:pPrChange",
];

/// Child order of `w:rPr`
const R_PR_ORDER: &[&str] = &[
    "w:rStyle",
    "w:rFonts",
    "w:b",
    "w:bCs",
    "w:i",
    "w:iCs",
    "w:caps",
    "w:smallCaps",
    "w:strike",
    "w:dstrike",
    "w:outline",
    "w:shadow",
    "w:emboss",
    "w:imprint",
    "w:noProof",
    "w:snapToGrid",
    "w:vanish",
    "w:webHidden",
    "w:color",
    "w:spacing",
    "w:w",
    "w:kern",
    "w:position",
    "w:sz",
    "w:szCs",
    "w:highlight",
    "w:u",
    "w:effect",
    "w:bdr",
    "w:shd",
    "w:fitText",
    "w:vertAlign",
    "w:rtl",
    "w:cs",
    "w:em",
    "w:lang",
    "w:eastAsianLayout",
    "w:specVanish",
    "w:oMath",
];

/// Child order of the elements that carry properties first
const TC_ORDER: &[&str] = &["w:tcPr"];
const P_ORDER: &[&str] = &["w:pPr"];
const R_ORDER: &[&str] = &["w:rPr"];

/// Apply a spreadsheet cell's full format to a document cell
///
/// Sets shading, the four borders, font on every run and on the paragraph
/// marks, horizontal and vertical alignment, wrapping and, for rotations
/// other than 0, 180 and 270 degrees, a bottom-to-top text direction.
/// Existing properties of the same kind are replaced.
pub fn apply_format(cell: &mut Cell<'_>, format: &CellFormat) {
    let tc = cell.element_mut();
    apply_cell_properties(tc, format);

    let jc = justification(format.alignment.horizontal);
    for_each_paragraph_mut(tc, &mut |p| {
        let p_pr = p.child_ordered_mut("w:pPr", P_ORDER);
        p_pr.set_child_ordered(XmlElement::new("w:jc").with_attr("w:val", jc), P_PR_ORDER);
        apply_run_format(p_pr.child_ordered_mut("w:rPr", P_PR_ORDER), format);

        for run in runs_mut(p) {
            apply_run_format(run.child_ordered_mut("w:rPr", R_ORDER), format);
        }
    });
}

/// Set one font family and size on every run of a cell and on its paragraph marks
///
/// Bold, color and everything else about the runs is left alone.
pub fn apply_font(cell: &mut Cell<'_>, family: &str, size: f64) {
    for_each_paragraph_mut(cell.element_mut(), &mut |p| {
        let p_pr = p.child_ordered_mut("w:pPr", P_ORDER);
        set_font(p_pr.child_ordered_mut("w:rPr", P_PR_ORDER), family, size);

        for run in runs_mut(p) {
            set_font(run.child_ordered_mut("w:rPr", R_ORDER), family, size);
        }
    });
}

fn apply_cell_properties(tc: &mut XmlElement, format: &CellFormat) {
    let tc_pr = tc.child_ordered_mut("w:tcPr", TC_ORDER);

    let mut borders = XmlElement::new("w:tcBorders");
    for side in Side::ALL {
        let edge = border_element(side, format.borders.side(side));
        borders.insert_ordered(edge, TC_BORDERS_ORDER);
    }
    tc_pr.set_child_ordered(borders, TC_PR_ORDER);

    tc_pr.set_child_ordered(shading(format.background), TC_PR_ORDER);

    let no_wrap = if format.text_format.wrap { "0" } else { "1" };
    tc_pr.set_child_ordered(
        XmlElement::new("w:noWrap").with_attr("w:val", no_wrap),
        TC_PR_ORDER,
    );

    if format.text_format.needs_vertical_direction() {
        tc_pr.set_child_ordered(
            XmlElement::new("w:textDirection").with_attr("w:val", "btLr"),
            TC_PR_ORDER,
        );
    }

    let v_align = vertical_alignment(format.alignment.vertical);
    tc_pr.set_child_ordered(
        XmlElement::new("w:vAlign").with_attr("w:val", v_align),
        TC_PR_ORDER,
    );
}

/// Visit the cell's paragraphs, including those inside content controls
fn for_each_paragraph_mut(el: &mut XmlElement, f: &mut impl FnMut(&mut XmlElement)) {
    for child in el.elements_mut() {
        match child.name.as_str() {
            "w:p" => f(child),
            "w:sdt" | "w:sdtContent" => for_each_paragraph_mut(child, f),
            _ => {}
        }
    }
}

/// Every run in a paragraph, including runs nested in hyperlinks, fields and smart tags
fn runs_mut(p: &mut XmlElement) -> Vec<&mut XmlElement> {
    fn walk<'e>(el: &'e mut XmlElement, out: &mut Vec<&'e mut XmlElement>) {
        for child in el.elements_mut() {
            match child.name.as_str() {
                "w:r" => out.push(child),
                "w:pPr" | "w:del" => {}
                _ => walk(child, out),
            }
        }
    }

    let mut out = Vec::new();
    walk(p, &mut out);
    out
}

fn apply_run_format(r_pr: &mut XmlElement, format: &CellFormat) {
    let font = &format.font;
    set_font(r_pr, &font.family, font.size);

    let bold = if font.bold {
        XmlElement::new("w:b")
    } else {
        XmlElement::new("w:b").with_attr("w:val", "0")
    };
    r_pr.set_child_ordered(bold, R_PR_ORDER);

    r_pr.set_child_ordered(
        XmlElement::new("w:color").with_attr("w:val", font.color.to_hex()),
        R_PR_ORDER,
    );
}

fn set_font(r_pr: &mut XmlElement, family: &str, size: f64) {
    let fonts = r_pr.child_ordered_mut("w:rFonts", R_PR_ORDER);
    // theme fonts take precedence over explicit ones
    fonts.remove_attr("w:asciiTheme");
    fonts.remove_attr("w:hAnsiTheme");
    fonts.set_attr("w:ascii", family);
    fonts.set_attr("w:hAnsi", family);

    r_pr.set_child_ordered(
        XmlElement::new("w:sz").with_attr("w:val", half_points(size).to_string()),
        R_PR_ORDER,
    );
}

/// Font size in half-points, as `w:sz` expects
pub fn half_points(size: f64) -> u32 {
    if size.is_finite() && size > 0.0 {
        (size * 2.0).round() as u32
    } else {
        0
    }
}

/// `w:shd` with a solid fill
pub fn shading(color: Color) -> XmlElement {
    XmlElement::new("w:shd")
        .with_attr("w:val", "clear")
        .with_attr("w:color", "auto")
        .with_attr("w:fill", color.to_hex())
}

fn border_element(side: Side, edge: &BorderEdge) -> XmlElement {
    let name = match side {
        Side::Top => "w:top",
        Side::Left => "w:left",
        Side::Bottom => "w:bottom",
        Side::Right => "w:right",
    };
    let (val, size) = border_line(edge.style);
    let el = XmlElement::new(name).with_attr("w:val", val);
    if edge.style == BorderLineStyle::None {
        return el;
    }
    el.with_attr("w:sz", size.to_string())
        .with_attr("w:space", "0")
        .with_attr("w:color", edge.color.to_hex())
}

/// Document border kind and width in eighths of a point
pub fn border_line(style: BorderLineStyle) -> (&'static str, u32) {
    match style {
        BorderLineStyle::None => ("nil", 0),
        BorderLineStyle::Dotted => ("dotted", 4),
        BorderLineStyle::Dashed => ("dashed", 4),
        BorderLineStyle::Solid => ("single", 4),
        BorderLineStyle::SolidMedium => ("single", 12),
        BorderLineStyle::SolidThick => ("single", 18),
        BorderLineStyle::Double => ("double", 4),
    }
}

/// `w:jc` value for a horizontal alignment
pub fn justification(align: HorizontalAlignment) -> &'static str {
    match align {
        HorizontalAlignment::Left => "left",
        HorizontalAlignment::Center => "center",
        HorizontalAlignment::Right => "right",
        HorizontalAlignment::Justify => "both",
    }
}

/// `w:vAlign` value for a vertical alignment
pub fn vertical_alignment(align: VerticalAlignment) -> &'static str {
    match align {
        VerticalAlignment::Top => "top",
        VerticalAlignment::Middle => "center",
        VerticalAlignment::Bottom => "bottom",
    }
}
