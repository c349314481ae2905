//! Cell format types
//!
//! A [`CellFormat`] is one source cell's resolved appearance plus its display
//! text:
//! - [`FontFormat`] - Font settings
//! - [`Borders`] - The four cell borders
//! - [`Alignment`] - Horizontal and vertical alignment
//! - [`TextFormat`] - Wrapping and rotation
//! - [`Color`] - RGB colors

mod alignment;
mod border;
mod color;

pub use alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
pub use border::{BorderEdge, BorderLineStyle, Borders, Side};
pub use color::Color;

/// One spreadsheet cell's resolved appearance and value
///
/// Every field has a default, so a sparse or failed source never yields a
/// half-populated format.
#[derive(Debug, Clone, PartialEq)]
pub struct CellFormat {
    /// Display text, already rendered by the source (currency, dates, ...)
    pub value: String,
    /// Font settings
    pub font: FontFormat,
    /// Cell background
    pub background: Color,
    /// Cell borders
    pub borders: Borders,
    /// Text alignment
    pub alignment: Alignment,
    /// Wrapping and rotation
    pub text_format: TextFormat,
}

impl Default for CellFormat {
    fn default() -> Self {
        Self {
            value: String::new(),
            font: FontFormat::default(),
            background: Color::WHITE,
            borders: Borders::default(),
            alignment: Alignment::default(),
            text_format: TextFormat::default(),
        }
    }
}

impl CellFormat {
    /// A fresh default format; each call returns an independent value
    pub fn new() -> Self {
        Self::default()
    }

    /// A default format carrying the given display text
    pub fn with_value<S: Into<String>>(value: S) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Set font to bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.font.bold = bold;
        self
    }

    /// Set font size in points
    pub fn font_size(mut self, size: f64) -> Self {
        self.font.size = size;
        self
    }

    /// Set font color
    pub fn font_color(mut self, color: Color) -> Self {
        self.font.color = color;
        self
    }

    /// Set background color
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Set cell borders
    pub fn borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    /// Set horizontal alignment
    pub fn horizontal_alignment(mut self, align: HorizontalAlignment) -> Self {
        self.alignment.horizontal = align;
        self
    }

    /// Set vertical alignment
    pub fn vertical_alignment(mut self, align: VerticalAlignment) -> Self {
        self.alignment.vertical = align;
        self
    }

    /// Enable text wrapping
    pub fn wrap_text(mut self, wrap: bool) -> Self {
        self.text_format.wrap = wrap;
        self
    }

    /// Set text rotation
    pub fn rotation(mut self, degrees: i32) -> Self {
        self.text_format.rotation_degrees = degrees;
        self
    }
}

/// Font settings
#[derive(Debug, Clone, PartialEq)]
pub struct FontFormat {
    /// Bold
    pub bold: bool,
    /// Font size in points
    pub size: f64,
    /// Font color
    pub color: Color,
    /// Font family name (e.g., "Calibri", "Arial")
    pub family: String,
}

impl Default for FontFormat {
    fn default() -> Self {
        Self {
            bold: false,
            size: 11.0,
            color: Color::BLACK,
            family: "Calibri".to_string(),
        }
    }
}

/// Wrapping and rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextFormat {
    /// Wrap text inside the cell
    pub wrap: bool,
    /// Rotation in degrees; 0 is horizontal
    pub rotation_degrees: i32,
}

impl TextFormat {
    /// Whether the rotation needs a vertical text direction in a document cell
    ///
    /// 0, 180 and 270 degrees are rendered horizontally.
    pub fn needs_vertical_direction(&self) -> bool {
        !matches!(self.rotation_degrees, 0 | 180 | 270)
    }
}
