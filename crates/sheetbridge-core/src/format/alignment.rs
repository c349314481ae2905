//! Text alignment types

/// Text alignment settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Alignment {
    /// Horizontal alignment
    pub horizontal: HorizontalAlignment,
    /// Vertical alignment
    pub vertical: VerticalAlignment,
}

impl Alignment {
    /// Set horizontal alignment
    pub fn with_horizontal(mut self, align: HorizontalAlignment) -> Self {
        self.horizontal = align;
        self
    }

    /// Set vertical alignment
    pub fn with_vertical(mut self, align: VerticalAlignment) -> Self {
        self.vertical = align;
        self
    }
}

/// Horizontal alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl HorizontalAlignment {
    /// Map a source keyword; anything unrecognized falls back to [`HorizontalAlignment::Left`]
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.trim().to_ascii_uppercase().as_str() {
            "CENTER" => HorizontalAlignment::Center,
            "RIGHT" => HorizontalAlignment::Right,
            "JUSTIFY" => HorizontalAlignment::Justify,
            _ => HorizontalAlignment::Left,
        }
    }
}

/// Vertical alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl VerticalAlignment {
    /// Map a source keyword; anything unrecognized falls back to [`VerticalAlignment::Top`]
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.trim().to_ascii_uppercase().as_str() {
            "MIDDLE" | "CENTER" => VerticalAlignment::Middle,
            "BOTTOM" => VerticalAlignment::Bottom,
            _ => VerticalAlignment::Top,
        }
    }
}
