//! Border style types

use super::Color;

/// One side of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// All four sides, in the order documents expect them
    pub const ALL: [Side; 4] = [Side::Top, Side::Left, Side::Bottom, Side::Right];
}

/// Border settings for the four sides of a cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Borders {
    pub top: BorderEdge,
    pub bottom: BorderEdge,
    pub left: BorderEdge,
    pub right: BorderEdge,
}

impl Borders {
    /// Set all borders to the same style
    pub fn all(style: BorderLineStyle, color: Color) -> Self {
        let edge = BorderEdge::new(style, color);
        Self {
            top: edge,
            bottom: edge,
            left: edge,
            right: edge,
        }
    }

    /// Get one side
    pub fn side(&self, side: Side) -> &BorderEdge {
        match side {
            Side::Top => &self.top,
            Side::Bottom => &self.bottom,
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Get one side mutably
    pub fn side_mut(&mut self, side: Side) -> &mut BorderEdge {
        match side {
            Side::Top => &mut self.top,
            Side::Bottom => &mut self.bottom,
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Check if no side draws a line
    pub fn is_empty(&self) -> bool {
        Side::ALL
            .iter()
            .all(|s| self.side(*s).style == BorderLineStyle::None)
    }
}

/// A single border edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BorderEdge {
    /// Line style
    pub style: BorderLineStyle,
    /// Line color
    pub color: Color,
}

impl BorderEdge {
    /// Create a new border edge
    pub fn new(style: BorderLineStyle, color: Color) -> Self {
        Self { style, color }
    }

    /// Create a thin black border
    pub fn thin() -> Self {
        Self::new(BorderLineStyle::Solid, Color::BLACK)
    }
}

/// Border line styles, named after the remote API's vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderLineStyle {
    /// No border
    #[default]
    None,
    Dotted,
    Dashed,
    /// Thin solid line
    Solid,
    SolidMedium,
    SolidThick,
    Double,
}

impl BorderLineStyle {
    /// Map a source keyword (`SOLID_MEDIUM`, `dashed`, ...); unknown keywords mean no border
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.trim().to_ascii_uppercase().as_str() {
            "DOTTED" => BorderLineStyle::Dotted,
            "DASHED" => BorderLineStyle::Dashed,
            "SOLID" => BorderLineStyle::Solid,
            "SOLID_MEDIUM" => BorderLineStyle::SolidMedium,
            "SOLID_THICK" => BorderLineStyle::SolidThick,
            "DOUBLE" => BorderLineStyle::Double,
            _ => BorderLineStyle::None,
        }
    }

    /// The source keyword for this style
    pub fn keyword(&self) -> &'static str {
        match self {
            BorderLineStyle::None => "NONE",
            BorderLineStyle::Dotted => "DOTTED",
            BorderLineStyle::Dashed => "DASHED",
            BorderLineStyle::Solid => "SOLID",
            BorderLineStyle::SolidMedium => "SOLID_MEDIUM",
            BorderLineStyle::SolidThick => "SOLID_THICK",
            BorderLineStyle::Double => "DOUBLE",
        }
    }
}
