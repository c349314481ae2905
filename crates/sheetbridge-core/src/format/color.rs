//! Color representation

use std::fmt;

/// An opaque RGB color
///
/// Both sources and documents speak hex RGB, so no alpha, theme or palette
/// variants are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create an RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Create from a hex string (e.g., "#FF0000" or "ff0000")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');

        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Color { r, g, b })
            }
            // ARGB as written by spreadsheets; alpha is dropped
            8 => Self::from_hex(&hex[2..]),
            _ => None,
        }
    }

    /// Create from unit-interval channels (0.0..=1.0), as used by the remote API
    ///
    /// Channels are truncated, not rounded.
    pub fn from_unit(red: f32, green: f32, blue: f32) -> Self {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u8;
        Color {
            r: channel(red),
            g: channel(green),
            b: channel(blue),
        }
    }

    /// Convert to hex string (without # prefix), as used by WordprocessingML attributes
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
