//! Response payloads of `spreadsheets.get` with grid data
//!
//! Only the fields named in [`GRID_FIELDS`](crate::GRID_FIELDS) are modelled.
//! The service omits default values (zero color channels, `false` flags), so
//! every field is optional.

use serde::Deserialize;
use sheetbridge_core::{
    Alignment, BorderEdge, BorderLineStyle, Borders, CellFormat, Color, FontFormat,
    HorizontalAlignment, Side, TextFormat, VerticalAlignment,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Spreadsheet {
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sheet {
    pub data: Vec<GridData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridData {
    pub row_data: Vec<RowData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RowData {
    pub values: Vec<CellData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CellData {
    pub formatted_value: Option<String>,
    pub effective_format: Option<EffectiveFormat>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EffectiveFormat {
    pub background_color: Option<WireColor>,
    pub borders: Option<WireBorders>,
    pub horizontal_alignment: Option<String>,
    pub vertical_alignment: Option<String>,
    pub wrap_strategy: Option<String>,
    pub text_format: Option<WireTextFormat>,
    pub text_rotation: Option<TextRotation>,
}

/// An RGB color with unit-interval channels; absent channels are zero
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct WireColor {
    pub red: Option<f32>,
    pub green: Option<f32>,
    pub blue: Option<f32>,
}

impl WireColor {
    pub fn to_color(self) -> Color {
        Color::from_unit(
            self.red.unwrap_or(0.0),
            self.green.unwrap_or(0.0),
            self.blue.unwrap_or(0.0),
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WireBorders {
    pub top: Option<WireBorder>,
    pub bottom: Option<WireBorder>,
    pub left: Option<WireBorder>,
    pub right: Option<WireBorder>,
}

impl WireBorders {
    fn side(&self, side: Side) -> Option<&WireBorder> {
        match side {
            Side::Top => self.top.as_ref(),
            Side::Bottom => self.bottom.as_ref(),
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WireBorder {
    pub style: Option<String>,
    pub color: Option<WireColor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WireTextFormat {
    pub foreground_color: Option<WireColor>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub bold: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct TextRotation {
    pub angle: Option<i32>,
    pub vertical: Option<bool>,
}

impl CellData {
    /// The cell's value and resolved appearance
    ///
    /// Anything the response leaves out takes the [`CellFormat`] default.
    pub fn to_cell_format(&self) -> CellFormat {
        let mut format = CellFormat::with_value(self.formatted_value.clone().unwrap_or_default());
        if let Some(effective) = &self.effective_format {
            effective.apply_to(&mut format);
        }
        format
    }
}

impl EffectiveFormat {
    fn apply_to(&self, format: &mut CellFormat) {
        if let Some(text) = &self.text_format {
            let defaults = FontFormat::default();
            format.font = FontFormat {
                bold: text.bold.unwrap_or(defaults.bold),
                size: text.font_size.unwrap_or(defaults.size),
                color: text
                    .foreground_color
                    .map_or(defaults.color, WireColor::to_color),
                family: text.font_family.clone().unwrap_or(defaults.family),
            };
        }

        if let Some(color) = self.background_color {
            format.background = color.to_color();
        }

        if let Some(borders) = &self.borders {
            format.borders = Borders::default();
            for side in Side::ALL {
                if let Some(border) = borders.side(side) {
                    *format.borders.side_mut(side) = BorderEdge::new(
                        border
                            .style
                            .as_deref()
                            .map_or(BorderLineStyle::None, BorderLineStyle::from_keyword),
                        border.color.map_or(Color::BLACK, WireColor::to_color),
                    );
                }
            }
        }

        format.alignment = Alignment {
            horizontal: self
                .horizontal_alignment
                .as_deref()
                .map_or(HorizontalAlignment::Left, HorizontalAlignment::from_keyword),
            vertical: self
                .vertical_alignment
                .as_deref()
                .map_or(VerticalAlignment::Top, VerticalAlignment::from_keyword),
        };

        format.text_format = TextFormat {
            wrap: self.wrap_strategy.as_deref() == Some("WRAP"),
            rotation_degrees: match self.text_rotation {
                // stacked text has no angle; a vertical direction is the closest match
                Some(TextRotation {
                    vertical: Some(true),
                    ..
                }) => 90,
                Some(rotation) => rotation.angle.unwrap_or(0),
                None => 0,
            },
        };
    }
}
