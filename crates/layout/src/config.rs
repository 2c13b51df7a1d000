//! Page geometry and band styling for the compositor.
//!
//! All lengths are layout units (millimetres by default); font sizes are
//! points. The defaults reproduce an A4 page with an 18 mm side margin and
//! 20 mm top and bottom margins.

use crate::LayoutError;
use docket_types::Color;
use serde::{Deserialize, Serialize};

/// Points per millimetre.
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    /// Left and right content margin.
    pub margin_x: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    /// How many PDF points one layout unit spans.
    pub points_per_unit: f32,
    pub title_band: TitleBandStyle,
    pub subtitle: SubtitleStyle,
    pub divider: DividerStyle,
    pub fields: FieldLineStyle,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin_x: 18.0,
            margin_top: 20.0,
            margin_bottom: 20.0,
            points_per_unit: POINTS_PER_MM,
            title_band: TitleBandStyle::default(),
            subtitle: SubtitleStyle::default(),
            divider: DividerStyle::default(),
            fields: FieldLineStyle::default(),
        }
    }
}

impl LayoutConfig {
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin_x
    }

    /// Lowest Y position a field line's clearance may reach.
    pub fn content_bottom(&self) -> f32 {
        self.page_height - self.margin_bottom
    }

    /// Converts a font size in points to layout units.
    pub fn pt_to_units(&self, points: f32) -> f32 {
        points / self.points_per_unit
    }

    /// Rejects geometry the page flow cannot work with.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let positive = [
            ("pageWidth", self.page_width),
            ("pageHeight", self.page_height),
            ("pointsPerUnit", self.points_per_unit),
            ("fields.lineHeight", self.fields.line_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(LayoutError::InvalidConfig(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if self.margin_x < 0.0 || self.content_width() <= 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "horizontal margin {} leaves no content width on a {} wide page",
                self.margin_x, self.page_width
            )));
        }
        if self.margin_top < 0.0
            || self.margin_bottom < 0.0
            || self.margin_top + self.fields.line_clearance > self.content_bottom()
        {
            return Err(LayoutError::InvalidConfig(format!(
                "vertical margins {}/{} leave no room for a {} high field line",
                self.margin_top, self.margin_bottom, self.fields.line_clearance
            )));
        }
        Ok(())
    }
}

/// The filled, rounded band carrying the template name on page 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TitleBandStyle {
    pub height: f32,
    pub corner_radius: f32,
    /// Baseline of the title, measured from the band top.
    pub text_baseline: f32,
    /// Space between the band bottom and the subtitle baseline.
    pub gap_after: f32,
    pub fill: Color,
    pub text_color: Color,
    pub font_size: f32,
}

impl Default for TitleBandStyle {
    fn default() -> Self {
        Self {
            height: 16.0,
            corner_radius: 3.0,
            text_baseline: 10.0,
            gap_after: 8.0,
            fill: Color::rgb(37, 99, 235),
            text_color: Color::WHITE,
            font_size: 12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubtitleStyle {
    pub font_size: f32,
    pub color: Color,
    /// Cursor advance from the subtitle baseline to the divider.
    pub advance: f32,
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        Self {
            font_size: 9.0,
            color: Color::gray(120),
            advance: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DividerStyle {
    pub color: Color,
    pub thickness: f32,
    /// Cursor advance from the divider to the first field line.
    pub gap_after: f32,
}

impl Default for DividerStyle {
    fn default() -> Self {
        Self {
            color: Color::gray(180),
            thickness: 0.2,
            gap_after: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldLineStyle {
    pub font_size: f32,
    pub color: Color,
    /// Space a line needs below the cursor before it may be written on the
    /// current page.
    pub line_clearance: f32,
    /// Cursor advance after each line.
    pub line_height: f32,
    /// Start of a left-aligned value, measured from the label start.
    pub value_offset: f32,
}

impl Default for FieldLineStyle {
    fn default() -> Self {
        Self {
            font_size: 9.0,
            color: Color::BLACK,
            line_clearance: 8.0,
            line_height: 7.0,
            value_offset: 40.0,
        }
    }
}
