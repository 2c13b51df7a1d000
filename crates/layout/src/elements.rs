use crate::fonts::BuiltinFont;
use docket_types::{Color, Rect};

/// A single drawable item with its absolute position on a page.
///
/// Coordinates are layout units from the top-left page corner. For text,
/// `x` is the left edge of the run and `y` is its baseline; for shapes, `x`
/// and `y` are the top-left corner. A line runs from `(x, y)` to
/// `(x + width, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub role: ElementRole,
    pub element: LayoutElement,
}

impl PositionedElement {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn as_text(&self) -> Option<&TextElement> {
        match &self.element {
            LayoutElement::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// What part of the document an element belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementRole {
    TitleBand,
    Title,
    Subtitle,
    Divider,
    FieldLabel,
    FieldValue,
}

impl ElementRole {
    /// Decorative elements only ever appear on the first page.
    pub fn is_decoration(self) -> bool {
        matches!(
            self,
            ElementRole::TitleBand | ElementRole::Title | ElementRole::Subtitle | ElementRole::Divider
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LayoutElement {
    Text(TextElement),
    Rectangle(RectElement),
    Line(LineElement),
}

impl std::fmt::Display for LayoutElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutElement::Text(t) => write!(f, "Text(\"{}\")", t.content),
            LayoutElement::Rectangle(_) => write!(f, "Rectangle"),
            LayoutElement::Line(_) => write!(f, "Line"),
        }
    }
}

/// How a text run sits relative to its anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlign {
    /// The run starts at the anchor.
    #[default]
    Start,
    /// The run is centered on the anchor.
    Center,
    /// The run ends at the anchor.
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextElement {
    pub content: String,
    pub font: BuiltinFont,
    /// Font size in points.
    pub font_size: f32,
    pub color: Color,
    pub align: TextAlign,
    /// The horizontal position the run was aligned against.
    pub anchor_x: f32,
}

/// A filled rectangle, optionally with rounded corners.
#[derive(Clone, Debug, PartialEq)]
pub struct RectElement {
    pub fill: Color,
    pub corner_radius: f32,
}

/// A stroked horizontal rule.
#[derive(Clone, Debug, PartialEq)]
pub struct LineElement {
    pub color: Color,
    pub thickness: f32,
}
