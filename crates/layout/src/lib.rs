use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid layout configuration: {0}")]
    InvalidConfig(String),
}

pub mod algorithms;
pub mod compositor;
pub mod config;
pub mod elements;
pub mod fonts;
pub mod output;

pub use self::compositor::{Compositor, FALLBACK_TITLE, ResolvedField};
pub use self::config::{
    DividerStyle, FieldLineStyle, LayoutConfig, POINTS_PER_MM, SubtitleStyle, TitleBandStyle,
};
pub use self::elements::{
    ElementRole, LayoutElement, LineElement, PositionedElement, RectElement, TextAlign,
    TextElement,
};
pub use self::fonts::BuiltinFont;
pub use self::output::{LaidOutDocument, Page};

pub use docket_types::Rect;

#[cfg(test)]
mod test_utils;
