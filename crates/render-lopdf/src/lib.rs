//! PDF renderer for laid-out documents using lopdf.
//!
//! Pages are drawn with the standard Helvetica fonts, so no font files are
//! embedded and the output stays small.

mod error;
mod helpers;
mod renderer;
mod writer;

pub use error::RenderError;
pub use helpers::{font_dictionary, font_resource_name, render_page_content, to_win_ansi};
pub use renderer::{LopdfRenderer, RenderOptions};
pub use writer::StreamingPdfWriter;
