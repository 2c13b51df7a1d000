// src/error.rs
use docket_layout::LayoutError;
use docket_render_lopdf::RenderError;
use docket_template::{TemplateError, TemplateId, TemplateKind};
use thiserror::Error;

/// Error type for the whole generation pipeline.
///
/// The first three variants are precondition failures detected before any
/// layout work starts; the rest wrap failures of the underlying crates.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("No template selected")]
    NoTemplateSelected,

    #[error("Template '{0}' not found")]
    TemplateNotFound(TemplateId),

    #[error("A {0} template needs a data record, but none was selected")]
    MissingRecord(TemplateKind),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Template store error: {0}")]
    Template(#[from] TemplateError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
