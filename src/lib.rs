//! Field-mapped document templates rendered from JSON data into paginated PDFs.
//!
//! A [`Template`] lists labelled fields, each bound to a dotted path into a
//! JSON data document. The [`DocumentPipeline`] resolves every path, lays
//! the label/value lines out on A4 pages under a title band and writes the
//! result as PDF.
//!
//! ```no_run
//! use docket::{Alignment, FieldDefinition, PipelineBuilder, Section, Template, TemplateKind};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), docket::PipelineError> {
//! let template = Template::new("Payslip", TemplateKind::Salary).with_field(
//!     Section::Body,
//!     FieldDefinition::new("Name", "user.name", "-", Alignment::Left),
//! );
//! let data = json!({ "user": { "name": "Alice Johnson" } });
//!
//! let pipeline = PipelineBuilder::new().build()?;
//! pipeline.generate_to_file(&template, &data, "Payslip.pdf")?;
//! # Ok(())
//! # }
//! ```

mod error;
pub mod pipeline;
pub mod request;

pub use error::PipelineError;
pub use pipeline::{DocumentPipeline, PipelineBuilder, output_file_name};
pub use request::{RenderRequest, ValidatedRequest, record_for};

pub use docket_jpath::{display_string, resolve};
pub use docket_layout::{Compositor, LaidOutDocument, LayoutConfig};
pub use docket_render_lopdf::{LopdfRenderer, RenderOptions};
pub use docket_template::{
    Alignment, FieldDefinition, InMemoryTemplateRepository, JsonFileTemplateRepository, Section,
    Template, TemplateDraft, TemplateError, TemplateId, TemplateKind, TemplateRepository,
    TemplateStore,
};
