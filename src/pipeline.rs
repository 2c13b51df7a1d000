// src/pipeline.rs
use crate::error::PipelineError;
use crate::request::RenderRequest;
use docket_layout::{Compositor, LaidOutDocument, LayoutConfig};
use docket_render_lopdf::{LopdfRenderer, RenderOptions};
use docket_template::Template;
use serde_json::Value;
use std::fs;
use std::io::{self, Cursor, Seek, Write};
use std::path::{Path, PathBuf};

/// File name stem used when a template has a blank name.
pub const FALLBACK_FILE_STEM: &str = "document";

/// A builder for creating a `DocumentPipeline`.
#[derive(Debug, Clone, Default)]
pub struct PipelineBuilder {
    layout: LayoutConfig,
    render: RenderOptions,
}

impl PipelineBuilder {
    /// Creates a builder with A4 geometry and default PDF settings.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_layout_config(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Loads the layout configuration from a JSON file. Keys not present in
    /// the file keep their defaults.
    pub fn with_layout_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, PipelineError> {
        let path_ref = path.as_ref();
        let source = fs::read_to_string(path_ref).map_err(|e| {
            PipelineError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read layout config from '{}': {}", path_ref.display(), e),
            ))
        })?;
        self.layout = serde_json::from_str(&source)?;
        Ok(self)
    }

    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    /// Consumes the builder and creates the `DocumentPipeline`.
    /// Fails when the layout configuration leaves no room for content.
    pub fn build(self) -> Result<DocumentPipeline, PipelineError> {
        let compositor = Compositor::new(self.layout)?;
        Ok(DocumentPipeline {
            compositor,
            renderer: LopdfRenderer::new(self.render),
        })
    }
}

/// Composes templates against data and writes the result as PDF.
#[derive(Debug, Clone)]
pub struct DocumentPipeline {
    compositor: Compositor,
    renderer: LopdfRenderer,
}

impl DocumentPipeline {
    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn compose(&self, template: &Template, data: &Value) -> LaidOutDocument {
        self.compositor.compose(template, data)
    }

    /// Renders `template` against `data` into `writer` and returns it.
    pub fn generate<W: Write + Seek>(
        &self,
        template: &Template,
        data: &Value,
        writer: W,
    ) -> Result<W, PipelineError> {
        let document = self.compose(template, data);
        log::info!(
            "Rendering '{}' ({} fields, {} page(s))",
            document.title,
            template.field_count(),
            document.page_count()
        );
        Ok(self.renderer.render(&document, writer)?)
    }

    pub fn generate_bytes(&self, template: &Template, data: &Value) -> Result<Vec<u8>, PipelineError> {
        Ok(self.generate(template, data, Cursor::new(Vec::new()))?.into_inner())
    }

    /// Validates `request` against `templates` and renders it.
    pub fn generate_request(
        &self,
        templates: &[Template],
        request: &RenderRequest,
    ) -> Result<Vec<u8>, PipelineError> {
        let validated = request.validate(templates)?;
        self.generate_bytes(validated.template, &validated.data)
    }

    pub fn generate_to_file<P: AsRef<Path>>(
        &self,
        template: &Template,
        data: &Value,
        path: P,
    ) -> Result<(), PipelineError> {
        let output_path = path.as_ref();
        if let Some(parent_dir) = output_path.parent() {
            fs::create_dir_all(parent_dir)?;
        }
        let file = fs::File::create(output_path)?;
        let mut writer = self.generate(template, data, io::BufWriter::new(file))?;
        writer.flush()?;
        Ok(())
    }

    /// Writes `<name>.pdf` into `dir` (see [`output_file_name`]) and
    /// returns the full path.
    pub fn generate_into_dir<P: AsRef<Path>>(
        &self,
        template: &Template,
        data: &Value,
        dir: P,
    ) -> Result<PathBuf, PipelineError> {
        let path = dir.as_ref().join(output_file_name(template));
        self.generate_to_file(template, data, &path)?;
        Ok(path)
    }
}

/// `<trimmed name>.pdf`, or `document.pdf` for a blank name. Characters
/// that are not allowed in file names are replaced with `_`.
pub fn output_file_name(template: &Template) -> String {
    let stem = template.display_name().unwrap_or(FALLBACK_FILE_STEM);
    let sanitized: String = stem
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{}.pdf", sanitized)
}
