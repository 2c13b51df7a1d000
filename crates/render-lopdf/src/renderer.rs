use crate::error::RenderError;
use crate::helpers::{self, to_win_ansi};
use crate::writer::StreamingPdfWriter;
use docket_layout::LaidOutDocument;
use lopdf::{Dictionary, Object, StringFormat, dictionary};
use std::io::{Cursor, Seek, Write};

/// Settings for PDF serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub pdf_version: String,
    /// Points per layout unit. `None` uses the scale the document was
    /// laid out with.
    pub points_per_unit: Option<f32>,
    /// Overrides the document title written to the info dictionary.
    pub title: Option<String>,
    pub producer: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pdf_version: "1.7".to_string(),
            points_per_unit: None,
            title: None,
            producer: concat!("docket ", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Serializes laid-out documents to PDF with lopdf.
///
/// Output depends only on the document and the options; no timestamps or
/// random ids are written, so rendering the same document twice yields
/// identical bytes.
#[derive(Debug, Clone, Default)]
pub struct LopdfRenderer {
    options: RenderOptions,
}

impl LopdfRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Writes `document` to `sink` and hands the sink back.
    pub fn render<W: Write + Seek>(
        &self,
        document: &LaidOutDocument,
        sink: W,
    ) -> Result<W, RenderError> {
        if document.pages().is_empty() {
            return Err(RenderError::EmptyDocument);
        }

        let scale = self
            .options
            .points_per_unit
            .unwrap_or(document.points_per_unit);
        let media_box = vec![
            0.0.into(),
            0.0.into(),
            (document.page_width * scale).into(),
            (document.page_height * scale).into(),
        ];

        let mut writer =
            StreamingPdfWriter::new(sink, &self.options.pdf_version, helpers::font_dictionary())?;

        let mut page_ids = Vec::with_capacity(document.page_count());
        for page in document.pages() {
            let content = helpers::render_page_content(page, document.page_height, scale);
            let content_id = writer.buffer_content_stream(content.encode()?);
            let page_dict = dictionary! {
                "Type" => "Page",
                "Parent" => writer.pages_id,
                "MediaBox" => media_box.clone(),
                "Contents" => content_id,
                "Resources" => writer.resources_id,
            };
            page_ids.push(writer.buffer_object(page_dict.into()));
        }
        writer.set_page_ids(page_ids);
        writer.set_info(self.info_dictionary(document));

        let sink = writer.finish()?;
        log::debug!(
            "Rendered '{}' to PDF: {} page(s)",
            document.title,
            document.page_count()
        );
        Ok(sink)
    }

    pub fn render_to_vec(&self, document: &LaidOutDocument) -> Result<Vec<u8>, RenderError> {
        Ok(self.render(document, Cursor::new(Vec::new()))?.into_inner())
    }

    fn info_dictionary(&self, document: &LaidOutDocument) -> Dictionary {
        let title = self.options.title.as_deref().unwrap_or(&document.title);
        dictionary! {
            "Title" => Object::String(to_win_ansi(title), StringFormat::Literal),
            "Producer" => Object::String(to_win_ansi(&self.options.producer), StringFormat::Literal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_layout::{Compositor, LayoutConfig};
    use docket_template::{Alignment, FieldDefinition, Section, Template, TemplateKind};
    use lopdf::content::Content;
    use serde_json::json;

    fn payslip() -> LaidOutDocument {
        let template = Template::new("Payslip", TemplateKind::Salary)
            .with_field(
                Section::Body,
                FieldDefinition::new("Name", "user.name", "-", Alignment::Left),
            )
            .with_field(
                Section::Body,
                FieldDefinition::new("Total", "user.total", "0", Alignment::Right),
            );
        let data = json!({ "user": { "name": "Alice Johnson", "total": 75000 } });
        Compositor::default().compose(&template, &data)
    }

    fn long_document(fields: usize) -> LaidOutDocument {
        let template = (0..fields).fold(Template::new("Long", TemplateKind::Bill), |t, i| {
            t.with_field(
                Section::Body,
                FieldDefinition::new(format!("Line {}", i), "", "x", Alignment::Left),
            )
        });
        Compositor::default().compose(&template, &json!({}))
    }

    fn shown_strings(doc: &lopdf::Document, page_id: lopdf::ObjectId) -> Vec<Vec<u8>> {
        let bytes = doc.get_page_content(page_id).unwrap();
        Content::decode(&bytes)
            .unwrap()
            .operations
            .into_iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| op.operands.first().and_then(|o| o.as_str().ok()).map(<[u8]>::to_vec))
            .collect()
    }

    #[test]
    fn test_render_payslip() {
        let bytes = LopdfRenderer::default().render_to_vec(&payslip()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);

        let strings = shown_strings(&doc, pages[&1]);
        assert!(strings.contains(&b"Payslip".to_vec()));
        assert!(strings.contains(&b"Name:".to_vec()));
        assert!(strings.contains(&b"Alice Johnson".to_vec()));
        assert!(strings.contains(&b"75000".to_vec()));
    }

    #[test]
    fn test_media_box_is_a4_in_points() {
        let bytes = LopdfRenderer::default().render_to_vec(&payslip()).unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        let page_id = doc.get_pages()[&1];
        let page = doc.get_dictionary(page_id).unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        let width = media_box[2].as_float().unwrap();
        let height = media_box[3].as_float().unwrap();
        assert!((width - 595.28).abs() < 0.01);
        assert!((height - 841.89).abs() < 0.01);
    }

    #[test]
    fn test_every_laid_out_page_is_written() {
        let document = long_document(40);
        assert_eq!(document.page_count(), 2);
        let bytes = LopdfRenderer::default().render_to_vec(&document).unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let renderer = LopdfRenderer::default();
        let document = long_document(70);
        assert_eq!(
            renderer.render_to_vec(&document).unwrap(),
            renderer.render_to_vec(&document).unwrap()
        );
    }

    #[test]
    fn test_info_dictionary() {
        let renderer = LopdfRenderer::new(RenderOptions {
            title: Some("Override".to_string()),
            ..RenderOptions::default()
        });
        let bytes = renderer.render_to_vec(&payslip()).unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info = doc.get_dictionary(info_id).unwrap();
        assert_eq!(info.get(b"Title").unwrap().as_str().unwrap(), b"Override");
        assert!(info.get(b"Producer").unwrap().as_str().unwrap().starts_with(b"docket"));
    }

    #[test]
    fn test_scale_override() {
        let config = LayoutConfig::default();
        let renderer = LopdfRenderer::new(RenderOptions {
            points_per_unit: Some(1.0),
            ..RenderOptions::default()
        });
        let bytes = renderer.render_to_vec(&payslip()).unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        let page = doc.get_dictionary(doc.get_pages()[&1]).unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        assert_eq!(media_box[2].as_float().unwrap(), config.page_width);
    }

    #[test]
    fn test_empty_document_is_rejected() {
        let mut document = payslip();
        document.pages.clear();
        assert!(matches!(
            LopdfRenderer::default().render_to_vec(&document),
            Err(RenderError::EmptyDocument)
        ));
    }
}
