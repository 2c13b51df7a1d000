//! The document compositor.
//!
//! Turns a template and a data document into pages: a title band, subtitle
//! and divider on the first page, then one label/value line per field,
//! flowing onto new pages as the current one fills up.

use crate::algorithms::pagination::needs_page_break;
use crate::config::LayoutConfig;
use crate::elements::{
    ElementRole, LayoutElement, LineElement, PositionedElement, RectElement, TextAlign,
    TextElement,
};
use crate::fonts::BuiltinFont;
use crate::output::{LaidOutDocument, Page};
use crate::LayoutError;
use docket_jpath::{display_string, parse_path, resolve_path};
use docket_template::{Alignment, FieldDefinition, Template};
use docket_types::Color;
use serde_json::Value;

/// Title used when a template has a blank name.
pub const FALLBACK_TITLE: &str = "Document";

/// One field after path resolution, ready to be placed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    pub label: String,
    pub value: String,
    pub align: Alignment,
}

impl ResolvedField {
    /// Resolves `field` against `document`, applying its default.
    pub fn resolve(field: &FieldDefinition, document: &Value) -> Self {
        let value = resolve_path(document, &parse_path(&field.mapping), &field.default_value);
        Self {
            label: field.key_label.clone(),
            value: display_string(&value),
            align: field.align,
        }
    }
}

/// Lays out templates using a fixed [`LayoutConfig`].
///
/// A compositor holds no per-render state; every call to [`compose`]
/// starts from a fresh page flow, so one instance may be shared freely.
///
/// [`compose`]: Compositor::compose
#[derive(Debug, Clone)]
pub struct Compositor {
    config: LayoutConfig,
}

impl Default for Compositor {
    fn default() -> Self {
        Self {
            config: LayoutConfig::default(),
        }
    }
}

impl Compositor {
    pub fn new(config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Resolves every field of `template` against `document` in render
    /// order: header, body, footer.
    pub fn resolve_fields(template: &Template, document: &Value) -> Vec<ResolvedField> {
        template
            .fields()
            .map(|field| ResolvedField::resolve(field, document))
            .collect()
    }

    pub fn compose(&self, template: &Template, document: &Value) -> LaidOutDocument {
        let fields = Self::resolve_fields(template, document);
        let title = template.display_name().unwrap_or(FALLBACK_TITLE);
        let subtitle = format!(
            "{} template generated from JSON mapping",
            template.kind.display_name()
        );
        self.compose_resolved(title, &subtitle, &fields)
    }

    /// Lays out already-resolved fields under the given title and subtitle.
    pub fn compose_resolved(
        &self,
        title: &str,
        subtitle: &str,
        fields: &[ResolvedField],
    ) -> LaidOutDocument {
        let mut flow = PageFlow::new(&self.config);

        flow.draw_title_band(title);
        flow.draw_subtitle(subtitle);
        flow.draw_divider();

        for field in fields {
            flow.write_field_line(field);
        }

        let pages = flow.finish();
        log::debug!(
            "Composed '{}': {} fields on {} page(s)",
            title,
            fields.len(),
            pages.len()
        );

        LaidOutDocument {
            title: title.to_string(),
            page_width: self.config.page_width,
            page_height: self.config.page_height,
            points_per_unit: self.config.points_per_unit,
            pages,
        }
    }
}

/// Mutable state of a single render: finished pages, the page being
/// written and the vertical cursor on it.
struct PageFlow<'a> {
    config: &'a LayoutConfig,
    finished: Vec<Page>,
    current: Page,
    cursor_y: f32,
}

impl<'a> PageFlow<'a> {
    fn new(config: &'a LayoutConfig) -> Self {
        Self {
            config,
            finished: Vec::new(),
            current: Page::new(0),
            cursor_y: config.margin_top,
        }
    }

    fn start_new_page(&mut self) {
        let index = self.current.index + 1;
        let previous = std::mem::replace(&mut self.current, Page::new(index));
        self.finished.push(previous);
        self.cursor_y = self.config.margin_top;
        log::debug!("Page break: starting page {}", index + 1);
    }

    /// Breaks the page when a field line would not fit below the cursor.
    /// The new page gets no band, subtitle or divider.
    fn ensure_space(&mut self, clearance: f32) {
        if needs_page_break(self.cursor_y, clearance, self.config.content_bottom()) {
            self.start_new_page();
        }
    }

    fn push(&mut self, element: PositionedElement) {
        self.current.elements.push(element);
    }

    #[allow(clippy::too_many_arguments)]
    fn push_text(
        &mut self,
        role: ElementRole,
        content: String,
        font: BuiltinFont,
        font_size: f32,
        color: Color,
        align: TextAlign,
        anchor_x: f32,
    ) {
        let width = self.config.pt_to_units(font.text_width(&content, font_size));
        let x = match align {
            TextAlign::Start => anchor_x,
            TextAlign::Center => anchor_x - width / 2.0,
            TextAlign::End => anchor_x - width,
        };
        let y = self.cursor_y;
        let height = self.config.pt_to_units(font_size);
        self.push(PositionedElement {
            x,
            y,
            width,
            height,
            role,
            element: LayoutElement::Text(TextElement {
                content,
                font,
                font_size,
                color,
                align,
                anchor_x,
            }),
        });
    }

    fn draw_title_band(&mut self, title: &str) {
        let band = &self.config.title_band;
        let (height, gap, baseline) = (band.height, band.gap_after, band.text_baseline);
        let (fill, radius) = (band.fill, band.corner_radius);
        let (text_color, font_size) = (band.text_color, band.font_size);

        let top = self.cursor_y;
        self.push(PositionedElement {
            x: self.config.margin_x,
            y: top,
            width: self.config.content_width(),
            height,
            role: ElementRole::TitleBand,
            element: LayoutElement::Rectangle(RectElement {
                fill,
                corner_radius: radius,
            }),
        });

        self.cursor_y = top + baseline;
        self.push_text(
            ElementRole::Title,
            title.to_string(),
            BuiltinFont::HelveticaBold,
            font_size,
            text_color,
            TextAlign::Center,
            self.config.page_width / 2.0,
        );

        self.cursor_y = top + height + gap;
    }

    fn draw_subtitle(&mut self, subtitle: &str) {
        let style = &self.config.subtitle;
        let (font_size, color, advance) = (style.font_size, style.color, style.advance);
        self.push_text(
            ElementRole::Subtitle,
            subtitle.to_string(),
            BuiltinFont::Helvetica,
            font_size,
            color,
            TextAlign::Start,
            self.config.margin_x,
        );
        self.cursor_y += advance;
    }

    fn draw_divider(&mut self) {
        let style = &self.config.divider;
        let (color, thickness, gap) = (style.color, style.thickness, style.gap_after);
        self.push(PositionedElement {
            x: self.config.margin_x,
            y: self.cursor_y,
            width: self.config.content_width(),
            height: 0.0,
            role: ElementRole::Divider,
            element: LayoutElement::Line(LineElement { color, thickness }),
        });
        self.cursor_y += gap;
    }

    fn write_field_line(&mut self, field: &ResolvedField) {
        let style = &self.config.fields;
        let (font_size, color) = (style.font_size, style.color);
        let (clearance, line_height, value_offset) =
            (style.line_clearance, style.line_height, style.value_offset);

        self.ensure_space(clearance);

        let label_x = self.config.margin_x;
        self.push_text(
            ElementRole::FieldLabel,
            format!("{}:", field.label),
            BuiltinFont::HelveticaBold,
            font_size,
            color,
            TextAlign::Start,
            label_x,
        );

        let (align, anchor_x) = match field.align {
            Alignment::Left => (TextAlign::Start, label_x + value_offset),
            Alignment::Center => (TextAlign::Center, self.config.page_width / 2.0),
            Alignment::Right => (TextAlign::End, self.config.page_width - self.config.margin_x),
        };
        self.push_text(
            ElementRole::FieldValue,
            field.value.clone(),
            BuiltinFont::Helvetica,
            font_size,
            color,
            align,
            anchor_x,
        );

        self.cursor_y += line_height;
    }

    fn finish(mut self) -> Vec<Page> {
        self.finished.push(self.current);
        self.finished
    }
}
