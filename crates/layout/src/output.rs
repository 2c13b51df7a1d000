//! Output types from the compositor.
//!
//! A `LaidOutDocument` holds every page of one render with its positioned
//! elements, ready for a renderer.

use crate::{ElementRole, PositionedElement, TextElement};

/// One page of positioned elements, in paint order.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    /// Zero-based page index.
    pub index: usize,
    pub elements: Vec<PositionedElement>,
}

impl Page {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            elements: Vec::new(),
        }
    }

    /// Text runs on this page, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = (&PositionedElement, &TextElement)> {
        self.elements
            .iter()
            .filter_map(|el| el.as_text().map(|t| (el, t)))
    }

    pub fn elements_with_role(&self, role: ElementRole) -> impl Iterator<Item = &PositionedElement> {
        self.elements.iter().filter(move |el| el.role == role)
    }

    pub fn has_decorations(&self) -> bool {
        self.elements.iter().any(|el| el.role.is_decoration())
    }

    /// Field lines on this page as `(label, value)` pairs, in order.
    pub fn field_lines(&self) -> Vec<(&str, &str)> {
        let labels = self
            .elements_with_role(ElementRole::FieldLabel)
            .filter_map(|el| el.as_text());
        let values = self
            .elements_with_role(ElementRole::FieldValue)
            .filter_map(|el| el.as_text());
        labels
            .zip(values)
            .map(|(l, v)| (l.content.as_str(), v.content.as_str()))
            .collect()
    }
}

/// The result of composing one template against one data document.
#[derive(Clone, Debug, PartialEq)]
pub struct LaidOutDocument {
    /// Used for the document title metadata.
    pub title: String,
    pub page_width: f32,
    pub page_height: f32,
    /// How many PDF points one layout unit spans.
    pub points_per_unit: f32,
    pub pages: Vec<Page>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// All field lines across pages as `(page index, label, value)`.
    pub fn field_lines(&self) -> Vec<(usize, &str, &str)> {
        self.pages
            .iter()
            .flat_map(|p| {
                p.field_lines()
                    .into_iter()
                    .map(move |(label, value)| (p.index, label, value))
            })
            .collect()
    }
}
