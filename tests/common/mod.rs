#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use docket::{PipelineBuilder, PipelineError, Template};
use lopdf::Document as LopdfDocument;
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Strings shown on a page (1-based), in paint order
    pub fn page_strings(&self, page_number: u32) -> Vec<String> {
        pdf_assertions::page_strings(&self.doc, page_number)
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Render a template against a data record with the default pipeline
pub fn generate_pdf(template: &Template, data: &Value) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let pipeline = PipelineBuilder::new().build()?;
    let bytes = pipeline.generate_bytes(template, data)?;
    GeneratedPdf::from_bytes(bytes)
}

/// Same as [`generate_pdf`] but surfacing the pipeline error type
pub fn try_generate_bytes(template: &Template, data: &Value) -> Result<Vec<u8>, PipelineError> {
    PipelineBuilder::new().build()?.generate_bytes(template, data)
}
