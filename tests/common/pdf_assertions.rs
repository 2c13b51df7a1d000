use lopdf::Document as LopdfDocument;
use lopdf::content::Content;

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        if let Ok(page_text) = doc.extract_text(&[page_num as u32]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

fn page_operations(doc: &LopdfDocument, page_number: u32) -> Vec<lopdf::content::Operation> {
    let Some(page_id) = doc.get_pages().get(&page_number).copied() else {
        return Vec::new();
    };
    doc.get_page_content(page_id)
        .ok()
        .and_then(|bytes| Content::decode(&bytes).ok())
        .map(|content| content.operations)
        .unwrap_or_default()
}

/// Strings drawn with `Tj` on one page, in paint order
pub fn page_strings(doc: &LopdfDocument, page_number: u32) -> Vec<String> {
    page_operations(doc, page_number)
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| op.operands.first()?.as_str().ok())
        .map(|bytes| bytes.iter().map(|&b| b as char).collect())
        .collect()
}

/// The `Td` position (in points) each string on a page is drawn at
pub fn text_positions(doc: &LopdfDocument, page_number: u32) -> Vec<(String, f32, f32)> {
    let mut positions = Vec::new();
    let mut last_td = (0.0, 0.0);
    for op in page_operations(doc, page_number) {
        match op.operator.as_str() {
            "Td" => {
                let x = op.operands.first().and_then(|o| o.as_float().ok()).unwrap_or(0.0);
                let y = op.operands.get(1).and_then(|o| o.as_float().ok()).unwrap_or(0.0);
                last_td = (x, y);
            }
            "Tj" => {
                if let Some(bytes) = op.operands.first().and_then(|o| o.as_str().ok()) {
                    let text = bytes.iter().map(|&b| b as char).collect();
                    positions.push((text, last_td.0, last_td.1));
                }
            }
            _ => {}
        }
    }
    positions
}

/// Base font names referenced from the first page's resources
pub fn extract_font_names(doc: &LopdfDocument) -> Vec<String> {
    let mut fonts = Vec::new();
    let Some(page_id) = doc.get_pages().get(&1).copied() else {
        return fonts;
    };
    let resources = doc
        .get_dictionary(page_id)
        .and_then(|page| page.get(b"Resources"))
        .and_then(|r| r.as_reference())
        .and_then(|id| doc.get_dictionary(id));
    if let Ok(font_dict) = resources.and_then(|r| r.get(b"Font")).and_then(|f| f.as_dict()) {
        for (_, font) in font_dict.iter() {
            if let Ok(name) = font
                .as_dict()
                .and_then(|d| d.get(b"BaseFont"))
                .and_then(|n| n.as_name())
            {
                fonts.push(String::from_utf8_lossy(name).to_string());
            }
        }
    }
    fonts.sort();
    fonts
}

/// A string entry of the document information dictionary
pub fn info_string(doc: &LopdfDocument, key: &str) -> Option<String> {
    let info_id = doc.trailer.get(b"Info").ok()?.as_reference().ok()?;
    let info = doc.get_dictionary(info_id).ok()?;
    let bytes = info.get(key.as_bytes()).ok()?.as_str().ok()?;
    Some(String::from_utf8_lossy(bytes).to_string())
}

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert that PDF does NOT contain specific text
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            !extracted.contains($text),
            "PDF should NOT contain '{}', but it was found in:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}
