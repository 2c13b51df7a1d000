//! Page drawing for the lopdf renderer.
//!
//! Converts a page of positioned layout elements into PDF content stream
//! operations. Layout coordinates are in layout units with y growing
//! downward; PDF coordinates are points with y growing upward.

use docket_layout::{
    BuiltinFont, LayoutElement, LineElement, Page, PositionedElement, RectElement, TextElement,
};
use docket_types::Color;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object, StringFormat, dictionary};

/// Control point offset for approximating a quarter circle with a cubic Bézier.
const KAPPA: f32 = 0.552_284_8;

/// Resource name a built-in font is registered under on every page.
pub fn font_resource_name(font: BuiltinFont) -> &'static str {
    match font {
        BuiltinFont::Helvetica => "F1",
        BuiltinFont::HelveticaBold => "F2",
    }
}

/// Font resource dictionary shared by all pages: one standard Type1 font
/// per [`BuiltinFont`], WinAnsi encoded.
pub fn font_dictionary() -> Dictionary {
    let mut fonts = Dictionary::new();
    for font in BuiltinFont::ALL {
        fonts.set(
            font_resource_name(font),
            dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.postscript_name(),
                "Encoding" => "WinAnsiEncoding",
            },
        );
    }
    fonts
}

/// Encodes text as single-byte WinAnsi (CP1252). Latin-1 maps directly,
/// the CP1252 extras in 0x80..=0x9F (`€`, `–`, `…` and friends) map to their
/// slots, and everything else, including the C1 controls, becomes `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    let mut replaced = 0usize;
    let bytes = s
        .chars()
        .map(|c| match win_ansi_byte(c) {
            Some(b) => b,
            None => {
                replaced += 1;
                b'?'
            }
        })
        .collect();
    if replaced > 0 {
        log::warn!(
            "Replaced {} character(s) not representable in WinAnsi in {:?}",
            replaced,
            s
        );
    }
    bytes
}

fn win_ansi_byte(c: char) -> Option<u8> {
    match c as u32 {
        0x80..=0x9F => None,
        code @ 0..=0xFF => Some(code as u8),
        _ => CP1252_HIGH
            .iter()
            .position(|&mapped| mapped == Some(c))
            .map(|i| 0x80 + i as u8),
    }
}

/// Characters CP1252 places at 0x80..=0x9F; `None` marks unassigned slots.
#[rustfmt::skip]
const CP1252_HIGH: [Option<char>; 32] = [
    Some('€'), None, Some('‚'), Some('ƒ'), Some('„'), Some('…'), Some('†'), Some('‡'),
    Some('ˆ'), Some('‰'), Some('Š'), Some('‹'), Some('Œ'), None, Some('Ž'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'), Some('\u{201D}'), Some('•'), Some('–'), Some('—'),
    Some('˜'), Some('™'), Some('š'), Some('›'), Some('œ'), None, Some('ž'), Some('Ÿ'),
];

/// Builds the content stream operations for one page.
pub fn render_page_content(page: &Page, page_height: f32, points_per_unit: f32) -> Content {
    let mut ctx = PageContext::new(page_height, points_per_unit);
    for el in &page.elements {
        ctx.draw_element(el);
    }
    ctx.finish()
}

#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font: Option<(BuiltinFont, f32)>,
    fill_color: Option<Color>,
}

struct PageContext {
    page_height: f32,
    scale: f32,
    content: Content,
    state: PageRenderState,
}

impl PageContext {
    fn new(page_height: f32, scale: f32) -> Self {
        Self {
            page_height,
            scale,
            content: Content { operations: vec![] },
            state: PageRenderState::default(),
        }
    }

    fn finish(self) -> Content {
        self.content
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    /// Layout x to PDF x.
    fn px(&self, x: f32) -> f32 {
        x * self.scale
    }

    /// Layout y (from the top) to PDF y (from the bottom).
    fn py(&self, y: f32) -> f32 {
        (self.page_height - y) * self.scale
    }

    fn draw_element(&mut self, el: &PositionedElement) {
        match &el.element {
            LayoutElement::Rectangle(rect) => self.draw_rect(rect, el),
            LayoutElement::Line(line) => self.draw_line(line, el),
            LayoutElement::Text(text) => self.draw_text(text, el),
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.op("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill_color = Some(color);
        }
    }

    fn set_font(&mut self, font: BuiltinFont, size: f32) {
        if self.state.font != Some((font, size)) {
            self.op(
                "Tf",
                vec![
                    Object::Name(font_resource_name(font).as_bytes().to_vec()),
                    size.into(),
                ],
            );
            self.state.font = Some((font, size));
        }
    }

    fn draw_rect(&mut self, rect: &RectElement, el: &PositionedElement) {
        self.set_fill_color(rect.fill);

        let bounds = el.bounds();
        let x0 = self.px(bounds.x);
        let x1 = self.px(bounds.right());
        let y0 = self.py(bounds.bottom());
        let y1 = self.py(bounds.y);
        let r = (rect.corner_radius * self.scale)
            .min((x1 - x0) / 2.0)
            .min((y1 - y0) / 2.0)
            .max(0.0);

        if r == 0.0 {
            self.op("re", vec![x0.into(), y0.into(), (x1 - x0).into(), (y1 - y0).into()]);
            self.op("f", vec![]);
            return;
        }

        let k = r * KAPPA;
        self.op("m", vec![(x0 + r).into(), y0.into()]);
        self.op("l", vec![(x1 - r).into(), y0.into()]);
        self.curve(x1 - r + k, y0, x1, y0 + r - k, x1, y0 + r);
        self.op("l", vec![x1.into(), (y1 - r).into()]);
        self.curve(x1, y1 - r + k, x1 - r + k, y1, x1 - r, y1);
        self.op("l", vec![(x0 + r).into(), y1.into()]);
        self.curve(x0 + r - k, y1, x0, y1 - r + k, x0, y1 - r);
        self.op("l", vec![x0.into(), (y0 + r).into()]);
        self.curve(x0, y0 + r - k, x0 + r - k, y0, x0 + r, y0);
        self.op("h", vec![]);
        self.op("f", vec![]);
    }

    #[allow(clippy::too_many_arguments)]
    fn curve(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) {
        self.op(
            "c",
            vec![x1.into(), y1.into(), x2.into(), y2.into(), x3.into(), y3.into()],
        );
    }

    fn draw_line(&mut self, line: &LineElement, el: &PositionedElement) {
        let [r, g, b] = line.color.to_unit_rgb();
        let y = self.py(el.y);
        self.op("w", vec![(line.thickness * self.scale).into()]);
        self.op("RG", vec![r.into(), g.into(), b.into()]);
        self.op("m", vec![self.px(el.x).into(), y.into()]);
        self.op("l", vec![self.px(el.x + el.width).into(), y.into()]);
        self.op("S", vec![]);
    }

    fn draw_text(&mut self, text: &TextElement, el: &PositionedElement) {
        if text.content.is_empty() {
            return;
        }
        self.op("BT", vec![]);
        self.set_font(text.font, text.font_size);
        self.set_fill_color(text.color);
        self.op("Td", vec![self.px(el.x).into(), self.py(el.y).into()]);
        self.op(
            "Tj",
            vec![Object::String(to_win_ansi(&text.content), StringFormat::Literal)],
        );
        self.op("ET", vec![]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_layout::{ElementRole, TextAlign};

    fn operators(content: &Content) -> Vec<&str> {
        content.operations.iter().map(|op| op.operator.as_str()).collect()
    }

    fn band(radius: f32) -> Page {
        let mut page = Page::new(0);
        page.elements.push(PositionedElement {
            x: 10.0,
            y: 10.0,
            width: 100.0,
            height: 20.0,
            role: ElementRole::TitleBand,
            element: LayoutElement::Rectangle(RectElement {
                fill: Color::rgb(37, 99, 235),
                corner_radius: radius,
            }),
        });
        page
    }

    fn text(content: &str, x: f32, y: f32) -> PositionedElement {
        PositionedElement {
            x,
            y,
            width: 10.0,
            height: 3.0,
            role: ElementRole::FieldValue,
            element: LayoutElement::Text(TextElement {
                content: content.to_string(),
                font: BuiltinFont::Helvetica,
                font_size: 9.0,
                color: Color::gray(40),
                align: TextAlign::Start,
                anchor_x: x,
            }),
        }
    }

    #[test]
    fn test_win_ansi_replaces_non_latin1() {
        assert_eq!(to_win_ansi("Café"), vec![b'C', b'a', b'f', 0xE9]);
        assert_eq!(to_win_ansi("5 ✓"), b"5 ?".to_vec());
    }

    #[test]
    fn test_win_ansi_maps_cp1252_extras() {
        assert_eq!(to_win_ansi("Acme – Ltd"), b"Acme \x96 Ltd".to_vec());
        assert_eq!(to_win_ansi("€5…"), vec![0x80, b'5', 0x85]);
        assert_eq!(to_win_ansi("\u{201C}ok\u{201D}"), vec![0x93, b'o', b'k', 0x94]);
        // C1 controls have no WinAnsi glyph of their own
        assert_eq!(to_win_ansi("\u{0080}\u{009F}"), b"??".to_vec());
    }

    #[test]
    fn test_rounded_rect_uses_four_curves() {
        let content = render_page_content(&band(3.0), 100.0, 1.0);
        let ops = operators(&content);
        assert_eq!(ops.first(), Some(&"rg"));
        assert_eq!(ops.iter().filter(|op| **op == "c").count(), 4);
        assert_eq!(&ops[ops.len() - 2..], &["h", "f"]);
    }

    #[test]
    fn test_square_rect_uses_re() {
        let content = render_page_content(&band(0.0), 100.0, 1.0);
        assert_eq!(operators(&content), vec!["rg", "re", "f"]);
        // bottom-left corner after flipping: 100 - (10 + 20)
        assert_eq!(content.operations[1].operands[1].as_float().unwrap(), 70.0);
    }

    #[test]
    fn test_text_is_flipped_and_scaled() {
        let mut page = Page::new(0);
        page.elements.push(text("Hello", 10.0, 20.0));
        let content = render_page_content(&page, 100.0, 2.0);
        assert_eq!(operators(&content), vec!["BT", "Tf", "rg", "Td", "Tj", "ET"]);
        let td = &content.operations[3].operands;
        assert_eq!(td[0].as_float().unwrap(), 20.0);
        assert_eq!(td[1].as_float().unwrap(), 160.0);
    }

    #[test]
    fn test_font_and_color_are_set_once() {
        let mut page = Page::new(0);
        page.elements.push(text("one", 10.0, 20.0));
        page.elements.push(text("two", 10.0, 30.0));
        let content = render_page_content(&page, 100.0, 1.0);
        let ops = operators(&content);
        assert_eq!(ops.iter().filter(|op| **op == "Tf").count(), 1);
        assert_eq!(ops.iter().filter(|op| **op == "rg").count(), 1);
    }

    #[test]
    fn test_empty_text_is_skipped() {
        let mut page = Page::new(0);
        page.elements.push(text("", 10.0, 20.0));
        assert!(render_page_content(&page, 100.0, 1.0).operations.is_empty());
    }

    #[test]
    fn test_font_dictionary_lists_builtin_fonts() {
        let fonts = font_dictionary();
        let bold = fonts.get(b"F2").unwrap().as_dict().unwrap();
        assert_eq!(bold.get(b"BaseFont").unwrap().as_name().unwrap(), b"Helvetica-Bold");
        assert!(fonts.get(b"F1").is_ok());
    }
}
