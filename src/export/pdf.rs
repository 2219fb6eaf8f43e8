//! Minimal PDF 1.4 writer
//!
//! Pages are accumulated as content streams; `finish` lays out the object
//! table (catalog, pages, one page + content object per page, the four
//! Helvetica faces, info dictionary) followed by the xref and trailer.
//! Coordinates arrive in millimetres from the top-left corner and are
//! converted to points from the bottom-left here.

use super::{DocumentEngine, Paint};
use crate::error::ExportError;
use crate::layout::{FontStyle, PageGeometry};
use crate::theme::Rgb;
use crate::Rect;
use std::fmt::Write as _;

const PT_PER_MM: f32 = crate::layout::font::PT_PER_MM;

pub struct PdfEngine {
    geometry: Option<PageGeometry>,
    pages: Vec<String>,
    font: FontStyle,
    size: f32,
    text_color: Rgb,
    fill_color: Rgb,
    draw_color: Rgb,
    line_width: f32,
    title: String,
}

impl Default for PdfEngine {
    fn default() -> Self {
        Self {
            geometry: None,
            pages: Vec::new(),
            font: FontStyle::Normal,
            size: 16.0,
            text_color: Rgb::BLACK,
            fill_color: Rgb::WHITE,
            draw_color: Rgb::BLACK,
            line_width: 0.2,
            title: String::new(),
        }
    }
}

impl PdfEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Title recorded in the document info dictionary
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn page_height(&self) -> Result<f32, ExportError> {
        self.geometry
            .map(|g| g.height)
            .ok_or_else(|| ExportError::Engine("document not started".to_string()))
    }

    fn current_page(&mut self) -> Result<&mut String, ExportError> {
        self.pages
            .last_mut()
            .ok_or_else(|| ExportError::Engine("document has no page".to_string()))
    }

    fn font_resource(style: FontStyle) -> &'static str {
        match style {
            FontStyle::Normal => "F1",
            FontStyle::Bold => "F2",
            FontStyle::Italic => "F3",
            FontStyle::BoldItalic => "F4",
        }
    }
}

/// Escape a string for a PDF literal, encoding non-ASCII as WinAnsi octal
fn escape_pdf_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '(' => result.push_str("\\("),
            ')' => result.push_str("\\)"),
            '\n' | '\r' | '\t' => result.push(' '),
            '•' => result.push_str("\\225"),
            '–' => result.push_str("\\226"),
            '—' => result.push_str("\\227"),
            _ if c.is_ascii() => result.push(c),
            // Latin-1 supplement maps one-to-one onto WinAnsi
            _ if ('\u{a0}'..='\u{ff}').contains(&c) => {
                let _ = write!(result, "\\{:03o}", c as u32);
            }
            _ => result.push('?'),
        }
    }
    result
}

fn color_operands(color: Rgb) -> String {
    let (r, g, b) = color.unit();
    format!("{:.3} {:.3} {:.3}", r, g, b)
}

impl DocumentEngine for PdfEngine {
    fn begin(&mut self, page: &PageGeometry) -> Result<(), ExportError> {
        if page.width <= 0.0 || page.height <= 0.0 {
            return Err(ExportError::EngineUnavailable(format!(
                "invalid page size {}x{}",
                page.width, page.height
            )));
        }
        self.geometry = Some(*page);
        self.pages = vec![String::new()];
        Ok(())
    }

    fn add_page(&mut self) -> Result<(), ExportError> {
        self.page_height()?;
        self.pages.push(String::new());
        Ok(())
    }

    fn set_font(&mut self, style: FontStyle, size: f32) {
        self.font = style;
        self.size = size;
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.text_color = color;
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.fill_color = color;
    }

    fn set_draw_color(&mut self, color: Rgb) {
        self.draw_color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn text(&mut self, x: f32, y: f32, text: &str) -> Result<(), ExportError> {
        let height = self.page_height()?;
        let op = format!(
            "BT\n/{} {:.2} Tf\n{} rg\n{:.2} {:.2} Td\n({}) Tj\nET\n",
            Self::font_resource(self.font),
            self.size,
            color_operands(self.text_color),
            x * PT_PER_MM,
            (height - y) * PT_PER_MM,
            escape_pdf_string(text)
        );
        self.current_page()?.push_str(&op);
        Ok(())
    }

    fn rect(&mut self, rect: Rect, paint: Paint) -> Result<(), ExportError> {
        let height = self.page_height()?;
        let operator = match paint {
            Paint::Fill => "f",
            Paint::Stroke => "S",
            Paint::FillStroke => "B",
        };
        let op = format!(
            "q\n{} rg\n{} RG\n{:.3} w\n{:.2} {:.2} {:.2} {:.2} re\n{}\nQ\n",
            color_operands(self.fill_color),
            color_operands(self.draw_color),
            self.line_width * PT_PER_MM,
            rect.x * PT_PER_MM,
            (height - rect.y - rect.height) * PT_PER_MM,
            rect.width * PT_PER_MM,
            rect.height * PT_PER_MM,
            operator
        );
        self.current_page()?.push_str(&op);
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn finish(&mut self) -> Result<Vec<u8>, ExportError> {
        let geometry = self
            .geometry
            .ok_or_else(|| ExportError::Engine("document not started".to_string()))?;
        let width_pt = geometry.width * PT_PER_MM;
        let height_pt = geometry.height * PT_PER_MM;
        let page_count = self.pages.len();

        let mut pdf = Vec::new();
        pdf.extend_from_slice(b"%PDF-1.4\n");
        pdf.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        let mut xref_positions: Vec<usize> = Vec::new();

        xref_positions.push(pdf.len());
        pdf.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

        // Pages object is written once all kids are known
        let pages_slot = xref_positions.len();
        xref_positions.push(0);

        let font_obj_start = 3 + page_count * 2;
        let font_resources = FontStyle::ALL
            .iter()
            .enumerate()
            .map(|(i, style)| format!("/{} {} 0 R", Self::font_resource(*style), font_obj_start + i))
            .collect::<Vec<_>>()
            .join(" ");

        let mut kids = Vec::with_capacity(page_count);
        for (i, stream) in self.pages.iter().enumerate() {
            let page_obj = 3 + i * 2;
            let content_obj = page_obj + 1;
            kids.push(format!("{} 0 R", page_obj));

            xref_positions.push(pdf.len());
            pdf.extend_from_slice(
                format!(
                    "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] /Contents {} 0 R /Resources << /Font << {} >> >> >>\nendobj\n",
                    page_obj, width_pt, height_pt, content_obj, font_resources
                )
                .as_bytes(),
            );

            xref_positions.push(pdf.len());
            pdf.extend_from_slice(
                format!(
                    "{} 0 obj\n<< /Length {} >>\nstream\n{}\nendstream\nendobj\n",
                    content_obj,
                    stream.len(),
                    stream
                )
                .as_bytes(),
            );
        }

        xref_positions[pages_slot] = pdf.len();
        pdf.extend_from_slice(
            format!(
                "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
                kids.join(" "),
                page_count
            )
            .as_bytes(),
        );

        for (i, style) in FontStyle::ALL.iter().enumerate() {
            xref_positions.push(pdf.len());
            pdf.extend_from_slice(
                format!(
                    "{} 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>\nendobj\n",
                    font_obj_start + i,
                    style.postscript_name()
                )
                .as_bytes(),
            );
        }

        let info_obj = font_obj_start + FontStyle::ALL.len();
        xref_positions.push(pdf.len());
        pdf.extend_from_slice(
            format!(
                "{} 0 obj\n<< /Title ({}) /Producer (numerology-report) >>\nendobj\n",
                info_obj,
                escape_pdf_string(&self.title)
            )
            .as_bytes(),
        );

        let xref_start = pdf.len();
        pdf.extend_from_slice(b"xref\n");
        pdf.extend_from_slice(format!("0 {}\n", xref_positions.len() + 1).as_bytes());
        pdf.extend_from_slice(b"0000000000 65535 f \n");
        for pos in &xref_positions {
            pdf.extend_from_slice(format!("{:010} 00000 n \n", pos).as_bytes());
        }

        pdf.extend_from_slice(b"trailer\n");
        pdf.extend_from_slice(
            format!(
                "<< /Size {} /Root 1 0 R /Info {} 0 R >>\n",
                xref_positions.len() + 1,
                info_obj
            )
            .as_bytes(),
        );
        pdf.extend_from_slice(b"startxref\n");
        pdf.extend_from_slice(format!("{}\n", xref_start).as_bytes());
        pdf.extend_from_slice(b"%%EOF\n");

        Ok(pdf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(engine: &mut PdfEngine) -> String {
        String::from_utf8_lossy(&engine.finish().unwrap()).into_owned()
    }

    #[test]
    fn test_escape_pdf_string() {
        assert_eq!(escape_pdf_string("a(b)c\\"), "a\\(b\\)c\\\\");
        assert_eq!(escape_pdf_string("×2"), "\\3272");
        assert_eq!(escape_pdf_string("• x"), "\\225 x");
        assert_eq!(escape_pdf_string("✓ ok"), "? ok");
    }

    #[test]
    fn test_document_structure() {
        let mut engine = PdfEngine::new().with_title("Numerology Report");
        engine.begin(&PageGeometry::default()).unwrap();
        engine.set_font(FontStyle::Bold, 12.0);
        engine.text(20.0, 20.0, "Hello").unwrap();
        engine.add_page().unwrap();
        engine.rect(Rect::new(10.0, 10.0, 20.0, 20.0), Paint::Fill).unwrap();

        let pdf = finished(&mut engine);
        assert!(pdf.starts_with("%PDF-1.4"));
        assert!(pdf.contains("/Count 2"));
        assert!(pdf.contains("/F2 12.00 Tf"));
        assert!(pdf.contains("(Hello) Tj"));
        assert!(pdf.contains("/BaseFont /Helvetica-BoldOblique"));
        assert!(pdf.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn test_y_axis_is_flipped() {
        let mut engine = PdfEngine::new();
        engine.begin(&PageGeometry::default()).unwrap();
        engine.text(0.0, 297.0, "bottom").unwrap();
        let pdf = finished(&mut engine);
        assert!(pdf.contains("0.00 0.00 Td"));
    }

    #[test]
    fn test_text_before_begin_fails() {
        let mut engine = PdfEngine::new();
        assert!(engine.text(0.0, 0.0, "x").is_err());
        assert!(engine.finish().is_err());
    }
}
