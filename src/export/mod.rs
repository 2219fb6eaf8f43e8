//! Document engines and the exported artifact

mod pdf;
mod recording;

pub use pdf::PdfEngine;
pub use recording::{DrawOp, RecordedText, RecordingEngine};

use crate::error::ExportError;
use crate::layout::{FontStyle, PageGeometry};
use crate::theme::Rgb;
use crate::Rect;
use chrono::NaiveDate;
use serde::Serialize;

/// How a rectangle is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Paint {
    Fill,
    Stroke,
    FillStroke,
}

/// A stateful drawing surface in page coordinates (mm, y grows downwards,
/// text positioned at its baseline).
///
/// Implementations must not produce any bytes unless `finish` succeeds.
pub trait DocumentEngine {
    /// Start a document with one empty page
    fn begin(&mut self, page: &PageGeometry) -> Result<(), ExportError>;

    fn add_page(&mut self) -> Result<(), ExportError>;

    fn set_font(&mut self, style: FontStyle, size: f32);

    fn set_text_color(&mut self, color: Rgb);

    fn set_fill_color(&mut self, color: Rgb);

    fn set_draw_color(&mut self, color: Rgb);

    fn set_line_width(&mut self, width: f32);

    /// Draw one line of text with its left baseline point at (x, y)
    fn text(&mut self, x: f32, y: f32, text: &str) -> Result<(), ExportError>;

    fn rect(&mut self, rect: Rect, paint: Paint) -> Result<(), ExportError>;

    /// Number of pages begun so far
    fn page_count(&self) -> usize;

    /// Serialize the finished document
    fn finish(&mut self) -> Result<Vec<u8>, ExportError>;
}

/// A finished, downloadable document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub pages: usize,
}

/// `<prefix>_<subject>_<YYYY-MM-DD>.<ext>`, each whitespace run in the
/// subject collapsed to one underscore
pub fn artifact_file_name(prefix: &str, subject: &str, date: NaiveDate, extension: &str) -> String {
    let mut normalized = String::with_capacity(subject.len());
    let mut in_space = false;
    for c in subject.chars() {
        if c.is_whitespace() {
            if !in_space {
                normalized.push('_');
            }
            in_space = true;
        } else {
            normalized.push(c);
            in_space = false;
        }
    }
    format!(
        "{}_{}_{}.{}",
        prefix,
        normalized,
        date.format("%Y-%m-%d"),
        extension
    )
}
