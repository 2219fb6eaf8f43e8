//! An engine that records draw operations instead of rendering them

use super::{DocumentEngine, Paint};
use crate::error::ExportError;
use crate::layout::{FontStyle, PageGeometry};
use crate::theme::Rgb;
use crate::Rect;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawOp {
    Begin { width: f32, height: f32 },
    AddPage,
    SetFont { style: FontStyle, size: f32 },
    SetTextColor { color: Rgb },
    SetFillColor { color: Rgb },
    SetDrawColor { color: Rgb },
    SetLineWidth { width: f32 },
    Text { x: f32, y: f32, text: String },
    Rect { x: f32, y: f32, width: f32, height: f32, paint: Paint },
}

/// A text op together with the graphics state it was drawn with
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedText {
    pub page: usize,
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub style: FontStyle,
    pub size: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    OnBegin,
    AfterTexts(usize),
}

/// Records every call; `finish` returns the op log as JSON
#[derive(Debug, Default)]
pub struct RecordingEngine {
    ops: Vec<DrawOp>,
    texts: Vec<RecordedText>,
    pages: usize,
    style: FontStyle,
    size: f32,
    color: Rgb,
    failure: Option<Failure>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self {
            size: 16.0,
            ..Self::default()
        }
    }

    /// An engine that cannot be started
    pub fn unavailable() -> Self {
        Self {
            failure: Some(Failure::OnBegin),
            ..Self::new()
        }
    }

    /// An engine that fails once `count` texts have been drawn
    pub fn failing_after(count: usize) -> Self {
        Self {
            failure: Some(Failure::AfterTexts(count)),
            ..Self::new()
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn texts(&self) -> &[RecordedText] {
        &self.texts
    }

    /// First recorded text equal to `text`
    pub fn find_text(&self, text: &str) -> Option<&RecordedText> {
        self.texts.iter().find(|t| t.text == text)
    }

    /// Whether any call at all reached the engine
    pub fn is_untouched(&self) -> bool {
        self.ops.is_empty()
    }

    fn require_page(&self) -> Result<(), ExportError> {
        if self.pages == 0 {
            Err(ExportError::Engine("no page has been started".to_string()))
        } else {
            Ok(())
        }
    }
}

impl DocumentEngine for RecordingEngine {
    fn begin(&mut self, page: &PageGeometry) -> Result<(), ExportError> {
        self.ops.push(DrawOp::Begin {
            width: page.width,
            height: page.height,
        });
        if self.failure == Some(Failure::OnBegin) {
            return Err(ExportError::EngineUnavailable(
                "recording engine disabled".to_string(),
            ));
        }
        self.pages = 1;
        Ok(())
    }

    fn add_page(&mut self) -> Result<(), ExportError> {
        self.require_page()?;
        self.ops.push(DrawOp::AddPage);
        self.pages += 1;
        Ok(())
    }

    fn set_font(&mut self, style: FontStyle, size: f32) {
        self.style = style;
        self.size = size;
        self.ops.push(DrawOp::SetFont { style, size });
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.color = color;
        self.ops.push(DrawOp::SetTextColor { color });
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.ops.push(DrawOp::SetFillColor { color });
    }

    fn set_draw_color(&mut self, color: Rgb) {
        self.ops.push(DrawOp::SetDrawColor { color });
    }

    fn set_line_width(&mut self, width: f32) {
        self.ops.push(DrawOp::SetLineWidth { width });
    }

    fn text(&mut self, x: f32, y: f32, text: &str) -> Result<(), ExportError> {
        self.require_page()?;
        if let Some(Failure::AfterTexts(limit)) = self.failure {
            if self.texts.len() >= limit {
                return Err(ExportError::Engine("simulated engine failure".to_string()));
            }
        }
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
        });
        self.texts.push(RecordedText {
            page: self.pages,
            x,
            y,
            text: text.to_string(),
            style: self.style,
            size: self.size,
            color: self.color,
        });
        Ok(())
    }

    fn rect(&mut self, rect: Rect, paint: Paint) -> Result<(), ExportError> {
        self.require_page()?;
        self.ops.push(DrawOp::Rect {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            paint,
        });
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn finish(&mut self) -> Result<Vec<u8>, ExportError> {
        self.require_page()?;
        serde_json::to_vec(&self.ops).map_err(|e| ExportError::Engine(e.to_string()))
    }
}
