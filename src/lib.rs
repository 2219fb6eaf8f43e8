//! Numerology report core: rendering and pagination
//!
//! One analysis response is turned into a [`ReportDataModel`] and then
//! rendered twice:
//! - on screen, as a pure projection to view ops ([`render::project`])
//! - as a paginated document, through a [`DocumentEngine`] ([`compose::compose`])
//!
//! [`ReportSession`] holds the current report and gates export behind it.

pub mod badge;
pub mod compose;
pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod render;
pub mod session;
pub mod theme;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmReport;

// Re-export primary types
pub use config::{ConfigError, ReportConfig, SectionThresholds};
pub use error::{ExportError, ReportError, ServiceError, ViewError};
pub use export::{Artifact, DocumentEngine, PdfEngine, RecordingEngine};
pub use model::{AnalysisRequest, Gender, ReportDataModel};
pub use render::{MountPoint, ScreenFrame, ViewNode, ViewOp, ViewTree};
pub use session::{AnalysisService, ReportSession, SessionUpdate};

/// Page rectangle, mm, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}
