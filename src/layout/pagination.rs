//! Page geometry and the vertical layout cursor

use serde::Deserialize;

/// Page size and margins, in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: 210.0, // A4
            height: 297.0,
            margin_top: 20.0,
            margin_bottom: 10.0,
            margin_left: 20.0,
            margin_right: 20.0,
        }
    }
}

impl PageGeometry {
    /// Usable content width
    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Lowest y content may reach
    pub fn bottom_limit(&self) -> f32 {
        self.height - self.margin_bottom
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }
}

/// Cursor over a sequence of pages. `y` only grows within a page and is
/// reset to the top margin on every break.
#[derive(Debug, Clone, Copy)]
pub struct PageCursor {
    geometry: PageGeometry,
    y: f32,
    /// 1-based index of the current page
    page: usize,
}

impl PageCursor {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            y: geometry.margin_top,
            page: 1,
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    /// Start a new page with the cursor at the top margin
    pub fn break_page(&mut self) {
        self.page += 1;
        self.y = self.geometry.margin_top;
    }

    /// Move to the position a sub-layout ended at. Never moves backwards on
    /// the same page.
    pub fn resume_at(&mut self, y: f32) {
        self.y = self.y.max(y);
    }

    /// Break when the cursor is already past `threshold`. Returns whether a
    /// break happened.
    pub fn ensure(&mut self, threshold: f32) -> bool {
        if self.y > threshold {
            self.break_page();
            true
        } else {
            false
        }
    }

    /// Keep a block of `height` together: break when the cursor is past
    /// `threshold` or the block would cross the bottom margin. A block taller
    /// than a whole page is laid out from the top without further breaks.
    pub fn reserve(&mut self, height: f32, threshold: f32) -> bool {
        let at_top = self.y <= self.geometry.margin_top;
        if self.y > threshold || (!at_top && self.y + height > self.geometry.bottom_limit()) {
            self.break_page();
            true
        } else {
            false
        }
    }

    /// Whether a row of `height` still fits on the current page
    pub fn fits(&self, height: f32) -> bool {
        self.y + height <= self.geometry.bottom_limit()
    }
}
