//! Table layout with automatic pagination
//!
//! A [`Table`] is described declaratively (theme, head, rows, per-column and
//! per-cell style overrides) and laid out by [`TableLayout`], which starts at
//! the cursor, breaks pages between rows (repeating the head), splits rows
//! taller than the room left on a page, and leaves the cursor directly under
//! the last row.

use crate::error::ExportError;
use crate::export::{DocumentEngine, Paint};
use crate::layout::font::{line_height, FontLibrary, FontStyle, PT_PER_MM};
use crate::layout::line_break::LineBreaker;
use crate::layout::pagination::PageCursor;
use crate::theme::Rgb;
use crate::Rect;
use log::{debug, warn};

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// Left edge of a run of `width` aligned against `x`
    pub fn left_edge(&self, x: f32, width: f32) -> f32 {
        match self {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    #[default]
    Top,
    Middle,
}

/// Built-in look of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableTheme {
    /// Coloured head, alternating body fill
    Striped,
    /// Coloured head, bordered cells
    Grid,
    /// No fills, no borders
    Plain,
}

/// Partial cell style; `None` fields inherit from the level below
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CellStyle {
    pub font_style: Option<FontStyle>,
    pub font_size: Option<f32>,
    pub text_color: Option<Rgb>,
    pub fill: Option<Rgb>,
    pub border: Option<Rgb>,
    pub border_width: Option<f32>,
    pub halign: Option<Align>,
}

impl CellStyle {
    /// `self` with every field set in `over` replaced
    fn overlay(self, over: &CellStyle) -> CellStyle {
        CellStyle {
            font_style: over.font_style.or(self.font_style),
            font_size: over.font_size.or(self.font_size),
            text_color: over.text_color.or(self.text_color),
            fill: over.fill.or(self.fill),
            border: over.border.or(self.border),
            border_width: over.border_width.or(self.border_width),
            halign: over.halign.or(self.halign),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub style: CellStyle,
}

impl Cell {
    pub fn styled(text: impl Into<String>, style: CellStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::styled(text, CellStyle::default())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::styled(text, CellStyle::default())
    }
}

/// Width and style for one column; `width: None` shares the leftover space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Column {
    pub width: Option<f32>,
    pub style: CellStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub theme: TableTheme,
    pub head: Option<Vec<Cell>>,
    pub body: Vec<Vec<Cell>>,
    /// Applies to every cell
    pub styles: CellStyle,
    /// Applies to head cells on top of the theme head style
    pub head_styles: CellStyle,
    pub columns: Vec<Column>,
    /// Inner cell padding, mm
    pub padding: f32,
    pub valign: VAlign,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl Table {
    pub fn new(theme: TableTheme) -> Self {
        Self {
            theme,
            head: None,
            body: Vec::new(),
            styles: CellStyle::default(),
            head_styles: CellStyle::default(),
            columns: Vec::new(),
            padding: 5.0 / PT_PER_MM,
            valign: VAlign::Top,
            margin_left: 20.0,
            margin_right: 20.0,
        }
    }

    pub fn head<I, C>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.head = Some(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn row<I, C>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.body.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn styles(mut self, styles: CellStyle) -> Self {
        self.styles = styles;
        self
    }

    pub fn head_styles(mut self, styles: CellStyle) -> Self {
        self.head_styles = styles;
        self
    }

    pub fn columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn valign(mut self, valign: VAlign) -> Self {
        self.valign = valign;
        self
    }

    pub fn margins(mut self, left: f32, right: f32) -> Self {
        self.margin_left = left;
        self.margin_right = right;
        self
    }

    fn column_count(&self) -> usize {
        let head = self.head.as_ref().map_or(0, Vec::len);
        let body = self.body.iter().map(Vec::len).max().unwrap_or(0);
        head.max(body).max(self.columns.len())
    }

    /// Resolved column widths for a page `page_width` wide
    pub fn column_widths(&self, page_width: f32) -> Vec<f32> {
        let count = self.column_count();
        let available = page_width - self.margin_left - self.margin_right;
        let column = |i: usize| self.columns.get(i).copied().unwrap_or_default();

        let fixed: f32 = (0..count).filter_map(|i| column(i).width).sum();
        let auto = (0..count).filter(|i| column(*i).width.is_none()).count();
        let share = if auto == 0 {
            0.0
        } else {
            ((available - fixed) / auto as f32).max(0.0)
        };

        (0..count).map(|i| column(i).width.unwrap_or(share)).collect()
    }

    fn theme_base(&self) -> CellStyle {
        let base = CellStyle {
            font_style: Some(FontStyle::Normal),
            font_size: Some(10.0),
            text_color: Some(Rgb(20, 20, 20)),
            halign: Some(Align::Left),
            ..CellStyle::default()
        };
        match self.theme {
            TableTheme::Grid => CellStyle {
                fill: Some(Rgb::WHITE),
                border: Some(Rgb(200, 200, 200)),
                border_width: Some(0.1),
                ..base
            },
            TableTheme::Striped | TableTheme::Plain => base,
        }
    }

    fn theme_head(&self) -> CellStyle {
        let fill = match self.theme {
            TableTheme::Striped => Some(Rgb(41, 128, 185)),
            TableTheme::Grid => Some(Rgb(26, 188, 156)),
            TableTheme::Plain => None,
        };
        CellStyle {
            fill,
            text_color: fill.map(|_| Rgb::WHITE),
            font_style: Some(FontStyle::Bold),
            ..CellStyle::default()
        }
    }

    fn theme_alternate(&self, row: usize) -> CellStyle {
        match self.theme {
            TableTheme::Striped if row % 2 == 1 => CellStyle {
                fill: Some(Rgb(245, 245, 245)),
                ..CellStyle::default()
            },
            _ => CellStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSection {
    Head,
    Body,
}

/// A cell that has just been drawn, handed to the cell hook
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawnCell {
    pub section: TableSection,
    pub row: usize,
    pub column: usize,
    pub rect: Rect,
}

/// Fully resolved style of one cell
#[derive(Debug, Clone, Copy)]
struct Resolved {
    font_style: FontStyle,
    font_size: f32,
    text_color: Rgb,
    fill: Option<Rgb>,
    border: Option<(Rgb, f32)>,
    halign: Align,
}

impl From<CellStyle> for Resolved {
    fn from(style: CellStyle) -> Self {
        Self {
            font_style: style.font_style.unwrap_or_default(),
            font_size: style.font_size.unwrap_or(10.0),
            text_color: style.text_color.unwrap_or(Rgb::BLACK),
            fill: style.fill,
            border: style
                .border
                .map(|color| (color, style.border_width.unwrap_or(0.1))),
            halign: style.halign.unwrap_or_default(),
        }
    }
}

#[derive(Clone)]
struct LaidOutCell {
    lines: Vec<String>,
    style: Resolved,
}

#[derive(Clone)]
struct LaidOutRow {
    section: TableSection,
    index: usize,
    cells: Vec<LaidOutCell>,
    height: f32,
    /// Later part of a row split across pages
    continued: bool,
}

impl LaidOutRow {
    /// Split into the part that fits in `room` and the rest. `None` when
    /// not even one line of every non-empty cell fits.
    fn split(&self, padding: f32, room: f32) -> Option<(LaidOutRow, LaidOutRow)> {
        let usable = room - 2.0 * padding;
        let mut first = Vec::with_capacity(self.cells.len());
        let mut rest = Vec::with_capacity(self.cells.len());
        let (mut first_height, mut rest_height) = (0.0_f32, 0.0_f32);

        for cell in &self.cells {
            let lh = line_height(cell.style.font_size);
            let take = ((usable / lh).floor().max(0.0) as usize).min(cell.lines.len());
            if take == 0 && !cell.lines.is_empty() {
                return None;
            }
            let (head, tail) = cell.lines.split_at(take);
            first_height = first_height.max(head.len() as f32 * lh + 2.0 * padding);
            rest_height = rest_height.max(tail.len() as f32 * lh + 2.0 * padding);
            first.push(LaidOutCell {
                lines: head.to_vec(),
                style: cell.style,
            });
            rest.push(LaidOutCell {
                lines: tail.to_vec(),
                style: cell.style,
            });
        }

        Some((
            LaidOutRow {
                cells: first,
                height: first_height,
                ..self.clone_shell()
            },
            LaidOutRow {
                cells: rest,
                height: rest_height,
                continued: true,
                ..self.clone_shell()
            },
        ))
    }

    fn clone_shell(&self) -> LaidOutRow {
        LaidOutRow {
            section: self.section,
            index: self.index,
            cells: Vec::new(),
            height: 0.0,
            continued: self.continued,
        }
    }
}

/// Lays tables out onto a document engine
pub struct TableLayout<'a> {
    fonts: &'a FontLibrary,
}

impl<'a> TableLayout<'a> {
    pub fn new(fonts: &'a FontLibrary) -> Self {
        Self { fonts }
    }

    /// Draw `table` from the cursor position; returns the y just below the
    /// last row. The cursor is left at that position, possibly on a later page.
    pub fn render(
        &self,
        table: &Table,
        engine: &mut dyn DocumentEngine,
        cursor: &mut PageCursor,
    ) -> Result<f32, ExportError> {
        self.render_with(table, engine, cursor, |_, _| Ok(()))
    }

    /// Like [`render`](Self::render), calling `hook` after every drawn cell
    pub fn render_with<H>(
        &self,
        table: &Table,
        engine: &mut dyn DocumentEngine,
        cursor: &mut PageCursor,
        mut hook: H,
    ) -> Result<f32, ExportError>
    where
        H: FnMut(&DrawnCell, &mut dyn DocumentEngine) -> Result<(), ExportError>,
    {
        let widths = table.column_widths(cursor.geometry().width);
        let head = table
            .head
            .as_ref()
            .map(|cells| self.lay_out_row(table, &widths, cells, TableSection::Head, 0));
        let body: Vec<LaidOutRow> = table
            .body
            .iter()
            .enumerate()
            .map(|(i, cells)| self.lay_out_row(table, &widths, cells, TableSection::Body, i))
            .collect();

        let head_height = head.as_ref().map_or(0.0, |h| h.height);
        let first_height = body.first().map_or(0.0, |r| r.height);
        let top = cursor.geometry().margin_top;

        if cursor.y() > top && !cursor.fits(head_height + first_height) {
            debug!("table moved to a new page before its first row");
            engine.add_page()?;
            cursor.break_page();
        }

        if let Some(head) = &head {
            self.draw_row(table, &widths, head, engine, cursor, &mut hook)?;
        }

        let page_top = top + head_height;
        let capacity = cursor.geometry().bottom_limit() - page_top;
        for row in &body {
            if row.height > capacity {
                self.draw_split_row(table, &widths, row, head.as_ref(), engine, cursor, &mut hook)?;
                continue;
            }
            if cursor.y() > page_top && !cursor.fits(row.height) {
                debug!("table row {} continues on page {}", row.index, cursor.page() + 1);
                self.next_page(table, &widths, head.as_ref(), engine, cursor, &mut hook)?;
            }
            self.draw_row(table, &widths, row, engine, cursor, &mut hook)?;
        }

        Ok(cursor.y())
    }

    fn next_page<H>(
        &self,
        table: &Table,
        widths: &[f32],
        head: Option<&LaidOutRow>,
        engine: &mut dyn DocumentEngine,
        cursor: &mut PageCursor,
        hook: &mut H,
    ) -> Result<(), ExportError>
    where
        H: FnMut(&DrawnCell, &mut dyn DocumentEngine) -> Result<(), ExportError>,
    {
        engine.add_page()?;
        cursor.break_page();
        if let Some(head) = head {
            self.draw_row(table, widths, head, engine, cursor, hook)?;
        }
        Ok(())
    }

    /// Draw a row taller than a page, carrying its remaining lines over to
    /// as many pages as it needs
    #[allow(clippy::too_many_arguments)]
    fn draw_split_row<H>(
        &self,
        table: &Table,
        widths: &[f32],
        row: &LaidOutRow,
        head: Option<&LaidOutRow>,
        engine: &mut dyn DocumentEngine,
        cursor: &mut PageCursor,
        hook: &mut H,
    ) -> Result<(), ExportError>
    where
        H: FnMut(&DrawnCell, &mut dyn DocumentEngine) -> Result<(), ExportError>,
    {
        let page_top = cursor.geometry().margin_top + head.map_or(0.0, |h| h.height);
        let mut pending = row.clone();
        loop {
            if cursor.fits(pending.height) {
                return self.draw_row(table, widths, &pending, engine, cursor, hook);
            }
            let room = cursor.geometry().bottom_limit() - cursor.y();
            match pending.split(table.padding, room) {
                Some((part, rest)) => {
                    self.draw_row(table, widths, &part, engine, cursor, hook)?;
                    pending = rest;
                }
                None if cursor.y() <= page_top => {
                    warn!(
                        "table row {} cannot fit a single line on a page, drawn unsplit",
                        row.index
                    );
                    return self.draw_row(table, widths, &pending, engine, cursor, hook);
                }
                None => {}
            }
            debug!("table row {} split onto page {}", row.index, cursor.page() + 1);
            self.next_page(table, widths, head, engine, cursor, hook)?;
        }
    }

    fn lay_out_row(
        &self,
        table: &Table,
        widths: &[f32],
        cells: &[Cell],
        section: TableSection,
        index: usize,
    ) -> LaidOutRow {
        let breaker = LineBreaker::new(self.fonts);
        let mut height: f32 = 0.0;

        let laid: Vec<LaidOutCell> = widths
            .iter()
            .enumerate()
            .map(|(col, width)| {
                let cell = cells.get(col);
                let column = table.columns.get(col).copied().unwrap_or_default();
                let mut style = table.theme_base().overlay(&table.styles);
                style = match section {
                    TableSection::Head => style
                        .overlay(&table.theme_head())
                        .overlay(&table.head_styles),
                    TableSection::Body => style
                        .overlay(&table.theme_alternate(index))
                        .overlay(&column.style),
                };
                if let Some(cell) = cell {
                    style = style.overlay(&cell.style);
                }
                let style = Resolved::from(style);

                let text = cell.map_or("", |c| c.text.as_str());
                let inner = (width - 2.0 * table.padding).max(0.0);
                let lines = breaker.wrap(text, style.font_style, style.font_size, inner);
                height = height
                    .max(lines.len() as f32 * line_height(style.font_size) + 2.0 * table.padding);

                LaidOutCell { lines, style }
            })
            .collect();

        LaidOutRow {
            section,
            index,
            cells: laid,
            height,
            continued: false,
        }
    }

    fn draw_row<H>(
        &self,
        table: &Table,
        widths: &[f32],
        row: &LaidOutRow,
        engine: &mut dyn DocumentEngine,
        cursor: &mut PageCursor,
        hook: &mut H,
    ) -> Result<(), ExportError>
    where
        H: FnMut(&DrawnCell, &mut dyn DocumentEngine) -> Result<(), ExportError>,
    {
        let y = cursor.y();
        let mut x = table.margin_left;

        for (col, (cell, width)) in row.cells.iter().zip(widths).enumerate() {
            let rect = Rect::new(x, y, *width, row.height);
            let style = &cell.style;

            let paint = match (style.fill, style.border) {
                (Some(_), Some(_)) => Some(Paint::FillStroke),
                (Some(_), None) => Some(Paint::Fill),
                (None, Some(_)) => Some(Paint::Stroke),
                (None, None) => None,
            };
            if let Some(paint) = paint {
                if let Some(fill) = style.fill {
                    engine.set_fill_color(fill);
                }
                if let Some((color, line_width)) = style.border {
                    engine.set_draw_color(color);
                    engine.set_line_width(line_width);
                }
                engine.rect(rect, paint)?;
            }

            engine.set_font(style.font_style, style.font_size);
            engine.set_text_color(style.text_color);
            let lh = line_height(style.font_size);
            let block = cell.lines.len() as f32 * lh;
            let top = match table.valign {
                VAlign::Top => y + table.padding,
                VAlign::Middle => y + (row.height - block) / 2.0,
            };
            let ascent = style.font_size / PT_PER_MM * 0.8;
            let metrics = self.fonts.get(style.font_style);

            for (i, line) in cell.lines.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let tw = metrics.text_width(line, style.font_size);
                let tx = match style.halign {
                    Align::Left => x + table.padding,
                    Align::Center => x + (width - tw) / 2.0,
                    Align::Right => x + width - table.padding - tw,
                };
                engine.text(tx, top + i as f32 * lh + ascent, line)?;
            }

            if !row.continued {
                hook(
                    &DrawnCell {
                        section: row.section,
                        row: row.index,
                        column: col,
                        rect,
                    },
                    engine,
                )?;
            }
            x += width;
        }

        cursor.advance(row.height);
        Ok(())
    }
}
