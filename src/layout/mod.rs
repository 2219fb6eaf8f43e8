//! Document layout primitives: fonts, wrapping, page cursor, tables

pub mod font;
mod line_break;
mod pagination;
mod table;

pub use font::{line_height, FontLibrary, FontMetrics, FontStyle};
pub use line_break::LineBreaker;
pub use pagination::{PageCursor, PageGeometry};
pub use table::{
    Align, Cell, CellStyle, Column, DrawnCell, Table, TableLayout, TableSection, TableTheme,
    VAlign,
};
