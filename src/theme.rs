//! Semantic tones shared by the screen and document renderers
//!
//! Both renderers pick colours only through [`Tone`], so one data item always
//! gets the same visual category on screen and in the exported document.

use crate::model::{LineKind, RuleOutcome};
use serde::Serialize;

/// 8-bit RGB colour; defaults to black
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Components scaled to 0.0..=1.0
    pub fn unit(&self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

/// Visual category of a rendered item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tone {
    /// Plain body text
    Body,
    /// Headings and the report title
    Accent,
    /// Secondary text and "None" placeholders
    Muted,
    /// Digit occurs in the grid
    Present,
    /// Digit absent from the grid
    Missing,
    /// Friends, lucky numbers, followed rules
    Positive,
    /// Non-friends, bad numbers, contradicted rules
    Negative,
    /// Neutral compatibility and neutral numbers
    Neutral,
    /// Remedy card titles
    Remedy,
    /// "Nothing to remedy" messages
    AllClear,
    LineHorizontal,
    LineVertical,
    LineDiagonal,
}

impl Tone {
    /// Text colour used in the exported document
    pub fn text_color(&self) -> Rgb {
        match self {
            Tone::Body => Rgb::BLACK,
            Tone::Accent => Rgb(102, 126, 234),
            Tone::Muted => Rgb(100, 100, 100),
            Tone::Present => Rgb(180, 83, 9),
            Tone::Missing => Rgb(156, 163, 175),
            Tone::Positive => Rgb(75, 175, 80),
            Tone::Negative => Rgb(244, 67, 54),
            Tone::Neutral => Rgb(255, 152, 0),
            Tone::Remedy => Rgb(211, 47, 47),
            Tone::AllClear => Rgb(0, 105, 92),
            Tone::LineHorizontal => Rgb(6, 95, 70),
            Tone::LineVertical => Rgb(30, 64, 175),
            Tone::LineDiagonal => Rgb(146, 64, 14),
        }
    }
}

/// Fill, text and border for a grid cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPalette {
    pub fill: Rgb,
    pub text: Rgb,
    pub border: Rgb,
    /// Border width in mm
    pub border_width: f32,
}

/// Grid cell palette, chosen by the present flag alone
pub fn grid_cell_palette(present: bool) -> CellPalette {
    if present {
        CellPalette {
            fill: Rgb(255, 243, 205),
            text: Tone::Present.text_color(),
            border: Rgb(251, 191, 36),
            border_width: 0.5,
        }
    } else {
        CellPalette {
            fill: Rgb(243, 244, 246),
            text: Tone::Missing.text_color(),
            border: Rgb(209, 213, 219),
            border_width: 0.3,
        }
    }
}

/// Tone of a grid tile
pub fn grid_tone(present: bool) -> Tone {
    if present {
        Tone::Present
    } else {
        Tone::Missing
    }
}

/// Tone of a complete line's type tag
pub fn line_tone(kind: LineKind) -> Tone {
    match kind {
        LineKind::Horizontal => Tone::LineHorizontal,
        LineKind::Vertical => Tone::LineVertical,
        LineKind::Diagonal => Tone::LineDiagonal,
    }
}

/// Tone of a rule list heading and its entries
pub fn rule_tone(outcome: RuleOutcome) -> Tone {
    match outcome {
        RuleOutcome::Followed => Tone::Positive,
        RuleOutcome::Contradicted => Tone::Negative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_follows_present_flag() {
        assert_eq!(grid_cell_palette(true).text, Tone::Present.text_color());
        assert_eq!(grid_cell_palette(false).text, Tone::Missing.text_color());
        assert!(grid_cell_palette(true).border_width > grid_cell_palette(false).border_width);
    }

    #[test]
    fn test_unit_components() {
        assert_eq!(Rgb::WHITE.unit(), (1.0, 1.0, 1.0));
        assert_eq!(Rgb::BLACK.unit(), (0.0, 0.0, 0.0));
    }
}
