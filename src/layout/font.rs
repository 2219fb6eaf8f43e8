//! Font metrics for document layout
//!
//! Widths are the standard Helvetica AFM advances in 1/1000 em. Lengths
//! handed out by this module are in millimetres.

use rustc_hash::FxHashMap;
use serde::Serialize;

/// Points per millimetre
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Line height as a multiple of the font size
pub const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// Weight/slant variant of the document font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    /// Base-14 PostScript name
    pub fn postscript_name(&self) -> &'static str {
        match self {
            FontStyle::Normal => "Helvetica",
            FontStyle::Bold => "Helvetica-Bold",
            FontStyle::Italic => "Helvetica-Oblique",
            FontStyle::BoldItalic => "Helvetica-BoldOblique",
        }
    }

    pub const ALL: [FontStyle; 4] = [
        FontStyle::Normal,
        FontStyle::Bold,
        FontStyle::Italic,
        FontStyle::BoldItalic,
    ];
}

/// Printable ASCII (32..=126), regular weight
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // space../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    278, 278, 584, 584, 584, 556, 1015, // :;<=>?@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    278, 278, 278, 469, 556, 333, // [\]^_`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
    334, 260, 334, 584, // {|}~
];

/// Printable ASCII (32..=126), bold weight
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Advance widths for one font
#[derive(Debug, Clone)]
pub struct FontMetrics {
    /// Width of printable ASCII characters, indexed from the space
    pub char_widths: Vec<f32>,
    /// Width for anything outside the table
    pub default_width: f32,
}

impl FontMetrics {
    pub fn new(char_widths: Vec<f32>, default_width: f32) -> Self {
        Self {
            char_widths,
            default_width,
        }
    }

    fn from_afm(table: &[u16; 95]) -> Self {
        Self::new(table.iter().map(|w| *w as f32).collect(), 556.0)
    }

    /// Advance of a character in 1/1000 em
    pub fn width(&self, c: char) -> f32 {
        match c {
            ' '..='~' => self
                .char_widths
                .get(c as usize - ' ' as usize)
                .copied()
                .unwrap_or(self.default_width),
            '×' => 584.0,
            '•' => 350.0,
            '\n' | '\r' => 0.0,
            _ => self.default_width,
        }
    }

    /// Width of a string in millimetres at `size` points
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: f32 = text.chars().map(|c| self.width(c)).sum();
        units / 1000.0 * size / PT_PER_MM
    }
}

/// Height of one text line in millimetres at `size` points
pub fn line_height(size: f32) -> f32 {
    size * LINE_HEIGHT_FACTOR / PT_PER_MM
}

/// Metrics for every style of the document font
#[derive(Debug, Clone)]
pub struct FontLibrary {
    fonts: FxHashMap<FontStyle, FontMetrics>,
    fallback: FontMetrics,
}

impl Default for FontLibrary {
    fn default() -> Self {
        let regular = FontMetrics::from_afm(&HELVETICA);
        let bold = FontMetrics::from_afm(&HELVETICA_BOLD);

        // Oblique faces share the upright advances
        let mut fonts = FxHashMap::default();
        fonts.insert(FontStyle::Normal, regular.clone());
        fonts.insert(FontStyle::Italic, regular.clone());
        fonts.insert(FontStyle::Bold, bold.clone());
        fonts.insert(FontStyle::BoldItalic, bold);

        Self {
            fonts,
            fallback: regular,
        }
    }
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the metrics used for a style
    pub fn set(&mut self, style: FontStyle, metrics: FontMetrics) {
        self.fonts.insert(style, metrics);
    }

    pub fn get(&self, style: FontStyle) -> &FontMetrics {
        self.fonts.get(&style).unwrap_or(&self.fallback)
    }

    pub fn text_width(&self, text: &str, style: FontStyle, size: f32) -> f32 {
        self.get(style).text_width(text, size)
    }
}
