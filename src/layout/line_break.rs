//! Line breaking for wrapped document text

use crate::layout::font::{FontLibrary, FontStyle};
use unicode_linebreak::{linebreaks, BreakOpportunity};
use unicode_segmentation::UnicodeSegmentation;

/// Wraps text to a width using UAX #14 break opportunities
pub struct LineBreaker<'a> {
    fonts: &'a FontLibrary,
}

impl<'a> LineBreaker<'a> {
    pub fn new(fonts: &'a FontLibrary) -> Self {
        Self { fonts }
    }

    /// Split `text` into lines no wider than `max_width` mm. Always returns at
    /// least one line; an empty input gives one empty line.
    pub fn wrap(&self, text: &str, style: FontStyle, size: f32, max_width: f32) -> Vec<String> {
        let metrics = self.fonts.get(style);
        let measure = |s: &str| metrics.text_width(s.trim_end(), size);

        let mut lines = Vec::new();
        let mut line = String::new();
        let mut segment_start = 0;

        for (idx, opportunity) in linebreaks(text) {
            let segment = &text[segment_start..idx];
            segment_start = idx;

            if !line.is_empty() && measure(&[line.as_str(), segment].concat()) > max_width {
                lines.push(line.trim_end().to_string());
                line.clear();
            }

            if line.is_empty() && measure(segment) > max_width {
                // A single word wider than the line: break between graphemes
                for grapheme in segment.graphemes(true) {
                    if !line.is_empty() && measure(&format!("{}{}", line, grapheme)) > max_width {
                        lines.push(std::mem::take(&mut line));
                    }
                    line.push_str(grapheme);
                }
            } else {
                line.push_str(segment);
            }

            if opportunity == BreakOpportunity::Mandatory && idx < text.len() {
                lines.push(line.trim_end().to_string());
                line.clear();
            }
        }

        lines.push(line.trim_end().to_string());
        lines
    }
}
