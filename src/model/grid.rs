//! Loshu grid cells and complete-line descriptors

use serde::de::{self, Deserializer};
use serde::Deserialize;

/// Fixed digit placement of the Loshu square, row-major
pub const LOSHU_LAYOUT: [[u8; 3]; 3] = [[4, 9, 2], [3, 5, 7], [8, 1, 6]];

/// One tile of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoshuCell {
    /// Nominal digit, always the one `LOSHU_LAYOUT` puts at this position
    pub digit: u8,
    pub present: bool,
    /// How often the digit occurs; values above one get a multiplicity marker
    pub count: u32,
}

impl LoshuCell {
    /// "×N" marker text, only for cells that occur more than once
    pub fn multiplicity_marker(&self) -> Option<String> {
        if self.count > 1 {
            Some(format!("×{}", self.count))
        } else {
            None
        }
    }
}

/// The 3×3 grid in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoshuGrid {
    rows: [[LoshuCell; 3]; 3],
}

impl LoshuGrid {
    /// Build a grid from per-digit occurrence counts (index 0 unused).
    /// A digit is present whenever its count is non-zero.
    pub fn from_counts(counts: &[u32; 10]) -> Self {
        let rows = LOSHU_LAYOUT.map(|row| {
            row.map(|digit| {
                let count = counts[digit as usize];
                LoshuCell {
                    digit,
                    present: count > 0,
                    count,
                }
            })
        });
        Self { rows }
    }

    pub fn rows(&self) -> &[[LoshuCell; 3]; 3] {
        &self.rows
    }

    /// Cell at a grid position, `None` outside the 3×3 bounds
    pub fn cell(&self, row: usize, col: usize) -> Option<&LoshuCell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// All nine cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &LoshuCell> {
        self.rows.iter().flat_map(|row| row.iter())
    }
}

#[derive(Deserialize)]
struct WireCell {
    value: serde_json::Value,
    #[serde(default)]
    present: bool,
    #[serde(default)]
    count: u32,
}

/// Present cells carry the digit repeated `count` times ("55"), missing
/// cells carry the bare digit. Either way the first digit is the nominal one.
fn nominal_digit(value: &serde_json::Value) -> Option<u8> {
    match value {
        serde_json::Value::Number(n) => {
            let n = n.as_u64()?;
            n.to_string().chars().next()?.to_digit(10).map(|d| d as u8)
        }
        serde_json::Value::String(s) => s.trim().chars().next()?.to_digit(10).map(|d| d as u8),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for LoshuGrid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire: Vec<Vec<WireCell>> = Vec::deserialize(deserializer)?;
        if wire.len() != 3 || wire.iter().any(|row| row.len() != 3) {
            return Err(de::Error::custom("loshu grid must be 3x3"));
        }

        let mut rows = LoshuGrid::from_counts(&[0; 10]).rows;
        for (r, wire_row) in wire.iter().enumerate() {
            for (c, wire_cell) in wire_row.iter().enumerate() {
                let expected = LOSHU_LAYOUT[r][c];
                let digit = nominal_digit(&wire_cell.value).ok_or_else(|| {
                    de::Error::custom(format!("loshu cell ({}, {}) has no digit", r, c))
                })?;
                if digit != expected {
                    return Err(de::Error::custom(format!(
                        "loshu cell ({}, {}) holds {} but the layout fixes {}",
                        r, c, digit, expected
                    )));
                }
                rows[r][c] = LoshuCell {
                    digit: expected,
                    present: wire_cell.present,
                    count: wire_cell.count,
                };
            }
        }

        Ok(Self { rows })
    }
}

/// Orientation of a complete line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Horizontal,
    Vertical,
    Diagonal,
}

impl LineKind {
    /// Lowercase tag, also used as a style class
    pub fn as_str(&self) -> &'static str {
        match self {
            LineKind::Horizontal => "horizontal",
            LineKind::Vertical => "vertical",
            LineKind::Diagonal => "diagonal",
        }
    }

    /// Capitalised label for tables
    pub fn label(&self) -> &'static str {
        match self {
            LineKind::Horizontal => "Horizontal",
            LineKind::Vertical => "Vertical",
            LineKind::Diagonal => "Diagonal",
        }
    }
}

/// A line of the grid whose digits are all present
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoshuLine {
    #[serde(rename = "type")]
    pub kind: LineKind,
    pub name: String,
    #[serde(rename = "numbers")]
    pub digits: Vec<u8>,
    #[serde(default)]
    pub description: String,
}

impl LoshuLine {
    /// Digits joined with dashes, e.g. "4-5-6"
    pub fn digits_label(&self) -> String {
        self.digits
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// All complete lines, in the order the analysis reported them
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoshuLines {
    #[serde(default)]
    pub all: Vec<LoshuLine>,
}

impl LoshuLines {
    pub const EMPTY_MESSAGE: &'static str = "No complete lines found in your Loshu Grid. \
         Complete lines form when all numbers in a pattern are present.";

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_counts_follows_layout() {
        let mut counts = [0u32; 10];
        counts[5] = 2;
        counts[1] = 1;
        let grid = LoshuGrid::from_counts(&counts);

        let center = grid.cell(1, 1).unwrap();
        assert_eq!(center.digit, 5);
        assert!(center.present);
        assert_eq!(center.multiplicity_marker().as_deref(), Some("×2"));

        let bottom_mid = grid.cell(2, 1).unwrap();
        assert_eq!(bottom_mid.digit, 1);
        assert_eq!(bottom_mid.multiplicity_marker(), None);

        assert!(!grid.cell(0, 0).unwrap().present);
        assert_eq!(grid.cells().count(), 9);
    }

    #[test]
    fn test_deserialize_wire_grid() {
        let json = r#"[
            [{"value": 4, "present": false, "count": 0}, {"value": "99", "present": true, "count": 2}, {"value": "2", "present": true, "count": 1}],
            [{"value": 3, "present": false, "count": 0}, {"value": "5", "present": true, "count": 1}, {"value": 7, "present": false, "count": 0}],
            [{"value": 8, "present": false, "count": 0}, {"value": "1", "present": true, "count": 1}, {"value": 6, "present": false, "count": 0}]
        ]"#;
        let grid: LoshuGrid = serde_json::from_str(json).unwrap();
        let nine = grid.cell(0, 1).unwrap();
        assert_eq!(nine.digit, 9);
        assert_eq!(nine.count, 2);
        assert!(!grid.cell(0, 0).unwrap().present);
    }

    #[test]
    fn test_deserialize_rejects_misplaced_digit() {
        let json = r#"[
            [{"value": 9}, {"value": 4}, {"value": 2}],
            [{"value": 3}, {"value": 5}, {"value": 7}],
            [{"value": 8}, {"value": 1}, {"value": 6}]
        ]"#;
        assert!(serde_json::from_str::<LoshuGrid>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_wrong_shape() {
        let json = r#"[[{"value": 4}, {"value": 9}, {"value": 2}]]"#;
        assert!(serde_json::from_str::<LoshuGrid>(json).is_err());
    }

    #[test]
    fn test_line_labels() {
        let line = LoshuLine {
            kind: LineKind::Diagonal,
            name: "Golden Line".to_string(),
            digits: vec![2, 5, 8],
            description: String::new(),
        };
        assert_eq!(line.digits_label(), "2-5-8");
        assert_eq!(line.kind.label(), "Diagonal");
        assert_eq!(line.kind.as_str(), "diagonal");
    }
}
