//! Name analysis: letter values and naming-rule outcomes

use serde::de::{self, Deserializer};
use serde::Deserialize;

/// One entry of a letter-by-letter breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterValue {
    Letter { letter: char, value: u32 },
    /// Word separator; carries no value
    Space,
}

impl LetterValue {
    /// Glyph shown in place of a space
    pub const SEPARATOR: &'static str = "•";
}

#[derive(Deserialize)]
struct WireLetter {
    letter: String,
    #[serde(default)]
    value: serde_json::Value,
}

impl<'de> Deserialize<'de> for LetterValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = WireLetter::deserialize(deserializer)?;
        let letter = match wire.letter.chars().next() {
            Some(c) if !c.is_whitespace() => c,
            _ => return Ok(LetterValue::Space),
        };
        let value = wire
            .value
            .as_u64()
            .ok_or_else(|| de::Error::custom(format!("letter {:?} has no numeric value", letter)))?;
        Ok(LetterValue::Letter {
            letter,
            value: value as u32,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NameBreakdown {
    #[serde(rename = "breakdown", default)]
    pub letters: Vec<LetterValue>,
}

/// Status tag attached by the rule evaluator; drives styling only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    Good,
    Excellent,
    Bad,
    Warning,
    Suggestion,
    #[serde(other)]
    Other,
}

impl RuleStatus {
    pub fn as_class(&self) -> &'static str {
        match self {
            RuleStatus::Good => "good",
            RuleStatus::Excellent => "excellent",
            RuleStatus::Bad => "bad",
            RuleStatus::Warning => "warning",
            RuleStatus::Suggestion => "suggestion",
            RuleStatus::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleEntry {
    #[serde(rename = "rule")]
    pub label: String,
    pub status: RuleStatus,
    pub description: String,
}

/// Which of the two rule lists an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleOutcome {
    Followed,
    Contradicted,
}

impl RuleOutcome {
    pub fn heading(&self) -> &'static str {
        match self {
            RuleOutcome::Followed => "Rules Followed:",
            RuleOutcome::Contradicted => "Rules Contradicted:",
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            RuleOutcome::Followed => "No rules followed yet",
            RuleOutcome::Contradicted => "✓ All rules are followed! Great name choice!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NameAnalysis {
    pub first_name: String,
    pub first_name_value: u32,
    #[serde(default)]
    pub first_name_breakdown: NameBreakdown,
    pub full_name: String,
    pub full_name_value: u32,
    #[serde(default)]
    pub full_name_breakdown: NameBreakdown,
    #[serde(default)]
    pub followed_rules: Vec<RuleEntry>,
    #[serde(default)]
    pub contradicted_rules: Vec<RuleEntry>,
}

impl NameAnalysis {
    pub fn rules(&self, outcome: RuleOutcome) -> &[RuleEntry] {
        match outcome {
            RuleOutcome::Followed => &self.followed_rules,
            RuleOutcome::Contradicted => &self.contradicted_rules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_entry_has_no_value() {
        let json = r#"{"breakdown": [
            {"letter": "A", "value": 1},
            {"letter": " ", "value": "-"},
            {"letter": "B", "value": 2}
        ]}"#;
        let breakdown: NameBreakdown = serde_json::from_str(json).unwrap();
        assert_eq!(
            breakdown.letters,
            vec![
                LetterValue::Letter { letter: 'A', value: 1 },
                LetterValue::Space,
                LetterValue::Letter { letter: 'B', value: 2 },
            ]
        );
    }

    #[test]
    fn test_letter_without_value_is_rejected() {
        let json = r#"{"letter": "A", "value": "-"}"#;
        assert!(serde_json::from_str::<LetterValue>(json).is_err());
    }

    #[test]
    fn test_unknown_status_tag() {
        let json = r#"{"rule": "Rule 3", "status": "meh", "description": "x"}"#;
        let entry: RuleEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.status, RuleStatus::Other);
        assert_eq!(entry.label, "Rule 3");
    }
}
