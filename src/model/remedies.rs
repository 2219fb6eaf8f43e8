//! Remedy tiers

use serde::Deserialize;
use std::borrow::Cow;

/// A condition/remedy pair. Tier 1 leads with the condition, tier 2 with the remedy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConditionalRemedy {
    pub condition: String,
    pub remedy: String,
}

/// Planet remedies for one missing digit
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlanetRemedy {
    #[serde(rename = "number")]
    pub digit: u8,
    pub planet: String,
    #[serde(default)]
    pub remedies: Vec<String>,
}

/// The three independent remedy tiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Remedies {
    pub missing: Vec<ConditionalRemedy>,
    pub yantra: Vec<ConditionalRemedy>,
    pub planetary: Vec<PlanetRemedy>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemedyTier {
    /// Part 1, keyed by missing numbers
    Missing,
    /// Part 2, yantra remedies
    Yantra,
    /// Part 3, planet table
    Planetary,
}

impl RemedyTier {
    pub fn empty_message(&self) -> &'static str {
        match self {
            RemedyTier::Missing => "No missing numbers! Your Loshu Grid is complete.",
            RemedyTier::Yantra => "No Yantra-based remedies applicable.",
            RemedyTier::Planetary => "No missing numbers! No planet-based remedies needed.",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            RemedyTier::Missing => "Part 1: Based on your Loshu Grid",
            RemedyTier::Yantra => "Part 2: Yantra-Based Remedies",
            RemedyTier::Planetary => "Part 3: Planet-Based Remedies (Tabular Format)",
        }
    }
}

/// Read a condition as an "If ..." clause. Already-prefixed text is returned as is.
pub fn condition_clause(condition: &str) -> Cow<'_, str> {
    if condition.starts_with("If ") {
        Cow::Borrowed(condition)
    } else {
        Cow::Owned(format!("If {}", condition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_clause_prefixes_once() {
        assert_eq!(condition_clause("9 is missing"), "If 9 is missing");
        assert_eq!(condition_clause("If 9 is missing"), "If 9 is missing");

        let twice = condition_clause(&condition_clause("6 is missing")).into_owned();
        assert_eq!(twice, "If 6 is missing");
    }

    #[test]
    fn test_planet_remedy_wire_names() {
        let json = r#"{"number": 8, "planet": "Saturn", "remedies": ["Offer black cloth"]}"#;
        let remedy: PlanetRemedy = serde_json::from_str(json).unwrap();
        assert_eq!(remedy.digit, 8);
        assert_eq!(remedy.remedies.len(), 1);
    }

    #[test]
    fn test_tier_messages_differ() {
        let tiers = [RemedyTier::Missing, RemedyTier::Yantra, RemedyTier::Planetary];
        for (i, a) in tiers.iter().enumerate() {
            for b in &tiers[i + 1..] {
                assert_ne!(a.empty_message(), b.empty_message());
            }
        }
    }
}
