//! Badge builders for numeric collections
//!
//! A badge is the uniform unit both renderers use for a number group: the
//! screen turns it into a tagged node, the document joins the texts into one
//! coloured line. An empty input always yields a single "None" placeholder.

use crate::theme::Tone;
use std::fmt::Display;

/// Text of the empty-group placeholder
pub const NONE_LABEL: &str = "None";

/// Semantic group a badge belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeCategory {
    Friends,
    NonFriends,
    Neutral,
    Lucky,
    Bad,
    NeutralNumber,
    Missing,
    LineDigit,
}

impl BadgeCategory {
    pub fn tone(&self) -> Tone {
        match self {
            BadgeCategory::Friends | BadgeCategory::Lucky => Tone::Positive,
            BadgeCategory::NonFriends | BadgeCategory::Bad | BadgeCategory::Missing => {
                Tone::Negative
            }
            BadgeCategory::Neutral | BadgeCategory::NeutralNumber => Tone::Neutral,
            BadgeCategory::LineDigit => Tone::Accent,
        }
    }

    /// Element class shared by every badge of this family
    pub fn base_class(&self) -> &'static str {
        match self {
            BadgeCategory::Friends | BadgeCategory::NonFriends | BadgeCategory::Neutral => {
                "number-badge"
            }
            BadgeCategory::Lucky | BadgeCategory::Bad | BadgeCategory::NeutralNumber => {
                "summary-number"
            }
            BadgeCategory::Missing => "missing-number-badge",
            BadgeCategory::LineDigit => "line-number-badge",
        }
    }

    /// Category-specific modifier class, if any
    pub fn modifier_class(&self) -> Option<&'static str> {
        match self {
            BadgeCategory::Friends => Some("friends"),
            BadgeCategory::NonFriends => Some("non-friends"),
            BadgeCategory::Neutral => Some("neutral"),
            BadgeCategory::Lucky => Some("lucky"),
            BadgeCategory::Bad => Some("bad"),
            BadgeCategory::NeutralNumber => Some("neutral-num"),
            BadgeCategory::Missing | BadgeCategory::LineDigit => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Badge {
    Value { text: String, category: BadgeCategory },
    /// Explicit empty state for a group with no members
    Placeholder,
}

impl Badge {
    pub fn text(&self) -> &str {
        match self {
            Badge::Value { text, .. } => text,
            Badge::Placeholder => NONE_LABEL,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Badge::Value { category, .. } => category.tone(),
            Badge::Placeholder => Tone::Muted,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Badge::Placeholder)
    }
}

/// One badge per label, or a lone placeholder for an empty input
pub fn badges<L: Display>(labels: &[L], category: BadgeCategory) -> Vec<Badge> {
    if labels.is_empty() {
        return vec![Badge::Placeholder];
    }
    labels
        .iter()
        .map(|label| Badge::Value {
            text: label.to_string(),
            category,
        })
        .collect()
}

/// A single badge carrying pre-formatted group text; blank text is a placeholder
pub fn raw_badge(raw: Option<&str>, category: BadgeCategory) -> Badge {
    match raw.map(str::trim) {
        Some(text) if !text.is_empty() => Badge::Value {
            text: text.to_string(),
            category,
        },
        _ => Badge::Placeholder,
    }
}

/// Badge texts joined with ", " for single-line document output
pub fn joined(badges: &[Badge]) -> String {
    badges
        .iter()
        .map(Badge::text)
        .collect::<Vec<_>>()
        .join(", ")
}
