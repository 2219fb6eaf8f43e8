//! Report data model: the analysis result both renderers project from

mod grid;
mod name;
mod remedies;

#[cfg(test)]
pub(crate) mod fixtures;

pub use grid::{LineKind, LoshuCell, LoshuGrid, LoshuLine, LoshuLines, LOSHU_LAYOUT};
pub use name::{LetterValue, NameAnalysis, NameBreakdown, RuleEntry, RuleOutcome, RuleStatus};
pub use remedies::{condition_clause, ConditionalRemedy, PlanetRemedy, RemedyTier, Remedies};

use crate::error::ReportError;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Placeholder the analysis uses for "no non-friendly numbers"
pub const NON_FRIENDS_SENTINEL: &str = "--------";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// The two core numbers that carry compatibility data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Driver,
    Conductor,
}

impl NumberKind {
    pub const ALL: [NumberKind; 2] = [NumberKind::Driver, NumberKind::Conductor];

    pub fn label(&self) -> &'static str {
        match self {
            NumberKind::Driver => "Driver",
            NumberKind::Conductor => "Conductor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreNumbers {
    pub driver: u32,
    pub conductor: u32,
    pub kua: u32,
}

impl CoreNumbers {
    pub fn get(&self, kind: NumberKind) -> u32 {
        match kind {
            NumberKind::Driver => self.driver,
            NumberKind::Conductor => self.conductor,
        }
    }
}

/// Friendly/non-friendly/neutral groups for one core number, pre-formatted upstream
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Compatibility {
    pub planet: String,
    pub friends_raw: String,
    pub non_friends_raw: String,
    pub neutral_raw: String,
}

impl Compatibility {
    /// Non-friends text, `None` when empty or the sentinel placeholder
    pub fn non_friends(&self) -> Option<&str> {
        let raw = self.non_friends_raw.trim();
        if raw.is_empty() || raw == NON_FRIENDS_SENTINEL {
            None
        } else {
            Some(raw)
        }
    }

    fn is_blank(&self) -> bool {
        self.planet.is_empty()
            && self.friends_raw.is_empty()
            && self.non_friends_raw.is_empty()
            && self.neutral_raw.is_empty()
    }
}

/// An absent key, `null` and `{}` all mean "no compatibility data"
fn compatibility_or_none<'de, D>(deserializer: D) -> Result<Option<Compatibility>, D::Error>
where
    D: Deserializer<'de>,
{
    let compat = Option::<Compatibility>::deserialize(deserializer)?;
    Ok(compat.filter(|c| !c.is_blank()))
}

/// Projected luck for one year
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LuckFactor {
    pub year: i32,
    #[serde(with = "day_month_year")]
    pub date: NaiveDate,
    /// Personal-year/driver pair, e.g. "5,3"
    pub combination: String,
    pub luck_factor: String,
}

impl LuckFactor {
    pub fn date_label(&self) -> String {
        self.date.format(day_month_year::FORMAT).to_string()
    }
}

mod day_month_year {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer};

    pub const FORMAT: &str = "%d/%m/%Y";

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, FORMAT).map_err(de::Error::custom)
    }
}

/// Shape of a successful analysis body on the wire
#[derive(Deserialize)]
struct WireReport {
    name: String,
    date_of_birth: NaiveDate,
    gender: Gender,
    driver: u32,
    conductor: u32,
    kua: u32,
    loshu_grid: LoshuGrid,
    #[serde(default)]
    loshu_lines: LoshuLines,
    #[serde(default)]
    present_numbers: Vec<u8>,
    #[serde(default)]
    missing_numbers: Vec<u8>,
    #[serde(default, deserialize_with = "compatibility_or_none")]
    driver_compatibility: Option<Compatibility>,
    #[serde(default, deserialize_with = "compatibility_or_none")]
    conductor_compatibility: Option<Compatibility>,
    #[serde(default)]
    lucky_numbers: Vec<u8>,
    #[serde(default)]
    bad_numbers: Vec<u8>,
    #[serde(default)]
    neutral_numbers: Vec<u8>,
    #[serde(default)]
    remedies_part1: Vec<ConditionalRemedy>,
    #[serde(default)]
    remedies_part2: Vec<ConditionalRemedy>,
    #[serde(default)]
    remedies_part3: Vec<PlanetRemedy>,
    #[serde(default)]
    luck_factors: Vec<LuckFactor>,
    #[serde(default)]
    name_analysis: Option<NameAnalysis>,
}

/// The complete analysis result. Never mutated once built; a new analysis
/// replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "WireReport")]
pub struct ReportDataModel {
    pub subject_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub numbers: CoreNumbers,
    pub grid: LoshuGrid,
    pub lines: LoshuLines,
    pub present_numbers: Vec<u8>,
    pub missing_numbers: Vec<u8>,
    pub driver_compatibility: Option<Compatibility>,
    pub conductor_compatibility: Option<Compatibility>,
    pub lucky_numbers: Vec<u8>,
    pub bad_numbers: Vec<u8>,
    pub neutral_numbers: Vec<u8>,
    pub remedies: Remedies,
    pub luck_factors: Vec<LuckFactor>,
    pub name_analysis: Option<NameAnalysis>,
}

impl From<WireReport> for ReportDataModel {
    fn from(wire: WireReport) -> Self {
        Self {
            subject_name: wire.name,
            date_of_birth: wire.date_of_birth,
            gender: wire.gender,
            numbers: CoreNumbers {
                driver: wire.driver,
                conductor: wire.conductor,
                kua: wire.kua,
            },
            grid: wire.loshu_grid,
            lines: wire.loshu_lines,
            present_numbers: wire.present_numbers,
            missing_numbers: wire.missing_numbers,
            driver_compatibility: wire.driver_compatibility,
            conductor_compatibility: wire.conductor_compatibility,
            lucky_numbers: wire.lucky_numbers,
            bad_numbers: wire.bad_numbers,
            neutral_numbers: wire.neutral_numbers,
            remedies: Remedies {
                missing: wire.remedies_part1,
                yantra: wire.remedies_part2,
                planetary: wire.remedies_part3,
            },
            luck_factors: wire.luck_factors,
            name_analysis: wire.name_analysis,
        }
    }
}

/// Response envelope: `success` plus either an error or the report fields
#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(flatten)]
    body: serde_json::Map<String, serde_json::Value>,
}

impl ReportDataModel {
    /// Parse an Analysis Service response body. An unsuccessful response is
    /// rejected as a whole; no partial model is ever produced.
    pub fn from_response(body: &str) -> Result<Self, ReportError> {
        let envelope: Envelope = serde_json::from_str(body)?;
        if !envelope.success {
            let message = envelope
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| "Analysis failed".to_string());
            return Err(ReportError::Service(message));
        }

        let model: ReportDataModel =
            serde_json::from_value(serde_json::Value::Object(envelope.body))?;
        model.validate()?;
        Ok(model)
    }

    /// Cross-field invariants the wire format cannot express
    pub fn validate(&self) -> Result<(), ReportError> {
        let digit_sets = [
            ("present_numbers", &self.present_numbers),
            ("missing_numbers", &self.missing_numbers),
            ("lucky_numbers", &self.lucky_numbers),
            ("bad_numbers", &self.bad_numbers),
            ("neutral_numbers", &self.neutral_numbers),
        ];
        for (field, digits) in digit_sets {
            if let Some(d) = digits.iter().find(|d| !(1..=9).contains(*d)) {
                return Err(ReportError::Inconsistent(format!(
                    "{} contains {}, outside 1-9",
                    field, d
                )));
            }
        }

        if let Some(d) = self
            .present_numbers
            .iter()
            .find(|d| self.missing_numbers.contains(d))
        {
            return Err(ReportError::Inconsistent(format!(
                "{} is both present and missing",
                d
            )));
        }

        Ok(())
    }

    pub fn compatibility(&self, kind: NumberKind) -> Option<&Compatibility> {
        match kind {
            NumberKind::Driver => self.driver_compatibility.as_ref(),
            NumberKind::Conductor => self.conductor_compatibility.as_ref(),
        }
    }

    /// Date of birth as "Month D, YYYY"
    pub fn birth_date_label(&self) -> String {
        long_date(self.date_of_birth)
    }
}

/// "January 5, 1990"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Digits joined with ", "
pub fn join_digits(digits: &[u8]) -> String {
    digits
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parameters submitted for analysis, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub name: String,
    pub date_of_birth: String,
    pub gender: Option<Gender>,
}

/// A request that passed input validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRequest {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
}

impl AnalysisRequest {
    pub fn validate(&self) -> Result<ValidRequest, ReportError> {
        let gender = self
            .gender
            .ok_or_else(|| ReportError::InputRejected("Please select a gender".to_string()))?;

        let name = self.name.trim();
        if name.is_empty() {
            return Err(ReportError::InputRejected("Name cannot be empty".to_string()));
        }

        let date_of_birth = NaiveDate::parse_from_str(self.date_of_birth.trim(), "%Y-%m-%d")
            .map_err(|_| {
                ReportError::InputRejected("Please enter a valid date of birth".to_string())
            })?;

        Ok(ValidRequest {
            name: name.to_string(),
            date_of_birth,
            gender,
        })
    }
}
