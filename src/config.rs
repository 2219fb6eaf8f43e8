//! Report configuration: page geometry, section thresholds, artifact naming

use crate::layout::PageGeometry;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Cursor positions (mm from the page top) past which a section starts on a
/// new page. Taller sections use lower values.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SectionThresholds {
    pub grid: f32,
    pub compatibility: f32,
    pub summary: f32,
    pub lines: f32,
    pub remedies: f32,
    pub remedy_entry: f32,
    pub planet_remedies: f32,
    pub luck: f32,
    pub name: f32,
    pub rules: f32,
}

impl Default for SectionThresholds {
    fn default() -> Self {
        Self {
            grid: 200.0,
            compatibility: 200.0,
            summary: 230.0,
            lines: 200.0,
            remedies: 230.0,
            remedy_entry: 270.0,
            planet_remedies: 200.0,
            luck: 200.0,
            name: 220.0,
            rules: 230.0,
        }
    }
}

impl SectionThresholds {
    fn all(&self) -> [f32; 10] {
        [
            self.grid,
            self.compatibility,
            self.summary,
            self.lines,
            self.remedies,
            self.remedy_entry,
            self.planet_remedies,
            self.luck,
            self.name,
            self.rules,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub page: PageGeometry,
    pub thresholds: SectionThresholds,
    /// Leading part of the artifact file name
    pub artifact_prefix: String,
    /// Artifact extension, without the dot
    pub artifact_extension: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page: PageGeometry::default(),
            thresholds: SectionThresholds::default(),
            artifact_prefix: "Numerology".to_string(),
            artifact_extension: "pdf".to_string(),
        }
    }
}

impl ReportConfig {
    /// Load from a JSON file; omitted keys keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        let config: ReportConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: display,
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let page = &self.page;
        if page.content_width() <= 0.0 {
            return Err(ConfigError::Invalid(
                "margins leave no content width".to_string(),
            ));
        }
        if page.margin_top >= page.bottom_limit() {
            return Err(ConfigError::Invalid(
                "margins leave no content height".to_string(),
            ));
        }
        if let Some(t) = self
            .thresholds
            .all()
            .into_iter()
            .find(|t| *t <= page.margin_top || *t > page.height)
        {
            return Err(ConfigError::Invalid(format!(
                "threshold {} lies outside the page body",
                t
            )));
        }
        if self.artifact_prefix.trim().is_empty() || self.artifact_extension.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "artifact prefix and extension must be set".to_string(),
            ));
        }
        Ok(())
    }
}
