//! Report session: owns the current report and drives both renderers
//!
//! The session holds at most one [`ReportDataModel`]. A successful analysis
//! replaces it; a failed one leaves it in place. Screen updates come back
//! as [`ScreenFrame`]s for the caller to apply, and export goes through
//! whatever [`DocumentEngine`] the caller supplies.

use crate::compose;
use crate::config::ReportConfig;
use crate::error::{ExportError, ReportError, ServiceError};
use crate::export::{artifact_file_name, Artifact, DocumentEngine};
use crate::model::{AnalysisRequest, ReportDataModel, ValidRequest};
use crate::render::{project, MountPoint, ScreenFrame};
use chrono::NaiveDate;
use log::{info, warn};

/// Source of analysis responses
pub trait AnalysisService {
    /// Submit a validated request and return the raw response body
    fn analyze(&mut self, request: &ValidRequest) -> Result<String, ServiceError>;
}

/// View ops produced by one session action, plus the error that ended it
#[derive(Debug)]
pub struct SessionUpdate {
    pub frame: ScreenFrame,
    pub error: Option<ReportError>,
}

impl SessionUpdate {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    fn failed(mut frame: ScreenFrame, error: ReportError) -> Self {
        frame.set_text(MountPoint::ErrorBanner, error.notice());
        frame.set_visible(MountPoint::ErrorBanner, true);
        Self {
            frame,
            error: Some(error),
        }
    }
}

#[derive(Debug, Default)]
pub struct ReportSession {
    config: ReportConfig,
    current: Option<ReportDataModel>,
}

impl ReportSession {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            current: None,
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// The report both renderers currently work from
    pub fn current(&self) -> Option<&ReportDataModel> {
        self.current.as_ref()
    }

    /// Validate `request`, send it to `service` and take in the response.
    /// Rejected input never reaches the service.
    pub fn submit(
        &mut self,
        service: &mut dyn AnalysisService,
        request: &AnalysisRequest,
    ) -> SessionUpdate {
        let valid = match request.validate() {
            Ok(valid) => valid,
            Err(err) => {
                warn!("request rejected: {}", err);
                return SessionUpdate::failed(ScreenFrame::new(), err);
            }
        };

        match service.analyze(&valid) {
            Ok(body) => self.receive(&body),
            Err(err) => {
                warn!("analysis service failed: {}", err);
                SessionUpdate::failed(Self::cleared(), err.into())
            }
        }
    }

    /// Take in a raw analysis response. On success the held report is
    /// replaced and the results are shown; otherwise the banner is shown.
    pub fn receive(&mut self, body: &str) -> SessionUpdate {
        let mut frame = Self::cleared();
        match ReportDataModel::from_response(body) {
            Ok(model) => {
                info!(
                    "analysis accepted for {} (driver {}, conductor {})",
                    model.subject_name, model.numbers.driver, model.numbers.conductor
                );
                frame.extend(project(&model));
                frame.set_visible(MountPoint::Results, true);
                self.current = Some(model);
                SessionUpdate { frame, error: None }
            }
            Err(err) => {
                warn!("analysis rejected: {}", err);
                SessionUpdate::failed(frame, err)
            }
        }
    }

    /// Hide results and banner. The held report stays exportable.
    pub fn reset(&self) -> ScreenFrame {
        Self::cleared()
    }

    fn cleared() -> ScreenFrame {
        let mut frame = ScreenFrame::new();
        frame.set_visible(MountPoint::ErrorBanner, false);
        frame.set_visible(MountPoint::Results, false);
        frame
    }

    /// Compose the held report onto `engine` and package the result as an
    /// artifact named after the subject and `today`.
    pub fn export(
        &self,
        engine: &mut dyn DocumentEngine,
        today: NaiveDate,
    ) -> Result<Artifact, ExportError> {
        let Some(model) = &self.current else {
            warn!("export requested with no report held");
            return Err(ExportError::NothingToExport);
        };

        let result = compose::compose(model, engine, &self.config).and_then(|pages| {
            let bytes = engine.finish()?;
            Ok(Artifact {
                file_name: artifact_file_name(
                    &self.config.artifact_prefix,
                    &model.subject_name,
                    today,
                    &self.config.artifact_extension,
                ),
                bytes,
                pages,
            })
        });

        match &result {
            Ok(artifact) => info!(
                "exported {} ({} pages, {} bytes)",
                artifact.file_name,
                artifact.pages,
                artifact.bytes.len()
            ),
            Err(err) => warn!("export failed: {}", err),
        }
        result
    }
}
