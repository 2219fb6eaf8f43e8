//! Error taxonomy for analysis intake and document export

use thiserror::Error;

/// Message shown when export is requested before any analysis succeeded
pub const NOTHING_TO_EXPORT_NOTICE: &str = "No data available to export. Please calculate first.";

/// Message shown for any failure inside the document engine
pub const EXPORT_FAILED_NOTICE: &str = "Failed to export PDF. Please try again.";

/// Message shown when the service exchange itself breaks down
pub const SERVICE_UNREACHABLE_NOTICE: &str = "An error occurred. Please try again.";

/// Errors raised while turning a request into a report model
#[derive(Debug, Error)]
pub enum ReportError {
    /// A required input was missing or invalid; no request was issued
    #[error("{0}")]
    InputRejected(String),

    /// The service could not be reached or reported an unsuccessful result
    #[error("{0}")]
    Service(String),

    /// The response body was not a valid report
    #[error("malformed analysis response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// The response parsed but violates a model invariant
    #[error("inconsistent analysis response: {0}")]
    Inconsistent(String),

    /// The request/response exchange itself failed
    #[error(transparent)]
    Unreachable(#[from] ServiceError),
}

/// Transport-level failure reported by an analysis service
#[derive(Debug, Error)]
#[error("analysis service unreachable: {0}")]
pub struct ServiceError(pub String);

impl ReportError {
    /// User-facing text for the error banner
    pub fn notice(&self) -> String {
        match self {
            ReportError::InputRejected(msg) | ReportError::Service(msg) => {
                format!("Error: {}", msg)
            }
            ReportError::MalformedResponse(_)
            | ReportError::Inconsistent(_)
            | ReportError::Unreachable(_) => {
                format!("Error: {}", SERVICE_UNREACHABLE_NOTICE)
            }
        }
    }
}

/// Errors raised by the export operation
#[derive(Debug, Error)]
pub enum ExportError {
    /// Export requested while no model is held
    #[error("nothing to export")]
    NothingToExport,

    /// The document engine could not be started
    #[error("document engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The document engine failed while producing the artifact
    #[error("document engine failed: {0}")]
    Engine(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// User-facing text for the blocking notice
    pub fn notice(&self) -> &'static str {
        match self {
            ExportError::NothingToExport => NOTHING_TO_EXPORT_NOTICE,
            _ => EXPORT_FAILED_NOTICE,
        }
    }
}

/// Errors raised while applying view ops to a live view
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    /// An op addressed a mount point the view does not contain
    #[error("view has no mount point with id {0:?}")]
    MissingMount(String),
}
