// Domain errors - Error types for the domain layer

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::domain::model::ToolFailure;
use crate::domain::rules::RangeViolation;

/// The probe tool ran but its metadata could not be used
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{message}")]
pub struct ProbeError {
    /// Short description of what went wrong
    pub message: String,
    /// Whatever the tool wrote to its error stream
    pub diagnostics: String,
}

impl ProbeError {
    pub fn new(message: impl Into<String>, diagnostics: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            diagnostics: diagnostics.into(),
        }
    }
}

/// Reason a trim request was rejected before the trim tool was started
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("input not found: {}", path.display())]
    InputMissing { path: PathBuf },

    #[error("could not read video metadata: {0}")]
    Probe(ProbeError),

    #[error("invalid cut range: {0}")]
    Range(RangeViolation),
}

/// Failures raised by ports and the trim interactor
///
/// Every variant maps onto exactly one [`crate::domain::model::TrimOutcome`]
/// variant, see its `From<DomainError>` implementation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Input file does not exist
    #[error("input not found: {}", path.display())]
    InputMissing { path: PathBuf },

    /// Probe tool ran, metadata unusable
    #[error("probe failed: {0}")]
    ProbeFailed(ProbeError),

    /// Requested range violates `0 <= start < end <= duration`
    #[error("invalid cut range: {0}")]
    RangeInvalid(RangeViolation),

    /// External tool executable could not be located or executed
    #[error("{tool} was not found (tried `{}`)", program.display())]
    ToolMissing { tool: String, program: PathBuf },

    /// Trim tool ran and failed
    #[error("{0}")]
    ToolFailed(ToolFailure),

    /// Anything uncategorized
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl DomainError {
    /// Whether the trim tool had already been started when this error occurred
    pub fn tool_started(&self) -> bool {
        matches!(self, DomainError::ToolFailed(_))
    }
}
