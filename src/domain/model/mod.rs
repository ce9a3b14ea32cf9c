// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::errors::{DomainError, ValidationError};

/// One trim action: copy `[start_seconds, end_seconds)` of `input_path` into `output_path`
///
/// Paths are caller supplied. The range is checked against a fresh probe on
/// every call and is never assumed to be valid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrimRequest {
    pub input_path: PathBuf,
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub output_path: PathBuf,
}

impl TrimRequest {
    pub fn new(
        input_path: impl Into<PathBuf>,
        start_seconds: f64,
        end_seconds: f64,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            start_seconds,
            end_seconds,
            output_path: output_path.into(),
        }
    }

    /// Length of the requested span in seconds
    pub fn span_seconds(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }
}

/// Container-level metadata read from a media file
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MediaProbeResult {
    pub duration_seconds: f64,
}

impl MediaProbeResult {
    pub fn new(duration_seconds: f64) -> Self {
        Self { duration_seconds }
    }
}

/// Captured result of a trim tool run that did not succeed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolFailure {
    /// `None` when the process was terminated by a signal or a timeout
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolFailure {
    /// Last non-empty line of stderr, usually the most specific diagnostic
    pub fn summary(&self) -> Option<&str> {
        self.stderr.lines().rev().map(str::trim).find(|line| !line.is_empty())
    }
}

impl fmt::Display for ToolFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.exit_code {
            Some(code) => write!(f, "media tool exited with code {}", code)?,
            None => write!(f, "media tool was terminated without an exit code")?,
        }
        if let Some(summary) = self.summary() {
            write!(f, ": {}", summary)?;
        }
        Ok(())
    }
}

/// Terminal result of a trim request
///
/// Only `Success` means the output file is usable. For every other variant
/// the contents of the output path are undefined.
///
/// Stream copy cannot start between keyframes: a successful trim begins on the
/// keyframe at or before the requested start, so the output can be slightly
/// longer than `end - start`. That is expected behaviour.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TrimOutcome {
    Success { output_path: PathBuf },
    ValidationFailure { reason: ValidationError },
    ToolNotFound { tool: String, program: PathBuf },
    ToolExecutionFailure(ToolFailure),
    UnexpectedFailure { message: String },
}

impl TrimOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TrimOutcome::Success { .. })
    }

    /// Output path, only when the trim succeeded
    pub fn output_path(&self) -> Option<&Path> {
        match self {
            TrimOutcome::Success { output_path } => Some(output_path),
            _ => None,
        }
    }
}

impl From<DomainError> for TrimOutcome {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::InputMissing { path } => TrimOutcome::ValidationFailure {
                reason: ValidationError::InputMissing { path },
            },
            DomainError::ProbeFailed(probe) => TrimOutcome::ValidationFailure {
                reason: ValidationError::Probe(probe),
            },
            DomainError::RangeInvalid(violation) => TrimOutcome::ValidationFailure {
                reason: ValidationError::Range(violation),
            },
            DomainError::ToolMissing { tool, program } => {
                TrimOutcome::ToolNotFound { tool, program }
            }
            DomainError::ToolFailed(failure) => TrimOutcome::ToolExecutionFailure(failure),
            DomainError::Unexpected(message) => TrimOutcome::UnexpectedFailure { message },
        }
    }
}

impl fmt::Display for TrimOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrimOutcome::Success { output_path } => {
                write!(f, "trimmed video written to {}", output_path.display())
            }
            TrimOutcome::ValidationFailure { reason } => write!(f, "{}", reason),
            TrimOutcome::ToolNotFound { tool, program } => {
                write!(f, "{} was not found (tried `{}`)", tool, program.display())
            }
            TrimOutcome::ToolExecutionFailure(failure) => write!(f, "{}", failure),
            TrimOutcome::UnexpectedFailure { message } => {
                write!(f, "unexpected failure: {}", message)
            }
        }
    }
}
