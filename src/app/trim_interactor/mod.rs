// Trim interactor - Probe, validate and invoke the stream copy

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::errors::DomainError;
use crate::domain::model::{MediaProbeResult, TrimOutcome, TrimRequest};
use crate::domain::rules::RangeValidator;
use crate::ports::{ExecutePort, FsPort, ProbePort};

/// Interactor for the trim use case
///
/// Each call is single-shot: a fresh probe, one validation, at most one tool
/// invocation, no retries.
pub struct TrimInteractor {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    fs_port: Arc<dyn FsPort>,
    validator: RangeValidator,
}

impl TrimInteractor {
    /// Create new trim interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        fs_port: Arc<dyn FsPort>,
    ) -> Self {
        Self {
            probe_port,
            execute_port,
            fs_port,
            validator: RangeValidator::default(),
        }
    }

    pub fn with_validator(mut self, validator: RangeValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Probe the duration of an existing input file
    ///
    /// Fails with `InputMissing` before touching the tool when the file does
    /// not exist.
    pub async fn probe_duration(&self, input_path: &Path) -> Result<MediaProbeResult, DomainError> {
        if !self.fs_port.file_exists(input_path).await? {
            return Err(DomainError::InputMissing {
                path: input_path.to_path_buf(),
            });
        }
        self.probe_port.probe_duration(input_path).await
    }

    /// Trim `[start, end)` of the input into the output path
    ///
    /// Only `TrimOutcome::Success` leaves a usable file. If the trim tool
    /// started and then failed, whatever it wrote to the output path is
    /// removed before returning. The output starts on the keyframe at or
    /// before `start`, which is inherent to stream copy.
    pub async fn trim(&self, request: &TrimRequest) -> TrimOutcome {
        match self.run(request).await {
            Ok(()) => {
                info!(output = %request.output_path.display(), "Trim completed");
                TrimOutcome::Success {
                    output_path: request.output_path.clone(),
                }
            }
            Err(err) => {
                error!(input = %request.input_path.display(), "Trim failed: {}", err);
                TrimOutcome::from(err)
            }
        }
    }

    async fn run(&self, request: &TrimRequest) -> Result<(), DomainError> {
        let probe = self.probe_duration(&request.input_path).await?;
        info!(
            input = %request.input_path.display(),
            duration = probe.duration_seconds,
            "Probed input"
        );

        self.validator
            .validate(request.start_seconds, request.end_seconds, probe.duration_seconds)
            .map_err(DomainError::RangeInvalid)?;

        if let Err(err) = self.execute_port.stream_copy(request).await {
            if err.tool_started() {
                self.discard_partial_output(&request.output_path).await;
            }
            return Err(err);
        }
        Ok(())
    }

    async fn discard_partial_output(&self, output_path: &Path) {
        match self.fs_port.remove_file(output_path).await {
            Ok(true) => warn!(output = %output_path.display(), "Removed partial output"),
            Ok(false) => {}
            Err(err) => warn!(output = %output_path.display(), "Could not remove partial output: {}", err),
        }
    }
}

#[cfg(test)]
mod tests;
