//! FFprobe adapter for media duration probing
//!
//! Runs `ffprobe -v error -show_entries format=duration -of json file:<path>` and
//! reads the container-level duration from its JSON output.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::adapters::process::{file_url, RunError, ToolCommand};
use crate::domain::errors::{DomainError, ProbeError};
use crate::domain::model::MediaProbeResult;
use crate::ports::ProbePort;

const TOOL_NAME: &str = "ffprobe";

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: Option<FfprobeFormat>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<DurationField>,
}

/// ffprobe prints numbers as strings; accept either
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DurationField {
    Text(String),
    Number(f64),
}

/// FFprobe-based probe adapter
pub struct FfprobeAdapter {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl FfprobeAdapter {
    /// Create new FFprobe adapter
    pub fn new(program: impl Into<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    fn build_command(&self, file_path: &Path) -> ToolCommand {
        ToolCommand::new(&self.program)
            .args(["-v", "error", "-show_entries", "format=duration", "-of", "json"])
            .arg(file_url(file_path))
            .timeout(self.timeout)
    }
}

/// Extract the duration from ffprobe's JSON stdout
///
/// `stderr` is attached to the error as diagnostics.
pub fn parse_duration(stdout: &str, stderr: &str) -> Result<MediaProbeResult, ProbeError> {
    let parsed: FfprobeOutput = serde_json::from_str(stdout).map_err(|e| {
        ProbeError::new(format!("ffprobe output is not valid JSON: {}", e), stderr.trim())
    })?;

    let field = parsed
        .format
        .and_then(|format| format.duration)
        .ok_or_else(|| ProbeError::new("ffprobe reported no container duration", stderr.trim()))?;

    let duration = match field {
        DurationField::Number(value) => value,
        DurationField::Text(text) => text.trim().parse::<f64>().map_err(|_| {
            ProbeError::new(format!("unparsable duration {:?}", text), stderr.trim())
        })?,
    };

    if !duration.is_finite() || duration < 0.0 {
        return Err(ProbeError::new(
            format!("invalid duration {}", duration),
            stderr.trim(),
        ));
    }

    Ok(MediaProbeResult::new(duration))
}

#[async_trait]
impl ProbePort for FfprobeAdapter {
    async fn probe_duration(&self, file_path: &Path) -> Result<MediaProbeResult, DomainError> {
        let command = self.build_command(file_path);
        let output = command.run().await.map_err(|err| match err {
            RunError::NotFound { program, .. } => DomainError::ToolMissing {
                tool: TOOL_NAME.to_string(),
                program,
            },
            RunError::TimedOut { .. } => DomainError::ProbeFailed(ProbeError::new(err.to_string(), "")),
            RunError::Io { .. } => DomainError::Unexpected(err.to_string()),
        })?;

        if !output.success {
            warn!(
                file = %file_path.display(),
                exit_code = ?output.exit_code,
                "ffprobe could not read the file"
            );
            let message = match output.exit_code {
                Some(code) => format!("ffprobe exited with code {}", code),
                None => "ffprobe was terminated without an exit code".to_string(),
            };
            return Err(DomainError::ProbeFailed(ProbeError::new(
                message,
                output.stderr.trim(),
            )));
        }

        let result = parse_duration(&output.stdout, &output.stderr).map_err(DomainError::ProbeFailed)?;
        debug!(file = %file_path.display(), duration = result.duration_seconds, "Probed duration");
        Ok(result)
    }
}
