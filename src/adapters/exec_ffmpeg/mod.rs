//! FFmpeg execution adapter
//!
//! Issues the stream-copy trim:
//! `ffmpeg -hide_banner -nostdin -loglevel error -y -ss <start> -i file:<input> -t <end-start> -c copy file:<output>`.
//! Seeking on the input and limiting the output to `end - start` seconds
//! stops the copy at absolute source time `end`.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::adapters::process::{file_url, RunError, ToolCommand};
use crate::domain::errors::DomainError;
use crate::domain::model::{ToolFailure, TrimRequest};
use crate::ports::ExecutePort;

const TOOL_NAME: &str = "ffmpeg";

/// FFmpeg-based execution adapter
pub struct FfmpegAdapter {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl FfmpegAdapter {
    /// Create new FFmpeg adapter
    pub fn new(program: impl Into<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Build the stream-copy invocation for a validated request
    pub fn build_command(&self, request: &TrimRequest) -> ToolCommand {
        ToolCommand::new(&self.program)
            .args(["-hide_banner", "-nostdin", "-loglevel", "error", "-y"])
            .arg("-ss")
            .arg(format_seconds(request.start_seconds))
            .arg("-i")
            .arg(file_url(&request.input_path))
            .arg("-t")
            .arg(format_seconds(request.span_seconds()))
            .args(["-c", "copy"])
            .arg(file_url(&request.output_path))
            .timeout(self.timeout)
    }
}

/// Seconds with microsecond precision, the resolution ffmpeg accepts
fn format_seconds(seconds: f64) -> String {
    format!("{:.6}", seconds)
}

#[async_trait]
impl ExecutePort for FfmpegAdapter {
    async fn stream_copy(&self, request: &TrimRequest) -> Result<(), DomainError> {
        let command = self.build_command(request);
        info!(
            input = %request.input_path.display(),
            output = %request.output_path.display(),
            start = request.start_seconds,
            end = request.end_seconds,
            "Running stream copy"
        );

        let output = match command.run().await {
            Ok(output) => output,
            Err(RunError::NotFound { program, .. }) => {
                return Err(DomainError::ToolMissing {
                    tool: TOOL_NAME.to_string(),
                    program,
                });
            }
            Err(err @ RunError::TimedOut { .. }) => {
                warn!("{}", err);
                // The process was started, so its output may be partial
                return Err(DomainError::ToolFailed(ToolFailure {
                    exit_code: None,
                    stdout: String::new(),
                    stderr: err.to_string(),
                }));
            }
            Err(err @ RunError::Io { .. }) => return Err(DomainError::Unexpected(err.to_string())),
        };

        if !output.success {
            warn!(exit_code = ?output.exit_code, "ffmpeg stream copy failed");
            return Err(DomainError::ToolFailed(ToolFailure {
                exit_code: output.exit_code,
                stdout: output.stdout,
                stderr: output.stderr,
            }));
        }

        if !output.stderr.trim().is_empty() {
            debug!(diagnostics = %output.stderr.trim(), "ffmpeg reported diagnostics");
        }
        Ok(())
    }
}
