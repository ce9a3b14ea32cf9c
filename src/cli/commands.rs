//! Command implementations

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::app::{AppContainer, StagingArea, TrimInteractor};
use crate::cli::args::{InputSource, ProbeArgs, TrimArgs};
use crate::domain::errors::ValidationError;
use crate::domain::model::{TrimOutcome, TrimRequest};
use crate::utils::path::default_output_path;
use crate::utils::time::TimeSpec;

/// Process exit status for each outcome class
pub const EXIT_UNEXPECTED: u8 = 1;
pub const EXIT_VALIDATION: u8 = 2;
pub const EXIT_TOOL_NOT_FOUND: u8 = 3;
pub const EXIT_TOOL_FAILED: u8 = 4;

/// Exit status for an outcome
pub fn exit_status(outcome: &TrimOutcome) -> u8 {
    match outcome {
        TrimOutcome::Success { .. } => 0,
        TrimOutcome::ValidationFailure { .. } => EXIT_VALIDATION,
        TrimOutcome::ToolNotFound { .. } => EXIT_TOOL_NOT_FOUND,
        TrimOutcome::ToolExecutionFailure(_) => EXIT_TOOL_FAILED,
        TrimOutcome::UnexpectedFailure { .. } => EXIT_UNEXPECTED,
    }
}

fn exit_code(outcome: &TrimOutcome) -> ExitCode {
    ExitCode::from(exit_status(outcome))
}

/// Execute the probe command
pub async fn probe(args: ProbeArgs, container: &AppContainer) -> Result<ExitCode> {
    info!("Starting probe operation");

    // Only stdin input needs a scratch directory
    let (input, staging) = match &args.input {
        InputSource::File(path) => (path.clone(), None),
        InputSource::Stdin => {
            let staging = StagingArea::new()?;
            let input = resolve_input(&args.input, &staging).await?;
            (input, Some(staging))
        }
    };
    let interactor = container.trim_interactor();

    let code = match interactor.probe_duration(&input).await {
        Ok(probe) => {
            if args.json {
                let json = serde_json::to_string_pretty(&probe)
                    .context("Failed to serialize probe result to JSON")?;
                println!("{}", json);
            } else {
                let duration = TimeSpec::from_seconds(probe.duration_seconds);
                println!(
                    "Duration: {:.2} seconds ({})",
                    probe.duration_seconds,
                    duration.format_hms()
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            let outcome = TrimOutcome::from(err);
            render(&outcome, args.json)?;
            exit_code(&outcome)
        }
    };

    if let Some(staging) = staging {
        release(staging);
    }
    Ok(code)
}

/// Execute the trim command
pub async fn trim(args: TrimArgs, container: &AppContainer) -> Result<ExitCode> {
    info!("Starting trim operation");

    let staging = StagingArea::new()?;
    let input = resolve_input(&args.input, &staging).await?;
    let interactor = container.trim_interactor();

    // Loading step: report the duration and use it as the default end
    let source = match interactor.probe_duration(&input).await {
        Ok(probe) => probe,
        Err(err) => {
            let outcome = TrimOutcome::from(err);
            render(&outcome, args.json)?;
            release(staging);
            return Ok(exit_code(&outcome));
        }
    };
    info!(
        "Video loaded. Duration: {:.2} seconds",
        source.duration_seconds
    );

    let start = args.start.map_or(0.0, |t| t.as_seconds());
    let end = args.end.map_or(source.duration_seconds, |t| t.as_seconds());
    let destination = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(args.input.path(), start, end));

    info!("Start: {}", TimeSpec::from_seconds(start).format_hms());
    info!("End: {}", TimeSpec::from_seconds(end).format_hms());
    info!("Output: {}", destination.display());

    let request = TrimRequest::new(input, start, end, staging.output_path());
    let outcome = interactor.trim(&request).await;
    let outcome = staging.deliver(outcome, &destination).await;

    if args.verify {
        if let Some(output) = outcome.output_path() {
            let tolerance = container.config().validation.end_tolerance_secs;
            verify_output(
                &interactor,
                output,
                request.span_seconds(),
                source.duration_seconds + tolerance,
            )
            .await;
        }
    }

    render(&outcome, args.json)?;
    release(staging);

    if outcome.is_success() {
        info!("Trim operation completed successfully");
    }
    Ok(exit_code(&outcome))
}

async fn resolve_input(source: &InputSource, staging: &StagingArea) -> Result<PathBuf> {
    match source {
        InputSource::File(path) => Ok(path.clone()),
        InputSource::Stdin => {
            let mut stdin = tokio::io::stdin();
            let staged = staging
                .stage_reader(&mut stdin)
                .await
                .context("Failed to read video from stdin")?;
            Ok(staged)
        }
    }
}

/// Probe the delivered file. Stream copy may start a little before the
/// requested start, so only an output longer than its source is suspicious.
async fn verify_output(interactor: &TrimInteractor, output: &Path, requested: f64, longest: f64) {
    match interactor.probe_duration(output).await {
        Ok(probe) if probe.duration_seconds > longest => {
            warn!(
                "Trimmed video is {:.2}s, longer than its source ({:.2}s)",
                probe.duration_seconds, longest
            );
        }
        Ok(probe) => {
            info!(
                actual = probe.duration_seconds,
                requested,
                "Verified trimmed video: {:.2}s ({:+.2}s from the requested span)",
                probe.duration_seconds,
                probe.duration_seconds - requested
            );
        }
        Err(err) => warn!("Could not verify trimmed video: {}", err),
    }
}

fn release(staging: StagingArea) {
    if let Err(e) = staging.close() {
        warn!("{}", e);
    }
}

/// Print the outcome: JSON on stdout, or a human message (stdout for
/// success, stderr for failures)
fn render(outcome: &TrimOutcome, json: bool) -> Result<()> {
    if json {
        let json = serde_json::to_string_pretty(outcome)
            .context("Failed to serialize outcome to JSON")?;
        println!("{}", json);
        return Ok(());
    }

    match outcome {
        TrimOutcome::Success { output_path } => {
            println!("Video trimmed successfully: {}", output_path.display());
        }
        TrimOutcome::ValidationFailure { reason } => {
            eprintln!("Invalid trim request: {}", reason);
            if let ValidationError::Probe(probe) = reason {
                if !probe.diagnostics.trim().is_empty() {
                    eprintln!("{}", probe.diagnostics.trim_end());
                }
            }
        }
        TrimOutcome::ToolNotFound { tool, program } => {
            eprintln!(
                "{} was not found (tried `{}`).",
                tool,
                program.display()
            );
            eprintln!(
                "Install FFmpeg and make sure `{}` is on PATH, or point --{} / MP4TRIM_{} at it.",
                tool,
                tool,
                tool.to_uppercase()
            );
        }
        TrimOutcome::ToolExecutionFailure(failure) => {
            eprintln!("FFmpeg error: {}", failure);
            if !failure.stderr.trim().is_empty() {
                eprintln!("{}", failure.stderr.trim_end());
            }
        }
        TrimOutcome::UnexpectedFailure { message } => {
            eprintln!("Unexpected error: {}", message);
        }
    }
    Ok(())
}
