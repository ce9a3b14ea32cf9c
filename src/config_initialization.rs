//! Configuration initialization and hierarchy management
//!
//! Precedence: CLI flag > `MP4TRIM_*` environment variable > config file > defaults.
//! clap already folds each flag together with its environment variable, so
//! only the file layer and the argument layer are merged here.

use tracing::debug;

use crate::adapters::{AppConfig, TomlConfigAdapter};
use crate::cli::Cli;
use crate::error::Mp4TrimResult;

/// Build the effective configuration for this invocation
pub fn initialize_configuration(cli: &Cli) -> Mp4TrimResult<AppConfig> {
    let mut config = TomlConfigAdapter::discover(cli.config.as_deref())?;

    let overrides = apply_cli_overrides(&mut config, cli);
    debug!("Applied {} CLI/environment overrides", overrides);

    config.validate()?;
    Ok(config)
}

/// Apply CLI (and environment) overrides; returns how many were applied
fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) -> usize {
    let mut overrides = 0;

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
        overrides += 1;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
        overrides += 1;
    }
    if let Some(ffmpeg) = &cli.ffmpeg {
        config.tools.ffmpeg = ffmpeg.clone();
        overrides += 1;
    }
    if let Some(ffprobe) = &cli.ffprobe {
        config.tools.ffprobe = ffprobe.clone();
        overrides += 1;
    }
    if let Some(secs) = cli.probe_timeout {
        config.limits.probe_timeout_secs = secs;
        overrides += 1;
    }
    if let Some(secs) = cli.trim_timeout {
        config.limits.trim_timeout_secs = secs;
        overrides += 1;
    }
    if let Some(tolerance) = cli.end_tolerance {
        config.validation.end_tolerance_secs = tolerance;
        overrides += 1;
    }

    overrides
}
